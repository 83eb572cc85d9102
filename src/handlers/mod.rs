//! Downstream consumers of the dispatch pipeline.
//!
//! This module contains:
//! - DbLog: persistence-log handler behind the `DatabaseLogger` trait
//! - PartnerA: simulated partner notification (never fails)
//! - PartnerB: instrument-notification file emitter

use std::path::PathBuf;
use std::sync::Arc;

use crate::dispatch::{CommandDispatcher, Mediator, Orchestrator};
use crate::domain::CommandKind;

pub mod db_log;
pub mod partner_a;
pub mod partner_b;

// Re-export commonly used types
pub use db_log::{DatabaseLogger, DatabaseLoggerSimulator, LogEventHandler};
pub use partner_a::NotifyPartnerAHandler;
pub use partner_b::{
    ProcessPartnerBHandler, DEFAULT_OUTPUT_FILE, INSTRUMENT_NOTIFICATION_EVENT,
};

/// Wire the standard pipeline: the three command handlers bound to their
/// kinds, and the orchestrator as the sole event subscriber.
pub fn default_mediator(output_path: PathBuf) -> Mediator {
    let dispatcher = Arc::new(
        CommandDispatcher::builder()
            .register(
                CommandKind::LogEvent,
                Arc::new(LogEventHandler::new(Arc::new(DatabaseLoggerSimulator))),
            )
            .register(
                CommandKind::NotifyPartnerA,
                Arc::new(NotifyPartnerAHandler),
            )
            .register(
                CommandKind::ProcessPartnerB,
                Arc::new(ProcessPartnerBHandler::new(output_path)),
            )
            .build(),
    );

    Mediator::builder(dispatcher.clone())
        .subscribe(Arc::new(Orchestrator::new(dispatcher)))
        .build()
}
