//! Fan-out orchestrator for processed term sheets.
//!
//! Subscribes to [`TermSheetProcessed`] and derives the three downstream
//! commands in a fixed order: log, partner A, partner B. Commands are sent
//! strictly in sequence, each completing (middleware included) before the
//! next begins.
//!
//! Failure policy: a failed send is logged with the correlation id and the
//! remaining commands are still issued. There is no cross-consumer
//! transaction, no retry, no rollback.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::{
    Command, LogEventCommand, NotifyPartnerACommand, ProcessPartnerBCommand, TermSheetProcessed,
};

use super::mediator::{CommandDispatcher, EventSubscriber};

/// Project one event into its three commands, in dispatch order.
///
/// All three are always derived together; each carries the event's
/// correlation id.
pub fn derive_commands(event: &TermSheetProcessed) -> [Command; 3] {
    [
        Command::LogEvent(LogEventCommand::from_event(event)),
        Command::NotifyPartnerA(NotifyPartnerACommand::from_event(event)),
        Command::ProcessPartnerB(ProcessPartnerBCommand::from_event(event)),
    ]
}

pub struct Orchestrator {
    dispatcher: Arc<CommandDispatcher>,
}

impl Orchestrator {
    pub fn new(dispatcher: Arc<CommandDispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl EventSubscriber for Orchestrator {
    fn name(&self) -> &'static str {
        "orchestrator"
    }

    async fn on_event(&self, event: &TermSheetProcessed) -> Result<()> {
        info!(
            correlation_id = %event.correlation_id,
            "received processed term sheet, dispatching derived commands"
        );

        for command in derive_commands(event) {
            if let Err(e) = self.dispatcher.send(&command).await {
                error!(
                    command = command.name(),
                    correlation_id = %event.correlation_id,
                    error = %e,
                    "command dispatch failed, continuing with remaining commands"
                );
            }
        }

        info!(
            correlation_id = %event.correlation_id,
            "finished dispatching commands for this cycle"
        );
        Ok(())
    }
}
