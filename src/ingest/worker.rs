//! The ingestion cycle itself.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::dispatch::Mediator;
use crate::domain::TermSheetProcessed;
use crate::extract::{self, ExtractError};

/// Cooperative shutdown signal checked right before publish.
///
/// Extraction itself is not interruptible once begun; the flag only stops a
/// cycle from fanning out after cancellation was requested.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// How one ingestion cycle ended.
#[derive(Debug)]
pub enum CycleOutcome {
    /// The record was extracted and the event published.
    Published { correlation_id: Uuid },

    /// Extraction failed; nothing was published. Already logged once by
    /// the extractor.
    ExtractionFailed(ExtractError),

    /// Shutdown was requested before publish; nothing was published.
    Cancelled,
}

impl CycleOutcome {
    pub fn published(&self) -> bool {
        matches!(self, CycleOutcome::Published { .. })
    }
}

/// Run one ingestion cycle: extract, envelope, publish.
///
/// Invoked once by an external scheduler (the CLI); there is no retry and
/// no loop here.
pub async fn run_cycle(
    config: &Config,
    mediator: &Mediator,
    shutdown: &ShutdownFlag,
) -> CycleOutcome {
    info!(input = %config.input_path.display(), "ingestion cycle starting");

    let record = match extract::extract_from_file(&config.input_path) {
        Ok(record) => record,
        Err(e) => {
            error!(
                input = %config.input_path.display(),
                "failed to extract term-sheet data, no event published"
            );
            return CycleOutcome::ExtractionFailed(e);
        }
    };

    if shutdown.is_requested() {
        warn!("shutdown requested before publish, skipping fan-out");
        return CycleOutcome::Cancelled;
    }

    let correlation_id = Uuid::new_v4();
    let event = TermSheetProcessed::new(record, correlation_id);

    info!(%correlation_id, "term sheet extracted, publishing event");
    mediator.publish(&event).await;

    info!(%correlation_id, "ingestion cycle finished");
    CycleOutcome::Published { correlation_id }
}
