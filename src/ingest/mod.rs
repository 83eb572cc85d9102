//! One-shot ingestion worker.
//!
//! A single cycle reads the configured term-sheet file, extracts the record,
//! and publishes one [`TermSheetProcessed`] event through the mediator. The
//! cycle runs start-to-finish on one logical thread of control; all state is
//! cycle-local.

pub mod worker;

// Re-export commonly used types
pub use worker::{run_cycle, CycleOutcome, ShutdownFlag};
