//! termflow - instrument term-sheet ingestion and fan-out pipeline
//!
//! Ingests one structured term-sheet document, extracts a fixed set of
//! required fields with namespace-aware path queries, validates completeness,
//! and fans the resulting record out to independent downstream consumers
//! through an in-process event pipeline.
//!
//! # Architecture
//!
//! One ingestion cycle flows through:
//! - `extract`: raw XML → validated record, or a classified failure
//! - `ingest`: wraps the record in an event envelope with a fresh
//!   correlation id and publishes it
//! - `dispatch`: the mediator fans the event out; the orchestrator derives
//!   three commands (log, partner A, partner B), each routed through the
//!   timing/correlation middleware
//! - `handlers`: the concrete consumers
//!
//! # Usage
//!
//! ```bash
//! # Process the configured term sheet once
//! termflow run --input IBT.xml
//!
//! # Inspect what would be extracted
//! termflow extract --input IBT.xml
//! ```

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod extract;
pub mod handlers;
pub mod ingest;

// Re-export main types at crate root for convenience
pub use config::Config;
pub use dispatch::{CommandDispatcher, Mediator, Orchestrator};
pub use domain::{Command, CommandKind, TermSheetProcessed, TermSheetRecord};
pub use extract::{extract_from_file, extract_from_str, ExtractError};
pub use ingest::{run_cycle, CycleOutcome, ShutdownFlag};
