//! Domain types for the term-sheet pipeline.
//!
//! This module contains the core data structures:
//! - Record: the validated term-sheet fields
//! - Events: the envelope published after a successful extraction
//! - Commands: the three projections derived from one event

pub mod commands;
pub mod events;
pub mod record;

// Re-export commonly used types
pub use commands::{
    Command, CommandKind, LogEventCommand, NotifyPartnerACommand, ProcessPartnerBCommand,
};
pub use events::TermSheetProcessed;
pub use record::TermSheetRecord;
