//! Event dispatch pipeline.
//!
//! This module contains:
//! - Mediator: publish/send with explicit startup-time registries
//! - Middleware: timing/correlation wrapper around every command dispatch
//! - Orchestrator: derives the three downstream commands from one event

pub mod mediator;
pub mod middleware;
pub mod orchestrator;

// Re-export commonly used types
pub use mediator::{
    CommandDispatcher, CommandDispatcherBuilder, CommandHandler, EventSubscriber, Mediator,
    MediatorBuilder,
};
pub use orchestrator::{derive_commands, Orchestrator};
