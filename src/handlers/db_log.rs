//! Database-log consumer.
//!
//! The core only depends on the [`DatabaseLogger`] trait; the simulator
//! stands in for a real persistence engine. Sink failures are not swallowed
//! here so the middleware records the failed timing.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::dispatch::CommandHandler;
use crate::domain::Command;

/// Persistence sink for processed event types.
pub trait DatabaseLogger: Send + Sync {
    fn log_event(&self, event_type: &str, timestamp: DateTime<Utc>) -> Result<()>;
}

/// Writes the "database" record as an info log line.
#[derive(Debug, Default)]
pub struct DatabaseLoggerSimulator;

impl DatabaseLogger for DatabaseLoggerSimulator {
    fn log_event(&self, event_type: &str, timestamp: DateTime<Utc>) -> Result<()> {
        info!(
            event_type,
            timestamp = %timestamp.to_rfc3339(),
            "database log simulation"
        );
        Ok(())
    }
}

pub struct LogEventHandler {
    db: Arc<dyn DatabaseLogger>,
}

impl LogEventHandler {
    pub fn new(db: Arc<dyn DatabaseLogger>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommandHandler for LogEventHandler {
    fn name(&self) -> &'static str {
        "log_event"
    }

    async fn handle(&self, command: &Command) -> Result<()> {
        let Command::LogEvent(cmd) = command else {
            anyhow::bail!("log_event handler received {}", command.name());
        };

        debug!(
            event_type = %cmd.event_type,
            correlation_id = %cmd.correlation_id,
            "persisting event type"
        );
        self.db.log_event(&cmd.event_type, cmd.timestamp)
    }
}
