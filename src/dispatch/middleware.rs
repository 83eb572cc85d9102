//! Timing and correlation middleware for command dispatch.
//!
//! Wraps a single dispatch closure: logs the command name and correlation id
//! before the handler runs, awaits the handler exactly once, then logs the
//! elapsed wall-clock time and pass/fail. The handler's result passes through
//! untouched.

use std::future::Future;
use std::time::Instant;

use anyhow::Result;
use tracing::{error, info};

use crate::domain::Command;

/// Run one command dispatch under timing/correlation logging.
///
/// Composed once around the dispatcher, never at individual call sites.
pub async fn timed<F, Fut>(command: &Command, next: F) -> Result<()>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let name = command.name();
    let correlation_id = command.correlation_id();

    info!(command = name, %correlation_id, "handling command");
    let start = Instant::now();

    let result = next().await;

    let elapsed_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(()) => {
            info!(command = name, %correlation_id, elapsed_ms, "handled command");
        }
        Err(e) => {
            error!(command = name, %correlation_id, elapsed_ms, error = %e, "command failed");
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::LogEventCommand;

    fn command() -> Command {
        Command::LogEvent(LogEventCommand {
            event_type: "9097".to_string(),
            timestamp: Utc::now(),
            correlation_id: Uuid::new_v4(),
        })
    }

    #[tokio::test]
    async fn test_invokes_next_exactly_once() {
        let calls = AtomicUsize::new(0);
        let result = timed(&command(), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_handler_error_passes_through_unchanged() {
        let result = timed(&command(), || async {
            Err(anyhow::anyhow!("sink unavailable"))
        })
        .await;

        assert_eq!(result.unwrap_err().to_string(), "sink unavailable");
    }
}
