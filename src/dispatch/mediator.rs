//! In-process mediator: event fan-out and command routing.
//!
//! Two operation kinds, bound to handlers at startup through explicit
//! registries rather than runtime reflection:
//!
//! - `publish`: fire one event at every registered subscriber in
//!   registration order; subscriber failures are logged and isolated.
//! - `send`: route one command to exactly one handler, looked up by its
//!   [`CommandKind`]; handler failures propagate to the caller.
//!
//! Every `send` passes through the timing middleware exactly once.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::{Command, CommandKind, TermSheetProcessed};

use super::middleware;

/// A consumer of published term-sheet events.
#[async_trait]
pub trait EventSubscriber: Send + Sync {
    /// Human-readable subscriber name for log lines
    fn name(&self) -> &'static str;

    /// React to one published event
    async fn on_event(&self, event: &TermSheetProcessed) -> Result<()>;
}

/// A handler for exactly one command kind.
///
/// The dispatcher guarantees a handler only ever sees the variant it was
/// registered for; receiving anything else is a wiring bug and an error.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Human-readable handler name for log lines
    fn name(&self) -> &'static str;

    /// Consume one command
    async fn handle(&self, command: &Command) -> Result<()>;
}

/// Routes each command to the single handler registered for its kind,
/// wrapped in the timing middleware.
pub struct CommandDispatcher {
    handlers: HashMap<CommandKind, Arc<dyn CommandHandler>>,
}

impl CommandDispatcher {
    pub fn builder() -> CommandDispatcherBuilder {
        CommandDispatcherBuilder {
            handlers: HashMap::new(),
        }
    }

    /// Dispatch one command to its registered handler.
    ///
    /// Errors if no handler is registered for the command's kind; handler
    /// failures propagate unchanged.
    pub async fn send(&self, command: &Command) -> Result<()> {
        let handler = self
            .handlers
            .get(&command.kind())
            .ok_or_else(|| anyhow!("no handler registered for {}", command.name()))?;

        middleware::timed(command, || handler.handle(command)).await
    }
}

pub struct CommandDispatcherBuilder {
    handlers: HashMap<CommandKind, Arc<dyn CommandHandler>>,
}

impl CommandDispatcherBuilder {
    /// Bind the handler for one command kind. Re-binding a kind replaces
    /// the earlier handler.
    pub fn register(mut self, kind: CommandKind, handler: Arc<dyn CommandHandler>) -> Self {
        self.handlers.insert(kind, handler);
        self
    }

    pub fn build(self) -> CommandDispatcher {
        CommandDispatcher {
            handlers: self.handlers,
        }
    }
}

/// The pipeline entry point: publish for events, send for commands.
pub struct Mediator {
    subscribers: Vec<Arc<dyn EventSubscriber>>,
    dispatcher: Arc<CommandDispatcher>,
}

impl Mediator {
    pub fn builder(dispatcher: Arc<CommandDispatcher>) -> MediatorBuilder {
        MediatorBuilder {
            subscribers: Vec::new(),
            dispatcher,
        }
    }

    /// Fan one event out to every subscriber, in registration order.
    ///
    /// A failing subscriber is logged with the event's correlation id and
    /// never blocks the subscribers after it. There is no return payload.
    pub async fn publish(&self, event: &TermSheetProcessed) {
        debug!(
            correlation_id = %event.correlation_id,
            subscribers = self.subscribers.len(),
            "publishing term-sheet event"
        );

        for subscriber in &self.subscribers {
            if let Err(e) = subscriber.on_event(event).await {
                error!(
                    subscriber = subscriber.name(),
                    correlation_id = %event.correlation_id,
                    error = %e,
                    "event subscriber failed, continuing with remaining subscribers"
                );
            }
        }
    }

    /// Dispatch one command to exactly one handler. Failures propagate.
    pub async fn send(&self, command: &Command) -> Result<()> {
        self.dispatcher.send(command).await
    }
}

pub struct MediatorBuilder {
    subscribers: Vec<Arc<dyn EventSubscriber>>,
    dispatcher: Arc<CommandDispatcher>,
}

impl MediatorBuilder {
    /// Append a subscriber; publish order follows registration order.
    pub fn subscribe(mut self, subscriber: Arc<dyn EventSubscriber>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    pub fn build(self) -> Mediator {
        Mediator {
            subscribers: self.subscribers,
            dispatcher: self.dispatcher,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::{LogEventCommand, TermSheetRecord};

    struct Recording {
        seen: Mutex<Vec<String>>,
        fail: bool,
    }

    impl Recording {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                seen: Mutex::new(Vec::new()),
                fail,
            })
        }
    }

    #[async_trait]
    impl EventSubscriber for Recording {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn on_event(&self, event: &TermSheetProcessed) -> Result<()> {
            self.seen
                .lock()
                .unwrap()
                .push(event.correlation_id.to_string());
            if self.fail {
                anyhow::bail!("subscriber exploded");
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CommandHandler for Recording {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn handle(&self, command: &Command) -> Result<()> {
            self.seen.lock().unwrap().push(command.name().to_string());
            if self.fail {
                anyhow::bail!("handler exploded");
            }
            Ok(())
        }
    }

    fn event() -> TermSheetProcessed {
        TermSheetProcessed::new(
            TermSheetRecord {
                event_type: "9097".to_string(),
                product_name_full: "Acme Bond".to_string(),
                ibt_type_code: "T1".to_string(),
                isin: "CH0000000000".to_string(),
            },
            Uuid::new_v4(),
        )
    }

    #[tokio::test]
    async fn test_publish_reaches_all_subscribers_despite_failure() {
        let failing = Recording::new(true);
        let ok = Recording::new(false);
        let mediator = Mediator::builder(Arc::new(CommandDispatcher::builder().build()))
            .subscribe(failing.clone())
            .subscribe(ok.clone())
            .build();

        mediator.publish(&event()).await;

        assert_eq!(failing.seen.lock().unwrap().len(), 1);
        assert_eq!(ok.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_send_routes_to_registered_handler() {
        let handler = Recording::new(false);
        let dispatcher = CommandDispatcher::builder()
            .register(CommandKind::LogEvent, handler.clone())
            .build();

        let command = Command::LogEvent(LogEventCommand {
            event_type: "9097".to_string(),
            timestamp: Utc::now(),
            correlation_id: Uuid::new_v4(),
        });
        dispatcher.send(&command).await.unwrap();

        assert_eq!(
            handler.seen.lock().unwrap().as_slice(),
            ["LogEventCommand"]
        );
    }

    #[tokio::test]
    async fn test_send_without_handler_is_an_error() {
        let dispatcher = CommandDispatcher::builder().build();

        let command = Command::LogEvent(LogEventCommand {
            event_type: "9097".to_string(),
            timestamp: Utc::now(),
            correlation_id: Uuid::new_v4(),
        });
        let err = dispatcher.send(&command).await.unwrap_err();

        assert!(err.to_string().contains("no handler registered"));
    }

    #[tokio::test]
    async fn test_send_propagates_handler_failure() {
        let handler = Recording::new(true);
        let dispatcher = CommandDispatcher::builder()
            .register(CommandKind::LogEvent, handler)
            .build();

        let command = Command::LogEvent(LogEventCommand {
            event_type: "9097".to_string(),
            timestamp: Utc::now(),
            correlation_id: Uuid::new_v4(),
        });

        assert!(dispatcher.send(&command).await.is_err());
    }
}
