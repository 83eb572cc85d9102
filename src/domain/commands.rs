//! Commands derived from a processed term sheet.
//!
//! Each command is a pure projection of [`TermSheetProcessed`]: the
//! orchestrator always derives all three together, and each one is consumed
//! exactly once by its registered handler. The correlation id is a mandatory
//! field on every variant rather than an optional capability probed at
//! dispatch time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::events::TermSheetProcessed;

/// Persist the event type and timestamp to the database log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEventCommand {
    pub event_type: String,
    pub timestamp: DateTime<Utc>,
    pub correlation_id: Uuid,
}

/// Notify partner A about the instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyPartnerACommand {
    pub product_name_full: String,
    pub ibt_type_code: String,
    pub event_type: String,
    pub isin: String,
    pub correlation_id: Uuid,
}

/// Emit the partner B instrument-notification document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessPartnerBCommand {
    pub event_type: String,
    pub isin: String,
    pub processing_timestamp: DateTime<Utc>,
    pub correlation_id: Uuid,
}

/// Tagged union over everything the dispatcher can route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    LogEvent(LogEventCommand),
    NotifyPartnerA(NotifyPartnerACommand),
    ProcessPartnerB(ProcessPartnerBCommand),
}

/// Discriminant used as the registry key when binding handlers at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    LogEvent,
    NotifyPartnerA,
    ProcessPartnerB,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::LogEvent(_) => CommandKind::LogEvent,
            Command::NotifyPartnerA(_) => CommandKind::NotifyPartnerA,
            Command::ProcessPartnerB(_) => CommandKind::ProcessPartnerB,
        }
    }

    /// Logical name used in dispatch log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Command::LogEvent(_) => "LogEventCommand",
            Command::NotifyPartnerA(_) => "NotifyPartnerACommand",
            Command::ProcessPartnerB(_) => "ProcessPartnerBCommand",
        }
    }

    /// Correlation id of the ingestion cycle this command belongs to.
    /// Total over all variants, so middleware never has to probe for it.
    pub fn correlation_id(&self) -> Uuid {
        match self {
            Command::LogEvent(c) => c.correlation_id,
            Command::NotifyPartnerA(c) => c.correlation_id,
            Command::ProcessPartnerB(c) => c.correlation_id,
        }
    }
}

impl LogEventCommand {
    pub fn from_event(event: &TermSheetProcessed) -> Self {
        Self {
            event_type: event.event_type.clone(),
            timestamp: event.processing_timestamp,
            correlation_id: event.correlation_id,
        }
    }
}

impl NotifyPartnerACommand {
    pub fn from_event(event: &TermSheetProcessed) -> Self {
        Self {
            product_name_full: event.product_name_full.clone(),
            ibt_type_code: event.ibt_type_code.clone(),
            event_type: event.event_type.clone(),
            isin: event.isin.clone(),
            correlation_id: event.correlation_id,
        }
    }
}

impl ProcessPartnerBCommand {
    pub fn from_event(event: &TermSheetProcessed) -> Self {
        Self {
            event_type: event.event_type.clone(),
            isin: event.isin.clone(),
            processing_timestamp: event.processing_timestamp,
            correlation_id: event.correlation_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TermSheetRecord;

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

    #[test]
    fn test_projections_share_correlation_id() {
        let event = event();

        let log = LogEventCommand::from_event(&event);
        let partner_a = NotifyPartnerACommand::from_event(&event);
        let partner_b = ProcessPartnerBCommand::from_event(&event);

        assert_eq!(log.correlation_id, event.correlation_id);
        assert_eq!(partner_a.correlation_id, event.correlation_id);
        assert_eq!(partner_b.correlation_id, event.correlation_id);
        assert_eq!(log.timestamp, event.processing_timestamp);
        assert_eq!(partner_b.processing_timestamp, event.processing_timestamp);
    }

    #[test]
    fn test_command_accessors() {
        let event = event();
        let command = Command::NotifyPartnerA(NotifyPartnerACommand::from_event(&event));

        assert_eq!(command.kind(), CommandKind::NotifyPartnerA);
        assert_eq!(command.name(), "NotifyPartnerACommand");
        assert_eq!(command.correlation_id(), event.correlation_id);
    }

    #[test]
    fn test_command_serialization() {
        let event = event();
        let command = Command::LogEvent(LogEventCommand::from_event(&event));

        let json = serde_json::to_string(&command).unwrap();
        let parsed: Command = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, command);
    }
}
