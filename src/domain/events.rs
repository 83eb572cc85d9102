//! The event envelope published after a successful extraction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::record::TermSheetRecord;

/// Envelope published once per successful ingestion cycle.
///
/// Carries the extracted fields plus the cross-cutting metadata every
/// derived command and log line shares. The correlation id is generated by
/// the publisher at publish time, never by the extractor, and is the sole
/// join key across the fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermSheetProcessed {
    pub event_type: String,
    pub product_name_full: String,
    pub ibt_type_code: String,
    pub isin: String,

    /// When the record was accepted for processing
    pub processing_timestamp: DateTime<Utc>,

    /// Opaque identifier threading this cycle through all derived work
    pub correlation_id: Uuid,
}

impl TermSheetProcessed {
    /// Wrap a validated record with fresh cycle metadata.
    pub fn new(record: TermSheetRecord, correlation_id: Uuid) -> Self {
        Self {
            event_type: record.event_type,
            product_name_full: record.product_name_full,
            ibt_type_code: record.ibt_type_code,
            isin: record.isin,
            processing_timestamp: Utc::now(),
            correlation_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> TermSheetRecord {
        TermSheetRecord {
            event_type: "9097".to_string(),
            product_name_full: "Acme Bond".to_string(),
            ibt_type_code: "T1".to_string(),
            isin: "CH0000000000".to_string(),
        }
    }

    #[test]
    fn test_envelope_carries_record_fields() {
        let correlation_id = Uuid::new_v4();
        let event = TermSheetProcessed::new(record(), correlation_id);

        assert_eq!(event.event_type, "9097");
        assert_eq!(event.product_name_full, "Acme Bond");
        assert_eq!(event.ibt_type_code, "T1");
        assert_eq!(event.isin, "CH0000000000");
        assert_eq!(event.correlation_id, correlation_id);
    }

    #[test]
    fn test_envelope_serialization() {
        let event = TermSheetProcessed::new(record(), Uuid::new_v4());

        let json = serde_json::to_string(&event).unwrap();
        let parsed: TermSheetProcessed = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, event);
    }
}
