//! Partner B file emitter.
//!
//! Only reacts to instrument-notification events (event type "9097"). For
//! those it writes a fixed-shape XML document with the processing timestamp
//! (RFC 3339, round-trippable) and the ISIN. Any other event type is skipped
//! silently; a matching event with an empty ISIN is skipped with a warning.
//! Write failures are logged with the correlation id and propagate.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event as XmlEvent};
use quick_xml::Writer;
use tracing::{debug, error, info, warn};

use crate::dispatch::CommandHandler;
use crate::domain::Command;

/// Event type code denoting an instrument notification.
pub const INSTRUMENT_NOTIFICATION_EVENT: &str = "9097";

/// Default output file name, relative to the working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "InstrumentNotification.xml";

pub struct ProcessPartnerBHandler {
    output_path: PathBuf,
}

impl ProcessPartnerBHandler {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }
}

/// Render the notification document: root `InstrumentNotification` with
/// `Timespan` (RFC 3339) and `ISIN` children.
pub fn render_notification(timestamp: DateTime<Utc>, isin: &str) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(XmlEvent::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(XmlEvent::Start(BytesStart::new("InstrumentNotification")))?;
    writer.write_event(XmlEvent::Start(BytesStart::new("Timespan")))?;
    writer.write_event(XmlEvent::Text(BytesText::new(&timestamp.to_rfc3339())))?;
    writer.write_event(XmlEvent::End(BytesEnd::new("Timespan")))?;
    writer.write_event(XmlEvent::Start(BytesStart::new("ISIN")))?;
    writer.write_event(XmlEvent::Text(BytesText::new(isin)))?;
    writer.write_event(XmlEvent::End(BytesEnd::new("ISIN")))?;
    writer.write_event(XmlEvent::End(BytesEnd::new("InstrumentNotification")))?;

    Ok(writer.into_inner())
}

#[async_trait]
impl CommandHandler for ProcessPartnerBHandler {
    fn name(&self) -> &'static str {
        "process_partner_b"
    }

    async fn handle(&self, command: &Command) -> Result<()> {
        let Command::ProcessPartnerB(cmd) = command else {
            anyhow::bail!("process_partner_b handler received {}", command.name());
        };

        if cmd.event_type != INSTRUMENT_NOTIFICATION_EVENT {
            debug!(
                event_type = %cmd.event_type,
                required = INSTRUMENT_NOTIFICATION_EVENT,
                correlation_id = %cmd.correlation_id,
                "skipping partner B notification, event type does not match"
            );
            return Ok(());
        }

        if cmd.isin.is_empty() {
            warn!(
                correlation_id = %cmd.correlation_id,
                "skipping partner B notification file: ISIN is missing"
            );
            return Ok(());
        }

        let xml = render_notification(cmd.processing_timestamp, &cmd.isin)?;
        if let Err(e) = tokio::fs::write(&self.output_path, &xml).await {
            error!(
                path = %self.output_path.display(),
                correlation_id = %cmd.correlation_id,
                error = %e,
                "failed to write partner B notification file"
            );
            return Err(e).with_context(|| {
                format!("writing notification file {}", self.output_path.display())
            });
        }

        info!(
            path = %self.output_path.display(),
            correlation_id = %cmd.correlation_id,
            "wrote partner B notification file"
        );
        Ok(())
    }
}
