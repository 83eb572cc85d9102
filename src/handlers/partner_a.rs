//! Partner A notification consumer.
//!
//! Simulates the partner email as a block of info log lines. Purely
//! observational; it never fails.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::dispatch::CommandHandler;
use crate::domain::Command;

#[derive(Debug, Default)]
pub struct NotifyPartnerAHandler;

#[async_trait]
impl CommandHandler for NotifyPartnerAHandler {
    fn name(&self) -> &'static str {
        "notify_partner_a"
    }

    async fn handle(&self, command: &Command) -> Result<()> {
        let Command::NotifyPartnerA(cmd) = command else {
            anyhow::bail!("notify_partner_a handler received {}", command.name());
        };

        info!(correlation_id = %cmd.correlation_id, "--- email to partner A ---");
        info!(product_name_full = %cmd.product_name_full, "  product");
        info!(ibt_type_code = %cmd.ibt_type_code, "  IBT type code");
        info!(event_type = %cmd.event_type, "  event type");
        info!(isin = %cmd.isin, "  ISIN");
        info!(correlation_id = %cmd.correlation_id, "--- end email simulation ---");

        Ok(())
    }
}
