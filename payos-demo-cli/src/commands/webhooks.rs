//! Webhook commands - confirm a URL, verify a saved delivery

use std::path::Path;

use anyhow::{Context, Result};
use payos_lib::model::Model;

use crate::ui;

pub async fn confirm(url: &str, _verbose: bool) -> Result<()> {
    let client = super::client()?;
    let confirmed = client.webhooks().confirm(url).await?;

    ui::success("Webhook URL confirmed");
    ui::key_value("Webhook URL", &confirmed.webhook_url);
    ui::key_value("Channel", &confirmed.name);
    ui::key_value("Bank", &confirmed.short_name);
    ui::key_value("Account", &format!("{} ({})", confirmed.account_number, confirmed.account_name));
    Ok(())
}

pub fn verify(file: &Path, verbose: bool) -> Result<()> {
    let body = std::fs::read(file)
        .with_context(|| format!("Failed to read webhook body from {}", file.display()))?;
    let client = super::client()?;

    match client.webhooks().verify(body) {
        Ok(data) => {
            ui::success("Webhook signature is valid");
            ui::key_value("Order code", &data.order_code.to_string());
            ui::key_value("Amount", &data.amount.to_string());
            ui::key_value("Reference", &data.reference);
            ui::key_value("Payment link id", &data.payment_link_id);
            if verbose {
                ui::separator();
                ui::json(&data.model_dump_camel_case()?.into());
            }
            Ok(())
        }
        Err(e) => {
            ui::error(&format!("Webhook rejected: {}", e));
            Err(e.into())
        }
    }
}
