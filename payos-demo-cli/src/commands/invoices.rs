//! Invoice commands - list and download e-invoices

use std::path::Path;

use anyhow::{Context, Result};
use payos_lib::model::Model;

use crate::ui;

pub async fn list(reference: &str, download_dir: Option<&Path>, verbose: bool) -> Result<()> {
    let client = super::client()?;
    let link = super::link_ref(reference);
    let invoices = client.payment_requests().invoices();
    let info = invoices.get(link.clone()).await?;

    ui::header("Invoices");
    if info.invoices.is_empty() {
        ui::info("No invoices issued for this payment link");
        return Ok(());
    }

    for invoice in &info.invoices {
        ui::key_value("Invoice id", &invoice.invoice_id);
        ui::key_value("Number", invoice.invoice_number.as_deref().unwrap_or("-"));
        ui::key_value("Issued", invoice.issued_datetime.as_deref().unwrap_or("-"));
        ui::key_value("Tax code", invoice.code_of_tax.as_deref().unwrap_or("-"));
        if verbose {
            ui::json(&invoice.model_dump_camel_case()?.into());
        }

        if let Some(dir) = download_dir {
            // Only issued invoices have a file behind them.
            if invoice.code_of_tax.is_none() {
                ui::warning("Not issued yet, skipping download");
            } else {
                let file = invoices.download(&invoice.invoice_id, link.clone()).await?;
                let path = file
                    .save_to_directory(dir)
                    .with_context(|| format!("Could not save invoice to {}", dir.display()))?;
                ui::success(&format!("Saved {} bytes to {}", file.size(), path.display()));
            }
        }
        ui::separator();
    }
    Ok(())
}
