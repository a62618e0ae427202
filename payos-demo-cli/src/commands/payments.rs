//! Payment link commands - create, get, cancel

use anyhow::Result;
use payos_lib::model::Model;
use payos_lib::types::{CreatePaymentLinkRequest, ItemData, PaymentLink};

use crate::ui;

/// Options shared by `create` and `legacy-create`.
pub struct CreateArgs {
    pub amount: i64,
    pub description: String,
    pub order_code: Option<i64>,
    pub item: Option<String>,
    pub return_url: String,
    pub cancel_url: String,
    pub expires_in_minutes: Option<i64>,
}

impl CreateArgs {
    pub fn to_request(&self) -> CreatePaymentLinkRequest {
        let order_code = self
            .order_code
            .unwrap_or_else(super::generated_order_code);
        let mut request = CreatePaymentLinkRequest::new(
            order_code,
            self.amount,
            self.description.clone(),
            self.cancel_url.clone(),
            self.return_url.clone(),
        );
        if let Some(name) = &self.item {
            request = request.with_items(vec![ItemData {
                name: name.clone(),
                quantity: 1,
                price: self.amount,
                unit: None,
                tax_percentage: None,
            }]);
        }
        if let Some(minutes) = self.expires_in_minutes {
            let expires = chrono::Utc::now() + chrono::Duration::minutes(minutes);
            request = request.with_expired_at(expires.timestamp());
        }
        request
    }
}

pub async fn create(args: CreateArgs, verbose: bool) -> Result<()> {
    let client = super::client()?;
    let request = args.to_request();

    ui::header("Create Payment Link");
    ui::key_value("Order code", &request.order_code.to_string());
    ui::key_value("Amount", &request.amount.to_string());
    if verbose {
        ui::json(&request.model_dump_camel_case()?.into());
    }

    let response = client.payment_requests().create(&request).await?;

    ui::success("Payment link created");
    ui::key_value("Payment link id", &response.payment_link_id);
    ui::key_value("Status", response.status.as_str());
    ui::key_value("Checkout URL", &response.checkout_url);
    if let Some(expired_at) = response.expired_at {
        ui::key_value("Expires at", &format_timestamp(expired_at));
    }
    Ok(())
}

pub async fn get(reference: &str, verbose: bool) -> Result<()> {
    let client = super::client()?;
    let link = client
        .payment_requests()
        .get(super::link_ref(reference))
        .await?;

    ui::header("Payment Link");
    print_link(&link, verbose)
}

pub async fn cancel(reference: &str, reason: Option<&str>, verbose: bool) -> Result<()> {
    let client = super::client()?;
    let link = client
        .payment_requests()
        .cancel(super::link_ref(reference), reason)
        .await?;

    ui::success("Payment link cancelled");
    print_link(&link, verbose)
}

fn print_link(link: &PaymentLink, verbose: bool) -> Result<()> {
    ui::key_value("Id", &link.id);
    ui::key_value("Order code", &link.order_code.to_string());
    ui::key_value("Status", link.status.as_str());
    ui::key_value("Amount", &link.amount.to_string());
    ui::key_value("Paid", &link.amount_paid.to_string());
    ui::key_value("Remaining", &link.amount_remaining.to_string());
    if let Some(reason) = &link.cancellation_reason {
        ui::key_value("Cancellation reason", reason);
    }

    if !link.transactions.is_empty() {
        ui::separator();
        for tx in &link.transactions {
            ui::key_value(&tx.reference, &format!("{} at {}", tx.amount, tx.transaction_date_time));
        }
    }

    if verbose {
        ui::separator();
        ui::json(&link.model_dump_camel_case()?.into());
    }
    Ok(())
}

fn format_timestamp(secs: i64) -> String {
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}
