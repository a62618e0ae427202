//! CLI command implementations

pub mod invoices;
pub mod legacy;
pub mod payments;
pub mod webhooks;

use anyhow::{Context, Result};
use payos_lib::{PayOS, PayOSConfig};

/// Build a client from the `PAYOS_*` environment variables.
pub fn client() -> Result<PayOS> {
    let config = PayOSConfig::from_env().context("Could not read payOS credentials")?;
    Ok(PayOS::new(config)?)
}

/// Parse a payment link reference: digits are an order code, anything else an id.
pub fn link_ref(value: &str) -> payos_lib::resources::PaymentLinkRef {
    match value.parse::<i64>() {
        Ok(order_code) => order_code.into(),
        Err(_) => value.into(),
    }
}

/// Order code derived from the current time, unique enough for a demo.
pub fn generated_order_code() -> i64 {
    chrono::Utc::now().timestamp_millis() % 9_007_199_254_740_991
}
