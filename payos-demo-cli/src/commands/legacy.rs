//! Legacy command - drive the deprecated flat API

#![allow(deprecated)]

use anyhow::Result;
use payos_lib::legacy::{LegacyPayOSError, PaymentData};
use payos_lib::model::Model;
use payos_lib::PayOS;
use serde_json::Value;

use super::payments::CreateArgs;
use crate::ui;

pub async fn create(args: CreateArgs, _verbose: bool) -> Result<()> {
    let config = payos_lib::PayOSConfig::from_env()?;
    let client = PayOS::builder(config)
        .on_deprecation(|notice| ui::warning(&notice.to_string()))
        .build()?;

    ui::header("Create Payment Link (legacy)");
    ui::info("Building the request from camelCase keys");
    let camel: Value = args.to_request().model_dump_camel_case()?.into();
    let payment_data = PaymentData::construct_legacy(camel)?;

    match client.create_payment_link(&payment_data).await {
        Ok(result) => {
            ui::success("Payment link created");
            ui::key_value("checkoutUrl", &result.checkout_url);
            ui::separator();
            ui::json(&result.to_json()?.into());
            Ok(())
        }
        Err(e) => {
            report(&e);
            Err(e.into())
        }
    }
}

fn report(err: &LegacyPayOSError) {
    ui::error(&format!("[{}] {}", err.code(), err.message()));
}
