//! Webhook registration and verification.

use serde_json::{json, Value};

use crate::client::PayOS;
use crate::errors::{InvalidSignatureError, PayOSError, WebhookError};
use crate::executors::HttpMethod;
use crate::model::{serialize::to_alias_dict, Model};
use crate::types::{ConfirmWebhookResponse, Webhook, WebhookData};
use crate::Result;

/// A webhook delivery in any of the forms a handler may hold it.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookPayload {
    /// Request body bytes.
    Raw(Vec<u8>),
    /// Decoded JSON.
    Json(Value),
    /// Already parsed.
    Parsed(Webhook),
}

impl From<&[u8]> for WebhookPayload {
    fn from(body: &[u8]) -> Self {
        Self::Raw(body.to_vec())
    }
}

impl From<Vec<u8>> for WebhookPayload {
    fn from(body: Vec<u8>) -> Self {
        Self::Raw(body)
    }
}

impl From<&str> for WebhookPayload {
    fn from(body: &str) -> Self {
        Self::Raw(body.as_bytes().to_vec())
    }
}

impl From<String> for WebhookPayload {
    fn from(body: String) -> Self {
        Self::Raw(body.into_bytes())
    }
}

impl From<Value> for WebhookPayload {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<Webhook> for WebhookPayload {
    fn from(webhook: Webhook) -> Self {
        Self::Parsed(webhook)
    }
}

/// Webhook operations, borrowed from a [`PayOS`] client.
#[derive(Debug, Clone, Copy)]
pub struct Webhooks<'a> {
    client: &'a PayOS,
}

impl<'a> Webhooks<'a> {
    pub(crate) fn new(client: &'a PayOS) -> Self {
        Self { client }
    }

    /// Register `webhook_url` as the channel's webhook endpoint.
    ///
    /// A rejection from the API surfaces as a [`WebhookError`] carrying the
    /// server's message. Transport and signature failures pass through.
    #[tracing::instrument(skip(self))]
    pub async fn confirm(&self, webhook_url: &str) -> Result<ConfirmWebhookResponse> {
        if webhook_url.trim().is_empty() {
            return Err(WebhookError::new("Webhook URL invalid").into());
        }
        self.client
            .send(
                HttpMethod::Post,
                "/confirm-webhook",
                Some(json!({ "webhookUrl": webhook_url })),
                false,
            )
            .await
            .map_err(|err| match err {
                PayOSError::Api(api) if api.status_code.is_some() => {
                    tracing::debug!(status = ?api.status_code, code = ?api.error_code, "webhook URL rejected");
                    WebhookError::new(format!("Webhook validation failed: {}", api.message)).into()
                }
                other => other,
            })
    }

    /// Check a webhook delivery's signature and return its data.
    ///
    /// When the payload arrives as bytes or JSON, the signature is checked
    /// against the `data` object exactly as received; a parsed [`Webhook`]
    /// is checked against its alias dump. No network I/O is performed.
    pub fn verify(&self, payload: impl Into<WebhookPayload>) -> Result<WebhookData> {
        let (webhook, signed_data) = match payload.into() {
            WebhookPayload::Raw(body) => {
                let value: Value = serde_json::from_slice(&body).map_err(schema_error)?;
                parse_webhook(value)?
            }
            WebhookPayload::Json(value) => parse_webhook(value)?,
            WebhookPayload::Parsed(webhook) => {
                let data = Value::Object(to_alias_dict(&webhook.data)?);
                (webhook, data)
            }
        };

        if webhook.signature.is_empty() {
            return Err(InvalidSignatureError::new("Invalid signature").into());
        }
        let expected = self
            .client
            .signer()
            .signature_from_object(&signed_data, self.client.checksum_key());
        if expected.as_deref() != Some(webhook.signature.as_str()) {
            tracing::debug!(order_code = webhook.data.order_code, "webhook signature mismatch");
            return Err(InvalidSignatureError::new("Data not integrity").into());
        }

        tracing::debug!(order_code = webhook.data.order_code, "webhook verified");
        Ok(webhook.data)
    }
}

fn parse_webhook(value: Value) -> Result<(Webhook, Value)> {
    let data = value.get("data").cloned().unwrap_or(Value::Null);
    let webhook = Webhook::from_wire(value).map_err(schema_error)?;
    Ok((webhook, data))
}

fn schema_error(err: impl std::fmt::Display) -> PayOSError {
    WebhookError::new(format!("Webhook schema validation failed: {}", err)).into()
}
