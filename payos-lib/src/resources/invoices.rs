//! `/v2/payment-requests/{id}/invoices` operations.

use serde_json::Value;

use crate::client::{check_envelope_code, PayOS};
use crate::executors::HttpMethod;
use crate::resources::PaymentLinkRef;
use crate::types::{filename_from_content_disposition, FileDownload, InvoicesInfo, DEFAULT_FILENAME};
use crate::Result;

const OCTET_STREAM: &str = "application/octet-stream";

/// E-invoice operations, borrowed from a [`PayOS`] client.
#[derive(Debug, Clone, Copy)]
pub struct Invoices<'a> {
    client: &'a PayOS,
}

impl<'a> Invoices<'a> {
    pub(crate) fn new(client: &'a PayOS) -> Self {
        Self { client }
    }

    /// List the invoices of a payment link.
    #[tracing::instrument(skip(self, id), fields(id = tracing::field::Empty))]
    pub async fn get(&self, id: impl Into<PaymentLinkRef>) -> Result<InvoicesInfo> {
        let id = id.into();
        tracing::Span::current().record("id", tracing::field::display(&id));
        let path = format!("/v2/payment-requests/{}/invoices", id.path_segment());
        self.client.send(HttpMethod::Get, &path, None, true).await
    }

    /// Download one invoice file.
    ///
    /// The filename comes from the `content-disposition` header and falls
    /// back to `"download"`. A JSON body carrying a non-success envelope is
    /// reported as an [`ApiError`](crate::ApiError).
    #[tracing::instrument(skip(self, id), fields(id = tracing::field::Empty))]
    pub async fn download(
        &self,
        invoice_id: &str,
        id: impl Into<PaymentLinkRef>,
    ) -> Result<FileDownload> {
        let id = id.into();
        tracing::Span::current().record("id", tracing::field::display(&id));
        let path = format!(
            "/v2/payment-requests/{}/invoices/{}/download",
            id.path_segment(),
            urlencoding::encode(invoice_id)
        );
        let response = self.client.send_raw(HttpMethod::Get, &path, None).await?;

        let content_type = response
            .headers
            .get("content-type")
            .cloned()
            .unwrap_or_else(|| OCTET_STREAM.to_string());
        if content_type.starts_with("application/json") {
            if let Ok(envelope) = serde_json::from_slice::<Value>(&response.body) {
                if envelope.get("code").is_some() {
                    check_envelope_code(response.status, &path, &envelope)?;
                }
            }
        }

        let filename = response
            .headers
            .get("content-disposition")
            .and_then(|h| filename_from_content_disposition(h))
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string());

        tracing::debug!(size = response.body.len(), %filename, "invoice downloaded");
        Ok(FileDownload {
            data: response.body,
            content_type,
            filename,
        })
    }
}
