//! `/v2/payment-requests` operations.

use std::fmt;

use serde_json::{json, Value};

use crate::client::PayOS;
use crate::errors::InvalidSignatureError;
use crate::executors::HttpMethod;
use crate::model::serialize::to_wire_body;
use crate::resources::Invoices;
use crate::types::{CreatePaymentLinkRequest, CreatePaymentLinkResponse, PaymentLink};
use crate::Result;

/// Identifies a payment link by its id or by the merchant's order code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentLinkRef {
    Id(String),
    OrderCode(i64),
}

impl fmt::Display for PaymentLinkRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => f.write_str(id),
            Self::OrderCode(code) => write!(f, "{}", code),
        }
    }
}

impl PaymentLinkRef {
    /// The reference as one percent-encoded URL path segment.
    pub fn path_segment(&self) -> String {
        match self {
            Self::Id(id) => urlencoding::encode(id).into_owned(),
            Self::OrderCode(code) => code.to_string(),
        }
    }
}

impl From<&str> for PaymentLinkRef {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<String> for PaymentLinkRef {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl From<i64> for PaymentLinkRef {
    fn from(order_code: i64) -> Self {
        Self::OrderCode(order_code)
    }
}

/// Payment-link operations, borrowed from a [`PayOS`] client.
#[derive(Debug, Clone, Copy)]
pub struct PaymentRequests<'a> {
    client: &'a PayOS,
}

impl<'a> PaymentRequests<'a> {
    pub(crate) fn new(client: &'a PayOS) -> Self {
        Self { client }
    }

    /// E-invoices issued for payment links.
    pub fn invoices(&self) -> Invoices<'a> {
        Invoices::new(self.client)
    }

    /// Create a payment link.
    ///
    /// The request is validated locally first; a rejected request never
    /// reaches the network. The `signature` field is always recomputed.
    #[tracing::instrument(skip(self, request), fields(order_code = request.order_code))]
    pub async fn create(
        &self,
        request: &CreatePaymentLinkRequest,
    ) -> Result<CreatePaymentLinkResponse> {
        request.validate()?;

        let mut body = to_wire_body(request)?;
        let signature = self
            .client
            .signer()
            .signature_of_payment_request(&Value::Object(body.clone()), self.client.checksum_key())
            .ok_or_else(|| InvalidSignatureError::new("failed to sign payment request"))?;
        body.insert("signature".to_string(), Value::String(signature));

        self.client
            .send(
                HttpMethod::Post,
                "/v2/payment-requests",
                Some(Value::Object(body)),
                true,
            )
            .await
    }

    /// Look up a payment link.
    #[tracing::instrument(skip(self, id), fields(id = tracing::field::Empty))]
    pub async fn get(&self, id: impl Into<PaymentLinkRef>) -> Result<PaymentLink> {
        let id = id.into();
        tracing::Span::current().record("id", tracing::field::display(&id));
        let path = format!("/v2/payment-requests/{}", id.path_segment());
        self.client.send(HttpMethod::Get, &path, None, true).await
    }

    /// Cancel a payment link, optionally recording a reason.
    #[tracing::instrument(skip(self, id, reason), fields(id = tracing::field::Empty))]
    pub async fn cancel(
        &self,
        id: impl Into<PaymentLinkRef>,
        reason: Option<&str>,
    ) -> Result<PaymentLink> {
        let id = id.into();
        tracing::Span::current().record("id", tracing::field::display(&id));
        let path = format!("/v2/payment-requests/{}/cancel", id.path_segment());
        let body = reason.map(|r| json!({ "cancellationReason": r }));
        self.client.send(HttpMethod::Post, &path, body, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{HmacSignatureProvider, SignatureProvider};
    use crate::errors::ValidationError;
    use crate::model::Model;
    use crate::test_utils::{fixtures, MockExecutor, StaticSigner};
    use crate::types::PaymentLinkStatus;
    use crate::PayOSError;

    fn client(executor: &MockExecutor) -> PayOS {
        PayOS::builder(fixtures::config())
            .executor(executor.clone())
            .signer(StaticSigner::new("mock-signature"))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_sends_signed_alias_body() {
        let executor = MockExecutor::new();
        executor.push_envelope("00", "success", fixtures::create_response_json(), "mock-signature");
        let client = client(&executor);

        let result = client
            .payment_requests()
            .create(&fixtures::full_create_request())
            .await
            .unwrap();
        assert_eq!(result.payment_link_id, "payment-link-id");
        assert_eq!(result.status, PaymentLinkStatus::Pending);
        assert_eq!(result.get("checkoutUrl").unwrap(), json!("https://pay.payos.vn/web/payment-link-id"));

        let request = executor.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path, "/v2/payment-requests");
        let body = request.body.unwrap();
        assert_eq!(body["orderCode"], json!(12345));
        assert_eq!(body["cancelUrl"], json!("http://localhost/cancel"));
        assert_eq!(body["items"][0]["taxPercentage"], json!(10));
        assert_eq!(body["signature"], json!("mock-signature"));
        assert!(body.get("buyerPhone").is_none());
        assert!(body.get("order_code").is_none());
    }

    #[tokio::test]
    async fn test_create_signs_with_checksum_key() {
        let executor = MockExecutor::new();
        let data = fixtures::create_response_json();
        let response_signature = HmacSignatureProvider
            .signature_from_object(&data, fixtures::CHECKSUM_KEY)
            .unwrap();
        executor.push_envelope("00", "success", data, &response_signature);
        let client = PayOS::builder(fixtures::config())
            .executor(executor.clone())
            .build()
            .unwrap();

        client
            .payment_requests()
            .create(&fixtures::create_request())
            .await
            .unwrap();

        let body = executor.last_request().unwrap().body.unwrap();
        let expected = HmacSignatureProvider
            .signature_of_payment_request(&body, fixtures::CHECKSUM_KEY)
            .unwrap();
        assert_eq!(body["signature"], json!(expected));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_request_before_sending() {
        let executor = MockExecutor::new();
        let client = client(&executor);
        let mut request = fixtures::create_request();
        request.amount = -1;

        let err = client.payment_requests().create(&request).await.unwrap_err();
        assert!(matches!(
            err,
            PayOSError::Validation(ValidationError::InvalidField { ref field, .. }) if field == "amount"
        ));
        assert!(executor.requests().is_empty());
    }

    #[tokio::test]
    async fn test_get_by_order_code_and_id() {
        let executor = MockExecutor::new();
        executor.push_envelope("00", "success", fixtures::payment_link_json("PAID"), "mock-signature");
        executor.push_envelope("00", "success", fixtures::payment_link_json("PENDING"), "mock-signature");
        let client = client(&executor);

        let paid = client.payment_requests().get(12345_i64).await.unwrap();
        assert_eq!(paid.status, PaymentLinkStatus::Paid);
        assert_eq!(paid.amount_paid, 2000);

        let pending = client.payment_requests().get("payment-link-id").await.unwrap();
        assert_eq!(pending.amount_remaining, 2000);

        let paths: Vec<_> = executor.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            vec!["/v2/payment-requests/12345", "/v2/payment-requests/payment-link-id"]
        );
    }

    #[tokio::test]
    async fn test_cancel_with_and_without_reason() {
        let executor = MockExecutor::new();
        executor.push_envelope("00", "success", fixtures::payment_link_json("CANCELLED"), "mock-signature");
        executor.push_envelope("00", "success", fixtures::payment_link_json("CANCELLED"), "mock-signature");
        let client = client(&executor);

        let cancelled = client
            .payment_requests()
            .cancel(12345_i64, Some("Changed my mind"))
            .await
            .unwrap();
        assert_eq!(cancelled.status, PaymentLinkStatus::Cancelled);
        assert_eq!(cancelled.cancellation_reason.as_deref(), Some("Changed my mind"));

        client.payment_requests().cancel(12345_i64, None).await.unwrap();

        let requests = executor.requests();
        assert_eq!(requests[0].path, "/v2/payment-requests/12345/cancel");
        assert_eq!(requests[0].body, Some(json!({"cancellationReason": "Changed my mind"})));
        assert_eq!(requests[1].body, None);
    }

    #[tokio::test]
    async fn test_id_is_escaped_in_path() {
        let executor = MockExecutor::new();
        executor.push_envelope("00", "success", fixtures::payment_link_json("PENDING"), "mock-signature");
        executor.push_envelope("00", "success", fixtures::payment_link_json("CANCELLED"), "mock-signature");
        let client = client(&executor);

        client.payment_requests().get("abc/../def?x=1").await.unwrap();
        client.payment_requests().cancel("a b", None).await.unwrap();

        let paths: Vec<_> = executor.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            vec![
                "/v2/payment-requests/abc%2F..%2Fdef%3Fx%3D1",
                "/v2/payment-requests/a%20b/cancel",
            ]
        );
    }

    #[test]
    fn test_payment_link_ref_display() {
        assert_eq!(PaymentLinkRef::from(42_i64).to_string(), "42");
        assert_eq!(PaymentLinkRef::from("abc").to_string(), "abc");
    }
}
