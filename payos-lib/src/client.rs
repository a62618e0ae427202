//! The payOS client.
//!
//! [`PayOS`] owns the configuration and the two collaborators (executor and
//! signer). Operations live on borrowed namespace handles returned by
//! [`PayOS::payment_requests`] and [`PayOS::webhooks`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::config::PayOSConfig;
use crate::crypto::{HmacSignatureProvider, SignatureProvider};
use crate::errors::{ApiError, InvalidSignatureError};
use crate::executors::{ApiRequest, ApiResponse, HttpMethod, RequestExecutor};
use crate::legacy::{DeprecationHook, DeprecationNotice};
use crate::model::Model;
use crate::resources::{PaymentRequests, Webhooks};
use crate::Result;

/// `user-agent` sent with every request.
pub const USER_AGENT: &str = concat!("PayOS/", env!("CARGO_PKG_VERSION"), " Rust");

/// Envelope code of a successful response.
const SUCCESS_CODE: &str = "00";

/// payOS merchant API client.
///
/// # Example
///
/// ```no_run
/// use payos_lib::{PayOS, PayOSConfig};
/// use payos_lib::types::CreatePaymentLinkRequest;
///
/// # async fn run() -> payos_lib::Result<()> {
/// let client = PayOS::new(PayOSConfig::from_env()?)?;
/// let request = CreatePaymentLinkRequest::new(
///     12345,
///     2000,
///     "Order 12345",
///     "https://shop.example/cancel",
///     "https://shop.example/return",
/// );
/// let link = client.payment_requests().create(&request).await?;
/// println!("{}", link.checkout_url);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PayOS {
    config: PayOSConfig,
    executor: Arc<dyn RequestExecutor>,
    signer: Arc<dyn SignatureProvider>,
    on_deprecation: Option<DeprecationHook>,
}

impl PayOS {
    /// Client with the HTTP executor and HMAC signer.
    #[cfg(feature = "http-executor")]
    pub fn new(config: PayOSConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Start configuring a client.
    pub fn builder(config: PayOSConfig) -> PayOSBuilder {
        PayOSBuilder {
            config,
            executor: None,
            signer: None,
            on_deprecation: None,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &PayOSConfig {
        &self.config
    }

    /// Payment-link operations.
    pub fn payment_requests(&self) -> PaymentRequests<'_> {
        PaymentRequests::new(self)
    }

    /// Webhook operations.
    pub fn webhooks(&self) -> Webhooks<'_> {
        Webhooks::new(self)
    }

    pub(crate) fn signer(&self) -> &dyn SignatureProvider {
        self.signer.as_ref()
    }

    pub(crate) fn checksum_key(&self) -> &str {
        &self.config.checksum_key
    }

    pub(crate) fn notify_deprecated(&self, notice: DeprecationNotice) {
        tracing::warn!(
            target: "payos::deprecation",
            legacy = notice.legacy_name,
            replacement = notice.replacement,
            "{}",
            notice
        );
        if let Some(hook) = &self.on_deprecation {
            hook(&notice);
        }
    }

    fn default_headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::from([
            ("x-client-id".to_string(), self.config.client_id.clone()),
            ("x-api-key".to_string(), self.config.api_key.clone()),
            ("content-type".to_string(), "application/json".to_string()),
            ("user-agent".to_string(), USER_AGENT.to_string()),
        ]);
        if let Some(code) = &self.config.partner_code {
            headers.insert("x-partner-code".to_string(), code.clone());
        }
        headers
    }

    /// Send a request and return the raw response, failing on a non-2xx
    /// status.
    pub(crate) async fn send_raw(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse> {
        let mut request = ApiRequest::new(method, path);
        request.headers = self.default_headers();
        request.body = body;

        tracing::debug!(%method, path, "sending payOS request");
        let response = self.executor.execute(request).await?;

        if !response.is_success() {
            let error_data: Option<Value> = serde_json::from_slice(&response.body).ok();
            return Err(ApiError::from_response(response.status, error_data.as_ref(), None).into());
        }
        Ok(response)
    }

    /// Send a request and decode the `data` member of the response envelope.
    ///
    /// With `verify_signature`, the envelope `signature` must match the
    /// checksum of `data`. A `data` member that does not fit `T` is reported
    /// as an [`ApiError`], since the fault lies with the response.
    pub(crate) async fn send<T: Model>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        verify_signature: bool,
    ) -> Result<T> {
        let response = self.send_raw(method, path, body).await?;
        let envelope: Value = serde_json::from_slice(&response.body).map_err(|_| {
            ApiError::from_response(
                response.status,
                None,
                Some("response body is not valid JSON".to_string()),
            )
        })?;
        check_envelope_code(response.status, path, &envelope)?;

        let data = envelope.get("data").cloned().unwrap_or(Value::Null);
        if verify_signature {
            self.verify_response_signature(&data, &envelope)?;
        }
        T::from_wire(data).map_err(|e| {
            tracing::debug!(path, error = %e, "response data does not match the entity");
            ApiError::malformed_data(response.status, e.to_string()).into()
        })
    }

    fn verify_response_signature(&self, data: &Value, envelope: &Value) -> Result<()> {
        let signature = envelope
            .get("signature")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| InvalidSignatureError::new("signature missing"))?;

        let expected = self.signer.signature_from_object(data, self.checksum_key());
        if expected.as_deref() != Some(signature) {
            return Err(InvalidSignatureError::new("Data not integrity").into());
        }
        Ok(())
    }
}

impl fmt::Debug for PayOS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayOS")
            .field("config", &self.config)
            .field("on_deprecation", &self.on_deprecation.is_some())
            .finish_non_exhaustive()
    }
}

/// Fail with an [`ApiError`] unless the envelope `code` is `"00"`.
pub(crate) fn check_envelope_code(status: u16, path: &str, envelope: &Value) -> Result<()> {
    let code = envelope_field(envelope, "code").unwrap_or_default();
    if code != SUCCESS_CODE {
        let desc = envelope_field(envelope, "desc").unwrap_or_default();
        tracing::debug!(path, code = %code, desc = %desc, "payOS returned an error envelope");
        return Err(ApiError::from_envelope(status, code, desc).into());
    }
    Ok(())
}

fn envelope_field(envelope: &Value, key: &str) -> Option<String> {
    match envelope.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Builder for [`PayOS`] with custom collaborators.
pub struct PayOSBuilder {
    config: PayOSConfig,
    executor: Option<Arc<dyn RequestExecutor>>,
    signer: Option<Arc<dyn SignatureProvider>>,
    on_deprecation: Option<DeprecationHook>,
}

impl PayOSBuilder {
    /// Send requests through `executor` instead of the HTTP executor.
    pub fn executor(mut self, executor: impl RequestExecutor + 'static) -> Self {
        self.executor = Some(Arc::new(executor));
        self
    }

    /// Compute signatures with `signer` instead of HMAC-SHA256.
    pub fn signer(mut self, signer: impl SignatureProvider + 'static) -> Self {
        self.signer = Some(Arc::new(signer));
        self
    }

    /// Call `hook` whenever a deprecated method is used.
    pub fn on_deprecation<F>(mut self, hook: F) -> Self
    where
        F: Fn(&DeprecationNotice) + Send + Sync + 'static,
    {
        self.on_deprecation = Some(Arc::new(hook));
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<PayOS> {
        let executor = match self.executor {
            Some(executor) => executor,
            None => default_executor(&self.config)?,
        };
        let signer = self
            .signer
            .unwrap_or_else(|| Arc::new(HmacSignatureProvider));

        Ok(PayOS {
            config: self.config,
            executor,
            signer,
            on_deprecation: self.on_deprecation,
        })
    }
}

#[cfg(feature = "http-executor")]
fn default_executor(config: &PayOSConfig) -> Result<Arc<dyn RequestExecutor>> {
    Ok(Arc::new(crate::executors::HttpExecutor::from_config(config)?))
}

#[cfg(not(feature = "http-executor"))]
fn default_executor(_config: &PayOSConfig) -> Result<Arc<dyn RequestExecutor>> {
    Err(crate::PayOSError::Config(
        "no request executor configured (enable the `http-executor` feature)".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ApiErrorKind, ErrorKind};
    use crate::test_utils::{fixtures, MockExecutor, StaticSigner};
    use crate::types::PaymentLink;
    use crate::PayOSError;
    use serde_json::json;

    fn client(executor: MockExecutor) -> PayOS {
        PayOS::builder(fixtures::config())
            .executor(executor)
            .signer(StaticSigner::new("mock-signature"))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_default_headers() {
        let executor = MockExecutor::new();
        executor.push_envelope("00", "success", fixtures::payment_link_json("PENDING"), "mock-signature");
        let client = PayOS::builder(fixtures::config().with_partner_code("partner"))
            .executor(executor.clone())
            .signer(StaticSigner::new("mock-signature"))
            .build()
            .unwrap();

        let _: PaymentLink = client
            .send(HttpMethod::Get, "/v2/payment-requests/1", None, true)
            .await
            .unwrap();

        let request = executor.last_request().unwrap();
        assert_eq!(request.header("x-client-id"), Some(fixtures::CLIENT_ID));
        assert_eq!(request.header("x-api-key"), Some(fixtures::API_KEY));
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("x-partner-code"), Some("partner"));
        assert!(request.header("user-agent").unwrap().starts_with("PayOS/"));
    }

    #[tokio::test]
    async fn test_partner_code_header_omitted_when_unset() {
        let executor = MockExecutor::new();
        executor.push_envelope("00", "success", fixtures::payment_link_json("PENDING"), "mock-signature");
        let client = client(executor.clone());

        let _: PaymentLink = client
            .send(HttpMethod::Get, "/v2/payment-requests/1", None, true)
            .await
            .unwrap();
        assert!(executor.last_request().unwrap().header("x-partner-code").is_none());
    }

    #[tokio::test]
    async fn test_http_error_status_maps_to_api_error() {
        let executor = MockExecutor::new();
        executor.push_json(401, json!({"code": "401", "desc": "Unauthorized"}));
        let client = client(executor);

        let err = client
            .send::<PaymentLink>(HttpMethod::Get, "/v2/payment-requests/1", None, true)
            .await
            .unwrap_err();
        let api = err.as_api().unwrap();
        assert_eq!(api.kind, ApiErrorKind::Unauthorized);
        assert_eq!(api.status_code, Some(401));
        assert_eq!(err.code(), "401");
        assert_eq!(err.message(), "Unauthorized");
    }

    #[tokio::test]
    async fn test_error_envelope_maps_to_api_error() {
        let executor = MockExecutor::new();
        executor.push_json(200, json!({"code": "01", "desc": "Invalid order", "data": null}));
        let client = client(executor);

        let err = client
            .send::<PaymentLink>(HttpMethod::Get, "/v2/payment-requests/1", None, true)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.code(), "01");
        assert_eq!(err.message(), "Invalid order");
    }

    #[tokio::test]
    async fn test_response_signature_checks() {
        let executor = MockExecutor::new();
        executor.push_envelope("00", "success", fixtures::payment_link_json("PAID"), "");
        executor.push_envelope("00", "success", fixtures::payment_link_json("PAID"), "forged");
        let client = client(executor);

        let missing = client
            .send::<PaymentLink>(HttpMethod::Get, "/v2/payment-requests/1", None, true)
            .await
            .unwrap_err();
        assert!(matches!(missing, PayOSError::InvalidSignature(ref e) if e.message == "signature missing"));

        let mismatch = client
            .send::<PaymentLink>(HttpMethod::Get, "/v2/payment-requests/1", None, true)
            .await
            .unwrap_err();
        assert!(matches!(mismatch, PayOSError::InvalidSignature(ref e) if e.message == "Data not integrity"));
    }

    #[tokio::test]
    async fn test_undecodable_data_is_an_api_error() {
        let executor = MockExecutor::new();
        executor.push_envelope("00", "success", json!({"id": 1}), "mock-signature");
        let client = client(executor);

        let err = client
            .payment_requests()
            .get("payment-link-id")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Api);
        let api = err.as_api().unwrap();
        assert_eq!(api.kind, ApiErrorKind::Other);
        assert_eq!(api.status_code, Some(200));
        assert!(api.message.starts_with("PaymentLink is malformed"), "{}", api.message);
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_an_api_error() {
        let executor = MockExecutor::new();
        executor.push_response(ApiResponse {
            status: 200,
            body: b"<html>".to_vec(),
            ..ApiResponse::default()
        });
        let client = client(executor);

        let err = client
            .send::<PaymentLink>(HttpMethod::Get, "/v2/payment-requests/1", None, true)
            .await
            .unwrap_err();
        assert_eq!(err.message(), "response body is not valid JSON");
        assert_eq!(err.as_api().unwrap().status_code, Some(200));
    }

    #[test]
    fn test_user_agent() {
        assert!(USER_AGENT.starts_with("PayOS/"));
        assert!(USER_AGENT.ends_with(" Rust"));
    }
}
