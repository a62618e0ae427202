//! `reqwest`-backed executor.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;

use super::{ApiRequest, ApiResponse, HttpMethod, RequestExecutor};
use crate::config::PayOSConfig;
use crate::errors::{ApiError, PayOSError};
use crate::Result;

/// Executor that sends requests over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpExecutor {
    /// Create an executor for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PayOSError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            timeout_secs,
            client,
        })
    }

    /// Create an executor from the base URL and timeout of `config`.
    pub fn from_config(config: &PayOSConfig) -> Result<Self> {
        Self::new(config.base_url.clone(), config.timeout_secs)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn map_reqwest_error(&self, e: reqwest::Error) -> PayOSError {
        if e.is_timeout() {
            ApiError::timeout(format!(
                "request timed out after {}s",
                self.timeout_secs
            ))
            .into()
        } else if e.is_connect() {
            ApiError::connection(format!("could not connect to {}: {}", self.base_url, e)).into()
        } else {
            ApiError::connection(format!("request failed: {}", e)).into()
        }
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.url(&request.path);
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let status = response.status().as_u16();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_reqwest_error(e))?
            .to_vec();

        tracing::debug!(method = %request.method, path = %request.path, status, "payOS response");

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}
