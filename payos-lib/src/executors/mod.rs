//! Transport seam between the client and the network.
//!
//! The client builds an [`ApiRequest`] (path relative to the configured base
//! URL, headers, optional JSON body) and hands it to a [`RequestExecutor`].
//! Executors only move bytes: status interpretation, envelope decoding and
//! signature checks stay in the client.
//!
//! ## Feature Flags
//!
//! The default `http-executor` feature provides [`HttpExecutor`], backed by
//! `reqwest`. Without it, callers must supply their own executor through
//! [`PayOSBuilder::executor`](crate::PayOSBuilder::executor).

#[cfg(feature = "http-executor")]
mod http;

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

#[cfg(feature = "http-executor")]
pub use http::HttpExecutor;

/// HTTP method of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to the payOS API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path below the base URL, starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Request with no query, headers or body.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    /// Attach a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Header value by (lower-case) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Raw response handed back by an executor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Response with the given status and JSON body.
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            headers: BTreeMap::from([("content-type".to_string(), "application/json".to_string())]),
            body: body.to_string().into_bytes(),
        }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends [`ApiRequest`]s.
///
/// Implementations report transport failures (unreachable host, timeout) as
/// [`ApiError`](crate::ApiError)s and return every HTTP response, whatever
/// its status, as an [`ApiResponse`].
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Send one request.
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}
