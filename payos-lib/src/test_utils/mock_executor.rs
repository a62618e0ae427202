//! In-memory collaborators for client tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::crypto::SignatureProvider;
use crate::errors::ApiError;
use crate::executors::{ApiRequest, ApiResponse, RequestExecutor};
use crate::Result;

#[derive(Default)]
struct MockState {
    responses: VecDeque<std::result::Result<ApiResponse, ApiError>>,
    requests: Vec<ApiRequest>,
}

/// Executor that replays queued responses in order and records every
/// request it receives.
///
/// Clones share state, so a test can keep one handle after giving another
/// to the client.
#[derive(Clone, Default)]
pub struct MockExecutor {
    state: Arc<Mutex<MockState>>,
}

impl MockExecutor {
    /// Create an executor with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response.
    pub fn push_response(&self, response: ApiResponse) {
        self.state.lock().unwrap().responses.push_back(Ok(response));
    }

    /// Queue a JSON response with the given status.
    pub fn push_json(&self, status: u16, body: Value) {
        self.push_response(ApiResponse::json(status, &body));
    }

    /// Queue a 200 response wrapping `data` in the payOS envelope.
    pub fn push_envelope(&self, code: &str, desc: &str, data: Value, signature: &str) {
        self.push_json(
            200,
            json!({"code": code, "desc": desc, "data": data, "signature": signature}),
        );
    }

    /// Queue a transport failure.
    pub fn push_failure(&self, error: ApiError) {
        self.state.lock().unwrap().responses.push_back(Err(error));
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.state.lock().unwrap().requests.last().cloned()
    }
}

#[async_trait]
impl RequestExecutor for MockExecutor {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request);
        match state.responses.pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(error)) => Err(error.into()),
            None => Err(ApiError::connection("no mock response queued").into()),
        }
    }
}

/// Signer that returns the same signature for any input.
#[derive(Debug, Clone)]
pub struct StaticSigner {
    signature: String,
}

impl StaticSigner {
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
        }
    }
}

impl SignatureProvider for StaticSigner {
    fn signature_from_object(&self, _data: &Value, _key: &str) -> Option<String> {
        Some(self.signature.clone())
    }

    fn signature_of_payment_request(&self, _data: &Value, _key: &str) -> Option<String> {
        Some(self.signature.clone())
    }
}
