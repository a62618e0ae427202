//! The pre-2.0 unified error.

use crate::errors::{ErrorDetails, PayOSError};

/// Error returned by every legacy method.
///
/// Carries the historical `code`/`message` pair; the modern error it was
/// converted from, if any, is kept as the source.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct LegacyPayOSError {
    code: String,
    message: String,
    #[source]
    source: Option<PayOSError>,
}

impl LegacyPayOSError {
    /// Create an error from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Machine-readable code, e.g. `"01"` or `"20"`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The modern error this one was converted from.
    pub fn payos_error(&self) -> Option<&PayOSError> {
        self.source.as_ref()
    }
}

impl From<PayOSError> for LegacyPayOSError {
    fn from(err: PayOSError) -> Self {
        Self {
            code: err.code(),
            message: err.message(),
            source: Some(err),
        }
    }
}

impl ErrorDetails for LegacyPayOSError {
    fn code(&self) -> String {
        self.code.clone()
    }

    fn message(&self) -> String {
        self.message.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ApiError, InvalidSignatureError, WebhookError};
    use std::error::Error;

    #[test]
    fn test_every_kind_converts() {
        let errors: Vec<PayOSError> = vec![
            ApiError::from_envelope(200, "01", "Invalid order").into(),
            WebhookError::new("Webhook URL invalid").into(),
            InvalidSignatureError::new("Data not integrity").into(),
        ];
        let codes: Vec<String> = errors
            .into_iter()
            .map(|e| LegacyPayOSError::from(e).code().to_string())
            .collect();
        assert_eq!(codes, vec!["01", "20", "20"]);
    }

    #[test]
    fn test_source_is_kept() {
        let legacy = LegacyPayOSError::from(PayOSError::from(WebhookError::new("bad")));
        assert_eq!(legacy.message(), "bad");
        assert!(legacy.source().is_some());
        assert!(legacy.payos_error().is_some());
    }

    #[test]
    fn test_historical_constructor() {
        let err = LegacyPayOSError::new("20", "Internal Server Error");
        assert_eq!(err.code(), "20");
        assert_eq!(err.to_string(), "Internal Server Error");
        assert!(err.source().is_none());
    }
}
