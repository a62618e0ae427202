//! Error types for payOS operations.
//!
//! Failures are wrapped at the boundary where they are detected:
//!
//! - request construction → [`ValidationError`] (no network call is made)
//! - transport or response failure → [`ApiError`]
//! - malformed webhook payload → [`WebhookError`]
//! - checksum mismatch → [`InvalidSignatureError`]
//!
//! Every concrete kind converts into [`PayOSError`], so a single
//! `match`/`?` on the base type observes all of them. All of them also
//! implement [`ErrorDetails`], the `code`/`message` contract the legacy
//! surface depends on.

use std::fmt;

use serde_json::Value;

/// Code reported by errors that did not originate from an API response.
pub const INTERNAL_ERROR_CODE: &str = "20";

/// The `code`/`message` pair every payOS error exposes.
pub trait ErrorDetails {
    /// Machine-readable error code.
    fn code(&self) -> String;

    /// Human-readable error message.
    fn message(&self) -> String;
}

/// Top-level classification of a [`PayOSError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The API (or the transport reaching it) failed.
    Api,
    /// A webhook payload could not be processed.
    Webhook,
    /// Signature or checksum verification failed.
    Signature,
    /// Local failures: validation, configuration, attribute lookup.
    Generic,
}

/// Sub-classification of [`ApiError`], keyed off the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// HTTP 400.
    BadRequest,
    /// HTTP 401.
    Unauthorized,
    /// HTTP 403.
    Forbidden,
    /// HTTP 404.
    NotFound,
    /// HTTP 429.
    TooManyRequests,
    /// HTTP 5xx.
    InternalServer,
    /// The server could not be reached.
    Connection,
    /// The request timed out.
    ConnectionTimeout,
    /// Any other status, or a 2xx envelope carrying a non-success code.
    Other,
}

impl ApiErrorKind {
    /// Map an HTTP status code to its error kind.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            429 => Self::TooManyRequests,
            500..=599 => Self::InternalServer,
            _ => Self::Other,
        }
    }
}

/// The payOS API returned an error, or could not be reached.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    /// Error classification.
    pub kind: ApiErrorKind,
    /// Display message.
    pub message: String,
    /// HTTP status, when a response was received.
    pub status_code: Option<u16>,
    /// The envelope `code` returned by the API.
    pub error_code: Option<String>,
    /// The envelope `desc` returned by the API.
    pub error_desc: Option<String>,
}

impl ApiError {
    /// Create an error of the given kind with no response attached.
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            error_code: None,
            error_desc: None,
        }
    }

    /// Build an error from a non-success HTTP response.
    ///
    /// `error_data` is the decoded body, if any; its `code` and `desc`
    /// members are lifted onto the error. The message falls back to `desc`,
    /// then to `HTTP <status> error`.
    pub fn from_response(status: u16, error_data: Option<&Value>, message: Option<String>) -> Self {
        let error_code = error_data.and_then(|d| envelope_str(d, "code"));
        let error_desc = error_data.and_then(|d| envelope_str(d, "desc"));
        let message = message
            .or_else(|| error_desc.clone())
            .unwrap_or_else(|| format!("HTTP {} error", status));

        Self {
            kind: ApiErrorKind::from_status(status),
            message,
            status_code: Some(status),
            error_code,
            error_desc,
        }
    }

    /// Build an error from a 2xx envelope whose `code` is not `"00"`.
    pub fn from_envelope(status: u16, code: impl Into<String>, desc: impl Into<String>) -> Self {
        let desc = desc.into();
        Self {
            kind: ApiErrorKind::Other,
            message: desc.clone(),
            status_code: Some(status),
            error_code: Some(code.into()),
            error_desc: Some(desc),
        }
    }

    /// Build an error for a success envelope whose `data` does not decode
    /// into the expected entity.
    pub fn malformed_data(status: u16, message: impl Into<String>) -> Self {
        Self {
            status_code: Some(status),
            ..Self::new(ApiErrorKind::Other, message)
        }
    }

    /// The server could not be reached.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Connection, message)
    }

    /// The request timed out.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::ConnectionTimeout, message)
    }
}

fn envelope_str(data: &Value, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

impl ErrorDetails for ApiError {
    fn code(&self) -> String {
        self.error_code
            .clone()
            .or_else(|| self.status_code.map(|s| s.to_string()))
            .unwrap_or_else(|| INTERNAL_ERROR_CODE.to_string())
    }

    fn message(&self) -> String {
        self.message.clone()
    }
}

/// A webhook payload was malformed or could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct WebhookError {
    /// Display message.
    pub message: String,
}

impl WebhookError {
    /// Create a webhook error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ErrorDetails for WebhookError {
    fn code(&self) -> String {
        INTERNAL_ERROR_CODE.to_string()
    }

    fn message(&self) -> String {
        self.message.clone()
    }
}

/// A signature was missing or did not match the data it covers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct InvalidSignatureError {
    /// Display message.
    pub message: String,
}

impl InvalidSignatureError {
    /// Create a signature error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ErrorDetails for InvalidSignatureError {
    fn code(&self) -> String {
        INTERNAL_ERROR_CODE.to_string()
    }

    fn message(&self) -> String {
        self.message.clone()
    }
}

/// Local rejection of an entity before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A field name matched neither a canonical name nor an alias.
    #[error("unknown field `{field}` for {model}")]
    UnknownField {
        /// Entity type name.
        model: &'static str,
        /// The offending key.
        field: String,
    },

    /// The same field was given under both its canonical name and its alias.
    #[error("field `{field}` given more than once for {model}")]
    DuplicateField {
        /// Entity type name.
        model: &'static str,
        /// Canonical name of the field.
        field: String,
    },

    /// A field value violates a constraint.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Field name (canonical).
        field: String,
        /// Reason for invalidity.
        reason: String,
    },

    /// The input could not be decoded into the entity (missing required
    /// field, wrong type, not an object).
    #[error("{model} is malformed: {reason}")]
    Malformed {
        /// Entity type name.
        model: &'static str,
        /// Decoder message.
        reason: String,
    },
}

impl ValidationError {
    /// Create an invalid-field error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Base error type for every payOS operation.
#[derive(Debug, thiserror::Error)]
pub enum PayOSError {
    /// The API returned an error, or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Webhook payload failure.
    #[error(transparent)]
    Webhook(#[from] WebhookError),

    /// Signature verification failure.
    #[error(transparent)]
    InvalidSignature(#[from] InvalidSignatureError),

    /// Entity construction or validation failure.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Attribute lookup by a name that is neither canonical nor alias.
    #[error("{model} has no attribute `{name}`")]
    UnknownAttribute {
        /// Entity type name.
        model: &'static str,
        /// Requested name.
        name: String,
    },

    /// Client configuration is incomplete.
    #[error("{0}")]
    Config(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl PayOSError {
    /// Top-level classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Api(_) => ErrorKind::Api,
            Self::Webhook(_) => ErrorKind::Webhook,
            Self::InvalidSignature(_) => ErrorKind::Signature,
            Self::Validation(_)
            | Self::UnknownAttribute { .. }
            | Self::Config(_)
            | Self::Serialization(_) => ErrorKind::Generic,
        }
    }

    /// Machine-readable code; see [`ErrorDetails::code`].
    pub fn code(&self) -> String {
        match self {
            Self::Api(e) => e.code(),
            Self::Webhook(e) => e.code(),
            Self::InvalidSignature(e) => e.code(),
            _ => INTERNAL_ERROR_CODE.to_string(),
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// The API error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl ErrorDetails for PayOSError {
    fn code(&self) -> String {
        PayOSError::code(self)
    }

    fn message(&self) -> String {
        PayOSError::message(self)
    }
}

impl From<serde_json::Error> for PayOSError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Api => "api",
            Self::Webhook => "webhook",
            Self::Signature => "signature",
            Self::Generic => "generic",
        };
        f.write_str(label)
    }
}
