//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use payos_lib::prelude::*;
//! ```

// Client
pub use crate::client::{PayOS, PayOSBuilder};
pub use crate::config::PayOSConfig;
pub use crate::resources::{PaymentLinkRef, WebhookPayload};

// Error handling
pub use crate::errors::{
    ApiError, ErrorDetails, ErrorKind, InvalidSignatureError, PayOSError, WebhookError,
};
pub use crate::Result;

// Entities
pub use crate::model::{Model, Naming};
pub use crate::types::{
    CreatePaymentLinkRequest, CreatePaymentLinkResponse, FileDownload, Invoice, InvoicesInfo,
    ItemData, PaymentLink, PaymentLinkStatus, Webhook, WebhookData,
};

// Collaborators
pub use crate::crypto::SignatureProvider;
pub use crate::executors::RequestExecutor;

// Legacy
pub use crate::legacy::{Legacy, LegacyPayOSError};
