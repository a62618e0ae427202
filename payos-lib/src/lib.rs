//! payOS merchant SDK.
//!
//! Request, response and webhook entities are stored under snake_case field
//! names and can be read or dumped under either snake_case or the camelCase
//! names the API uses. The pre-2.0 flat method surface is still available as
//! deprecated wrappers over the namespaced one.
//!
//! # Features
//!
//! - **Dual naming**: `get("orderCode")` and `get("order_code")` read the same field
//! - **Namespaced client**: `payment_requests()` and `webhooks()`
//! - **Legacy surface**: deprecated flat methods returning [`legacy::Legacy`] views
//!   and [`legacy::LegacyPayOSError`]
//! - **Pluggable collaborators**: [`executors::RequestExecutor`] and
//!   [`crypto::SignatureProvider`]
//!
//! # Example
//!
//! ```no_run
//! use payos_lib::prelude::*;
//!
//! # async fn run() -> payos_lib::Result<()> {
//! let client = PayOS::new(PayOSConfig::from_env()?)?;
//! let link = client.payment_requests().get(12345_i64).await?;
//! println!("{} {}", link.status, link.get("amountPaid")?);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod executors;
pub mod legacy;
pub mod model;
pub mod prelude;
pub mod resources;
pub mod types;

/// Test utilities for payOS clients.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use client::{PayOS, PayOSBuilder};
pub use config::PayOSConfig;
pub use errors::{
    ApiError, ApiErrorKind, ErrorDetails, ErrorKind, InvalidSignatureError, PayOSError,
    ValidationError, WebhookError,
};

/// Common result alias for payOS operations.
pub type Result<T> = std::result::Result<T, PayOSError>;
