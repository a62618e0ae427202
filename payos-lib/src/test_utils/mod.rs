//! Test utilities for payOS.
//!
//! - [`MockExecutor`] records requests and replays queued responses
//! - [`StaticSigner`] returns a fixed signature
//! - [`fixtures`] holds credentials and canned API payloads
//!
//! ## Usage
//!
//! ```rust,ignore
//! use payos_lib::test_utils::{fixtures, MockExecutor, StaticSigner};
//! use payos_lib::PayOS;
//!
//! let executor = MockExecutor::new();
//! executor.push_envelope("00", "success", fixtures::payment_link_json("PAID"), "sig");
//!
//! let client = PayOS::builder(fixtures::config())
//!     .executor(executor.clone())
//!     .signer(StaticSigner::new("sig"))
//!     .build()?;
//! let link = client.payment_requests().get(12345_i64).await?;
//! assert_eq!(executor.requests().len(), 1);
//! ```

pub mod fixtures;
mod mock_executor;

pub use mock_executor::{MockExecutor, StaticSigner};
