//! Pre-2.0 surface.
//!
//! Everything here forwards to the modern API. Client methods announce each
//! use with a [`DeprecationNotice`], wrap results in [`Legacy`] and report
//! failures as [`LegacyPayOSError`] so that one error type covers API,
//! webhook and signature failures as it did before.
//!
//! | Legacy | Replacement |
//! |--------|-------------|
//! | `create_payment_link` | `payment_requests().create` |
//! | `get_payment_link_information` | `payment_requests().get` |
//! | `cancel_payment_link` | `payment_requests().cancel` |
//! | `confirm_webhook` | `webhooks().confirm` |
//! | `verify_payment_webhook_data` | `webhooks().verify` |
//! | `PaymentData` | `CreatePaymentLinkRequest` |
//! | `CreatePaymentResult` | `CreatePaymentLinkResponse` |
//! | `PaymentLinkInformation` | `PaymentLink` |

mod client;
mod error;
pub mod utils;
mod view;

use std::fmt;
use std::sync::Arc;

pub use error::LegacyPayOSError;
pub use view::Legacy;

/// Historical error messages.
pub mod error_message {
    pub const NO_SIGNATURE: &str = "No signature.";
    pub const NO_DATA: &str = "No data.";
    pub const INVALID_SIGNATURE: &str = "Invalid signature.";
    pub const DATA_NOT_INTEGRITY: &str = "The data is unreliable because the signature of the response does not match the signature of the data";
    pub const WEBHOOK_URL_INVALID: &str = "Webhook URL invalid.";
    pub const UNAUTHORIZED: &str = "Unauthorized.";
    pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error.";
    pub const INVALID_PARAMETER: &str = "Invalid Parameter.";
}

/// Historical error codes.
pub mod error_code {
    pub const INTERNAL_SERVER_ERROR: &str = "20";
    pub const UNAUTHORIZED: &str = "401";
}

/// [`error_message`] as a name/message table.
pub const ERROR_MESSAGE: &[(&str, &str)] = &[
    ("NO_SIGNATURE", error_message::NO_SIGNATURE),
    ("NO_DATA", error_message::NO_DATA),
    ("INVALID_SIGNATURE", error_message::INVALID_SIGNATURE),
    ("DATA_NOT_INTEGRITY", error_message::DATA_NOT_INTEGRITY),
    ("WEBHOOK_URL_INVALID", error_message::WEBHOOK_URL_INVALID),
    ("UNAUTHORIZED", error_message::UNAUTHORIZED),
    ("INTERNAL_SERVER_ERROR", error_message::INTERNAL_SERVER_ERROR),
    ("INVALID_PARAMETER", error_message::INVALID_PARAMETER),
];

/// [`error_code`] as a name/code table.
pub const ERROR_CODE: &[(&str, &str)] = &[
    ("INTERNAL_SERVER_ERROR", error_code::INTERNAL_SERVER_ERROR),
    ("UNAUTHORIZED", error_code::UNAUTHORIZED),
];

/// Former name of [`CreatePaymentLinkRequest`](crate::types::CreatePaymentLinkRequest).
#[deprecated(since = "1.0.0", note = "use `types::CreatePaymentLinkRequest`")]
pub type PaymentData = crate::types::CreatePaymentLinkRequest;

/// Former name of [`CreatePaymentLinkResponse`](crate::types::CreatePaymentLinkResponse).
#[deprecated(since = "1.0.0", note = "use `types::CreatePaymentLinkResponse`")]
pub type CreatePaymentResult = crate::types::CreatePaymentLinkResponse;

/// Former name of [`PaymentLink`](crate::types::PaymentLink).
#[deprecated(since = "1.0.0", note = "use `types::PaymentLink`")]
pub type PaymentLinkInformation = crate::types::PaymentLink;

/// Emitted each time a deprecated client method is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeprecationNotice {
    /// The method that was called.
    pub legacy_name: &'static str,
    /// What to call instead.
    pub replacement: &'static str,
}

impl fmt::Display for DeprecationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` is deprecated, use `{}` instead",
            self.legacy_name, self.replacement
        )
    }
}

/// Callback installed with [`PayOSBuilder::on_deprecation`](crate::PayOSBuilder::on_deprecation).
pub type DeprecationHook = Arc<dyn Fn(&DeprecationNotice) + Send + Sync>;
