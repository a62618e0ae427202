//! Namespaced operations of the [`PayOS`](crate::PayOS) client.

mod invoices;
mod payment_requests;
mod webhooks;

pub use invoices::Invoices;
pub use payment_requests::{PaymentLinkRef, PaymentRequests};
pub use webhooks::{WebhookPayload, Webhooks};
