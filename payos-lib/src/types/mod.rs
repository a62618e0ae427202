//! Entities exchanged with the payOS API.

mod invoices;
mod payment_requests;
mod webhooks;

pub use invoices::{filename_from_content_disposition, FileDownload, Invoice, InvoicesInfo, DEFAULT_FILENAME};
pub use payment_requests::{
    CreatePaymentLinkRequest, CreatePaymentLinkResponse, InvoiceRequest, ItemData, PaymentLink,
    PaymentLinkStatus, Transaction,
};
pub use webhooks::{ConfirmWebhookResponse, Webhook, WebhookData};
