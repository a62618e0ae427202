//! Flat pre-2.0 methods on [`PayOS`].

use crate::client::PayOS;
use crate::resources::{PaymentLinkRef, WebhookPayload};
use crate::types::{
    ConfirmWebhookResponse, CreatePaymentLinkRequest, CreatePaymentLinkResponse, PaymentLink,
    WebhookData,
};

use super::{DeprecationNotice, Legacy, LegacyPayOSError};

type LegacyResult<T> = std::result::Result<Legacy<T>, LegacyPayOSError>;

impl PayOS {
    fn deprecated(&self, legacy_name: &'static str, replacement: &'static str) {
        self.notify_deprecated(DeprecationNotice {
            legacy_name,
            replacement,
        });
    }

    /// Create a payment link.
    #[deprecated(since = "1.0.0", note = "use `payment_requests().create`")]
    pub async fn create_payment_link(
        &self,
        payment_data: &CreatePaymentLinkRequest,
    ) -> LegacyResult<CreatePaymentLinkResponse> {
        self.deprecated("create_payment_link", "payment_requests().create");
        let response = self.payment_requests().create(payment_data).await?;
        Ok(Legacy::new(response))
    }

    /// Look up a payment link by id or order code.
    #[deprecated(since = "1.0.0", note = "use `payment_requests().get`")]
    pub async fn get_payment_link_information(
        &self,
        order_id: impl Into<PaymentLinkRef>,
    ) -> LegacyResult<PaymentLink> {
        self.deprecated("get_payment_link_information", "payment_requests().get");
        let link = self.payment_requests().get(order_id).await?;
        Ok(Legacy::new(link))
    }

    /// Cancel a payment link.
    #[deprecated(since = "1.0.0", note = "use `payment_requests().cancel`")]
    pub async fn cancel_payment_link(
        &self,
        order_id: impl Into<PaymentLinkRef>,
        cancellation_reason: Option<&str>,
    ) -> LegacyResult<PaymentLink> {
        self.deprecated("cancel_payment_link", "payment_requests().cancel");
        let link = self
            .payment_requests()
            .cancel(order_id, cancellation_reason)
            .await?;
        Ok(Legacy::new(link))
    }

    /// Register the channel's webhook URL.
    #[deprecated(since = "1.0.0", note = "use `webhooks().confirm`")]
    pub async fn confirm_webhook(&self, webhook_url: &str) -> LegacyResult<ConfirmWebhookResponse> {
        self.deprecated("confirm_webhook", "webhooks().confirm");
        let confirmed = self.webhooks().confirm(webhook_url).await?;
        Ok(Legacy::new(confirmed))
    }

    /// Verify a webhook delivery and return its data.
    #[deprecated(since = "1.0.0", note = "use `webhooks().verify`")]
    pub fn verify_payment_webhook_data(
        &self,
        webhook_body: impl Into<WebhookPayload>,
    ) -> LegacyResult<WebhookData> {
        self.deprecated("verify_payment_webhook_data", "webhooks().verify");
        let data = self.webhooks().verify(webhook_body)?;
        Ok(Legacy::new(data))
    }
}
