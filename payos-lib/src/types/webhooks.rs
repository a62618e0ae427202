//! Webhook registration and delivery entities.

use crate::model::payos_model;

payos_model! {
    /// The merchant channel a webhook URL was registered against.
    pub struct ConfirmWebhookResponse {
        webhook_url: String => "webhookUrl",
        account_number: String => "accountNumber",
        account_name: String => "accountName",
        name: String,
        short_name: String => "shortName",
    }
}

payos_model! {
    /// Payment details carried by a webhook delivery.
    pub struct WebhookData {
        order_code: i64 => "orderCode",
        amount: i64,
        description: String,
        account_number: String => "accountNumber",
        reference: String,
        transaction_date_time: String => "transactionDateTime",
        currency: String,
        payment_link_id: String => "paymentLinkId",
        code: String,
        desc: String,
        counter_account_bank_id: Option<String> => "counterAccountBankId",
        counter_account_bank_name: Option<String> => "counterAccountBankName",
        counter_account_name: Option<String> => "counterAccountName",
        counter_account_number: Option<String> => "counterAccountNumber",
        virtual_account_name: Option<String> => "virtualAccountName",
        virtual_account_number: Option<String> => "virtualAccountNumber",
    }
}

payos_model! {
    /// A webhook delivery as posted to the merchant's endpoint.
    pub struct Webhook {
        code: String,
        desc: String,
        success: bool,
        data: WebhookData [nested WebhookData],
        signature: String,
    }
}
