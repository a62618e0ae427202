//! Payment-link request and response entities.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::model::payos_model;

payos_model! {
    /// A line item shown on the checkout page.
    pub struct ItemData {
        name: String,
        quantity: i64,
        price: i64,
        unit: Option<String>,
        tax_percentage: Option<i32> => "taxPercentage",
    }
}

payos_model! {
    /// E-invoice options attached to a payment request.
    pub struct InvoiceRequest {
        buyer_not_get_invoice: Option<bool> => "buyerNotGetInvoice",
        tax_percentage: Option<i32> => "taxPercentage",
    }
}

payos_model! {
    /// Body of `POST /v2/payment-requests`.
    pub struct CreatePaymentLinkRequest {
        order_code: i64 => "orderCode",
        amount: i64,
        description: String,
        cancel_url: String => "cancelUrl",
        return_url: String => "returnUrl",
        /// Filled in by the client when the request is sent.
        signature: Option<String>,
        items: Option<Vec<ItemData>> [nested ItemData],
        buyer_name: Option<String> => "buyerName",
        buyer_company_name: Option<String> => "buyerCompanyName",
        buyer_tax_code: Option<String> => "buyerTaxCode",
        buyer_email: Option<String> => "buyerEmail",
        buyer_phone: Option<String> => "buyerPhone",
        buyer_address: Option<String> => "buyerAddress",
        invoice: Option<InvoiceRequest> [nested InvoiceRequest],
        /// Unix timestamp (seconds) after which the link stops accepting payment.
        expired_at: Option<i64> => "expiredAt",
    }
}

impl CreatePaymentLinkRequest {
    /// Request with the five required fields set and everything else unset.
    pub fn new(
        order_code: i64,
        amount: i64,
        description: impl Into<String>,
        cancel_url: impl Into<String>,
        return_url: impl Into<String>,
    ) -> Self {
        Self {
            order_code,
            amount,
            description: description.into(),
            cancel_url: cancel_url.into(),
            return_url: return_url.into(),
            signature: None,
            items: None,
            buyer_name: None,
            buyer_company_name: None,
            buyer_tax_code: None,
            buyer_email: None,
            buyer_phone: None,
            buyer_address: None,
            invoice: None,
            expired_at: None,
        }
    }

    /// Attach line items.
    pub fn with_items(mut self, items: Vec<ItemData>) -> Self {
        self.items = Some(items);
        self
    }

    /// Set the link expiry as a unix timestamp.
    pub fn with_expired_at(mut self, expired_at: i64) -> Self {
        self.expired_at = Some(expired_at);
        self
    }

    /// Check the constraints the API would otherwise reject.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount <= 0 {
            return Err(ValidationError::invalid_field("amount", "must be positive"));
        }
        for (field, value) in [
            ("description", &self.description),
            ("cancel_url", &self.cancel_url),
            ("return_url", &self.return_url),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::invalid_field(field, "must not be empty"));
            }
        }
        for (i, item) in self.items.iter().flatten().enumerate() {
            if item.name.trim().is_empty() {
                return Err(ValidationError::invalid_field(
                    format!("items[{}].name", i),
                    "must not be empty",
                ));
            }
            if item.quantity <= 0 {
                return Err(ValidationError::invalid_field(
                    format!("items[{}].quantity", i),
                    "must be positive",
                ));
            }
            if item.price < 0 {
                return Err(ValidationError::invalid_field(
                    format!("items[{}].price", i),
                    "must not be negative",
                ));
            }
        }
        Ok(())
    }
}

/// Lifecycle state of a payment link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentLinkStatus {
    Pending,
    Cancelled,
    Underpaid,
    Paid,
    Expired,
    Processing,
    Failed,
}

impl PaymentLinkStatus {
    /// Wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Cancelled => "CANCELLED",
            Self::Underpaid => "UNDERPAID",
            Self::Paid => "PAID",
            Self::Expired => "EXPIRED",
            Self::Processing => "PROCESSING",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for PaymentLinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

payos_model! {
    /// Result of creating a payment link.
    pub struct CreatePaymentLinkResponse {
        bin: String,
        account_number: String => "accountNumber",
        account_name: String => "accountName",
        amount: i64,
        description: String,
        order_code: i64 => "orderCode",
        currency: String,
        payment_link_id: String => "paymentLinkId",
        status: PaymentLinkStatus,
        expired_at: Option<i64> => "expiredAt",
        checkout_url: String => "checkoutUrl",
        qr_code: String => "qrCode",
    }
}

payos_model! {
    /// A bank transfer credited to a payment link.
    pub struct Transaction {
        reference: String,
        amount: i64,
        account_number: String => "accountNumber",
        description: String,
        transaction_date_time: String => "transactionDateTime",
        virtual_account_name: Option<String> => "virtualAccountName",
        virtual_account_number: Option<String> => "virtualAccountNumber",
        counter_account_bank_id: Option<String> => "counterAccountBankId",
        counter_account_bank_name: Option<String> => "counterAccountBankName",
        counter_account_name: Option<String> => "counterAccountName",
        counter_account_number: Option<String> => "counterAccountNumber",
    }
}

payos_model! {
    /// Current state of a payment link.
    pub struct PaymentLink {
        id: String,
        order_code: i64 => "orderCode",
        amount: i64,
        amount_paid: i64 => "amountPaid",
        amount_remaining: i64 => "amountRemaining",
        status: PaymentLinkStatus,
        created_at: String => "createdAt",
        #[serde(default)]
        transactions: Vec<Transaction> [nested Transaction],
        cancellation_reason: Option<String> => "cancellationReason",
        canceled_at: Option<String> => "canceledAt",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Model, Naming};
    use crate::PayOSError;
    use serde_json::json;

    fn valid_request() -> CreatePaymentLinkRequest {
        CreatePaymentLinkRequest::new(
            12345,
            2000,
            "Test payment",
            "http://localhost/cancel",
            "http://localhost/return",
        )
    }

    #[test]
    fn test_construct_rejects_alias_keys() {
        let err = CreatePaymentLinkRequest::construct(json!({
            "orderCode": 1,
            "amount": 1000,
            "description": "d",
            "cancel_url": "c",
            "return_url": "r",
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            PayOSError::Validation(ValidationError::UnknownField { ref field, .. }) if field == "orderCode"
        ));
    }

    #[test]
    fn test_construct_legacy_rejects_field_given_twice() {
        let orders = [
            json!({"orderCode": 1, "order_code": 2}),
            json!({"order_code": 2, "orderCode": 1}),
        ];
        for order in orders {
            let mut fields = json!({
                "amount": 1000,
                "description": "d",
                "cancelUrl": "c",
                "returnUrl": "r",
            });
            for (key, value) in order.as_object().unwrap() {
                fields[key] = value.clone();
            }
            let err = CreatePaymentLinkRequest::construct_legacy(fields).unwrap_err();
            assert!(matches!(
                err,
                PayOSError::Validation(ValidationError::DuplicateField { ref field, .. }) if field == "order_code"
            ));
        }
    }

    #[test]
    fn test_construct_reports_missing_required_field() {
        let err = CreatePaymentLinkRequest::construct(json!({
            "order_code": 1,
            "amount": 1000,
            "description": "d",
            "cancel_url": "c",
        }))
        .unwrap_err();
        match err {
            PayOSError::Validation(ValidationError::Malformed { model, reason }) => {
                assert_eq!(model, "CreatePaymentLinkRequest");
                assert!(reason.contains("return_url"), "{}", reason);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_construct_accepts_nested_alias_keys() {
        let request = CreatePaymentLinkRequest::construct(json!({
            "order_code": 1,
            "amount": 1000,
            "description": "d",
            "cancel_url": "c",
            "return_url": "r",
            "items": [{"name": "a", "quantity": 1, "price": 1000, "taxPercentage": 8}],
        }))
        .unwrap();
        assert_eq!(request.items.unwrap()[0].tax_percentage, Some(8));
    }

    #[test]
    fn test_get_by_either_spelling() {
        let request = valid_request();
        assert_eq!(request.get("cancelUrl").unwrap(), json!("http://localhost/cancel"));
        assert_eq!(request.get("cancel_url").unwrap(), json!("http://localhost/cancel"));
        assert_eq!(request.get("buyerName").unwrap(), json!(null));

        let err = request.get("cancelURL").unwrap_err();
        assert!(matches!(err, PayOSError::UnknownAttribute { ref name, .. } if name == "cancelURL"));
    }

    #[test]
    fn test_validate() {
        assert!(valid_request().validate().is_ok());

        let mut request = valid_request();
        request.amount = 0;
        assert_eq!(
            request.validate().unwrap_err(),
            ValidationError::invalid_field("amount", "must be positive")
        );

        let mut request = valid_request();
        request.return_url = "  ".into();
        assert!(request.validate().is_err());

        let request = valid_request().with_items(vec![ItemData {
            name: "x".into(),
            quantity: 0,
            price: 10,
            unit: None,
            tax_percentage: None,
        }]);
        assert_eq!(
            request.validate().unwrap_err(),
            ValidationError::invalid_field("items[0].quantity", "must be positive")
        );
    }

    #[test]
    fn test_payment_link_from_wire() {
        let link = PaymentLink::from_wire(json!({
            "id": "plink",
            "orderCode": 12345,
            "amount": 2000,
            "amountPaid": 2000,
            "amountRemaining": 0,
            "status": "PAID",
            "createdAt": "2025-12-12T09:00:00+07:00",
            "transactions": [{
                "reference": "FT-REFERENCE",
                "amount": 2000,
                "accountNumber": "0123456789",
                "description": "Payment",
                "transactionDateTime": "2025-12-12T09:00:00+07:00",
                "counterAccountName": "NGUYEN VAN A",
                "unexpected": 1
            }],
            "cancellationReason": null,
            "canceledAt": null,
            "newServerField": "ignored"
        }))
        .unwrap();

        assert_eq!(link.status, PaymentLinkStatus::Paid);
        assert_eq!(link.transactions.len(), 1);
        assert_eq!(
            link.transactions[0].counter_account_name.as_deref(),
            Some("NGUYEN VAN A")
        );
        assert_eq!(link.get("amountPaid").unwrap(), json!(2000));
        assert_eq!(link.get("status").unwrap(), json!("PAID"));

        let dumped = link.model_dump(Naming::Alias).unwrap();
        assert_eq!(dumped["transactions"][0]["transactionDateTime"], json!("2025-12-12T09:00:00+07:00"));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(PaymentLinkStatus::Underpaid.to_string(), "UNDERPAID");
        assert_eq!(
            serde_json::to_value(PaymentLinkStatus::Cancelled).unwrap(),
            json!("CANCELLED")
        );
    }
}
