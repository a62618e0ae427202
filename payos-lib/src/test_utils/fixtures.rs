//! Credentials and canned payloads shaped like real payOS traffic.

use serde_json::{json, Value};

use crate::config::PayOSConfig;
use crate::crypto::{HmacSignatureProvider, SignatureProvider};
use crate::types::{CreatePaymentLinkRequest, ItemData};

pub const CLIENT_ID: &str = "test-client-id";
pub const API_KEY: &str = "test-api-key";
pub const CHECKSUM_KEY: &str = "test-checksum-key";
pub const BASE_URL: &str = "https://api-test.payos.vn";

/// Configuration pointing at the test endpoint.
pub fn config() -> PayOSConfig {
    PayOSConfig::new(CLIENT_ID, API_KEY, CHECKSUM_KEY).with_base_url(BASE_URL)
}

/// Request with only the required fields set.
pub fn create_request() -> CreatePaymentLinkRequest {
    CreatePaymentLinkRequest::new(
        12345,
        2000,
        "Test payment",
        "http://localhost/cancel",
        "http://localhost/return",
    )
}

/// Request with items and buyer details.
pub fn full_create_request() -> CreatePaymentLinkRequest {
    let mut request = create_request().with_items(vec![
        ItemData {
            name: "product 1".into(),
            quantity: 1,
            price: 1000,
            unit: Some("piece".into()),
            tax_percentage: Some(10),
        },
        ItemData {
            name: "product 2".into(),
            quantity: 1,
            price: 1000,
            unit: Some("piece".into()),
            tax_percentage: Some(10),
        },
    ]);
    request.buyer_name = Some("buyer name".into());
    request.buyer_email = Some("buyer@email.com".into());
    request
}

/// `data` of a create-payment-link response, alias keyed.
pub fn create_response_json() -> Value {
    json!({
        "bin": "970422",
        "accountNumber": "0123456789",
        "accountName": "NGUYEN VAN A",
        "amount": 2000,
        "description": "Test payment",
        "orderCode": 12345,
        "currency": "VND",
        "paymentLinkId": "payment-link-id",
        "status": "PENDING",
        "expiredAt": null,
        "checkoutUrl": "https://pay.payos.vn/web/payment-link-id",
        "qrCode": "qrcode"
    })
}

/// `data` of a payment-link lookup with the given status.
pub fn payment_link_json(status: &str) -> Value {
    let paid = if status == "PAID" { 2000 } else { 0 };
    let (reason, canceled_at) = if status == "CANCELLED" {
        (json!("Changed my mind"), json!("2025-12-12T10:00:00+07:00"))
    } else {
        (Value::Null, Value::Null)
    };
    json!({
        "id": "payment-link-id",
        "orderCode": 12345,
        "amount": 2000,
        "amountPaid": paid,
        "amountRemaining": 2000 - paid,
        "status": status,
        "createdAt": "2025-12-12T09:00:00+07:00",
        "transactions": [],
        "cancellationReason": reason,
        "canceledAt": canceled_at
    })
}

/// `data` of a confirm-webhook response.
pub fn confirm_webhook_json(url: &str) -> Value {
    json!({
        "webhookUrl": url,
        "accountNumber": "113366668888",
        "accountName": "QUY VAC XIN PHONG CHONG COVID",
        "name": "My Payment Channel",
        "shortName": "BIDV"
    })
}

/// `data` member of a webhook delivery.
pub fn webhook_data_json() -> Value {
    json!({
        "orderCode": 123,
        "amount": 3000,
        "description": "VQRIO123",
        "accountNumber": "12345678",
        "reference": "TF230204212323",
        "transactionDateTime": "2023-02-04 18:25:00",
        "currency": "VND",
        "paymentLinkId": "124c33293c43417ab7879e14c8d9eb18",
        "code": "00",
        "desc": "success",
        "counterAccountBankId": "",
        "counterAccountBankName": "",
        "counterAccountName": "",
        "counterAccountNumber": "",
        "virtualAccountName": "",
        "virtualAccountNumber": ""
    })
}

/// A webhook delivery signed with [`CHECKSUM_KEY`].
pub fn signed_webhook_json() -> Value {
    let data = webhook_data_json();
    let signature = HmacSignatureProvider
        .signature_from_object(&data, CHECKSUM_KEY)
        .unwrap_or_default();
    json!({
        "code": "00",
        "desc": "success",
        "success": true,
        "data": data,
        "signature": signature
    })
}

/// `data` of an invoices response holding one fully populated invoice per
/// number.
pub fn invoices_json(numbers: &[&str]) -> Value {
    let invoices: Vec<Value> = numbers
        .iter()
        .map(|number| {
            json!({
                "invoiceId": "invoice-id",
                "invoiceNumber": number,
                "issuedTimestamp": 1765504800,
                "issuedDatetime": "2025-12-12T02:00:00.000Z",
                "transactionId": "txn-id",
                "reservationCode": "RES-CODE",
                "codeOfTax": "TAX-CODE"
            })
        })
        .collect();
    json!({ "invoices": invoices })
}

/// A binary file response, as served by download endpoints.
pub fn file_response(
    data: &[u8],
    content_type: &str,
    content_disposition: Option<&str>,
) -> crate::executors::ApiResponse {
    let mut headers = std::collections::BTreeMap::from([(
        "content-type".to_string(),
        content_type.to_string(),
    )]);
    if let Some(disposition) = content_disposition {
        headers.insert("content-disposition".to_string(), disposition.to_string());
    }
    crate::executors::ApiResponse {
        status: 200,
        headers,
        body: data.to_vec(),
    }
}
