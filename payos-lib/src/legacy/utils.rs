//! Pre-2.0 signing helpers, kept as thin wrappers over [`crate::crypto`].

use serde_json::{Map, Value};

use crate::crypto::{self, HmacSignatureProvider, SignatureProvider};
use crate::model::serialize::to_alias_dict;
use crate::types::CreatePaymentLinkRequest;

/// Copy of `obj` with keys in ascending order.
#[deprecated(since = "1.0.0", note = "use `payos_lib::crypto::sort_object_by_key`")]
pub fn sort_obj_data_by_key(obj: &Map<String, Value>) -> Map<String, Value> {
    crypto::sort_object_by_key(obj)
}

/// `key=value` pairs joined by `&`, in the map's order.
#[deprecated(since = "1.0.0", note = "use `payos_lib::crypto::object_to_query_string`")]
pub fn convert_obj_to_query_str(obj: &Map<String, Value>) -> String {
    crypto::object_to_query_string(obj)
}

/// HMAC-SHA256 signature over every key of `data`.
#[deprecated(since = "1.0.0", note = "use `SignatureProvider::signature_from_object`")]
pub fn create_signature_from_obj(data: &Value, key: &str) -> Option<String> {
    HmacSignatureProvider.signature_from_object(data, key)
}

/// HMAC-SHA256 signature over the five signed payment-request fields.
#[deprecated(
    since = "1.0.0",
    note = "use `SignatureProvider::signature_of_payment_request`"
)]
pub fn create_signature_of_payment_request(
    payment_data: &CreatePaymentLinkRequest,
    key: &str,
) -> Option<String> {
    let data = Value::Object(to_alias_dict(payment_data).ok()?);
    HmacSignatureProvider.signature_of_payment_request(&data, key)
}
