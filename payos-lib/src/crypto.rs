//! Checksum signatures over request and webhook data.
//!
//! payOS signs data with HMAC-SHA256 over a canonical query string: keys in
//! ascending order, `key=value` pairs joined by `&`. The client only sees the
//! [`SignatureProvider`] trait, so tests can substitute a fixed signer.

use hmac::{Hmac, Mac};
use serde_json::{Map, Value};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Fields covered by a payment-request signature, in signing order.
pub const PAYMENT_REQUEST_FIELDS: [&str; 5] =
    ["amount", "cancelUrl", "description", "orderCode", "returnUrl"];

/// Computes checksum signatures.
///
/// Both methods return `None` when no signature can be produced (empty key,
/// non-object data, missing fields); callers treat that as a failed check.
pub trait SignatureProvider: Send + Sync {
    /// Signature over every key of an object.
    fn signature_from_object(&self, data: &Value, key: &str) -> Option<String>;

    /// Signature over the five payment-request fields of an alias-keyed
    /// object.
    fn signature_of_payment_request(&self, data: &Value, key: &str) -> Option<String>;
}

/// HMAC-SHA256 signer, hex encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSignatureProvider;

impl SignatureProvider for HmacSignatureProvider {
    fn signature_from_object(&self, data: &Value, key: &str) -> Option<String> {
        let Value::Object(map) = data else {
            return None;
        };
        hmac_sha256_hex(key, &object_to_query_string(&sort_object_by_key(map)))
    }

    fn signature_of_payment_request(&self, data: &Value, key: &str) -> Option<String> {
        let Value::Object(map) = data else {
            return None;
        };
        let mut pairs = Vec::with_capacity(PAYMENT_REQUEST_FIELDS.len());
        for field in PAYMENT_REQUEST_FIELDS {
            let value = map.get(field)?;
            pairs.push(format!("{}={}", field, query_value(value)));
        }
        hmac_sha256_hex(key, &pairs.join("&"))
    }
}

/// Hex HMAC-SHA256 of `message`, or `None` for an empty key.
pub fn hmac_sha256_hex(key: &str, message: &str) -> Option<String> {
    if key.is_empty() {
        return None;
    }
    let mut mac = HmacSha256::new_from_slice(key.as_bytes()).ok()?;
    mac.update(message.as_bytes());
    Some(hex::encode(mac.finalize().into_bytes()))
}

/// Copy of `map` with keys in ascending order.
pub fn sort_object_by_key(map: &Map<String, Value>) -> Map<String, Value> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
        .into_iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// `key=value` pairs joined by `&`, in the map's own order.
pub fn object_to_query_string(map: &Map<String, Value>) -> String {
    map.iter()
        .map(|(k, v)| format!("{}={}", k, query_value(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn query_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) if s == "null" || s == "NULL" => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => sorted_deep(value).to_string(),
    }
}

fn sorted_deep(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            sort_object_by_key(map)
                .into_iter()
                .map(|(k, v)| {
                    let v = sorted_deep(&v);
                    (k, v)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(sorted_deep).collect()),
        other => other.clone(),
    }
}
