//! Dump entities to maps and JSON strings in either key convention.
//!
//! Canonical output mirrors the entity's declaration order. Alias output is
//! the canonical map rewritten through the entity's [`Schema`], so both share
//! one key order and one set of values. Fields that are unset are dumped as
//! `null`; the request body builder strips them separately.
//!
//! [`Schema`]: super::Schema

use serde_json::{Map, Value};

use super::Model;
use crate::errors::PayOSError;
use crate::Result;

/// Map keyed by canonical field names.
pub fn to_canonical_dict<M: Model>(entity: &M) -> Result<Map<String, Value>> {
    match serde_json::to_value(entity)? {
        Value::Object(map) => Ok(map),
        _ => Err(PayOSError::Serialization(format!(
            "{} did not serialize to an object",
            M::NAME
        ))),
    }
}

/// Map keyed by aliases, recursing into nested entities.
pub fn to_alias_dict<M: Model>(entity: &M) -> Result<Map<String, Value>> {
    let canonical = to_canonical_dict(entity)?;
    Ok(M::schema().to_alias(canonical))
}

/// Compact JSON keyed by canonical field names.
pub fn to_canonical_json<M: Model>(entity: &M) -> Result<String> {
    Ok(serde_json::to_string(&to_canonical_dict(entity)?)?)
}

/// Compact JSON keyed by aliases.
pub fn to_alias_json<M: Model>(entity: &M) -> Result<String> {
    Ok(serde_json::to_string(&to_alias_dict(entity)?)?)
}

/// Alias-keyed body for an outgoing request, with unset fields removed at
/// every depth.
pub(crate) fn to_wire_body<M: Model>(entity: &M) -> Result<Map<String, Value>> {
    let mut body = to_alias_dict(entity)?;
    strip_nulls(&mut body);
    Ok(body)
}

fn strip_nulls(map: &mut Map<String, Value>) {
    map.retain(|_, v| !v.is_null());
    for value in map.values_mut() {
        match value {
            Value::Object(inner) => strip_nulls(inner),
            Value::Array(items) => {
                for item in items.iter_mut() {
                    if let Value::Object(inner) = item {
                        strip_nulls(inner);
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CreatePaymentLinkRequest, ItemData};
    use serde_json::json;

    fn request() -> CreatePaymentLinkRequest {
        CreatePaymentLinkRequest {
            order_code: 123,
            amount: 2000,
            description: "Order 123".into(),
            cancel_url: "https://shop.test/cancel".into(),
            return_url: "https://shop.test/return".into(),
            signature: None,
            items: Some(vec![ItemData {
                name: "Noodles".into(),
                quantity: 2,
                price: 1000,
                unit: None,
                tax_percentage: Some(10),
            }]),
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

    #[test]
    fn test_canonical_json_keeps_declaration_order() {
        let json = to_canonical_json(&request()).unwrap();
        assert!(json.starts_with(r#"{"order_code":123,"amount":2000"#));
    }

    #[test]
    fn test_alias_dict_renames_nested_items() {
        let dict = to_alias_dict(&request()).unwrap();
        assert_eq!(dict["orderCode"], json!(123));
        assert_eq!(dict["cancelUrl"], json!("https://shop.test/cancel"));
        assert_eq!(dict["items"][0]["taxPercentage"], json!(10));
        assert!(dict.contains_key("buyerName"));
        assert!(!dict.contains_key("order_code"));
    }

    #[test]
    fn test_alias_json_matches_alias_dict() {
        let entity = request();
        let json = to_alias_json(&entity).unwrap();
        let reparsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(reparsed, Value::Object(to_alias_dict(&entity).unwrap()));
        assert!(json.starts_with(r#"{"orderCode":123"#));
    }

    #[test]
    fn test_wire_body_strips_nulls_at_every_depth() {
        let body = to_wire_body(&request()).unwrap();
        assert!(!body.contains_key("buyerName"));
        assert!(!body.contains_key("signature"));
        assert_eq!(
            Value::Object(body["items"][0].as_object().unwrap().clone()),
            json!({"name": "Noodles", "quantity": 2, "price": 1000, "taxPercentage": 10})
        );
    }
}
