//! Property-based tests for the dual-naming entity layer.
//!
//! These tests use proptest to check that both spellings of every field stay
//! in agreement across dumps, lookups and reconstruction.

#[cfg(test)]
mod dual_naming_properties {
    use payos_lib::model::{Model, Naming};
    use payos_lib::types::{CreatePaymentLinkRequest, InvoiceRequest, ItemData};
    use proptest::prelude::*;
    use serde_json::Value;

    fn item() -> impl Strategy<Value = ItemData> {
        (
            "[a-zA-Z ]{1,16}",
            1i64..100,
            0i64..1_000_000,
            proptest::option::of("[a-z]{1,8}"),
            proptest::option::of(0i32..=10),
        )
            .prop_map(|(name, quantity, price, unit, tax_percentage)| ItemData {
                name,
                quantity,
                price,
                unit,
                tax_percentage,
            })
    }

    fn request() -> impl Strategy<Value = CreatePaymentLinkRequest> {
        (
            0i64..9_007_199_254_740_991,
            1i64..100_000_000,
            "[a-zA-Z0-9 ]{1,25}",
            proptest::option::of(proptest::collection::vec(item(), 0..4)),
            proptest::option::of("[a-zA-Z ]{1,20}"),
            proptest::option::of(any::<bool>()),
            proptest::option::of(1_600_000_000i64..2_000_000_000),
        )
            .prop_map(
                |(order_code, amount, description, items, buyer_name, no_invoice, expired_at)| {
                    let mut request = CreatePaymentLinkRequest::new(
                        order_code,
                        amount,
                        description,
                        "https://shop.example/cancel",
                        "https://shop.example/return",
                    );
                    request.items = items;
                    request.buyer_name = buyer_name;
                    request.invoice = no_invoice.map(|flag| InvoiceRequest {
                        buyer_not_get_invoice: Some(flag),
                        tax_percentage: None,
                    });
                    request.expired_at = expired_at;
                    request
                },
            )
    }

    proptest! {
        /// Every field reads the same under its canonical name and its alias.
        #[test]
        fn get_agrees_across_spellings(entity in request()) {
            let schema = CreatePaymentLinkRequest::schema();
            for field in schema.fields() {
                let canonical = entity.get(field.name).unwrap();
                let external = entity.get(field.external_name()).unwrap();
                prop_assert_eq!(canonical, external);
            }
        }

        /// Rebuilding from either dump yields the same entity.
        #[test]
        fn dumps_round_trip(entity in request()) {
            let canonical = entity.model_dump(Naming::Canonical).unwrap();
            let alias = entity.model_dump(Naming::Alias).unwrap();

            let from_canonical = CreatePaymentLinkRequest::construct(Value::Object(canonical.clone())).unwrap();
            let from_alias = CreatePaymentLinkRequest::construct_legacy(Value::Object(alias)).unwrap();

            prop_assert_eq!(&from_canonical, &entity);
            prop_assert_eq!(from_alias.model_dump(Naming::Canonical).unwrap(), canonical);
        }

        /// JSON strings parse back to the matching dict.
        #[test]
        fn json_matches_dict(entity in request()) {
            for naming in [Naming::Canonical, Naming::Alias] {
                let parsed: Value = serde_json::from_str(&entity.model_dump_json(naming).unwrap()).unwrap();
                prop_assert_eq!(parsed, Value::Object(entity.model_dump(naming).unwrap()));
            }
        }

        /// The explicit camelCase and snake_case dumps are the two namings.
        #[test]
        fn explicit_dumps_match_namings(entity in request()) {
            prop_assert_eq!(
                entity.model_dump_camel_case().unwrap(),
                entity.model_dump(Naming::Alias).unwrap()
            );
            prop_assert_eq!(
                entity.model_dump_snake_case().unwrap(),
                entity.model_dump(Naming::Canonical).unwrap()
            );
        }

        /// Serialization is idempotent.
        #[test]
        fn dumps_are_repeatable(entity in request()) {
            prop_assert_eq!(
                entity.model_dump_json(Naming::Alias).unwrap(),
                entity.model_dump_json(Naming::Alias).unwrap()
            );
        }
    }
}
