//! Dual-convention entity layer.
//!
//! Entities store their fields once, under canonical snake_case names, and
//! answer lookups and dumps in either convention through the entity's
//! [`Schema`]. Entities are plain immutable values: construction is the only
//! way to produce one, and nothing here mutates them afterwards.
//!
//! # Example
//!
//! ```
//! use payos_lib::model::{Model, Naming};
//! use payos_lib::types::CreatePaymentLinkRequest;
//! use serde_json::json;
//!
//! let request = CreatePaymentLinkRequest::construct_legacy(json!({
//!     "orderCode": 123,
//!     "amount": 1000,
//!     "description": "Order",
//!     "cancelUrl": "http://cancel",
//!     "returnUrl": "http://return",
//! }))?;
//!
//! assert_eq!(request.get("orderCode")?, json!(123));
//! assert_eq!(request.get("order_code")?, json!(123));
//! assert!(request.model_dump_json(Naming::Canonical)?.starts_with(r#"{"order_code":123"#));
//! # Ok::<(), payos_lib::PayOSError>(())
//! ```

pub mod schema;
pub mod serialize;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

pub use schema::{FieldSpec, NameConflict, Schema, Unknown};

use crate::errors::{PayOSError, ValidationError};
use crate::legacy::Legacy;
use crate::Result;

/// Key convention requested from a dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Naming {
    /// snake_case field names.
    #[default]
    Canonical,
    /// camelCase aliases.
    Alias,
}

/// A request, response or webhook entity addressable under two naming
/// conventions.
///
/// Implementations are generated by `payos_model!`; only the provided
/// methods are meant to be called directly.
pub trait Model: Serialize + DeserializeOwned + Sized {
    /// Entity type name, used in error messages.
    const NAME: &'static str;

    /// The entity's alias table.
    fn schema() -> &'static Schema;

    /// Value of the field with the given canonical name.
    #[doc(hidden)]
    fn field_value(&self, canonical: &str) -> Option<Result<Value>>;

    /// Build an entity from canonical field names.
    ///
    /// Top-level alias spellings and unknown keys are rejected, as are
    /// missing required fields.
    fn construct(fields: Value) -> Result<Self> {
        let map = expect_object::<Self>(fields)?;
        let map = Self::schema().to_canonical(map, Unknown::Reject, true)?;
        decode(map)
    }

    /// Build an entity from alias names, canonical names, or a mix.
    ///
    /// Every key is resolved through the alias table before storage.
    fn construct_legacy(fields: Value) -> Result<Legacy<Self>> {
        let map = expect_object::<Self>(fields)?;
        let map = Self::schema().to_canonical(map, Unknown::Reject, false)?;
        decode(map).map(Legacy::new)
    }

    /// Parse an entity received from the API.
    ///
    /// Like [`construct_legacy`](Model::construct_legacy), except keys the
    /// schema does not know are dropped.
    fn from_wire(data: Value) -> Result<Self> {
        let map = expect_object::<Self>(data)?;
        let map = Self::schema().to_canonical(map, Unknown::Ignore, false)?;
        decode(map)
    }

    /// Look up a field by canonical name or alias.
    fn get(&self, name: &str) -> Result<Value> {
        let unknown = || PayOSError::UnknownAttribute {
            model: Self::NAME,
            name: name.to_string(),
        };
        let canonical = Self::schema().canonical_of(name).ok_or_else(unknown)?;
        self.field_value(canonical).ok_or_else(unknown)?
    }

    /// Dump to a map keyed in the requested convention.
    fn model_dump(&self, naming: Naming) -> Result<Map<String, Value>> {
        match naming {
            Naming::Canonical => serialize::to_canonical_dict(self),
            Naming::Alias => serialize::to_alias_dict(self),
        }
    }

    /// Dump to a JSON string keyed in the requested convention.
    fn model_dump_json(&self, naming: Naming) -> Result<String> {
        match naming {
            Naming::Canonical => serialize::to_canonical_json(self),
            Naming::Alias => serialize::to_alias_json(self),
        }
    }

    /// Alias-keyed map; same as `model_dump(Naming::Alias)`.
    fn model_dump_camel_case(&self) -> Result<Map<String, Value>> {
        serialize::to_alias_dict(self)
    }

    /// Canonical-keyed map; same as `model_dump(Naming::Canonical)`.
    fn model_dump_snake_case(&self) -> Result<Map<String, Value>> {
        serialize::to_canonical_dict(self)
    }
}

fn expect_object<M: Model>(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ValidationError::Malformed {
            model: M::NAME,
            reason: format!("expected an object, got {}", json_type(&other)),
        }
        .into()),
    }
}

fn decode<M: Model>(map: Map<String, Value>) -> Result<M> {
    serde_json::from_value(Value::Object(map)).map_err(|e| {
        ValidationError::Malformed {
            model: M::NAME,
            reason: e.to_string(),
        }
        .into()
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Declare an entity struct together with its alias table.
///
/// ```text
/// payos_model! {
///     pub struct ItemData {
///         name: String,
///         tax_percentage: Option<i32> => "taxPercentage",
///         items: Option<Vec<ItemData>> [nested ItemData],
///     }
/// }
/// ```
///
/// `=> "alias"` declares the camelCase spelling; `[nested T]` marks a field
/// holding a `T` entity or a list of them. Duplicate names or aliases fail
/// const evaluation.
macro_rules! payos_model {
    (@alias) => { ::core::option::Option::None };
    (@alias $alias:literal) => { ::core::option::Option::Some($alias) };
    (@nested) => { ::core::option::Option::None };
    (@nested $nested:ty) => {
        ::core::option::Option::Some(<$nested as $crate::model::Model>::schema)
    };
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty $(=> $alias:literal)? $([nested $nested:ty])?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )*
        }

        impl $name {
            #[doc(hidden)]
            pub const FIELDS: &'static [$crate::model::FieldSpec] = &[
                $(
                    $crate::model::FieldSpec {
                        name: stringify!($field),
                        alias: $crate::model::payos_model!(@alias $($alias)?),
                        nested: $crate::model::payos_model!(@nested $($nested)?),
                    },
                )*
            ];
        }

        const _: () = $crate::model::schema::assert_no_conflict($name::FIELDS);

        impl $crate::model::Model for $name {
            const NAME: &'static str = stringify!($name);

            fn schema() -> &'static $crate::model::Schema {
                static SCHEMA: ::std::sync::OnceLock<$crate::model::Schema> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    $crate::model::Schema::from_checked(stringify!($name), $name::FIELDS)
                })
            }

            fn field_value(
                &self,
                canonical: &str,
            ) -> ::core::option::Option<$crate::Result<::serde_json::Value>> {
                match canonical {
                    $(
                        stringify!($field) => ::core::option::Option::Some(
                            ::serde_json::to_value(&self.$field).map_err(::core::convert::Into::into),
                        ),
                    )*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };
}

pub(crate) use payos_model;
