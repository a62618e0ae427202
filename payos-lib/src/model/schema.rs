//! Bidirectional field-name tables.
//!
//! Every entity type owns one [`Schema`]: a static list of [`FieldSpec`]s
//! (canonical snake_case name, optional camelCase alias, optional nested
//! entity schema) plus a hash index over both spellings. The field list is
//! checked for collisions in a `const` context by the `payos_model!` macro,
//! so a duplicate alias fails the build rather than a call.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::errors::ValidationError;

/// One field of an entity.
#[derive(Clone, Copy)]
pub struct FieldSpec {
    /// Canonical (snake_case) name, used for storage and modern dumps.
    pub name: &'static str,
    /// External (camelCase) name, if it differs from the canonical one.
    pub alias: Option<&'static str>,
    /// Schema of the nested entity (or list of entities) held by this field.
    pub nested: Option<fn() -> &'static Schema>,
}

impl FieldSpec {
    /// The name used in alias-mode output.
    pub fn external_name(&self) -> &'static str {
        self.alias.unwrap_or(self.name)
    }
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("alias", &self.alias)
            .field("nested", &self.nested.is_some())
            .finish()
    }
}

/// Two fields of one entity claim the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameConflict {
    /// Index of the first field involved.
    pub first: usize,
    /// Index of the second field involved.
    pub second: usize,
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn names_collide(a: &FieldSpec, b: &FieldSpec) -> bool {
    if str_eq(a.name, b.name) {
        return true;
    }
    if let Some(alias) = a.alias {
        if str_eq(alias, b.name) {
            return true;
        }
        if let Some(other) = b.alias {
            if str_eq(alias, other) {
                return true;
            }
        }
    }
    if let Some(other) = b.alias {
        if str_eq(a.name, other) {
            return true;
        }
    }
    false
}

/// Find the first pair of distinct fields that share a canonical name or
/// alias. Usable in `const` items.
pub const fn find_conflict(fields: &[FieldSpec]) -> Option<NameConflict> {
    let mut i = 0;
    while i < fields.len() {
        let mut j = i + 1;
        while j < fields.len() {
            if names_collide(&fields[i], &fields[j]) {
                return Some(NameConflict { first: i, second: j });
            }
            j += 1;
        }
        i += 1;
    }
    None
}

/// Compile-time guard emitted by `payos_model!`.
pub const fn assert_no_conflict(fields: &[FieldSpec]) {
    if find_conflict(fields).is_some() {
        panic!("payos model declares the same field name or alias twice");
    }
}

/// Alias table for one entity type.
#[derive(Debug)]
pub struct Schema {
    model: &'static str,
    fields: &'static [FieldSpec],
    index: HashMap<&'static str, usize>,
}

impl Schema {
    /// Build a table, rejecting colliding names.
    pub fn try_new(
        model: &'static str,
        fields: &'static [FieldSpec],
    ) -> Result<Self, NameConflict> {
        match find_conflict(fields) {
            Some(conflict) => Err(conflict),
            None => Ok(Self::from_checked(model, fields)),
        }
    }

    /// Build a table from a field list that already passed
    /// [`assert_no_conflict`] at compile time.
    pub(crate) fn from_checked(model: &'static str, fields: &'static [FieldSpec]) -> Self {
        let mut index = HashMap::with_capacity(fields.len() * 2);
        for (pos, field) in fields.iter().enumerate() {
            index.insert(field.name, pos);
            if let Some(alias) = field.alias {
                index.insert(alias, pos);
            }
        }
        Self {
            model,
            fields,
            index,
        }
    }

    /// Entity type name.
    pub fn model(&self) -> &'static str {
        self.model
    }

    /// Declared fields, in declaration order.
    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Look up a field by canonical name or alias.
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        let fields: &'static [FieldSpec] = self.fields;
        self.index.get(name).map(|&pos| &fields[pos])
    }

    /// Canonical name for `name`, which may be either spelling.
    pub fn canonical_of(&self, name: &str) -> Option<&'static str> {
        self.field(name).map(|f| f.name)
    }

    /// Alias declared for the canonical field `canonical`.
    pub fn alias_of(&self, canonical: &str) -> Option<&'static str> {
        self.field(canonical)
            .filter(|f| f.name == canonical)
            .and_then(|f| f.alias)
    }

    /// Whether `name` is a canonical field name.
    pub fn is_canonical(&self, name: &str) -> bool {
        self.field(name).is_some_and(|f| f.name == name)
    }

    /// Rewrite a canonical-keyed value into alias keys, recursing into
    /// nested entities.
    pub fn to_alias(&self, map: Map<String, Value>) -> Map<String, Value> {
        let mut out = Map::with_capacity(map.len());
        for (key, value) in map {
            match self.field(&key) {
                Some(spec) => {
                    let value = alias_nested(spec, value);
                    out.insert(spec.external_name().to_string(), value);
                }
                None => {
                    out.insert(key, value);
                }
            }
        }
        out
    }

    /// Rewrite keys in either spelling to canonical names.
    ///
    /// A field given under both spellings is a
    /// [`ValidationError::DuplicateField`], whatever the key order.
    ///
    /// With [`Unknown::Reject`] a key matching no field is a
    /// [`ValidationError::UnknownField`]; with [`Unknown::Ignore`] it is
    /// dropped. With `canonical_only`, alias spellings at this level count as
    /// unknown.
    pub fn to_canonical(
        &self,
        map: Map<String, Value>,
        unknown: Unknown,
        canonical_only: bool,
    ) -> Result<Map<String, Value>, ValidationError> {
        let mut out = Map::with_capacity(map.len());
        for (key, value) in map {
            let spec = self
                .field(&key)
                .filter(|spec| !canonical_only || spec.name == key);
            match spec {
                Some(spec) => {
                    if out.contains_key(spec.name) {
                        return Err(ValidationError::DuplicateField {
                            model: self.model,
                            field: spec.name.to_string(),
                        });
                    }
                    let value = rename_nested_canonical(spec, value, unknown)?;
                    out.insert(spec.name.to_string(), value);
                }
                None if unknown == Unknown::Ignore => {
                    tracing::trace!(model = self.model, field = %key, "dropping unknown field");
                }
                None => {
                    return Err(ValidationError::UnknownField {
                        model: self.model,
                        field: key,
                    })
                }
            }
        }
        Ok(out)
    }
}

/// Policy for keys that match no declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unknown {
    /// Fail with [`ValidationError::UnknownField`].
    Reject,
    /// Drop the key.
    Ignore,
}

fn alias_nested(spec: &FieldSpec, value: Value) -> Value {
    let Some(nested) = spec.nested else {
        return value;
    };
    let schema = nested();
    match value {
        Value::Object(map) => Value::Object(schema.to_alias(map)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => Value::Object(schema.to_alias(map)),
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}

fn rename_nested_canonical(
    spec: &FieldSpec,
    value: Value,
    unknown: Unknown,
) -> Result<Value, ValidationError> {
    let Some(nested) = spec.nested else {
        return Ok(value);
    };
    let schema = nested();
    Ok(match value {
        Value::Object(map) => Value::Object(schema.to_canonical(map, unknown, false)?),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => schema.to_canonical(map, unknown, false).map(Value::Object),
                    other => Ok(other),
                })
                .collect::<Result<Vec<_>, _>>()?,
        ),
        other => other,
    })
}
