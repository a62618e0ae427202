//! Read-only entity view handed out by the legacy surface.

use std::ops::Deref;

use serde_json::{Map, Value};

use crate::model::{serialize::to_alias_dict, Model};
use crate::Result;

/// An entity reached through the legacy surface.
///
/// Derefs to the entity, so fields and [`Model`] methods (including
/// `get` by either spelling) work unchanged. [`to_json`](Legacy::to_json)
/// keeps its historical meaning: a camelCase map, not a string.
#[derive(Debug, Clone, PartialEq)]
pub struct Legacy<T> {
    inner: T,
}

impl<T: Model> Legacy<T> {
    pub(crate) fn new(inner: T) -> Self {
        Self { inner }
    }

    /// camelCase-keyed map of every field.
    pub fn to_json(&self) -> Result<Map<String, Value>> {
        to_alias_dict(&self.inner)
    }

    /// Unwrap the entity.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> Deref for Legacy<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> AsRef<T> for Legacy<T> {
    fn as_ref(&self) -> &T {
        &self.inner
    }
}
