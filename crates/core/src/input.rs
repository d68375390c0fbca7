//! Presence-aware project input.
//!
//! A [`ProjectInput`] is a map from field name to JSON value. A key that is
//! missing was not supplied; a key mapped to `null` was supplied and cleared.
//! Keeping the two apart is what gives updates their partial semantics.

use serde_json::{Map, Value};

use crate::error::CoreError;

pub const FIELD_NAME: &str = "name";
pub const FIELD_LOCATION: &str = "location";
pub const FIELD_STAGE: &str = "stage";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_CATEGORY_TEXT: &str = "categoryText";
pub const FIELD_FEE: &str = "fee";
pub const FIELD_START_DATE: &str = "startDate";
pub const FIELD_DETAILS: &str = "details";

/// The mutable project fields, in validation order.
///
/// `id`, `code`, `creator`, `createdAt` and `updatedAt` are never accepted
/// from a caller.
pub const MUTABLE_FIELDS: &[&str] = &[
    FIELD_NAME,
    FIELD_LOCATION,
    FIELD_STAGE,
    FIELD_CATEGORY,
    FIELD_CATEGORY_TEXT,
    FIELD_FEE,
    FIELD_START_DATE,
    FIELD_DETAILS,
];

/// Transient, never-persisted input for one create or update request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectInput {
    fields: Map<String, Value>,
}

impl ProjectInput {
    /// Build an input from a decoded JSON request body.
    ///
    /// The body must be an object. Keys outside [`MUTABLE_FIELDS`] are dropped.
    pub fn from_json(body: Value) -> Result<Self, CoreError> {
        match body {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(CoreError::Validation(format!(
                "Request body must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        let fields = map
            .into_iter()
            .filter(|(key, _)| MUTABLE_FIELDS.contains(&key.as_str()))
            .collect();
        Self { fields }
    }

    /// Value supplied for `field`, `None` when the key was not supplied.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn is_supplied(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, field: &str, value: Value) {
        if MUTABLE_FIELDS.contains(&field) {
            self.fields.insert(field.to_string(), value);
        }
    }

    /// Apply `patch` on top of `self`: supplied keys win, the rest are kept.
    pub fn overlay(&self, patch: &ProjectInput) -> ProjectInput {
        let mut merged = self.fields.clone();
        for (key, value) in &patch.fields {
            merged.insert(key.clone(), value.clone());
        }
        ProjectInput { fields: merged }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
