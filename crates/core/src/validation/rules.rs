//! Violation types.

use serde::{Deserialize, Serialize};

/// Machine-readable reason a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationKind {
    RequiredField,
    TooLong,
    InvalidChoice,
    ConditionalRequired,
    InvalidType,
    OutOfRange,
    InvalidDate,
    DateConstraintViolated,
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(field: &str, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            kind,
            message: message.into(),
        }
    }
}

/// Ordered list of violations from one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViolationSet(Vec<Violation>);

impl ViolationSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Violations reported against `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.0.iter().filter(move |v| v.field == field)
    }

    pub fn has(&self, field: &str, kind: ViolationKind) -> bool {
        self.for_field(field).any(|v| v.kind == kind)
    }
}

impl From<Vec<Violation>> for ViolationSet {
    fn from(violations: Vec<Violation>) -> Self {
        Self(violations)
    }
}

impl<'a> IntoIterator for &'a ViolationSet {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
