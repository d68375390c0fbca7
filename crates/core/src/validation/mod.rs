//! Project input validation.
//!
//! - [`rules`] -- violation types returned to callers.
//! - [`project`] -- the field and cross-field rules for project input.
//!
//! Pure logic, no database access.

pub mod project;
pub mod rules;

pub use project::{validate_project, ValidatedProject};
pub use rules::{Violation, ViolationKind, ViolationSet};
