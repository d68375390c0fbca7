//! Create and update transitions for project records.
//!
//! Both paths validate first and produce a [`ProjectFields`] value only when
//! every rule passes, so a rejected request never reaches storage. Identity
//! columns (`id`, `code`, creator, `created_at`) are not part of
//! [`ProjectFields`] and cannot change through an update.

use crate::error::CoreError;
use crate::input::ProjectInput;
use crate::project::{Category, Stage};
use crate::types::Date;
use crate::validation::{validate_project, ValidatedProject};

/// The replaceable columns of a project, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectFields {
    pub name: String,
    pub location: String,
    pub stage: Stage,
    pub category: Category,
    /// Set only when `category` is [`Category::Others`].
    pub category_text: Option<String>,
    pub fee: Option<f64>,
    pub start_date: Date,
    pub details: String,
}

/// Validate a create request.
///
/// The free-text category is copied only when the category is `Others`;
/// otherwise it stays unset.
pub fn prepare_create(input: &ProjectInput, today: Date) -> Result<ProjectFields, CoreError> {
    let validated = validate_project(input, today).map_err(CoreError::Violations)?;

    let mut category_text = None;
    if validated.category.is_others() {
        category_text = validated.category_text.clone();
    }

    Ok(fields_from(validated, category_text))
}

/// Validate an update request against the project's current state.
///
/// `current` is the stored project as an input snapshot. Fields supplied in
/// `patch` replace the snapshot's; the merged record is validated as a whole.
/// When the resulting category is not `Others` the free-text category is
/// cleared, even if it was set before.
pub fn prepare_update(
    current: &ProjectInput,
    patch: &ProjectInput,
    today: Date,
) -> Result<ProjectFields, CoreError> {
    let merged = current.overlay(patch);
    let validated = validate_project(&merged, today).map_err(CoreError::Violations)?;

    let category_text = if validated.category.is_others() {
        validated.category_text.clone()
    } else {
        None
    };

    Ok(fields_from(validated, category_text))
}

fn fields_from(validated: ValidatedProject, category_text: Option<String>) -> ProjectFields {
    ProjectFields {
        name: validated.name,
        location: validated.location,
        stage: validated.stage,
        category: validated.category,
        category_text,
        fee: validated.fee,
        start_date: validated.start_date,
        details: validated.details,
    }
}
