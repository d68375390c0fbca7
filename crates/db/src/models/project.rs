//! Project entity model and DTOs.

use projex_core::input::{
    ProjectInput, FIELD_CATEGORY, FIELD_CATEGORY_TEXT, FIELD_DETAILS, FIELD_FEE, FIELD_LOCATION,
    FIELD_NAME, FIELD_STAGE, FIELD_START_DATE,
};
use projex_core::mutation::ProjectFields;
use projex_core::types::{Date, DbId, Timestamp};
use serde_json::{Map, Value};
use sqlx::FromRow;

/// A project row from the `projects` table.
///
/// `stage` and `category` hold their wire labels; the table's CHECK
/// constraints keep them within the known sets.
#[derive(Debug, Clone, FromRow)]
pub struct Project {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub location: String,
    pub stage: String,
    pub category: String,
    pub category_text: Option<String>,
    pub fee: Option<f64>,
    pub start_date: Date,
    pub details: String,
    pub creator_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// The stored mutable fields as an input, for overlaying an update patch.
    pub fn snapshot(&self) -> ProjectInput {
        let mut map = Map::new();
        map.insert(FIELD_NAME.into(), Value::from(self.name.clone()));
        map.insert(FIELD_LOCATION.into(), Value::from(self.location.clone()));
        map.insert(FIELD_STAGE.into(), Value::from(self.stage.clone()));
        map.insert(FIELD_CATEGORY.into(), Value::from(self.category.clone()));
        map.insert(
            FIELD_CATEGORY_TEXT.into(),
            self.category_text.clone().map_or(Value::Null, Value::from),
        );
        map.insert(FIELD_FEE.into(), self.fee.map_or(Value::Null, Value::from));
        map.insert(
            FIELD_START_DATE.into(),
            Value::from(self.start_date.format("%Y-%m-%d").to_string()),
        );
        map.insert(FIELD_DETAILS.into(), Value::from(self.details.clone()));
        ProjectInput::from_map(map)
    }
}

/// DTO for inserting a project. The code is chosen at insert time.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub creator_id: DbId,
    pub fields: ProjectFields,
}

/// The subset of columns returned by list queries.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectSummary {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub stage: String,
    pub category: String,
    pub start_date: Date,
}

/// Optional list filters. Both match case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// Substring of the project name.
    pub name: Option<String>,
    /// Exact category label.
    pub category: Option<String>,
}
