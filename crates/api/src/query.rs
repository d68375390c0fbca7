//! Query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for `GET /projects` (`?name=&category=&page=&limit=`).
///
/// Page and limit are clamped in the handler via
/// `projex_core::pagination`.
#[derive(Debug, Default, Deserialize)]
pub struct ListProjectsParams {
    /// Case-insensitive substring of the project name.
    pub name: Option<String>,
    /// Case-insensitive category label.
    pub category: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListProjectsParams {
    /// The name filter. Blank values disable it.
    pub fn name_filter(&self) -> Option<String> {
        non_blank(self.name.as_deref())
    }

    /// The category filter. Blank values disable it.
    pub fn category_filter(&self) -> Option<String> {
        non_blank(self.category.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}
