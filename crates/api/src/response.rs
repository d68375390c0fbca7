//! Response bodies shared by the project handlers.
//!
//! Single-project endpoints wrap their payload in [`Envelope`]
//! (`{ "status", "message", "data" }`); the list endpoint returns
//! [`ProjectListResponse`] unwrapped.

use projex_core::types::{DbId, Timestamp};
use projex_db::models::project::{Project, ProjectSummary};
use serde::Serialize;

/// Wire format for `createdAt` / `updatedAt`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wire format for `startDate`.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Standard `{ "status", "message", "data" }` response envelope.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: &'static str,
    pub message: &'static str,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(message: &'static str, data: T) -> Self {
        Self {
            status: "success",
            message,
            data,
        }
    }
}

/// Full project representation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBody {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub location: String,
    pub stage: String,
    pub category: String,
    pub category_text: Option<String>,
    pub fee: Option<f64>,
    pub start_date: String,
    pub details: String,
    /// Creator's user id.
    pub creator: DbId,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Project> for ProjectBody {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            code: project.code,
            name: project.name,
            location: project.location,
            stage: project.stage,
            category: project.category,
            category_text: project.category_text,
            fee: project.fee,
            start_date: project.start_date.format(DATE_FORMAT).to_string(),
            details: project.details,
            creator: project.creator_id,
            created_at: format_timestamp(project.created_at),
            updated_at: format_timestamp(project.updated_at),
        }
    }
}

/// One row of the project list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummaryBody {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub stage: String,
    pub category: String,
    pub start_date: String,
}

impl From<ProjectSummary> for ProjectSummaryBody {
    fn from(row: ProjectSummary) -> Self {
        Self {
            id: row.id,
            code: row.code,
            name: row.name,
            stage: row.stage,
            category: row.category,
            start_date: row.start_date.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Body of `GET /projects`.
#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    /// Rows matching the filters across all pages.
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub projects: Vec<ProjectSummaryBody>,
}

fn format_timestamp(ts: Timestamp) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
