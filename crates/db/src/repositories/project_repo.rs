//! Repository for the `projects` table.

use projex_core::code::{Claim, CodeStore};
use projex_core::mutation::ProjectFields;
use projex_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{NewProject, Project, ProjectFilter, ProjectSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, name, location, stage, category, category_text, fee, \
                       start_date, details, creator_id, created_at, updated_at";

/// Columns returned by list queries.
const SUMMARY_COLUMNS: &str = "id, code, name, stage, category, start_date";

/// Shared WHERE clause for list and count. `$1` is the name filter, `$2` the
/// category filter; a NULL parameter disables that filter.
const FILTER_CLAUSE: &str = "($1::TEXT IS NULL OR POSITION(LOWER($1) IN LOWER(name)) > 0)
             AND ($2::TEXT IS NULL OR LOWER(category) = LOWER($2))";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Whether any project already uses `code`.
    pub async fn code_exists(pool: &PgPool, code: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM projects WHERE code = $1)")
            .bind(code)
            .fetch_one(pool)
            .await
    }

    /// Insert a project under `code`.
    ///
    /// Returns `None` when another row already holds `code`. The check and the
    /// insert are one statement, so concurrent callers cannot both succeed.
    pub async fn insert_with_code(
        pool: &PgPool,
        code: &str,
        input: &NewProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (code, name, location, stage, category, category_text, fee, start_date,
                 details, creator_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT (code) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let fields = &input.fields;
        sqlx::query_as::<_, Project>(&query)
            .bind(code)
            .bind(&fields.name)
            .bind(&fields.location)
            .bind(fields.stage.as_str())
            .bind(fields.category.as_str())
            .bind(&fields.category_text)
            .bind(fields.fee)
            .bind(fields.start_date)
            .bind(&fields.details)
            .bind(input.creator_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace every mutable column and refresh `updated_at`.
    ///
    /// `code`, `creator_id` and `created_at` are never written. Returns `None`
    /// if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        fields: &ProjectFields,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = $2,
                location = $3,
                stage = $4,
                category = $5,
                category_text = $6,
                fee = $7,
                start_date = $8,
                details = $9,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&fields.name)
            .bind(&fields.location)
            .bind(fields.stage.as_str())
            .bind(fields.category.as_str())
            .bind(&fields.category_text)
            .bind(fields.fee)
            .bind(fields.start_date)
            .bind(&fields.details)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a project by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One page of projects matching `filter`, newest first, plus the total
    /// number of matching rows.
    pub async fn list(
        pool: &PgPool,
        filter: &ProjectFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ProjectSummary>, i64), sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM projects
             WHERE {FILTER_CLAUSE}
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, ProjectSummary>(&query)
            .bind(&filter.name)
            .bind(&filter.category)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM projects WHERE {FILTER_CLAUSE}");
        let total = sqlx::query_scalar::<_, i64>(&count_query)
            .bind(&filter.name)
            .bind(&filter.category)
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }
}

// ---------------------------------------------------------------------------
// Code generator storage
// ---------------------------------------------------------------------------

/// A project waiting for its code, bound to the pool it will be inserted into.
pub struct PendingProject<'a> {
    pool: &'a PgPool,
    new: &'a NewProject,
}

impl<'a> PendingProject<'a> {
    pub fn new(pool: &'a PgPool, new: &'a NewProject) -> Self {
        Self { pool, new }
    }
}

impl CodeStore for PendingProject<'_> {
    type Output = Project;
    type Error = sqlx::Error;

    async fn code_exists(&self, code: &str) -> Result<bool, sqlx::Error> {
        ProjectRepo::code_exists(self.pool, code).await
    }

    async fn insert_with_code(&self, code: &str) -> Result<Claim<Project>, sqlx::Error> {
        let claim = match ProjectRepo::insert_with_code(self.pool, code, self.new).await? {
            Some(project) => Claim::Stored(project),
            None => Claim::Taken,
        };
        Ok(claim)
    }
}
