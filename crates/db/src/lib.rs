//! Postgres storage for users and projects.

pub mod models;
pub mod repositories;

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

static MIGRATOR: Migrator = sqlx::migrate!("../../db/migrations");

/// Applied schema version against the newest embedded migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaStatus {
    /// Highest successfully applied migration, `None` on an empty ledger.
    pub applied: Option<i64>,
    pub latest: Option<i64>,
}

impl SchemaStatus {
    pub fn is_current(&self) -> bool {
        self.applied == self.latest
    }
}

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Read the migration ledger. Fails if migrations were never run.
pub async fn schema_status(pool: &DbPool) -> Result<SchemaStatus, sqlx::Error> {
    let applied: Option<i64> =
        sqlx::query_scalar("SELECT MAX(version) FROM _sqlx_migrations WHERE success")
            .fetch_one(pool)
            .await?;

    Ok(SchemaStatus {
        applied,
        latest: MIGRATOR.iter().map(|m| m.version).max(),
    })
}
