//! Liveness and schema readiness at `/health`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"` only when the database answers and its schema is current.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Highest applied migration version, if the ledger could be read.
    pub schema_version: Option<i64>,
    pub migrations_current: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = projex_db::health_check(&state.pool).await.is_ok();

    let schema = match projex_db::schema_status(&state.pool).await {
        Ok(schema) => Some(schema),
        Err(err) => {
            tracing::warn!(error = %err, "Could not read migration ledger");
            None
        }
    };
    let migrations_current = schema.is_some_and(|s| s.is_current());

    Json(HealthResponse {
        status: if db_healthy && migrations_current {
            "ok"
        } else {
            "degraded"
        },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        schema_version: schema.and_then(|s| s.applied),
        migrations_current,
    })
}

/// Mounted at the root, outside `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
