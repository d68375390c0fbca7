pub mod auth;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                 login (public)
///
/// /projects              list, create (requires auth)
/// /projects/{id}         get, update, delete (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication.
        .merge(auth::router())
        // Project CRUD.
        .nest("/projects", project::router())
}
