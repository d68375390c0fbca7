//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use projex_core::code::CodeGenerator;
use projex_core::error::CoreError;
use projex_core::input::ProjectInput;
use projex_core::mutation::{prepare_create, prepare_update};
use projex_core::pagination::{clamp_limit, clamp_page, offset, DEFAULT_LIMIT, MAX_LIMIT};
use projex_core::types::{utc_today, DbId};
use projex_db::models::project::{NewProject, Project, ProjectFilter};
use projex_db::repositories::{PendingProject, ProjectRepo};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ListProjectsParams;
use crate::response::{Envelope, ProjectBody, ProjectListResponse};
use crate::state::AppState;

/// POST /api/projects
///
/// Validates the body, then inserts under a freshly generated unique code.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Envelope<ProjectBody>>)> {
    let input = ProjectInput::from_json(body)?;
    let fields = prepare_create(&input, utc_today())?;
    let new = NewProject {
        creator_id: auth.user_id,
        fields,
    };

    let mut generator =
        CodeGenerator::with_max_attempts(StdRng::from_os_rng(), state.config.code_max_attempts);
    let project = generator
        .insert_unique(&new.fields.name, &PendingProject::new(&state.pool, &new))
        .await?;

    tracing::info!(
        project_id = project.id,
        code = %project.code,
        user_id = auth.user_id,
        "Project created"
    );

    Ok((
        StatusCode::CREATED,
        Json(Envelope::success(
            "Project created successfully",
            project.into(),
        )),
    ))
}

/// GET /api/projects
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<ListProjectsParams>,
) -> AppResult<Json<ProjectListResponse>> {
    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let filter = ProjectFilter {
        name: params.name_filter(),
        category: params.category_filter(),
    };

    let (rows, total) = ProjectRepo::list(&state.pool, &filter, limit, offset(page, limit)).await?;

    Ok(Json(ProjectListResponse {
        total,
        page,
        limit,
        projects: rows.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Envelope<ProjectBody>>> {
    let project = find_project(&state, id).await?;
    Ok(Json(Envelope::success(
        "Project retrieved successfully",
        project.into(),
    )))
}

/// PUT /api/projects/{id}
///
/// Partial update: fields absent from the body keep their stored values.
/// The merged record is validated as a whole before anything is written.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(body): Json<Value>,
) -> AppResult<Json<Envelope<ProjectBody>>> {
    let current = find_project(&state, id).await?;
    let patch = ProjectInput::from_json(body)?;
    let fields = prepare_update(&current.snapshot(), &patch, utc_today())?;

    let project = ProjectRepo::update(&state.pool, id, &fields)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        project_id = project.id,
        code = %project.code,
        user_id = auth.user_id,
        "Project updated"
    );

    Ok(Json(Envelope::success(
        "Project updated successfully",
        project.into(),
    )))
}

/// DELETE /api/projects/{id}
///
/// Any authenticated user may delete any project.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Envelope<()>>> {
    if !ProjectRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(project_id = id, user_id = auth.user_id, "Project deleted");

    Ok(Json(Envelope::success("Project deleted successfully", ())))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_project(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}
