//! Handler for `POST /login`.

use axum::extract::State;
use axum::Json;
use projex_core::error::CoreError;
use projex_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

const CREDENTIALS_REQUIRED: &str = "Email and password are required";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /login`.
///
/// Both fields are optional at the serde level so a missing field produces
/// the same 400 as an empty one.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    /// The authenticated user's email.
    pub user: String,
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/login
///
/// Authenticate with email + password and return a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    input
        .validate()
        .map_err(|_| AppError::BadRequest(CREDENTIALS_REQUIRED.into()))?;
    let (Some(email), Some(password)) = (input.email.as_deref(), input.password.as_deref()) else {
        return Err(AppError::BadRequest(CREDENTIALS_REQUIRED.into()));
    };

    let user = UserRepo::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid_credentials());
    }

    let token = generate_access_token(user.id, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        message: "Success",
        user: user.email,
        token,
        expires_in: state.config.jwt.expires_in_secs(),
    }))
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
}
