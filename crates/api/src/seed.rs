//! Startup seeding of the admin account.

use projex_db::models::user::CreateUser;
use projex_db::repositories::UserRepo;
use projex_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::SeedAdmin;
use crate::error::{AppError, AppResult};

const ADMIN_ROLE: &str = "ROLE_ADMIN";

/// Create the admin account unless a user with that email already exists.
///
/// Returns `true` when a new user was inserted.
pub async fn seed_admin(pool: &DbPool, seed: &SeedAdmin) -> AppResult<bool> {
    if UserRepo::find_by_email(pool, &seed.email).await?.is_some() {
        return Ok(false);
    }

    let password_hash = hash_password(&seed.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: seed.email.clone(),
            password_hash,
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
            roles: vec![ADMIN_ROLE.to_string()],
        },
    )
    .await?;

    tracing::info!(user_id = user.id, email = %user.email, "Seeded admin user");
    Ok(true)
}
