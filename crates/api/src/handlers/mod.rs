//! Request handlers.
//!
//! Handlers delegate validation to `projex_core`, persistence to the
//! repositories in `projex_db`, and map errors via [`AppError`](crate::error::AppError).

pub mod auth;
pub mod project;
