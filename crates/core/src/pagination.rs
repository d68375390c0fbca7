//! Page/limit handling for list endpoints.

/// Page used when the caller does not send one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the caller does not send one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest page size a caller may request.
pub const MAX_LIMIT: i64 = 100;

/// Clamp a user-provided 1-based page number.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(DEFAULT_PAGE).max(1)
}

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Row offset for a clamped page and limit.
pub fn offset(page: i64, limit: i64) -> i64 {
    (page - 1).saturating_mul(limit)
}
