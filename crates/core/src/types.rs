use chrono::{NaiveDate, Utc};

/// Storage-assigned identifier (PostgreSQL BIGSERIAL).
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<Utc>;

/// Calendar date used for the start-date rules (`YYYY-MM-DD` on the wire).
pub type Date = NaiveDate;

/// The current UTC calendar date.
///
/// Validation takes "today" as a parameter; handlers call this once per
/// request so every rule in one pass sees the same date.
pub fn utc_today() -> Date {
    Utc::now().date_naive()
}
