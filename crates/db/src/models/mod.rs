//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity matching the table row plus
//! the insert DTOs its repository accepts.

pub mod project;
pub mod user;
