//! Domain logic for project records.
//!
//! Pure logic only: value types, input validation, the create/update
//! mutator and the unique project-code generator. Storage and HTTP live in
//! `projex-db` and `projex-api`.

pub mod code;
pub mod error;
pub mod input;
pub mod mutation;
pub mod pagination;
pub mod project;
pub mod types;
pub mod validation;
