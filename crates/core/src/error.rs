use crate::types::DbId;
use crate::validation::rules::ViolationSet;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// One or more field-level violations, in evaluation order.
    #[error("Validation failed: {} violation(s)", .0.len())]
    Violations(ViolationSet),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Could not generate a unique project code after {attempts} attempts")]
    CodeGenerationExhausted { attempts: u32 },

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::{Violation, ViolationKind};

    #[test]
    fn display_not_found() {
        let err = CoreError::NotFound {
            entity: "Project",
            id: 7,
        };
        assert_eq!(err.to_string(), "Entity not found: Project with id 7");
    }

    #[test]
    fn display_violations_counts_entries() {
        let set = ViolationSet::from(vec![
            Violation::new("name", ViolationKind::RequiredField, "Name is required."),
            Violation::new("details", ViolationKind::RequiredField, "Details are required."),
        ]);
        let err = CoreError::Violations(set);
        assert_eq!(err.to_string(), "Validation failed: 2 violation(s)");
    }

    #[test]
    fn display_code_generation_exhausted() {
        let err = CoreError::CodeGenerationExhausted { attempts: 32 };
        assert_eq!(
            err.to_string(),
            "Could not generate a unique project code after 32 attempts"
        );
    }
}
