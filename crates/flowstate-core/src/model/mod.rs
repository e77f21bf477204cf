//! Value types shared by events and workflows.
//!
//! Everything here is immutable input data: the engine reads these types and
//! never mutates them.

pub mod actor;
pub mod entity;
pub mod workflow;

pub use actor::{Actor, ActorType};
pub use entity::{EntityKind, EntityRef, Provider};
pub use workflow::{CodeHostRef, WorkflowRef};

use std::fmt;

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

/// Lower-case and trim user-supplied enum text; `-` and `_` are equivalent.
pub(crate) fn normalize(input: &str) -> String {
    input.trim().to_ascii_lowercase().replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_case_and_separators() {
        assert_eq!(normalize("  Needs-User-Input "), "needs_user_input");
        assert_eq!(normalize("pull_request"), "pull_request");
    }

    #[test]
    fn parse_enum_error_display() {
        let err = ParseEnumError {
            expected: "provider",
            got: "gitlab".into(),
        };
        assert_eq!(err.to_string(), "invalid provider: 'gitlab'");
    }
}
