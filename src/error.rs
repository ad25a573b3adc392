//! Error types for the tier pipeline and its storage.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TierError {
    /// Input that would otherwise turn into NaN or negative scores.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown role '{role}' (expected one of: {known})")]
    UnknownRole { role: String, known: String },

    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(String),

    #[error("Champion not found: {0}")]
    EntityNotFound(String),
}

impl TierError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        TierError::InvalidInput(msg.into())
    }
}

pub type Result<T, E = TierError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = TierError::invalid("upvotes must be non-negative");
        assert_eq!(err.to_string(), "Invalid input: upvotes must be non-negative");
    }

    #[test]
    fn test_unknown_role_lists_known_roles() {
        let err = TierError::UnknownRole {
            role: "Bot".to_string(),
            known: "Top, Mid".to_string(),
        };
        assert!(err.to_string().contains("'Bot'"));
        assert!(err.to_string().contains("Top, Mid"));
    }
}
