//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown vote outcome: {0}")]
    UnknownOutcome(String),

    #[error("Malformed vote control id: {0}")]
    MalformedControlId(String),

    #[error("The reason cannot be empty.")]
    EmptyReason,

    #[error("The vote duration must be between 1 and {max} minutes.")]
    InvalidDuration { max: u64 },
}

impl DomainError {
    /// Check if this error came from malformed user input (as opposed to a
    /// broken control id, which only a bug can produce)
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyReason | DomainError::InvalidDuration { .. }
        )
    }
}
