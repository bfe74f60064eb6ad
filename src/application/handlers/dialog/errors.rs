//! Errors that abort a turn.
//!
//! Transient collaborator failures (classifier, Q&A, price lookup, order
//! store, conversation log) never show up here. They are turned into apology
//! messages or order outcomes where they happen.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::ports::{SinkError, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl TurnError {
    /// Wraps an invalid order state transition.
    pub fn invalid_transition(err: ValidationError) -> Self {
        TurnError::Domain(DomainError::new(
            ErrorCode::InvalidStateTransition,
            err.to_string(),
        ))
    }
}

impl From<ValidationError> for TurnError {
    fn from(err: ValidationError) -> Self {
        TurnError::Domain(err.into())
    }
}
