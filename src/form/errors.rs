use std::time::Duration;
use thiserror::Error;

use crate::request::FieldErrors;

/// Why a submit action did not produce a delivered request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// Validation failed; the gateway was not called
    #[error("Invalid fields: {0}")]
    Invalid(FieldErrors),

    /// The gateway refused the request; the message is shown as-is
    #[error("{0}")]
    Rejected(String),

    #[error("Submission timed out after {0:?}")]
    TimedOut(Duration),

    /// Another submission is still outstanding; this trigger was ignored
    #[error("A submission is already in progress")]
    AlreadySubmitting,

    #[error("Creating a room is not available when joining an existing room")]
    CreateUnavailable,
}

impl SubmitError {
    /// Message the presentation layer should show for this error, if any
    pub fn display_message(&self) -> Option<String> {
        match self {
            SubmitError::Rejected(message) => Some(message.clone()),
            SubmitError::TimedOut(_) => Some(self.to_string()),
            SubmitError::Invalid(_)
            | SubmitError::AlreadySubmitting
            | SubmitError::CreateUnavailable => None,
        }
    }
}
