use uuid::Uuid;

use crate::request::FieldErrors;

/// What the form is currently showing as an error
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayedError {
    /// Local validation failed; no request was sent
    Fields(FieldErrors),
    /// The gateway failed; message is displayed verbatim
    Submission(String),
}

/// Lifecycle of a form across submit actions.
///
/// `Idle -> Validating -> Submitting -> Idle | ErrorDisplayed`, with
/// `Validating -> ErrorDisplayed` when a field is invalid. `ErrorDisplayed`
/// accepts edits and a new submit, which re-enters `Validating`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormPhase {
    #[default]
    Idle,
    Validating,
    Submitting {
        attempt_id: Uuid,
    },
    ErrorDisplayed(DisplayedError),
}

impl FormPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, FormPhase::Submitting { .. })
    }

    /// Whether a new submit action may start from this phase
    pub fn accepts_submit(&self) -> bool {
        matches!(self, FormPhase::Idle | FormPhase::ErrorDisplayed(_))
    }

    /// Id of the outstanding submission, if one is in flight
    pub fn attempt_id(&self) -> Option<Uuid> {
        match self {
            FormPhase::Submitting { attempt_id } => Some(*attempt_id),
            _ => None,
        }
    }

    pub fn submission_error(&self) -> Option<&str> {
        match self {
            FormPhase::ErrorDisplayed(DisplayedError::Submission(message)) => Some(message),
            _ => None,
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            FormPhase::ErrorDisplayed(DisplayedError::Fields(errors)) => Some(errors),
            _ => None,
        }
    }
}
