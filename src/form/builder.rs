use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::{
    config::SubmitConfig,
    errors::SubmitError,
    gateway::RoomGateway,
    state::{DisplayedError, FormPhase},
};
use crate::nickname::{suggest_nickname, NicknameGenerator};
use crate::protocol::Field;
use crate::request::{
    validate_fields, FieldErrors, FormFields, Intent, RoomAccessRequest, RoomContext,
};

/// Mutable part of the form, guarded by one lock
#[derive(Debug, Default)]
struct FormState {
    fields: FormFields,
    intent: Intent,
    field_errors: FieldErrors,
    phase: FormPhase,
    error_message: Option<String>,
}

/// Collects, validates and submits a room access request.
///
/// Join and create share one collection and validation path; they differ only
/// in the intent applied right before validation. At most one submission is
/// outstanding at a time: submit actions arriving while one is in flight are
/// ignored.
pub struct RoomAccessForm {
    context: RoomContext,
    config: SubmitConfig,
    gateway: Arc<dyn RoomGateway>,
    state: Mutex<FormState>,
}

impl RoomAccessForm {
    pub fn new(context: RoomContext, gateway: Arc<dyn RoomGateway>) -> Self {
        Self::with_config(context, gateway, SubmitConfig::default())
    }

    pub fn with_config(
        context: RoomContext,
        gateway: Arc<dyn RoomGateway>,
        config: SubmitConfig,
    ) -> Self {
        Self {
            context,
            config,
            gateway,
            state: Mutex::new(FormState::default()),
        }
    }

    // The lock is never held across an await, so a poisoned guard only means
    // a panic elsewhere; the state itself is still consistent.
    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn context(&self) -> RoomContext {
        self.context
    }

    pub fn config(&self) -> &SubmitConfig {
        &self.config
    }

    /// Submit actions offered to the user in this form's context
    pub fn available_intents(&self) -> &'static [Intent] {
        self.context.available_intents()
    }

    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        self.state().fields.set(field, value);
    }

    pub fn set_nickname(&self, value: impl Into<String>) {
        self.set_field(Field::Nickname, value);
    }

    pub fn set_room_name(&self, value: impl Into<String>) {
        self.set_field(Field::RoomName, value);
    }

    pub fn set_room_pass(&self, value: impl Into<String>) {
        self.set_field(Field::RoomPass, value);
    }

    pub fn fields(&self) -> FormFields {
        self.state().fields.clone()
    }

    /// Records which submit action the user invoked. Accepts a bool `create` flag.
    pub fn set_intent(&self, intent: impl Into<Intent>) {
        self.state().intent = intent.into();
    }

    pub fn intent(&self) -> Intent {
        self.state().intent
    }

    pub fn phase(&self) -> FormPhase {
        self.state().phase.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.state().phase.is_submitting()
    }

    /// Per-field errors from the most recent validation
    pub fn field_errors(&self) -> FieldErrors {
        self.state().field_errors.clone()
    }

    /// Sets the caller-controlled error message. The form never clears it.
    pub fn set_error_message(&self, message: Option<String>) {
        self.state().error_message = message;
    }

    /// Error text to show: a gateway failure from the last submission, else
    /// the caller-supplied message
    pub fn visible_error(&self) -> Option<String> {
        let state = self.state();
        state
            .phase
            .submission_error()
            .map(str::to_string)
            .or_else(|| state.error_message.clone())
    }

    /// Validates the current values against the protocol rules.
    ///
    /// Only updates the per-field error flags; the phase is left alone.
    pub fn validate(&self) -> Result<RoomAccessRequest, FieldErrors> {
        let mut state = self.state();
        let result =
            validate_fields(&state.fields, self.context, state.intent, &self.config.rules);
        state.field_errors = match &result {
            Ok(_) => FieldErrors::new(),
            Err(errors) => errors.clone(),
        };
        result
    }

    /// Submits with the intent last set via `set_intent`
    pub async fn submit(&self) -> Result<RoomAccessRequest, SubmitError> {
        self.run_submission(None).await
    }

    /// The "join" action
    pub async fn join(&self) -> Result<RoomAccessRequest, SubmitError> {
        self.run_submission(Some(Intent::JoinExisting)).await
    }

    /// The "create new room" action; not offered when the room is already known
    pub async fn create(&self) -> Result<RoomAccessRequest, SubmitError> {
        self.run_submission(Some(Intent::CreateNew)).await
    }

    /// Fills an empty nickname with a generated one that satisfies the rules
    pub async fn suggest_nickname(&self, generator: &dyn NicknameGenerator) -> Option<String> {
        if !self.state().fields.nickname.is_empty() {
            return None;
        }

        let suggestion = suggest_nickname(generator, &self.config.rules.nickname).await?;

        let mut state = self.state();
        // The user may have typed something while the generator ran
        if !state.fields.nickname.is_empty() {
            return None;
        }
        state.fields.nickname = suggestion.clone();
        debug!(nickname = %suggestion, "Applied nickname suggestion");
        Some(suggestion)
    }

    #[instrument(skip(self), fields(context = %self.context))]
    async fn run_submission(
        &self,
        intent: Option<Intent>,
    ) -> Result<RoomAccessRequest, SubmitError> {
        let attempt_id = Uuid::new_v4();
        let request = self.begin_submission(intent, attempt_id)?;

        info!(
            attempt_id = %attempt_id,
            nickname = %request.nickname(),
            room_name = ?request.room_name(),
            create = request.create(),
            "Submitting room access request"
        );

        let mut guard = SubmissionGuard::new(self, attempt_id);
        let outcome = self.dispatch(&request).await;
        guard.disarm();

        let mut state = self.state();
        match outcome {
            Ok(()) => {
                state.phase = FormPhase::Idle;
                info!(attempt_id = %attempt_id, "Room access request accepted");
                Ok(request)
            }
            Err(error) => {
                let message = error.display_message().unwrap_or_else(|| error.to_string());
                warn!(attempt_id = %attempt_id, error = %message, "Room access request failed");
                state.phase = FormPhase::ErrorDisplayed(DisplayedError::Submission(message));
                Err(error)
            }
        }
    }

    /// Applies the intent and validates in one critical section, then marks
    /// the form as submitting
    fn begin_submission(
        &self,
        intent: Option<Intent>,
        attempt_id: Uuid,
    ) -> Result<RoomAccessRequest, SubmitError> {
        let mut state = self.state();

        if !state.phase.accepts_submit() {
            debug!(
                outstanding = ?state.phase.attempt_id(),
                "Ignoring submit while a submission is in flight"
            );
            return Err(SubmitError::AlreadySubmitting);
        }

        // Every submit path goes through here, so a create can never leave an
        // existing-room form regardless of how the intent was set
        let intent = intent.unwrap_or(state.intent);
        if intent.is_create() && !self.context.available_intents().contains(&intent) {
            warn!("Create action triggered for an existing room");
            return Err(SubmitError::CreateUnavailable);
        }

        state.intent = intent;
        state.phase = FormPhase::Validating;

        match validate_fields(&state.fields, self.context, state.intent, &self.config.rules) {
            Ok(request) => {
                state.field_errors = FieldErrors::new();
                state.phase = FormPhase::Submitting { attempt_id };
                Ok(request)
            }
            Err(errors) => {
                debug!(invalid_fields = errors.len(), "Submission blocked by validation");
                state.field_errors = errors.clone();
                state.phase = FormPhase::ErrorDisplayed(DisplayedError::Fields(errors.clone()));
                Err(SubmitError::Invalid(errors))
            }
        }
    }

    async fn dispatch(&self, request: &RoomAccessRequest) -> Result<(), SubmitError> {
        let call = self.gateway.submit(request);

        let result = match self.config.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => return Err(SubmitError::TimedOut(limit)),
            },
            None => call.await,
        };

        result.map_err(|error| SubmitError::Rejected(error.message))
    }
}

/// Releases the in-flight flag if a submission future is dropped before the
/// gateway resolves
struct SubmissionGuard<'a> {
    form: &'a RoomAccessForm,
    attempt_id: Uuid,
    armed: bool,
}

impl<'a> SubmissionGuard<'a> {
    fn new(form: &'a RoomAccessForm, attempt_id: Uuid) -> Self {
        Self {
            form,
            attempt_id,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.form.state();
        if state.phase.attempt_id() == Some(self.attempt_id) {
            warn!(attempt_id = %self.attempt_id, "Submission dropped before completing");
            state.phase = FormPhase::ErrorDisplayed(DisplayedError::Submission(
                "Submission was interrupted".to_string(),
            ));
        }
    }
}
