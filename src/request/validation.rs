use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use super::types::{FormFields, Intent, RoomAccessRequest, RoomContext};
use crate::protocol::{Field, FieldError, ProtocolRules};

/// Every field that failed validation, keyed by field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, *error))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, error)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{field} {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Validates raw form values for the given context and intent.
///
/// Only the fields the context collects are checked; all of them are checked
/// so every failure is reported together.
pub fn validate_fields(
    fields: &FormFields,
    context: RoomContext,
    intent: Intent,
    rules: &ProtocolRules,
) -> Result<RoomAccessRequest, FieldErrors> {
    let mut errors = FieldErrors::new();

    for &field in context.required_fields() {
        if let Err(error) = rules.rule(field).check(fields.value(field)) {
            debug!(field = %field, error = %error, "Field failed validation");
            errors.insert(field, error);
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let room = match context {
        RoomContext::NewRoom => Some((fields.room_name.clone(), fields.room_pass.clone())),
        RoomContext::ExistingRoom => None,
    };

    Ok(RoomAccessRequest::new(fields.nickname.clone(), room, intent))
}
