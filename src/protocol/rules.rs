use serde::{Deserialize, Serialize};
use std::path::Path;
use strum_macros::{AsRefStr, Display, EnumIter};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::shared::AppError;

/// Server-side limits. Keep in sync with the room server's protocol definition.
pub const NICKNAME_MIN_LEN: usize = 1;
pub const NICKNAME_MAX_LEN: usize = 16;
pub const ROOM_NAME_MIN_LEN: usize = 1;
pub const ROOM_NAME_MAX_LEN: usize = 20;
pub const ROOM_PASS_MIN_LEN: usize = 1;

/// User-entered fields of a room access request
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Field {
    Nickname,
    RoomName,
    RoomPass,
}

/// Why a single field failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldError {
    #[error("is required")]
    Required,

    #[error("must be at least {min} characters")]
    TooShort { min: usize },

    #[error("must be at most {max} characters")]
    TooLong { max: usize },
}

/// Length limits for one required field. Lengths count Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRule {
    pub min_len: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_len: Option<usize>,
}

impl FieldRule {
    pub const fn new(min_len: usize, max_len: Option<usize>) -> Self {
        Self { min_len, max_len }
    }

    /// Checks a raw field value against this rule
    pub fn check(&self, value: &str) -> Result<(), FieldError> {
        let len = value.chars().count();

        if len == 0 {
            return Err(FieldError::Required);
        }
        if len < self.min_len {
            return Err(FieldError::TooShort { min: self.min_len });
        }
        match self.max_len {
            Some(max) if len > max => Err(FieldError::TooLong { max }),
            _ => Ok(()),
        }
    }
}

/// The complete rule table for a room access request.
///
/// This is the only place field limits live. The defaults mirror the room
/// server; `from_json` loads the same table from a shared artifact so both
/// sides can be generated from one definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolRules {
    pub nickname: FieldRule,
    pub room_name: FieldRule,
    pub room_pass: FieldRule,
}

impl ProtocolRules {
    pub const fn new() -> Self {
        Self {
            nickname: FieldRule::new(NICKNAME_MIN_LEN, Some(NICKNAME_MAX_LEN)),
            room_name: FieldRule::new(ROOM_NAME_MIN_LEN, Some(ROOM_NAME_MAX_LEN)),
            room_pass: FieldRule::new(ROOM_PASS_MIN_LEN, None),
        }
    }

    /// Returns the rule for a given field
    pub fn rule(&self, field: Field) -> &FieldRule {
        match field {
            Field::Nickname => &self.nickname,
            Field::RoomName => &self.room_name,
            Field::RoomPass => &self.room_pass,
        }
    }

    /// Parses a rule table from its JSON artifact and checks it is coherent
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let rules: ProtocolRules = serde_json::from_str(raw)?;
        rules.verify()?;
        Ok(rules)
    }

    /// Loads a rule table artifact from disk
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        let rules = Self::from_json(&raw)?;
        debug!(?rules, "Loaded protocol rules");
        Ok(rules)
    }

    /// Rejects tables no value could satisfy or that would allow empty values
    pub fn verify(&self) -> Result<(), AppError> {
        for (field, rule) in [
            (Field::Nickname, &self.nickname),
            (Field::RoomName, &self.room_name),
            (Field::RoomPass, &self.room_pass),
        ] {
            if rule.min_len == 0 {
                return Err(AppError::Protocol(format!(
                    "{field} is required but allows zero length"
                )));
            }
            if let Some(max) = rule.max_len {
                if max < rule.min_len {
                    return Err(AppError::Protocol(format!(
                        "{field} max length {max} is below min length {}",
                        rule.min_len
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for ProtocolRules {
    fn default() -> Self {
        Self::new()
    }
}
