use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::Display;

use crate::protocol::Field;

/// Which of the two submit actions triggered a submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Intent {
    #[default]
    JoinExisting,
    CreateNew,
}

impl Intent {
    /// Value of the `create` flag sent to the server
    pub fn is_create(self) -> bool {
        matches!(self, Intent::CreateNew)
    }
}

impl From<bool> for Intent {
    fn from(create: bool) -> Self {
        if create {
            Intent::CreateNew
        } else {
            Intent::JoinExisting
        }
    }
}

/// Whether the caller already knows which room the user is entering
/// (for example, from an invite link). Fixed for the lifetime of a form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoomContext {
    /// The user names a room and its password
    #[default]
    NewRoom,
    /// The room is given; only a nickname is collected
    ExistingRoom,
}

impl RoomContext {
    pub fn from_existing(existing_room: bool) -> Self {
        if existing_room {
            RoomContext::ExistingRoom
        } else {
            RoomContext::NewRoom
        }
    }

    pub fn is_existing(self) -> bool {
        matches!(self, RoomContext::ExistingRoom)
    }

    /// Fields that are collected and validated in this context
    pub fn required_fields(self) -> &'static [Field] {
        match self {
            RoomContext::NewRoom => &[Field::Nickname, Field::RoomName, Field::RoomPass],
            RoomContext::ExistingRoom => &[Field::Nickname],
        }
    }

    /// Submit actions offered in this context
    pub fn available_intents(self) -> &'static [Intent] {
        match self {
            RoomContext::NewRoom => &[Intent::JoinExisting, Intent::CreateNew],
            RoomContext::ExistingRoom => &[Intent::JoinExisting],
        }
    }
}

/// Raw, unvalidated values as entered by the user
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormFields {
    pub nickname: String,
    pub room_name: String,
    pub room_pass: String,
}

impl FormFields {
    pub fn new(
        nickname: impl Into<String>,
        room_name: impl Into<String>,
        room_pass: impl Into<String>,
    ) -> Self {
        Self {
            nickname: nickname.into(),
            room_name: room_name.into(),
            room_pass: room_pass.into(),
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Nickname => &self.nickname,
            Field::RoomName => &self.room_name,
            Field::RoomPass => &self.room_pass,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Nickname => self.nickname = value,
            Field::RoomName => self.room_name = value,
            Field::RoomPass => self.room_pass = value,
        }
    }
}

impl fmt::Debug for FormFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormFields")
            .field("nickname", &self.nickname)
            .field("room_name", &self.room_name)
            .field("room_pass", &"<redacted>")
            .finish()
    }
}

/// A validated room access request, ready to send to the server.
///
/// Only produced by validation, so every value conforms to the protocol
/// rules it was checked against. Serializes with the server's camelCase keys;
/// room name and password are omitted when joining an existing room.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAccessRequest {
    nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    room_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    room_pass: Option<String>,
    create: bool,
}

impl RoomAccessRequest {
    pub(crate) fn new(
        nickname: String,
        room: Option<(String, String)>,
        intent: Intent,
    ) -> Self {
        let (room_name, room_pass) = match room {
            Some((name, pass)) => (Some(name), Some(pass)),
            None => (None, None),
        };

        Self {
            nickname,
            room_name,
            room_pass,
            create: intent.is_create(),
        }
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn room_name(&self) -> Option<&str> {
        self.room_name.as_deref()
    }

    pub fn room_pass(&self) -> Option<&str> {
        self.room_pass.as_deref()
    }

    pub fn create(&self) -> bool {
        self.create
    }

    pub fn intent(&self) -> Intent {
        Intent::from(self.create)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl fmt::Debug for RoomAccessRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoomAccessRequest")
            .field("nickname", &self.nickname)
            .field("room_name", &self.room_name)
            .field("room_pass", &self.room_pass.as_ref().map(|_| "<redacted>"))
            .field("create", &self.create)
            .finish()
    }
}
