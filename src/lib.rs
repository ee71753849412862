// Library crate for building and submitting room access requests
// This file exposes the public API for the binary and integration tests

pub mod form;
pub mod nickname;
pub mod protocol;
pub mod request;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use form::{
    DisplayedError, FnGateway, FormPhase, GatewayError, LoggingGateway, RoomAccessForm,
    RoomGateway, SubmitConfig, SubmitError,
};
pub use nickname::{NicknameGenerator, PetNameNicknameGenerator};
pub use protocol::{Field, FieldError, FieldRule, ProtocolRules};
pub use request::{FieldErrors, FormFields, Intent, RoomAccessRequest, RoomContext};
pub use shared::AppError;
