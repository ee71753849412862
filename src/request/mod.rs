// Public API - what other modules can use
pub use types::{FormFields, Intent, RoomAccessRequest, RoomContext};
pub use validation::{validate_fields, FieldErrors};

// Internal modules
mod types;
mod validation;
