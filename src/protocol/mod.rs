// Public API - the rule table shared with the room server
pub use rules::{Field, FieldError, FieldRule, ProtocolRules};

// Internal modules
mod rules;
