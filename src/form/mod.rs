// Public API - what other modules can use
pub use builder::RoomAccessForm;
pub use config::SubmitConfig;
pub use errors::SubmitError;
pub use gateway::{FnGateway, GatewayError, LoggingGateway, RoomGateway};
pub use state::{DisplayedError, FormPhase};

// Internal modules
mod builder;
pub mod config;
mod errors;
mod gateway;
mod state;
