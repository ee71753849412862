use async_trait::async_trait;
use futures::future::BoxFuture;
use thiserror::Error;
use tracing::{info, instrument};

use crate::request::RoomAccessRequest;

/// Failure reported by the server side, e.g. "room full" or "wrong password"
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GatewayError {
    pub message: String,
}

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Carries a validated request to the room server.
///
/// Implementations own transport, sessions and timeouts of their own; the
/// form only guarantees it calls `submit` once per submit action and only
/// with a request that passed validation.
#[async_trait]
pub trait RoomGateway: Send + Sync {
    async fn submit(&self, request: &RoomAccessRequest) -> Result<(), GatewayError>;
}

/// Gateway backed by an async closure
pub struct FnGateway<F> {
    submit_fn: F,
}

impl<F> FnGateway<F>
where
    F: Fn(RoomAccessRequest) -> BoxFuture<'static, Result<(), GatewayError>> + Send + Sync,
{
    pub fn new(submit_fn: F) -> Self {
        Self { submit_fn }
    }
}

#[async_trait]
impl<F> RoomGateway for FnGateway<F>
where
    F: Fn(RoomAccessRequest) -> BoxFuture<'static, Result<(), GatewayError>> + Send + Sync,
{
    async fn submit(&self, request: &RoomAccessRequest) -> Result<(), GatewayError> {
        (self.submit_fn)(request.clone()).await
    }
}

/// Gateway that accepts every request and only logs it
#[derive(Debug, Default)]
pub struct LoggingGateway;

impl LoggingGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RoomGateway for LoggingGateway {
    #[instrument(skip(self, request))]
    async fn submit(&self, request: &RoomAccessRequest) -> Result<(), GatewayError> {
        info!(
            nickname = %request.nickname(),
            room_name = ?request.room_name(),
            create = request.create(),
            "Accepted room access request"
        );
        Ok(())
    }
}
