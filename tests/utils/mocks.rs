use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{Notify, RwLock};

use roomgate::{GatewayError, RoomAccessRequest, RoomGateway};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Gateway mock that records requests and answers from a scripted queue.
/// When holding, each call parks until `release` is called.
#[derive(Clone)]
pub struct MockGateway {
    received: Arc<RwLock<Vec<RoomAccessRequest>>>,
    responses: Arc<RwLock<VecDeque<Result<(), GatewayError>>>>,
    hold: Option<Arc<Notify>>,
    entered: Arc<Notify>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            received: Arc::new(RwLock::new(Vec::new())),
            responses: Arc::new(RwLock::new(VecDeque::new())),
            hold: None,
            entered: Arc::new(Notify::new()),
        }
    }

    pub fn holding() -> Self {
        Self {
            hold: Some(Arc::new(Notify::new())),
            ..Self::new()
        }
    }

    pub async fn respond_with(&self, response: Result<(), GatewayError>) {
        self.responses.write().await.push_back(response);
    }

    pub async fn reject_with(&self, message: &str) {
        self.respond_with(Err(GatewayError::new(message))).await;
    }

    /// Lets one parked call continue
    pub fn release(&self) {
        if let Some(hold) = &self.hold {
            hold.notify_one();
        }
    }

    /// Waits until a call has reached the gateway
    pub async fn wait_for_call(&self) {
        self.entered.notified().await;
    }

    pub async fn received(&self) -> Vec<RoomAccessRequest> {
        self.received.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.received.read().await.len()
    }
}

#[async_trait]
impl RoomGateway for MockGateway {
    async fn submit(&self, request: &RoomAccessRequest) -> Result<(), GatewayError> {
        self.received.write().await.push(request.clone());
        self.entered.notify_one();

        if let Some(hold) = &self.hold {
            hold.notified().await;
        }

        self.responses.write().await.pop_front().unwrap_or(Ok(()))
    }
}
