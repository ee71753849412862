use std::sync::Arc;
use std::time::Duration;

use roomgate::{ProtocolRules, RoomAccessForm, RoomContext, SubmitConfig};

use super::mocks::MockGateway;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub form: Arc<RoomAccessForm>,
    pub gateway: MockGateway,
}

pub struct TestSetupBuilder {
    context: RoomContext,
    gateway: MockGateway,
    timeout: Option<Duration>,
    rules: ProtocolRules,
    fields: Option<(String, String, String)>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            context: RoomContext::NewRoom,
            gateway: MockGateway::new(),
            timeout: Some(Duration::from_secs(5)),
            rules: ProtocolRules::default(),
            fields: None,
        }
    }

    pub fn existing_room(mut self) -> Self {
        self.context = RoomContext::ExistingRoom;
        self
    }

    pub fn with_gateway(mut self, gateway: MockGateway) -> Self {
        self.gateway = gateway;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_rules(mut self, rules: ProtocolRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_fields(mut self, nickname: &str, room_name: &str, room_pass: &str) -> Self {
        self.fields = Some((
            nickname.to_string(),
            room_name.to_string(),
            room_pass.to_string(),
        ));
        self
    }

    pub fn build(self) -> TestSetup {
        let config = SubmitConfig::new()
            .with_timeout(self.timeout)
            .with_rules(self.rules);
        let form = RoomAccessForm::with_config(
            self.context,
            Arc::new(self.gateway.clone()),
            config,
        );

        if let Some((nickname, room_name, room_pass)) = self.fields {
            form.set_nickname(nickname);
            form.set_room_name(room_name);
            form.set_room_pass(room_pass);
        }

        TestSetup {
            form: Arc::new(form),
            gateway: self.gateway,
        }
    }
}
