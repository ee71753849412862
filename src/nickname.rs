use async_trait::async_trait;
use tracing::debug;

use crate::protocol::FieldRule;

const MAX_SUGGESTION_ATTEMPTS: usize = 8;

/// Source of raw nickname candidates.
///
/// Candidates need not satisfy the protocol's nickname rule; callers go
/// through `suggest_nickname`, which filters and trims them to fit.
#[async_trait]
pub trait NicknameGenerator: Send + Sync {
    async fn generate(&self) -> String;
}

/// Two-word pet names joined by `-`, e.g. "brave-otter". Most fit the
/// default nickname limit; longer ones get retried or truncated.
pub struct PetNameNicknameGenerator;

impl PetNameNicknameGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PetNameNicknameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NicknameGenerator for PetNameNicknameGenerator {
    async fn generate(&self) -> String {
        petname::Petnames::default().generate_one(2, "-")
    }
}

/// Produces a nickname that satisfies `rule`.
///
/// Retries the generator a few times, then falls back to truncating the last
/// candidate to the rule's maximum length.
pub async fn suggest_nickname(
    generator: &dyn NicknameGenerator,
    rule: &FieldRule,
) -> Option<String> {
    let mut last = String::new();

    for attempt in 0..MAX_SUGGESTION_ATTEMPTS {
        let candidate = generator.generate().await;
        if rule.check(&candidate).is_ok() {
            return Some(candidate);
        }
        debug!(attempt, candidate = %candidate, "Nickname suggestion rejected");
        last = candidate;
    }

    let truncated: String = match rule.max_len {
        Some(max) => last
            .chars()
            .take(max)
            .collect::<String>()
            .trim_end_matches('-')
            .to_string(),
        None => last,
    };
    rule.check(&truncated).is_ok().then_some(truncated)
}
