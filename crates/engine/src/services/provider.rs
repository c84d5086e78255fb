use std::sync::Arc;

use async_trait::async_trait;
use caseflow_core::{AbilityResult, Payload, ProviderKey};
use serde_json::Value;
use tracing::{debug, warn};

use crate::prompts::ProviderPrompts;
use crate::services::evaluator::Evaluator;
use crate::services::gemini_client::GeminiClient;
use crate::services::response_parser::ResponseParser;

/// External collaborator that executes named abilities against the current
/// payload. Implementations must never raise past this boundary: any
/// internal failure comes back as a failed [`AbilityResult`].
#[async_trait]
pub trait CapabilityProvider: Send + Sync {
    fn key(&self) -> ProviderKey;

    async fn execute(&self, ability: &str, payload: &Payload) -> AbilityResult;
}

impl std::fmt::Debug for dyn CapabilityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityProvider")
            .field("key", &self.key())
            .finish()
    }
}

/// Gemini-backed capability provider.
///
/// An injected [`Evaluator`] is consulted first so that deterministic stub
/// abilities short-circuit without touching the backing service; everything
/// else goes through the role-specific instruction and the generic call
/// path.
pub struct McpProvider {
    key: ProviderKey,
    client: GeminiClient,
    persona: Option<String>,
    evaluator: Option<Arc<dyn Evaluator>>,
}

impl McpProvider {
    pub fn new(key: ProviderKey, client: GeminiClient) -> Self {
        Self {
            key,
            client,
            persona: None,
            evaluator: None,
        }
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(persona.into());
        self
    }

    pub fn with_evaluator(mut self, evaluator: Arc<dyn Evaluator>) -> Self {
        self.evaluator = Some(evaluator);
        self
    }
}

#[async_trait]
impl CapabilityProvider for McpProvider {
    fn key(&self) -> ProviderKey {
        self.key
    }

    async fn execute(&self, ability: &str, payload: &Payload) -> AbilityResult {
        if let Some(evaluator) = &self.evaluator {
            if let Some(result) = evaluator.evaluate(ability, payload) {
                debug!(provider = %self.key, ability, "Ability answered by evaluator");
                return result;
            }
        }

        let instruction = ProviderPrompts::system_instruction(
            self.key,
            ability,
            payload,
            self.persona.as_deref(),
        );
        let contents = Value::Object(payload.clone()).to_string();

        match self.client.generate(&instruction, &contents).await {
            Ok(text) => ResponseParser::into_result(ability, &text),
            Err(e) => {
                warn!(provider = %self.key, ability, error = %e, "Ability call failed");
                AbilityResult::failed(format!("Error executing {ability}: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::evaluator::{KeywordEvaluator, HIGH_CONFIDENCE, SOLUTION_EVALUATION};
    use serde_json::json;

    #[tokio::test]
    async fn test_evaluator_short_circuits_backing_service() {
        // The client carries a bogus key and would fail if the generic path
        // were reached; the evaluator answers before any request is made.
        let provider = McpProvider::new(ProviderKey::Common, GeminiClient::new("unused"))
            .with_evaluator(Arc::new(KeywordEvaluator::default()));

        let mut payload = Payload::new();
        payload.insert("query".to_string(), json!("my package arrived today"));

        let result = provider.execute(SOLUTION_EVALUATION, &payload).await;

        assert!(result.success);
        assert_eq!(result.data["confidence_score"], json!(HIGH_CONFIDENCE));
    }

    #[tokio::test]
    async fn test_backing_failure_becomes_failed_result() {
        // No evaluator, unreachable endpoint: the transport error must be
        // absorbed into a failed result, never propagated.
        let client = GeminiClient::new("unused").with_base_url("http://127.0.0.1:9");
        let provider = McpProvider::new(ProviderKey::Atlas, client);

        let result = provider.execute("escalation_decision", &Payload::new()).await;

        assert!(!result.success);
        assert!(result.data.is_empty());
        assert!(result.message.contains("escalation_decision"));
    }
}
