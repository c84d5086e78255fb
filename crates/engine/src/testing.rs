//! Shared test doubles for the engine's unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use caseflow_core::{AbilityResult, Payload, ProviderKey};

use crate::services::provider::CapabilityProvider;

/// Answers each ability from a script and records the call order. Abilities
/// without a scripted answer succeed with empty data.
pub(crate) struct ScriptedProvider {
    key: ProviderKey,
    script: HashMap<String, AbilityResult>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub(crate) fn new(key: ProviderKey) -> Self {
        Self {
            key,
            script: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_response(mut self, ability: &str, result: AbilityResult) -> Self {
        self.script.insert(ability.to_string(), result);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self, ability: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == ability).count()
    }
}

#[async_trait]
impl CapabilityProvider for ScriptedProvider {
    fn key(&self) -> ProviderKey {
        self.key
    }

    async fn execute(&self, ability: &str, _payload: &Payload) -> AbilityResult {
        self.calls.lock().unwrap().push(ability.to_string());
        self.script
            .get(ability)
            .cloned()
            .unwrap_or_else(|| AbilityResult::ok(Payload::new(), format!("{ability} executed OK")))
    }
}

/// Unwrap a JSON object literal into a payload map.
pub(crate) fn data(value: serde_json::Value) -> Payload {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("expected a JSON object"),
    }
}
