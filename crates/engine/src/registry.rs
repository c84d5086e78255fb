use std::collections::HashMap;
use std::sync::Arc;

use caseflow_core::ProviderKey;

use crate::error::{EngineError, Result};
use crate::services::provider::CapabilityProvider;

/// Fixed mapping from provider key to provider instance.
///
/// Built once before the pipeline runs and read-only afterwards; stages
/// share it by reference.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKey, Arc<dyn CapabilityProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, provider: Arc<dyn CapabilityProvider>) -> Self {
        self.providers.insert(provider.key(), provider);
        self
    }

    pub fn contains(&self, key: ProviderKey) -> bool {
        self.providers.contains_key(&key)
    }

    pub fn get(&self, key: ProviderKey) -> Result<&Arc<dyn CapabilityProvider>> {
        self.providers
            .get(&key)
            .ok_or(EngineError::UnknownProvider(key))
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("keys", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}
