use serde::{Deserialize, Serialize};
use serde_json::Map;

use crate::domain::payload::Payload;
use crate::error::CoreError;

/// Identity of a capability provider, resolved once when configuration is
/// parsed rather than re-compared as a string on every call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProviderKey {
    /// Handles internal abilities.
    Common,
    /// Handles external abilities.
    Atlas,
}

impl ProviderKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "COMMON",
            Self::Atlas => "ATLAS",
        }
    }

    /// Case-insensitive lookup, so `common`, `Common` and `COMMON` all
    /// resolve to the same provider.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.to_ascii_uppercase().as_str() {
            "COMMON" => Ok(Self::Common),
            "ATLAS" => Ok(Self::Atlas),
            _ => Err(CoreError::UnknownProviderKey(s.to_string())),
        }
    }
}

impl std::fmt::Display for ProviderKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One configured ability invocation inside a deterministic stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AbilityCall {
    pub name: String,
    pub provider: ProviderKey,
}

/// Outcome of one ability execution. Providers never raise past their
/// boundary; failures come back as a value with `success == false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityResult {
    pub success: bool,
    pub data: Payload,
    pub message: String,
}

impl AbilityResult {
    pub fn ok(data: Payload, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Map::new(),
            message: message.into(),
        }
    }
}
