use serde::{Deserialize, Serialize};

use crate::domain::stage::StageConfig;

/// A full pipeline descriptor as loaded from configuration: an identifier,
/// a free-text persona hint passed through to providers, and the ordered
/// stage list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSpec {
    pub name: String,
    #[serde(default)]
    pub persona: Option<String>,
    pub stages: Vec<StageConfig>,
}

impl PipelineSpec {
    pub fn persona(&self) -> Option<&str> {
        self.persona.as_deref().filter(|p| !p.trim().is_empty())
    }
}
