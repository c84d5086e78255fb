use serde::{Deserialize, Serialize};

use crate::domain::ability::AbilityCall;

/// Execution strategy of a stage. Anything other than the two recognized
/// modes is carried through verbatim and executed as a logged no-op.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum StageMode {
    Deterministic,
    NonDeterministic,
    Unrecognized(String),
}

impl StageMode {
    pub fn parse(s: &str) -> Self {
        match s {
            "deterministic" => Self::Deterministic,
            "non-deterministic" => Self::NonDeterministic,
            _ => Self::Unrecognized(s.to_string()),
        }
    }
}

impl From<String> for StageMode {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<StageMode> for String {
    fn from(mode: StageMode) -> Self {
        mode.to_string()
    }
}

impl std::fmt::Display for StageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deterministic => f.write_str("deterministic"),
            Self::NonDeterministic => f.write_str("non-deterministic"),
            Self::Unrecognized(s) => f.write_str(s),
        }
    }
}

impl Default for StageMode {
    fn default() -> Self {
        Self::Deterministic
    }
}

/// One configured unit of pipeline work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    pub name: String,
    #[serde(default)]
    pub mode: StageMode,
    /// Ordered ability calls; only meaningful for deterministic stages.
    #[serde(default)]
    pub abilities: Vec<AbilityCall>,
}

impl StageConfig {
    pub fn new(name: impl Into<String>, mode: StageMode) -> Self {
        Self {
            name: name.into(),
            mode,
            abilities: Vec::new(),
        }
    }

    pub fn with_ability(mut self, call: AbilityCall) -> Self {
        self.abilities.push(call);
        self
    }
}
