//! Stage execution strategies.
//!
//! Each configured stage resolves to a [`StageKind`], and each kind has one
//! executor. Adding a stage kind means adding a variant and an executor, not
//! threading another branch through the runner.

pub mod decision;
pub mod sequential;
pub mod unimplemented;

use async_trait::async_trait;
use caseflow_core::{PipelineState, StageConfig, StageMode};

use crate::error::Result;
use crate::registry::ProviderRegistry;

pub use decision::DecisionStage;
pub use sequential::SequentialStage;
pub use unimplemented::UnimplementedStage;

/// Name that marks the confidence-branching stage.
pub const DECISION_STAGE_NAME: &str = "DECIDE";

/// Executes one configured stage against the current state.
///
/// The state is taken by value and handed back: executors own it for the
/// duration of the stage and nothing else can alias it.
#[async_trait]
pub trait StageExecutor: Send + Sync {
    async fn execute(
        &self,
        stage: &StageConfig,
        state: PipelineState,
        registry: &ProviderRegistry,
    ) -> Result<PipelineState>;
}

/// Execution strategy selected for a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Sequential,
    Decision,
    Unimplemented,
}

impl StageKind {
    pub fn of(stage: &StageConfig) -> Self {
        match &stage.mode {
            StageMode::Deterministic => Self::Sequential,
            StageMode::NonDeterministic
                if stage.name.eq_ignore_ascii_case(DECISION_STAGE_NAME) =>
            {
                Self::Decision
            }
            _ => Self::Unimplemented,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_maps_to_sequential() {
        let stage = StageConfig::new("INTAKE", StageMode::Deterministic);
        assert_eq!(StageKind::of(&stage), StageKind::Sequential);
    }

    #[test]
    fn test_decide_maps_to_decision() {
        let stage = StageConfig::new("DECIDE", StageMode::NonDeterministic);
        assert_eq!(StageKind::of(&stage), StageKind::Decision);

        let lower = StageConfig::new("decide", StageMode::NonDeterministic);
        assert_eq!(StageKind::of(&lower), StageKind::Decision);
    }

    #[test]
    fn test_non_deterministic_without_decide_name_is_unimplemented() {
        let stage = StageConfig::new("GUESS", StageMode::NonDeterministic);
        assert_eq!(StageKind::of(&stage), StageKind::Unimplemented);
    }

    #[test]
    fn test_unrecognized_mode_is_unimplemented() {
        let stage = StageConfig::new("WAIT", StageMode::Unrecognized("human".to_string()));
        assert_eq!(StageKind::of(&stage), StageKind::Unimplemented);
    }
}
