use caseflow_core::{Payload, PipelineState, ProviderKey, StageConfig};
use tracing::{debug, info};

use crate::error::{EngineError, Result};
use crate::registry::ProviderRegistry;
use crate::stages::{
    DecisionStage, SequentialStage, StageExecutor, StageKind, UnimplementedStage,
};

/// Drives the configured stages in order against one pipeline state.
///
/// The runner performs no provider calls itself; it selects an executor per
/// stage, brackets each stage with start/completed log entries, and hands
/// the state from one stage to the next by value.
#[derive(Debug)]
pub struct PipelineRunner {
    stages: Vec<StageConfig>,
    registry: ProviderRegistry,
    sequential: SequentialStage,
    decision: DecisionStage,
    unimplemented: UnimplementedStage,
}

impl PipelineRunner {
    /// Build a runner, validating every configured provider key against the
    /// registry so a bad descriptor fails here rather than mid-pipeline.
    pub fn new(stages: Vec<StageConfig>, registry: ProviderRegistry) -> Result<Self> {
        Self::validate_providers(&stages, &registry)?;
        Ok(Self {
            stages,
            registry,
            sequential: SequentialStage,
            decision: DecisionStage,
            unimplemented: UnimplementedStage,
        })
    }

    fn validate_providers(stages: &[StageConfig], registry: &ProviderRegistry) -> Result<()> {
        for stage in stages {
            match StageKind::of(stage) {
                StageKind::Sequential => {
                    for call in &stage.abilities {
                        if !registry.contains(call.provider) {
                            return Err(EngineError::UnknownProvider(call.provider));
                        }
                    }
                }
                StageKind::Decision => {
                    for key in [ProviderKey::Common, ProviderKey::Atlas] {
                        if !registry.contains(key) {
                            return Err(EngineError::UnknownProvider(key));
                        }
                    }
                }
                StageKind::Unimplemented => {}
            }
        }
        Ok(())
    }

    fn executor_for(&self, kind: StageKind) -> &dyn StageExecutor {
        match kind {
            StageKind::Sequential => &self.sequential,
            StageKind::Decision => &self.decision,
            StageKind::Unimplemented => &self.unimplemented,
        }
    }

    /// Run every stage in configured order and return the final state.
    pub async fn run(&self, initial: Payload) -> Result<PipelineState> {
        let mut state = PipelineState::new(initial);
        info!(
            run_id = %state.run_id,
            stage_count = self.stages.len(),
            "Starting pipeline run"
        );

        for stage in &self.stages {
            let kind = StageKind::of(stage);
            debug!(stage = %stage.name, ?kind, "Executing stage");

            state.log(format!(
                "[{}] Stage started (mode={})",
                stage.name, stage.mode
            ));
            state = self.executor_for(kind).execute(stage, state, &self.registry).await?;
            state.log(format!("[{}] Stage completed", stage.name));
        }

        info!(
            run_id = %state.run_id,
            log_entries = state.logs.len(),
            "Pipeline run completed"
        );
        Ok(state)
    }
}
