use async_trait::async_trait;
use caseflow_core::{PipelineState, StageConfig};
use tracing::warn;

use crate::error::Result;
use crate::registry::ProviderRegistry;
use crate::stages::StageExecutor;

/// Deliberate no-op for stages whose mode the engine does not recognize:
/// the payload passes through untouched and the skip is recorded in the log.
#[derive(Debug)]
pub struct UnimplementedStage;

#[async_trait]
impl StageExecutor for UnimplementedStage {
    async fn execute(
        &self,
        stage: &StageConfig,
        mut state: PipelineState,
        _registry: &ProviderRegistry,
    ) -> Result<PipelineState> {
        warn!(stage = %stage.name, mode = %stage.mode, "Stage mode not implemented, passing state through");
        state.log(format!(
            "[{}] Mode={} not implemented yet",
            stage.name, stage.mode
        ));
        Ok(state)
    }
}
