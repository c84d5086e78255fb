use async_trait::async_trait;
use caseflow_core::{PipelineState, StageConfig};
use tracing::debug;

use crate::error::Result;
use crate::registry::ProviderRegistry;
use crate::stages::StageExecutor;

/// Deterministic stage: a fixed ordered list of ability calls.
///
/// Each successful result with data is shallow-merged into the payload in
/// call order, so later abilities overwrite earlier keys. A failed ability
/// is logged and skipped; it never halts the rest of the stage.
#[derive(Debug)]
pub struct SequentialStage;

#[async_trait]
impl StageExecutor for SequentialStage {
    async fn execute(
        &self,
        stage: &StageConfig,
        mut state: PipelineState,
        registry: &ProviderRegistry,
    ) -> Result<PipelineState> {
        for call in &stage.abilities {
            let provider = registry.get(call.provider)?;
            let result = provider.execute(&call.name, &state.payload).await;

            debug!(
                stage = %stage.name,
                ability = %call.name,
                provider = %call.provider,
                success = result.success,
                "Ability finished"
            );

            if result.success && !result.data.is_empty() {
                state.merge(result.data);
            }

            state.log(format!(
                "[{}] {} → [{}] → {}",
                stage.name, call.name, call.provider, result.message
            ));
        }

        Ok(state)
    }
}
