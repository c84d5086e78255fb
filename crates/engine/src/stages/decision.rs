use async_trait::async_trait;
use caseflow_core::{PipelineState, ProviderKey, StageConfig};
use serde_json::json;
use tracing::{debug, info};

use crate::error::{EngineError, Result};
use crate::registry::ProviderRegistry;
use crate::services::evaluator::SOLUTION_EVALUATION;
use crate::stages::StageExecutor;

/// Scores below this threshold escalate; at or above it, the run
/// auto-resolves.
pub const CONFIDENCE_THRESHOLD: i64 = 90;

/// Score assumed when the evaluation call fails or returns no
/// `confidence_score` field.
pub const DEFAULT_CONFIDENCE_SCORE: i64 = 0;

pub const ESCALATION_DECISION: &str = "escalation_decision";
pub const UPDATE_PAYLOAD: &str = "update_payload";

/// Provider that evaluates confidence and performs the final payload update.
const EVALUATION_PROVIDER: ProviderKey = ProviderKey::Common;
/// Provider consulted on the escalation branch.
const ESCALATION_PROVIDER: ProviderKey = ProviderKey::Atlas;

/// Progress through the decision protocol. Every run walks
/// `Start → Evaluated → {Escalating | AutoResolving} → Updated → Done`;
/// anything else is a bug surfaced as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionPhase {
    Start,
    Evaluated,
    Escalating,
    AutoResolving,
    Updated,
    Done,
}

impl DecisionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Evaluated => "evaluated",
            Self::Escalating => "escalating",
            Self::AutoResolving => "auto_resolving",
            Self::Updated => "updated",
            Self::Done => "done",
        }
    }

    fn allowed_transitions(&self) -> Vec<DecisionPhase> {
        match self {
            Self::Start => vec![Self::Evaluated],
            Self::Evaluated => vec![Self::Escalating, Self::AutoResolving],
            Self::Escalating => vec![Self::Updated],
            Self::AutoResolving => vec![Self::Updated],
            Self::Updated => vec![Self::Done],
            Self::Done => vec![],
        }
    }

    pub fn transition(self, to: DecisionPhase) -> Result<DecisionPhase> {
        if self.allowed_transitions().contains(&to) {
            Ok(to)
        } else {
            Err(EngineError::InvalidPhaseTransition {
                from: self.as_str().to_string(),
                to: to.as_str().to_string(),
            })
        }
    }
}

/// The confidence-branching stage.
///
/// Four strictly ordered steps: evaluate the payload, branch on the
/// threshold, unconditionally run the payload update, and log every step
/// boundary. Nothing here retries or runs concurrently.
#[derive(Debug)]
pub struct DecisionStage;

#[async_trait]
impl StageExecutor for DecisionStage {
    async fn execute(
        &self,
        stage: &StageConfig,
        mut state: PipelineState,
        registry: &ProviderRegistry,
    ) -> Result<PipelineState> {
        let mut phase = DecisionPhase::Start;

        // Step 1: evaluate.
        let evaluation = registry.get(EVALUATION_PROVIDER)?;
        let response = evaluation.execute(SOLUTION_EVALUATION, &state.payload).await;
        let score_value = if response.success {
            response
                .data
                .get("confidence_score")
                .filter(|v| v.is_number())
                .cloned()
                .unwrap_or_else(|| json!(DEFAULT_CONFIDENCE_SCORE))
        } else {
            json!(DEFAULT_CONFIDENCE_SCORE)
        };
        // Scores may come back fractional; compare numerically, record as-is.
        let score = score_value.as_f64().unwrap_or(DEFAULT_CONFIDENCE_SCORE as f64);
        state.set("decision_score", score_value);
        state.log(format!("[{}] {SOLUTION_EVALUATION} → Score={score}", stage.name));
        phase = phase.transition(DecisionPhase::Evaluated)?;

        // Step 2: branch.
        if score < CONFIDENCE_THRESHOLD as f64 {
            phase = phase.transition(DecisionPhase::Escalating)?;
            info!(stage = %stage.name, score, "Escalating: confidence below threshold");

            let escalation = registry.get(ESCALATION_PROVIDER)?;
            let response = escalation.execute(ESCALATION_DECISION, &state.payload).await;
            if response.success && !response.data.is_empty() {
                state.merge(response.data);
            }
            state.set("decision", json!("Escalated"));
            state.log(format!(
                "[{}] Escalation triggered via {ESCALATION_PROVIDER}",
                stage.name
            ));
        } else {
            phase = phase.transition(DecisionPhase::AutoResolving)?;
            debug!(stage = %stage.name, score, "Auto-resolving: confidence at or above threshold");

            state.set("decision", json!("Auto-resolved"));
            state.log(format!(
                "[{}] Auto-resolved by {EVALUATION_PROVIDER}",
                stage.name
            ));
        }

        // Step 3: update, on both branches.
        let update = registry.get(EVALUATION_PROVIDER)?;
        let response = update.execute(UPDATE_PAYLOAD, &state.payload).await;
        if response.success && !response.data.is_empty() {
            state.merge(response.data);
        }
        state.log(format!(
            "[{}] {UPDATE_PAYLOAD} → [{}]",
            stage.name, response.message
        ));
        phase = phase.transition(DecisionPhase::Updated)?;

        phase.transition(DecisionPhase::Done)?;
        Ok(state)
    }
}
