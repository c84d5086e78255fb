use caseflow_core::{AbilityResult, Payload};
use serde_json::json;

/// Ability the evaluator strategy answers for.
pub const SOLUTION_EVALUATION: &str = "solution_evaluation";

/// Confidence returned when the keyword is present.
pub const HIGH_CONFIDENCE: i64 = 95;
/// Confidence returned when the keyword is absent.
pub const LOW_CONFIDENCE: i64 = 40;

/// Pluggable strategy consulted by a provider before its general-purpose
/// call path. Returning `None` means the ability falls through to the
/// backing service.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, ability: &str, payload: &Payload) -> Option<AbilityResult>;
}

/// Deterministic `solution_evaluation` stub: a case-insensitive substring
/// check of the payload's `query` field.
///
/// The match is a plain substring on purpose, so negated phrasing like
/// "it hasn't arrived yet" still scores high. Swap the evaluator out if a
/// negation-aware signal is ever needed.
pub struct KeywordEvaluator {
    keyword: String,
}

impl KeywordEvaluator {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
        }
    }
}

impl Default for KeywordEvaluator {
    fn default() -> Self {
        Self::new("arrived")
    }
}

impl Evaluator for KeywordEvaluator {
    fn evaluate(&self, ability: &str, payload: &Payload) -> Option<AbilityResult> {
        if ability != SOLUTION_EVALUATION {
            return None;
        }

        let query = payload
            .get("query")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_lowercase();

        let mut data = Payload::new();
        let result = if query.contains(&self.keyword) {
            data.insert("confidence_score".to_string(), json!(HIGH_CONFIDENCE));
            AbilityResult::ok(data, format!("{SOLUTION_EVALUATION} executed OK (auto-resolve)"))
        } else {
            data.insert("confidence_score".to_string(), json!(LOW_CONFIDENCE));
            AbilityResult::ok(data, format!("{SOLUTION_EVALUATION} executed OK (escalate)"))
        };

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload_with_query(query: &str) -> Payload {
        let mut payload = Payload::new();
        payload.insert("query".to_string(), json!(query));
        payload
    }

    #[test]
    fn test_keyword_present_scores_high() {
        let evaluator = KeywordEvaluator::default();
        let result = evaluator
            .evaluate(SOLUTION_EVALUATION, &payload_with_query("my package arrived today"))
            .unwrap();

        assert!(result.success);
        assert_eq!(result.data["confidence_score"], json!(HIGH_CONFIDENCE));
        assert!(result.message.contains("auto-resolve"));
    }

    #[test]
    fn test_keyword_absent_scores_low() {
        let evaluator = KeywordEvaluator::default();
        let result = evaluator
            .evaluate(SOLUTION_EVALUATION, &payload_with_query("where is my package"))
            .unwrap();

        assert_eq!(result.data["confidence_score"], json!(LOW_CONFIDENCE));
        assert!(result.message.contains("escalate"));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let evaluator = KeywordEvaluator::default();
        let result = evaluator
            .evaluate(SOLUTION_EVALUATION, &payload_with_query("It ARRIVED!"))
            .unwrap();

        assert_eq!(result.data["confidence_score"], json!(HIGH_CONFIDENCE));
    }

    #[test]
    fn test_negated_phrasing_still_matches_substring() {
        // Deliberate: the evaluator is substring-based, so "hasn't arrived"
        // scores high even though the sentence is negated.
        let evaluator = KeywordEvaluator::default();
        let result = evaluator
            .evaluate(SOLUTION_EVALUATION, &payload_with_query("it hasn't arrived yet"))
            .unwrap();

        assert_eq!(result.data["confidence_score"], json!(HIGH_CONFIDENCE));
    }

    #[test]
    fn test_other_abilities_fall_through() {
        let evaluator = KeywordEvaluator::default();
        assert!(evaluator
            .evaluate("escalation_decision", &payload_with_query("anything"))
            .is_none());
    }

    #[test]
    fn test_missing_query_scores_low() {
        let evaluator = KeywordEvaluator::default();
        let result = evaluator
            .evaluate(SOLUTION_EVALUATION, &Payload::new())
            .unwrap();

        assert_eq!(result.data["confidence_score"], json!(LOW_CONFIDENCE));
    }
}
