use caseflow_core::{AbilityResult, Payload};
use serde_json::Value;

/// Key under which free-text provider replies are wrapped when they are not
/// valid JSON.
pub const RAW_RESPONSE_KEY: &str = "raw_response";

pub struct ResponseParser;

impl ResponseParser {
    /// Convert raw backing-service text into an ability result.
    ///
    /// The service is asked for JSON but is allowed to reply with a fenced
    /// code block or with plain prose; neither is treated as an error.
    pub fn into_result(ability: &str, content: &str) -> AbilityResult {
        let cleaned = Self::strip_code_fences(content);

        match serde_json::from_str::<Value>(&cleaned) {
            Ok(Value::Object(data)) => {
                AbilityResult::ok(data, format!("{ability} executed OK"))
            }
            _ => {
                let mut data = Payload::new();
                data.insert(
                    RAW_RESPONSE_KEY.to_string(),
                    Value::String(cleaned),
                );
                AbilityResult::ok(data, format!("{ability} returned non-JSON"))
            }
        }
    }

    /// Strip a leading ``` or ```json fence (any case) and a trailing ```.
    pub fn strip_code_fences(content: &str) -> String {
        let trimmed = content.trim();

        let Some(rest) = trimmed.strip_prefix("```") else {
            return trimmed.to_string();
        };

        let rest = match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        };
        let rest = rest.trim_start();
        let rest = rest.strip_suffix("```").unwrap_or(rest);

        rest.trim().to_string()
    }
}
