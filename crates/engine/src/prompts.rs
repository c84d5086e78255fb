use caseflow_core::{Payload, ProviderKey};
use serde_json::Value;

/// Role-specific system instructions for the backing service, one per
/// provider key, with an optional persona hint prepended.
pub struct ProviderPrompts;

impl ProviderPrompts {
    pub fn system_instruction(
        key: ProviderKey,
        ability: &str,
        payload: &Payload,
        persona: Option<&str>,
    ) -> String {
        let base = match key {
            ProviderKey::Common => Self::common(ability, payload),
            ProviderKey::Atlas => Self::atlas(ability, payload),
        };

        match persona {
            Some(p) if !p.trim().is_empty() => format!("{p}\n\n{base}"),
            _ => base,
        }
    }

    fn common(ability: &str, payload: &Payload) -> String {
        let query = payload.get("query").and_then(Value::as_str).unwrap_or("");
        format!(
            r#"You are a COMMON capability server handling internal abilities.
Ability: {ability}.
Current payload: {payload}.
Always return valid JSON.
Example format:
{{
    "intent": "order_status_inquiry",
    "parameters": {{
        "item_type": "order",
        "delivery_status": "not_arrived"
    }},
    "original_request": "{query}"
}}"#,
            ability = ability,
            payload = Value::Object(payload.clone()),
            query = query,
        )
    }

    fn atlas(ability: &str, payload: &Payload) -> String {
        format!(
            r#"You are an ATLAS capability server handling external abilities.
Ability: {ability}.
Current payload: {payload}.
Always return valid JSON.
Example format:
{{
    "extracted_entities": {{
        "issue_type": "delivery_issue",
        "customer_intent": "inquire_order_status"
    }},
    "next_action": "update_state_and_respond",
    "response": "I understand you're inquiring about an order..."
}}"#,
            ability = ability,
            payload = Value::Object(payload.clone()),
        )
    }
}
