use serde_json::{Map, Value};

/// The mutable, JSON-shaped working data threaded through the pipeline.
///
/// Keys are not predeclared; any stage or ability may introduce new ones.
pub type Payload = Map<String, Value>;

/// Shallow merge of `incoming` into `target`: every key in `incoming` is
/// written over whatever `target` held, keys absent from `incoming` are left
/// untouched. Nested mappings are replaced wholesale, not merged.
pub fn merge_payload(target: &mut Payload, incoming: Payload) {
    for (key, value) in incoming {
        target.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload_from(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_merge_overwrites_existing_keys() {
        let mut target = payload_from(json!({"a": 1, "b": "keep"}));
        let incoming = payload_from(json!({"a": 2}));

        merge_payload(&mut target, incoming);

        assert_eq!(target["a"], json!(2));
        assert_eq!(target["b"], json!("keep"));
    }

    #[test]
    fn test_merge_adds_new_keys() {
        let mut target = payload_from(json!({"a": 1}));
        let incoming = payload_from(json!({"b": 2, "c": 3}));

        merge_payload(&mut target, incoming);

        assert_eq!(target.len(), 3);
        assert_eq!(target["b"], json!(2));
        assert_eq!(target["c"], json!(3));
    }

    #[test]
    fn test_merge_is_shallow() {
        let mut target = payload_from(json!({"nested": {"x": 1, "y": 2}}));
        let incoming = payload_from(json!({"nested": {"x": 10}}));

        merge_payload(&mut target, incoming);

        // The nested mapping is replaced, not deep-merged.
        assert_eq!(target["nested"], json!({"x": 10}));
    }

    #[test]
    fn test_merge_never_removes_keys() {
        let mut target = payload_from(json!({"a": 1, "b": 2}));
        let before: Vec<String> = target.keys().cloned().collect();

        merge_payload(&mut target, payload_from(json!({"c": 3})));

        for key in before {
            assert!(target.contains_key(&key));
        }
    }
}
