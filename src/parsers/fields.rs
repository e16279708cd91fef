//! Ordered candidate-key lookup over raw JSON objects.
//!
//! Every logical attribute of a chat has a fixed list of source keys. The first key whose
//! value is present wins; callers supply their own default when none is.

use serde_json::{Map, Value};

pub const ID_KEYS: &[&str] = &["id", "conversation_id", "uuid"];
pub const TITLE_KEYS: &[&str] = &["title", "name", "summary"];
pub const CREATED_KEYS: &[&str] = &["created_at", "create_time", "timestamp", "date"];
pub const MODEL_KEYS: &[&str] = &["model", "model_slug", "engine"];
pub const CONTENT_KEYS: &[&str] = &["content"];
pub const MESSAGE_LIST_KEYS: &[&str] = &["messages", "turns", "conversation"];
pub const ROLE_KEYS: &[&str] = &["role", "sender"];
pub const TEXT_KEYS: &[&str] = &["content", "text"];
pub const CATEGORY_KEYS: &[&str] = &["categories"];

/// Whether a value counts as present
///
/// Null, empty strings and empty arrays/objects are absent. Numbers and booleans are always
/// present, so a literal `0` identifier is kept.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Return the value of the first present key
pub fn first_present<'a>(item: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|key| item.get(*key)).find(|value| is_present(value))
}

/// First present key rendered as a string
pub fn first_present_string(item: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    first_present(item, keys).map(value_to_string)
}

/// Strings verbatim, everything else as compact JSON
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_first_present_respects_key_order() {
        let item = object(json!({"name": "second", "title": "first"}));
        assert_eq!(first_present_string(&item, TITLE_KEYS), Some("first".to_string()));
    }

    #[test]
    fn test_first_present_skips_empty_values() {
        let item = object(json!({"title": "", "name": null, "summary": "fallback"}));
        assert_eq!(first_present_string(&item, TITLE_KEYS), Some("fallback".to_string()));
    }

    #[test]
    fn test_first_present_none_when_all_absent() {
        let item = object(json!({"other": "value"}));
        assert!(first_present(&item, TITLE_KEYS).is_none());
    }

    #[test]
    fn test_zero_identifier_is_present() {
        let item = object(json!({"id": 0, "uuid": "u-1"}));
        assert_eq!(first_present_string(&item, ID_KEYS), Some("0".to_string()));
    }

    #[test]
    fn test_empty_collections_are_absent() {
        assert!(!is_present(&json!([])));
        assert!(!is_present(&json!({})));
        assert!(is_present(&json!([1])));
        assert!(is_present(&json!(false)));
    }

    #[test]
    fn test_value_to_string_non_string() {
        assert_eq!(value_to_string(&json!(1700000000.5)), "1700000000.5");
        assert_eq!(value_to_string(&json!("plain")), "plain");
        assert_eq!(value_to_string(&json!(["a", 1])), r#"["a",1]"#);
    }
}
