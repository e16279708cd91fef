//! Normalize heterogeneous chat-export documents into canonical chat records.
//!
//! Accepted document shapes:
//!
//! - `{"chats": [...]}`
//! - `{"items": [...]}`
//! - `[...]` (bare list of chat-like objects)
//! - `{...}` (a single chat-like object)
//!
//! Anything else yields no records. Items that are not JSON objects are skipped, and missing
//! fields fall back to defaults, so normalization never fails.

use serde_json::{Map, Value};
use tracing::debug;

use super::fields::{
    CATEGORY_KEYS, CONTENT_KEYS, CREATED_KEYS, ID_KEYS, MESSAGE_LIST_KEYS, MODEL_KEYS, ROLE_KEYS,
    TEXT_KEYS, TITLE_KEYS, first_present, first_present_string, value_to_string,
};
use super::identity::derive_identity;
use super::timestamps::coerce_timestamp;
use crate::models::{Chat, NormalizedChat};

const MESSAGE_SEPARATOR: &str = "\n\n";

/// Wrapper keys holding the chat list, in priority order; an empty list still counts
const LIST_KEYS: &[&str] = &["chats", "items"];

/// Normalize a parsed JSON document into canonical chats
pub fn normalize(document: &Value) -> Vec<NormalizedChat> {
    let raw_items = raw_items(document);

    let mut chats = Vec::with_capacity(raw_items.len());
    let mut skipped = 0;
    for (position, item) in raw_items.iter().enumerate() {
        match item {
            Value::Object(map) => chats.push(normalize_item(map, position)),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, "skipped non-object chat items");
    }
    debug!(count = chats.len(), "normalized chats");

    chats
}

/// Locate the list of chat-like items inside a document
fn raw_items(document: &Value) -> &[Value] {
    match document {
        Value::Object(map) => {
            for key in LIST_KEYS {
                if let Some(Value::Array(items)) = map.get(*key) {
                    return items.as_slice();
                }
            }
            std::slice::from_ref(document)
        }
        Value::Array(items) => items.as_slice(),
        _ => &[],
    }
}

/// Normalize one chat object; `position` is its 0-based index in the source list
fn normalize_item(item: &Map<String, Value>, position: usize) -> NormalizedChat {
    let title = first_present_string(item, TITLE_KEYS)
        .unwrap_or_else(|| format!("Chat #{}", position + 1));
    let created_raw = first_present(item, CREATED_KEYS);
    let model = first_present_string(item, MODEL_KEYS).unwrap_or_default();
    let content = resolve_content(item);

    let id = first_present_string(item, ID_KEYS).unwrap_or_else(|| {
        let created = created_raw.map(value_to_string);
        derive_identity(&title, created.as_deref(), &content)
    });

    NormalizedChat {
        chat: Chat { id, title, created_at: coerce_timestamp(created_raw), model, content },
        categories: declared_categories(item),
    }
}

/// Direct content, else a rendered message list, else the whole item as JSON
fn resolve_content(item: &Map<String, Value>) -> String {
    if let Some(content) = first_present(item, CONTENT_KEYS) {
        return value_to_string(content);
    }

    match first_present(item, MESSAGE_LIST_KEYS) {
        Some(Value::Array(messages)) => render_messages(messages),
        _ => serde_json::to_string(item).unwrap_or_default(),
    }
}

fn render_messages(messages: &[Value]) -> String {
    messages.iter().map(render_message).collect::<Vec<_>>().join(MESSAGE_SEPARATOR)
}

fn render_message(message: &Value) -> String {
    match message {
        Value::Object(map) => {
            let role = first_present_string(map, ROLE_KEYS).unwrap_or_default();
            let text = first_present_string(map, TEXT_KEYS).unwrap_or_default();
            format!("[{}] {}", role, text).trim().to_string()
        }
        other => value_to_string(other),
    }
}

/// Category names carried by the item, as a list or a comma-separated string
fn declared_categories(item: &Map<String, Value>) -> Vec<String> {
    let names: Vec<String> = match first_present(item, CATEGORY_KEYS) {
        Some(Value::Array(values)) => values.iter().map(value_to_string).collect(),
        Some(Value::String(joined)) => joined.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    };

    names.into_iter().map(|n| n.trim().to_string()).filter(|n| !n.is_empty()).collect()
}
