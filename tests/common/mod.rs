//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use tempfile::TempDir;

/// Scratch directory holding a database file and any documents written for a test
pub struct Workspace {
    temp_dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the workspace database (not created until opened)
    pub fn db_path(&self) -> PathBuf {
        self.temp_dir.path().join("data").join("chat_labels.db")
    }

    /// Write raw bytes under the workspace, creating parent directories
    pub fn write(&self, relative: &str, bytes: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create document dir");
        }
        fs::write(&path, bytes).expect("Failed to write document");
        path
    }

    pub fn write_document(&self, relative: &str, document: &DocumentBuilder) -> PathBuf {
        self.write(relative, document.to_json().as_bytes())
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Shape of the top-level document
#[derive(Clone, Copy)]
pub enum Shape {
    Chats,
    Items,
    BareList,
}

/// Builder for chat-export documents
pub struct DocumentBuilder {
    shape: Shape,
    chats: Vec<ChatBuilder>,
}

impl DocumentBuilder {
    pub fn new(shape: Shape) -> Self {
        Self { shape, chats: Vec::new() }
    }

    pub fn chat(mut self, chat: ChatBuilder) -> Self {
        self.chats.push(chat);
        self
    }

    pub fn to_value(&self) -> Value {
        let items: Vec<Value> = self.chats.iter().map(ChatBuilder::to_value).collect();
        match self.shape {
            Shape::Chats => json!({ "chats": items }),
            Shape::Items => json!({ "items": items }),
            Shape::BareList => Value::Array(items),
        }
    }

    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}

/// Builder for one chat item; only fields that were set are emitted
#[derive(Default, Clone)]
pub struct ChatBuilder {
    fields: Map<String, Value>,
}

impl ChatBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn id(self, id: &str) -> Self {
        self.field("id", json!(id))
    }

    pub fn title(self, title: &str) -> Self {
        self.field("title", json!(title))
    }

    pub fn created_at(self, created_at: Value) -> Self {
        self.field("created_at", created_at)
    }

    pub fn model(self, model: &str) -> Self {
        self.field("model", json!(model))
    }

    pub fn content(self, content: &str) -> Self {
        self.field("content", json!(content))
    }

    /// `messages` list of `{role, text}` objects
    pub fn messages(self, messages: &[(&str, &str)]) -> Self {
        let list: Vec<Value> =
            messages.iter().map(|(role, text)| json!({ "role": role, "text": text })).collect();
        self.field("messages", Value::Array(list))
    }

    pub fn categories(self, names: &[&str]) -> Self {
        self.field("categories", json!(names))
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
