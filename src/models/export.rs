use serde::{Deserialize, Serialize};

/// Version of the export document layout
pub const EXPORT_SCHEMA_VERSION: u32 = 1;

/// Denormalized snapshot of the whole store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub schema_version: u32,
    pub exported_at: String,
    pub categories: Vec<String>,
    pub chats: Vec<ExportedChat>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedChat {
    pub id: String,
    pub title: String,
    pub created_at: Option<String>,
    pub model: String,
    pub content: String,
    pub categories: Vec<String>,
}
