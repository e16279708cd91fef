use serde::{Deserialize, Serialize};

/// Canonical chat record, independent of the shape it was imported from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    pub title: String,
    pub created_at: Option<String>,
    pub model: String,
    pub content: String,
}

/// Normalizer output: the canonical record plus any category names the source item declared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedChat {
    #[serde(flatten)]
    pub chat: Chat,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

/// One row of a filtered chat listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatListRow {
    pub id: String,
    pub title: String,
    pub created_at: Option<String>,
    pub model: String,
    /// Linked category names joined with ", " (empty when untagged)
    pub categories: String,
}

impl ChatListRow {
    /// Split the summary back into individual names
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.split(", ").map(str::trim).filter(|s| !s.is_empty()).collect()
    }
}
