//! Export coordinator: store → denormalized, re-importable JSON document

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use tracing::info;

use crate::models::{EXPORT_SCHEMA_VERSION, ExportDocument, ExportedChat};
use crate::storage::Store;

/// Snapshot every chat with its category names
///
/// Chats appear once each, in insertion order; a chat's categories follow link order and the
/// top-level list holds every category name in creation order.
pub fn export_all(store: &Store) -> Result<ExportDocument> {
    let mut links_by_chat: HashMap<String, Vec<String>> = HashMap::new();
    for (chat_id, name) in store.links()? {
        links_by_chat.entry(chat_id).or_default().push(name);
    }

    let chats = store
        .chats()?
        .into_iter()
        .map(|chat| ExportedChat {
            categories: links_by_chat.remove(&chat.id).unwrap_or_default(),
            id: chat.id,
            title: chat.title,
            created_at: chat.created_at,
            model: chat.model,
            content: chat.content,
        })
        .collect();

    let categories = store.categories()?.into_iter().map(|c| c.name).collect();

    Ok(ExportDocument {
        schema_version: EXPORT_SCHEMA_VERSION,
        exported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        categories,
        chats,
    })
}

/// Pretty-printed export; non-ASCII text is written literally
pub fn export_json(store: &Store) -> Result<String> {
    let document = export_all(store)?;
    serde_json::to_string_pretty(&document).context("Failed to serialize export")
}

/// Write the export to `path` atomically (temp file + rename)
pub fn write_export(store: &Store, path: &Path) -> Result<()> {
    let json = export_json(store)?;

    let file_name = path
        .file_name()
        .with_context(|| format!("Export path has no file name: {}", path.display()))?;
    let temp_path = path.with_file_name(format!("{}.tmp", file_name.to_string_lossy()));

    fs::write(&temp_path, json).context("Failed to write export temp file")?;
    fs::rename(&temp_path, path).context("Failed to rename export temp file")?;

    info!(path = %path.display(), "wrote export");
    Ok(())
}
