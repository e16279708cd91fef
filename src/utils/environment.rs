use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable that overrides the database location
pub const DB_ENV_VAR: &str = "CHAT_LABELS_DB";

const APP_DIR: &str = "chat-labels";
const DB_FILE: &str = "chat_labels.db";

/// Resolve the database path: `$CHAT_LABELS_DB`, else `<data dir>/chat-labels/chat_labels.db`
pub fn get_db_path() -> Result<PathBuf> {
    resolve_db_path(env::var_os(DB_ENV_VAR).map(PathBuf::from), dirs::data_dir())
}

fn resolve_db_path(overridden: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = overridden.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(path);
    }

    let data_dir = data_dir.context("Could not determine the user data directory")?;
    Ok(data_dir.join(APP_DIR).join(DB_FILE))
}
