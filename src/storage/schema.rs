//! SQLite schema for chats, categories and their links

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Connection settings applied to file-backed stores
///
/// WAL keeps readers unblocked while one writer commits; the busy timeout makes concurrent
/// writers queue instead of failing immediately.
pub const FILE_PRAGMAS: &str = "PRAGMA journal_mode = WAL;
     PRAGMA synchronous = NORMAL;
     PRAGMA busy_timeout = 5000;
     PRAGMA foreign_keys = ON;";

pub const MEMORY_PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

pub const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS chats (
        id TEXT PRIMARY KEY,
        title TEXT,
        created_at TEXT,
        model TEXT,
        content TEXT
    );

    CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT UNIQUE NOT NULL
    );

    CREATE TABLE IF NOT EXISTS chat_categories (
        chat_id TEXT NOT NULL,
        category_id INTEGER NOT NULL,
        PRIMARY KEY (chat_id, category_id),
        FOREIGN KEY (chat_id) REFERENCES chats(id) ON DELETE CASCADE,
        FOREIGN KEY (category_id) REFERENCES categories(id) ON DELETE CASCADE
    );

    CREATE INDEX IF NOT EXISTS idx_chat_categories_category ON chat_categories(category_id);";

/// Create all relations if they do not exist yet (safe to run on every open)
pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA).context("Failed to apply database schema")
}
