//! SQLite-backed chat store with category tagging

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, Row, Transaction, TransactionBehavior, params};
use tracing::debug;

use super::query::{ChatFilter, ListQuery};
use super::schema::{FILE_PRAGMAS, MEMORY_PRAGMAS, apply_schema};
use crate::models::{Category, CategorySummary, Chat, ChatListRow, NormalizedChat};

/// Row counts across the three relations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub chats: i64,
    pub categories: i64,
    pub links: i64,
    /// Chats with at least one category
    pub tagged_chats: i64,
}

/// Explicit handle to one chat database
///
/// Opening is idempotent: the schema is created only when missing, so any number of handles
/// (in this or other processes) may open the same file. Every mutating call runs in its own
/// immediate transaction; nothing is held open between calls. The connection closes on drop.
pub struct Store {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Store {
    /// Open (or create) the database file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch(FILE_PRAGMAS).context("Failed to configure database connection")?;
        apply_schema(&conn)?;

        debug!(path = %path.display(), "opened chat store");
        Ok(Self { conn, path: Some(path.to_path_buf()) })
    }

    /// Open a private, non-persistent database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        conn.execute_batch(MEMORY_PRAGMAS).context("Failed to configure database connection")?;
        apply_schema(&conn)?;
        Ok(Self { conn, path: None })
    }

    /// Location of the database file (`None` for in-memory stores)
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn write_transaction(&mut self) -> Result<Transaction<'_>> {
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .context("Failed to begin write transaction")
    }

    /// Insert a chat or overwrite every field of the existing chat with the same id
    ///
    /// Category links are left untouched.
    pub fn upsert(&mut self, chat: &Chat) -> Result<()> {
        let tx = self.write_transaction()?;
        upsert_chat(&tx, chat)?;
        tx.commit().context("Failed to commit chat upsert")
    }

    /// Upsert a batch of normalized chats and add the categories they declare
    ///
    /// The whole batch commits atomically. Declared categories are merged in: existing links
    /// are never removed.
    pub fn upsert_normalized(&mut self, chats: &[NormalizedChat]) -> Result<()> {
        let tx = self.write_transaction()?;
        for normalized in chats {
            upsert_chat(&tx, &normalized.chat)?;
            for name in clean_names(&normalized.categories) {
                let category_id = ensure_category_in(&tx, name)?;
                link(&tx, &normalized.chat.id, category_id)?;
            }
        }
        tx.commit().context("Failed to commit chat import")
    }

    pub fn get(&self, chat_id: &str) -> Result<Option<Chat>> {
        self.conn
            .query_row(
                "SELECT id, title, created_at, model, content FROM chats WHERE id = ?1",
                params![chat_id],
                row_to_chat,
            )
            .optional()
            .with_context(|| format!("Failed to load chat {}", chat_id))
    }

    /// Filtered, sorted listing with one row per chat
    pub fn list(&self, filter: &ChatFilter) -> Result<Vec<ChatListRow>> {
        let query = ListQuery::build(filter);
        let mut stmt = self.conn.prepare(&query.sql).context("Failed to prepare chat listing")?;
        let rows = stmt
            .query_map(params![query.search, query.category_ids_json, query.category_match], |row| {
                Ok(ChatListRow {
                    id: row.get(0)?,
                    title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    created_at: row.get(2)?,
                    model: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                    categories: row.get(4)?,
                })
            })
            .context("Failed to list chats")?;

        rows.collect::<rusqlite::Result<Vec<_>>>().context("Failed to read chat listing")
    }

    /// Get-or-create a category by exact name, returning its id
    pub fn ensure_category(&mut self, name: &str) -> Result<i64> {
        let tx = self.write_transaction()?;
        let id = ensure_category_in(&tx, name)?;
        tx.commit().context("Failed to commit category")?;
        Ok(id)
    }

    /// Link every chat to every named category, creating missing categories
    ///
    /// Names are trimmed and blank names ignored. Existing links and unknown chat ids are
    /// skipped, so repeating a call changes nothing.
    pub fn assign(&mut self, chat_ids: &[String], category_names: &[String]) -> Result<()> {
        let names = clean_names(category_names);
        if chat_ids.is_empty() || names.is_empty() {
            return Ok(());
        }

        let tx = self.write_transaction()?;
        let mut category_ids = Vec::with_capacity(names.len());
        for name in names {
            category_ids.push(ensure_category_in(&tx, name)?);
        }
        for chat_id in chat_ids {
            for category_id in &category_ids {
                link(&tx, chat_id, *category_id)?;
            }
        }
        tx.commit().context("Failed to commit category assignment")
    }

    /// Delete the links between the given chats and the named categories
    ///
    /// Names are cleaned the same way as in [`Store::assign`]. Unknown names and ids are ignored.
    pub fn remove(&mut self, chat_ids: &[String], category_names: &[String]) -> Result<()> {
        let names = clean_names(category_names);
        if chat_ids.is_empty() || names.is_empty() {
            return Ok(());
        }

        let tx = self.write_transaction()?;
        let mut category_ids = Vec::new();
        for name in names {
            if let Some(id) = find_category(&tx, name)? {
                category_ids.push(id);
            }
        }
        {
            let mut stmt = tx
                .prepare("DELETE FROM chat_categories WHERE chat_id = ?1 AND category_id = ?2")
                .context("Failed to prepare link removal")?;
            for chat_id in chat_ids {
                for category_id in &category_ids {
                    stmt.execute(params![chat_id, category_id])
                        .context("Failed to remove category link")?;
                }
            }
        }
        tx.commit().context("Failed to commit category removal")
    }

    /// All categories with their chat counts, ordered by name (case-insensitive)
    pub fn list_categories(&self) -> Result<Vec<CategorySummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name,
                    (SELECT COUNT(*) FROM chat_categories WHERE category_id = categories.id) AS n
             FROM categories
             ORDER BY name COLLATE NOCASE ASC, id ASC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(CategorySummary { id: row.get(0)?, name: row.get(1)?, count: row.get(2)? })
            })
            .context("Failed to list categories")?;

        rows.collect::<rusqlite::Result<Vec<_>>>().context("Failed to read categories")
    }

    /// All categories in creation order
    pub fn categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM categories ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| Ok(Category { id: row.get(0)?, name: row.get(1)? }))
            .context("Failed to load categories")?;

        rows.collect::<rusqlite::Result<Vec<_>>>().context("Failed to read categories")
    }

    /// Resolve category names to ids; unknown names map to `None`
    pub fn category_ids(&self, names: &[String]) -> Result<Vec<(String, Option<i64>)>> {
        names
            .iter()
            .map(|name| Ok((name.clone(), find_category(&self.conn, name)?)))
            .collect()
    }

    /// Every chat in insertion order
    pub fn chats(&self) -> Result<Vec<Chat>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, created_at, model, content FROM chats ORDER BY rowid")?;
        let rows = stmt.query_map([], row_to_chat).context("Failed to load chats")?;

        rows.collect::<rusqlite::Result<Vec<_>>>().context("Failed to read chats")
    }

    /// Every `(chat_id, category_name)` link in insertion order
    pub fn links(&self) -> Result<Vec<(String, String)>> {
        let mut stmt = self.conn.prepare(
            "SELECT cc.chat_id, cat.name
             FROM chat_categories cc
             JOIN categories cat ON cat.id = cc.category_id
             ORDER BY cc.rowid",
        )?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .context("Failed to load category links")?;

        rows.collect::<rusqlite::Result<Vec<_>>>().context("Failed to read category links")
    }

    /// Category names linked to one chat, in link order
    pub fn chat_categories(&self, chat_id: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT cat.name
             FROM chat_categories cc
             JOIN categories cat ON cat.id = cc.category_id
             WHERE cc.chat_id = ?1
             ORDER BY cc.rowid",
        )?;
        let rows = stmt
            .query_map(params![chat_id], |row| row.get(0))
            .with_context(|| format!("Failed to load categories of chat {}", chat_id))?;

        rows.collect::<rusqlite::Result<Vec<_>>>().context("Failed to read category links")
    }

    pub fn stats(&self) -> Result<StoreStats> {
        self.conn
            .query_row(
                "SELECT (SELECT COUNT(*) FROM chats),
                        (SELECT COUNT(*) FROM categories),
                        (SELECT COUNT(*) FROM chat_categories),
                        (SELECT COUNT(DISTINCT chat_id) FROM chat_categories)",
                [],
                |row| {
                    Ok(StoreStats {
                        chats: row.get(0)?,
                        categories: row.get(1)?,
                        links: row.get(2)?,
                        tagged_chats: row.get(3)?,
                    })
                },
            )
            .context("Failed to compute store statistics")
    }
}

fn row_to_chat(row: &Row<'_>) -> rusqlite::Result<Chat> {
    Ok(Chat {
        id: row.get(0)?,
        title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        created_at: row.get(2)?,
        model: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        content: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}

/// Trimmed, non-blank names
fn clean_names(names: &[String]) -> Vec<&str> {
    names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()).collect()
}

fn upsert_chat(conn: &Connection, chat: &Chat) -> Result<()> {
    conn.execute(
        "INSERT INTO chats (id, title, created_at, model, content)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
            title = excluded.title,
            created_at = excluded.created_at,
            model = excluded.model,
            content = excluded.content",
        params![chat.id, chat.title, chat.created_at, chat.model, chat.content],
    )
    .with_context(|| format!("Failed to upsert chat {}", chat.id))?;
    Ok(())
}

fn find_category(conn: &Connection, name: &str) -> Result<Option<i64>> {
    conn.query_row("SELECT id FROM categories WHERE name = ?1", params![name], |row| row.get(0))
        .optional()
        .with_context(|| format!("Failed to look up category '{}'", name))
}

fn ensure_category_in(conn: &Connection, name: &str) -> Result<i64> {
    conn.execute("INSERT OR IGNORE INTO categories (name) VALUES (?1)", params![name])
        .with_context(|| format!("Failed to create category '{}'", name))?;
    find_category(conn, name)?
        .with_context(|| format!("Category '{}' missing after insert", name))
}

/// Link a chat to a category; no-op when the link exists or the chat is unknown
fn link(conn: &Connection, chat_id: &str, category_id: i64) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO chat_categories (chat_id, category_id)
         SELECT ?1, ?2 WHERE EXISTS (SELECT 1 FROM chats WHERE id = ?1)",
        params![chat_id, category_id],
    )
    .with_context(|| format!("Failed to link chat {} to category {}", chat_id, category_id))?;
    Ok(())
}
