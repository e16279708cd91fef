//! Chat Labels - normalize chat exports and organize them with categories
//!
//! This library imports chat-history exports of many shapes into a local SQLite database and
//! lets chats be tagged with user-defined categories. It provides:
//!
//! - Normalization of heterogeneous JSON documents into canonical chat records
//! - Stable identities for chats that carry no id (content hash)
//! - A store with upsert, AND-matched category filtering, search and sorting
//! - Export to a denormalized JSON document that imports back losslessly
//!
//! # Example
//!
//! ```no_run
//! use chat_labels::{ChatFilter, Store, import_document};
//!
//! let mut store = Store::open_in_memory()?;
//! import_document(&mut store, br#"{"chats": [{"id": "a", "title": "Hello", "content": "hi"}]}"#)?;
//! store.assign(&["a".to_string()], &["greetings".to_string()])?;
//!
//! let rows = store.list(&ChatFilter::new().search("hello"))?;
//! println!("{} matching chats", rows.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod error;
pub mod filters;
pub mod models;
pub mod parsers;
pub mod storage;
pub mod transfer;
pub mod utils;

// Re-export commonly used types
pub use error::{ImportError, ImportResult};
pub use models::{Chat, ChatListRow, NormalizedChat};
pub use parsers::normalize;
pub use storage::{ChatFilter, SortMode, Store};
pub use transfer::{export_all, export_json, import_document, import_path};
pub use utils::paths::format_path_with_tilde;
