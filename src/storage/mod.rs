//! Persistent chat storage with category tagging
//!
//! A single SQLite file holds three relations:
//! - `chats`: canonical chat records keyed by their stable id
//! - `categories`: unique category names with auto-assigned ids
//! - `chat_categories`: many-to-many links (cascading on delete)
//!
//! [`Store`] is the explicit handle to that file. [`query`] builds the parameterized listing
//! statement used by [`Store::list`].

pub mod query;
pub mod schema;
pub mod store;

pub use query::{CategoryMatch, ChatFilter, ListQuery, SortMode};
pub use store::{Store, StoreStats};
