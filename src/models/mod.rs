//! Data models for imported chats and their categories.
//!
//! - [`Chat`] - Canonical five-field chat record
//! - [`NormalizedChat`] - Normalizer output (chat plus declared category names)
//! - [`ChatListRow`] - Row of a filtered listing with a category summary
//! - [`Category`] / [`CategorySummary`] - Tags and their usage counts
//! - [`ExportDocument`] - Round-trippable snapshot of the store

pub mod category;
pub mod chat;
pub mod export;

pub use category::{Category, CategorySummary};
pub use chat::{Chat, ChatListRow, NormalizedChat};
pub use export::{EXPORT_SCHEMA_VERSION, ExportDocument, ExportedChat};
