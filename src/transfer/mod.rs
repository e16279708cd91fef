//! Import and export of chat documents
//!
//! - [`import_document`] / [`import_path`]: decode bytes (UTF-8, then UTF-16), parse JSON,
//!   normalize and upsert into a [`crate::storage::Store`]
//! - [`export_all`] / [`export_json`] / [`write_export`]: rebuild a denormalized document
//!   that [`import_document`] accepts again

pub mod decode;
pub mod export;
pub mod import;

pub use decode::{decode_text, parse_document};
pub use export::{export_all, export_json, write_export};
pub use import::{ImportReport, import_document, import_path};
