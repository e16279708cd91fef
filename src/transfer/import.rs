//! Import coordinator: bytes → JSON → normalized chats → store
//!
//! # Error Handling Strategy
//!
//! - **Single documents**: decode and JSON errors abort the import and are returned as
//!   [`ImportError`]; nothing from that document is written.
//!
//! - **Directories**: every `*.json` file is imported on its own. Failed files are logged and
//!   counted, and the run only fails when more than half of the files failed.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::{info, warn};
use walkdir::WalkDir;

use super::decode::parse_document;
use crate::error::ImportResult;
use crate::models::NormalizedChat;
use crate::parsers::normalize;
use crate::storage::Store;
use crate::utils::validate_file_size;

/// Maximum number of files picked up from one directory import
const MAX_IMPORT_FILES: usize = 10_000;

/// Files decoded in parallel before their chats are written; bounds memory per batch
const IMPORT_BATCH_FILES: usize = 32;

const DOCUMENT_EXTENSION: &str = "json";

/// Outcome of [`import_path`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Chats normalized and written across all files
    pub chats: usize,
    pub files_imported: usize,
    pub files_failed: usize,
}

/// Import one encoded JSON document, returning the number of chats normalized
///
/// Every chat is upserted and the categories it declares are added to its existing ones.
pub fn import_document(store: &mut Store, bytes: &[u8]) -> ImportResult<usize> {
    let chats = normalize_document(bytes)?;
    store.upsert_normalized(&chats)?;

    info!(count = chats.len(), "imported chats");
    Ok(chats.len())
}

fn normalize_document(bytes: &[u8]) -> ImportResult<Vec<NormalizedChat>> {
    let document = parse_document(bytes)?;
    Ok(normalize(&document))
}

/// Import a JSON file, or every `*.json` file below a directory
///
/// Directory imports work through the files in batches: each batch is decoded and
/// normalized in parallel, then written one file at a time in path order, so only one
/// batch of normalized chats is held in memory.
pub fn import_path(store: &mut Store, path: &Path) -> Result<ImportReport> {
    if !path.is_dir() {
        let bytes = read_document(path)?;
        let chats = import_document(store, &bytes)
            .with_context(|| format!("Failed to import {}", path.display()))?;
        return Ok(ImportReport { chats, files_imported: 1, files_failed: 0 });
    }

    let files = discover_documents(path)?;
    if files.is_empty() {
        warn!(dir = %path.display(), "no .json documents found");
        return Ok(ImportReport::default());
    }

    let mut report = ImportReport::default();
    for batch in files.chunks(IMPORT_BATCH_FILES) {
        let normalized: Vec<(&PathBuf, Result<Vec<NormalizedChat>>)> = batch
            .par_iter()
            .map(|file| {
                let result = read_document(file).and_then(|bytes| {
                    normalize_document(&bytes)
                        .with_context(|| format!("Failed to parse {}", file.display()))
                });
                (file, result)
            })
            .collect();

        for (file, result) in normalized {
            match result.and_then(|chats| store.upsert_normalized(&chats).map(|_| chats.len())) {
                Ok(count) => {
                    report.chats += count;
                    report.files_imported += 1;
                }
                Err(e) => {
                    report.files_failed += 1;
                    warn!(file = %file.display(), error = %format!("{:#}", e), "skipping document");
                }
            }
        }
    }

    let total = report.files_imported + report.files_failed;
    let failure_rate = report.files_failed as f64 / total as f64;
    if failure_rate > 0.5 {
        bail!(
            "Import failed: {}/{} documents could not be imported ({}% failure rate)",
            report.files_failed,
            total,
            (failure_rate * 100.0) as u32
        );
    }

    info!(
        chats = report.chats,
        files = report.files_imported,
        failed = report.files_failed,
        "directory import finished"
    );
    Ok(report)
}

/// Read a document, rejecting files over the size limit
fn read_document(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path)
        .with_context(|| format!("Failed to open document: {}", path.display()))?;
    validate_file_size(&file, path)?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .with_context(|| format!("Failed to read document: {}", path.display()))?;
    Ok(bytes)
}

/// All `*.json` files below `dir`, sorted, symlinks not followed
fn discover_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("Failed to read import directory: {}", dir.display()))?;
        let path = entry.path();

        let is_document = entry.file_type().is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION));
        if !is_document {
            continue;
        }

        if files.len() >= MAX_IMPORT_FILES {
            bail!(
                "Resource limit exceeded: more than {} documents under {}",
                MAX_IMPORT_FILES,
                dir.display()
            );
        }
        files.push(path.to_path_buf());
    }

    Ok(files)
}
