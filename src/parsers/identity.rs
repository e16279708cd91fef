use sha2::{Digest, Sha256};

/// Number of content characters that participate in a derived identity
pub const CONTENT_PREFIX_CHARS: usize = 80;

/// Length of a derived identity in hex characters (64 bits)
pub const DERIVED_ID_LEN: usize = 16;

/// Derive a deterministic identity for items that carry no identifier field
///
/// Hashes `title|created|<first 80 chars of content>`; identical inputs always produce the
/// same identity so re-importing an unchanged item updates it in place.
pub fn derive_identity(title: &str, created_raw: Option<&str>, content: &str) -> String {
    let prefix: String = content.chars().take(CONTENT_PREFIX_CHARS).collect();
    let seed = format!("{}|{}|{}", title, created_raw.unwrap_or_default(), prefix);

    let mut hex = format!("{:x}", Sha256::digest(seed.as_bytes()));
    hex.truncate(DERIVED_ID_LEN);
    hex
}
