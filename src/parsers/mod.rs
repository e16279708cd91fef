//! Normalization of heterogeneous chat-export JSON
//!
//! # Error Handling Strategy
//!
//! Normalization follows a **graceful degradation** approach:
//!
//! - **Unrecognized document shapes** produce an empty result instead of an error.
//!
//! - **Non-object items** inside a recognized list are skipped (and counted in debug logs).
//!
//! - **Missing fields** resolve through ordered candidate keys ([`fields`]) and fall back to
//!   defaults: a positional title, an empty model, a derived identity ([`identity`]) and,
//!   for content, the serialized item itself so nothing is silently dropped.
//!
//! - **Malformed timestamps** are kept verbatim by [`timestamps::coerce_timestamp`].
//!
//! Only byte decoding and JSON syntax errors can fail an import, and those are raised by the
//! import coordinator before the normalizer runs.

pub mod fields;
pub mod identity;
pub mod normalizer;
pub mod timestamps;

pub use identity::derive_identity;
pub use normalizer::normalize;
pub use timestamps::coerce_timestamp;
