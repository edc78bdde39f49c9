//! # Formats
//!
//! Byte-level encodings of the profile store. Pure transformations; file I/O
//! lives in [`crate::storage`].

pub mod json;
pub mod persistence;

pub use json::{store_from_json, store_to_json};
pub use persistence::{SnapshotHeader, store_from_snapshot, store_to_snapshot};
