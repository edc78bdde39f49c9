//! # Data File Format
//!
//! JSON encoding of the whole store, as kept on disk between runs:
//!
//! ```text
//! {
//!   "Teams": {
//!     "<groupId>": { "EditMode": bool, "Skins": { "<itemKind>": <u64>, ... } }
//!   }
//! }
//! ```

use crate::{ClanSkinError, ProfileStore};

/// Encode a store as pretty-printed JSON.
pub fn store_to_json(store: &ProfileStore) -> Result<Vec<u8>, ClanSkinError> {
    serde_json::to_vec_pretty(store).map_err(|e| ClanSkinError::SerializationError(e.to_string()))
}

/// Decode a store from JSON.
pub fn store_from_json(bytes: &[u8]) -> Result<ProfileStore, ClanSkinError> {
    serde_json::from_slice(bytes).map_err(|e| ClanSkinError::DeserializationError(e.to_string()))
}
