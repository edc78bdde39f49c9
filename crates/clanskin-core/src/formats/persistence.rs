//! # Snapshot Format
//!
//! Compact binary snapshot of a profile store, used for export and import.
//! The live data file stays JSON (see [`super::json`]).
//!
//! Format: Header (5 bytes) + postcard-serialized store.
//! - 4 bytes: Magic ("CSKN")
//! - 1 byte: Version
//!
//! Size and header are validated before the payload is decoded.

use crate::{ClanSkinError, GroupId, ItemKind, Profile, ProfileStore, VariantId, primitives};
use serde::{Deserialize, Serialize};

/// Maximum accepted snapshot size (64 MB).
///
/// Checked BEFORE attempting deserialization.
pub const MAX_SNAPSHOT_SIZE: usize = 64 * 1024 * 1024;

/// Header only.
const HEADER_LEN: usize = 5;

// =============================================================================
// FILE HEADER
// =============================================================================

/// The snapshot header precedes all store data.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl SnapshotHeader {
    /// Create a new header with current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *primitives::MAGIC_BYTES,
            version: primitives::FORMAT_VERSION,
        }
    }

    /// Validate the header.
    pub fn validate(&self) -> Result<(), ClanSkinError> {
        if &self.magic != primitives::MAGIC_BYTES {
            return Err(ClanSkinError::DeserializationError(
                "Invalid magic bytes".to_string(),
            ));
        }
        if self.version != primitives::FORMAT_VERSION {
            return Err(ClanSkinError::DeserializationError(format!(
                "Unsupported version: {} (expected {})",
                self.version,
                primitives::FORMAT_VERSION
            )));
        }
        Ok(())
    }

    /// Write header to bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes
    }

    /// Read header from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ClanSkinError> {
        if bytes.len() < HEADER_LEN {
            return Err(ClanSkinError::DeserializationError(
                "Header too short".to_string(),
            ));
        }
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[0..4]);
        Ok(Self {
            magic,
            version: bytes[4],
        })
    }
}

impl Default for SnapshotHeader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SERIALIZABLE STORE
// =============================================================================

/// Flat, positional form of the store.
///
/// The data file's JSON layout tolerates `null` members, which needs a
/// self-describing format; postcard gets plain entry pairs instead.
#[derive(Debug, Serialize, Deserialize)]
struct SerializableStore {
    teams: Vec<(GroupId, SerializableProfile)>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableProfile {
    edit_mode: bool,
    variants: Vec<(ItemKind, VariantId)>,
}

impl From<&Profile> for SerializableProfile {
    fn from(profile: &Profile) -> Self {
        Self {
            edit_mode: profile.edit_mode,
            variants: profile
                .variants
                .iter()
                .map(|(kind, variant)| (kind.clone(), *variant))
                .collect(),
        }
    }
}

impl From<SerializableProfile> for Profile {
    fn from(serializable: SerializableProfile) -> Self {
        Self {
            edit_mode: serializable.edit_mode,
            variants: serializable.variants.into_iter().collect(),
        }
    }
}

impl From<&ProfileStore> for SerializableStore {
    fn from(store: &ProfileStore) -> Self {
        Self {
            teams: store
                .iter()
                .map(|(group, profile)| (group.clone(), SerializableProfile::from(profile)))
                .collect(),
        }
    }
}

impl From<SerializableStore> for ProfileStore {
    fn from(serializable: SerializableStore) -> Self {
        serializable
            .teams
            .into_iter()
            .map(|(group, profile)| (group, Profile::from(profile)))
            .collect()
    }
}

// =============================================================================
// SERIALIZATION FUNCTIONS
// =============================================================================

/// Serialize a store to snapshot bytes (header + payload).
pub fn store_to_snapshot(store: &ProfileStore) -> Result<Vec<u8>, ClanSkinError> {
    let payload = postcard::to_stdvec(&SerializableStore::from(store))
        .map_err(|e| ClanSkinError::SerializationError(e.to_string()))?;

    let mut result = Vec::with_capacity(HEADER_LEN + payload.len());
    result.extend_from_slice(&SnapshotHeader::new().to_bytes());
    result.extend_from_slice(&payload);

    Ok(result)
}

/// Deserialize a store from snapshot bytes.
///
/// Validates minimum size, maximum size and the header before touching the
/// payload.
pub fn store_from_snapshot(bytes: &[u8]) -> Result<ProfileStore, ClanSkinError> {
    if bytes.len() < HEADER_LEN {
        return Err(ClanSkinError::DeserializationError(format!(
            "Data too short: minimum {} bytes required",
            HEADER_LEN
        )));
    }

    if bytes.len() > MAX_SNAPSHOT_SIZE {
        return Err(ClanSkinError::DeserializationError(format!(
            "Data size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            MAX_SNAPSHOT_SIZE
        )));
    }

    SnapshotHeader::from_bytes(bytes)?.validate()?;

    let serializable: SerializableStore =
        postcard::from_bytes(&bytes[HEADER_LEN..]).map_err(|e| {
            ClanSkinError::DeserializationError(format!("Failed to decode snapshot: {}", e))
        })?;

    Ok(ProfileStore::from(serializable))
}

// =============================================================================
// TESTS
// =============================================================================
