//! # Data File
//!
//! Whole-store load and flush against a JSON file.
//!
//! Loading never fails: a missing or unreadable file yields an empty store and
//! a [`LoadOutcome`] describing what happened, so the caller can log it and
//! start cleanly with fresh state.
//!
//! Flushing writes a uniquely named temp file next to the target and renames
//! it over the target, so a crash mid-write leaves the previous file intact
//! and concurrent flushes never share a temp file.

use crate::formats::{store_from_json, store_to_json};
use crate::{ClanSkinError, ProfileStore};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// What happened when the data file was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was read; it held this many profiles.
    Loaded { profiles: usize },
    /// No file existed; starting empty.
    Missing,
    /// The file could not be read or parsed; starting empty.
    Corrupt { reason: String },
}

/// Location of the durable store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFile {
    path: PathBuf,
}

impl DataFile {
    /// Create a handle for the given path. Does not touch the filesystem.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the data file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the data file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the store, substituting an empty one on any failure.
    #[must_use]
    pub fn load(&self) -> (ProfileStore, LoadOutcome) {
        if !self.path.exists() {
            return (ProfileStore::new(), LoadOutcome::Missing);
        }
        match self.load_strict() {
            Ok(store) => {
                let profiles = store.len();
                (store, LoadOutcome::Loaded { profiles })
            }
            Err(e) => (
                ProfileStore::new(),
                LoadOutcome::Corrupt {
                    reason: e.to_string(),
                },
            ),
        }
    }

    /// Load the store, reporting any failure.
    pub fn load_strict(&self) -> Result<ProfileStore, ClanSkinError> {
        let bytes = std::fs::read(&self.path).map_err(|e| {
            ClanSkinError::IoError(format!("Read {}: {}", self.path.display(), e))
        })?;
        store_from_json(&bytes)
    }

    /// Write the whole store to disk.
    pub fn flush(&self, store: &ProfileStore) -> Result<(), ClanSkinError> {
        let bytes = store_to_json(store)?;
        let dir = self.dir();

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| {
            ClanSkinError::IoError(format!("Create temp file in {}: {}", dir.display(), e))
        })?;
        tmp.write_all(&bytes).map_err(|e| {
            ClanSkinError::IoError(format!("Write {}: {}", tmp.path().display(), e))
        })?;
        tmp.persist(&self.path).map_err(|e| {
            ClanSkinError::IoError(format!("Replace {}: {}", self.path.display(), e.error))
        })?;
        Ok(())
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GroupId, ItemKind, VariantId};

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = DataFile::new(dir.path().join("clanskin_data.json"));

        let (store, outcome) = file.load();

        assert!(store.is_empty());
        assert_eq!(outcome, LoadOutcome::Missing);
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("clanskin_data.json");
        std::fs::write(&path, b"{ \"Teams\": [1, 2").expect("write");

        let (store, outcome) = DataFile::new(&path).load();

        assert!(store.is_empty());
        assert!(matches!(outcome, LoadOutcome::Corrupt { .. }));
    }

    #[test]
    fn flush_then_load_restores_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = DataFile::new(dir.path().join("clanskin_data.json"));

        let mut store = ProfileStore::new();
        let profile = store.ensure(&GroupId::new("WOLF"));
        profile.set_variant(ItemKind::new("hoodie"), VariantId(10001));
        profile.edit_mode = false;

        file.flush(&store).expect("flush");
        let (loaded, outcome) = file.load();

        assert_eq!(outcome, LoadOutcome::Loaded { profiles: 1 });
        assert_eq!(loaded, store);

        let leftovers: Vec<_> = std::fs::read_dir(dir.path()).expect("read dir").collect();
        assert_eq!(leftovers.len(), 1, "only the data file remains");
    }

    #[test]
    fn flush_overwrites_previous_contents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = DataFile::new(dir.path().join("clanskin_data.json"));

        let mut store = ProfileStore::new();
        store.ensure(&GroupId::new("a"));
        file.flush(&store).expect("flush");

        store.remove(&GroupId::new("a"));
        file.flush(&store).expect("flush");

        assert!(file.load_strict().expect("load").is_empty());
    }

    #[test]
    fn concurrent_flushes_all_succeed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = DataFile::new(dir.path().join("clanskin_data.json"));

        let mut store = ProfileStore::new();
        for i in 0..2_000 {
            store
                .ensure(&GroupId::new(format!("G{i}")))
                .set_variant(ItemKind::new("hoodie"), VariantId(i));
        }

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        for _ in 0..25 {
                            file.flush(&store).expect("concurrent flush");
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().expect("flush thread");
            }
        });

        assert_eq!(file.load_strict().expect("load"), store);
        let entries: Vec<_> = std::fs::read_dir(dir.path()).expect("read dir").collect();
        assert_eq!(entries.len(), 1, "no temp files left behind");
    }

    #[test]
    fn flush_into_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = DataFile::new(dir.path().join("nope").join("clanskin_data.json"));

        assert!(matches!(
            file.flush(&ProfileStore::new()),
            Err(ClanSkinError::IoError(_))
        ));
    }
}
