//! # Configuration
//!
//! TOML configuration for the binary.
//!
//! ```toml
//! data_file = "clanskin_data.json"
//! excluded_items = ["hat.beenie"]
//! autosave_secs = 300
//!
//! [permissions]
//! grant_all = false
//! granted = ["76561198000000001"]
//!
//! [messages]
//! Saved = "Outfit stored"
//! ```
//!
//! Every field has a default. A missing file means defaults; an unreadable or
//! malformed file means defaults plus a warning. Nothing here is fatal.

use crate::host::PermissionTable;
use clanskin_core::{ClanSkinError, ExcludedKinds, primitives::DEFAULT_EXCLUDED_ITEMS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default data file name.
pub const DEFAULT_DATA_FILE: &str = "clanskin_data.json";

/// Default config file name.
pub const DEFAULT_CONFIG_FILE: &str = "clanskin.toml";

// =============================================================================
// CONFIG
// =============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClanSkinConfig {
    /// Where the profile store is kept.
    pub data_file: PathBuf,
    /// Item kinds never skinned nor captured.
    pub excluded_items: Vec<String>,
    /// Flush interval for the server; 0 disables autosave.
    pub autosave_secs: u64,
    /// Who may run `edit` and `save`.
    pub permissions: PermissionSettings,
    /// Overrides for the reply text catalog, by message key.
    pub messages: BTreeMap<String, String>,
}

impl Default for ClanSkinConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            excluded_items: DEFAULT_EXCLUDED_ITEMS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            autosave_secs: 0,
            permissions: PermissionSettings::default(),
            messages: BTreeMap::new(),
        }
    }
}

/// Permission grants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionSettings {
    /// Grant `clanskin.save` to everyone.
    pub grant_all: bool,
    /// Actor ids granted `clanskin.save`.
    pub granted: Vec<String>,
}

impl ClanSkinConfig {
    /// Parse configuration text.
    pub fn parse(text: &str) -> Result<Self, ClanSkinError> {
        toml::from_str(text).map_err(|e| {
            ClanSkinError::DeserializationError(format!("Failed to parse config: {}", e))
        })
    }

    /// Load configuration from `path`, substituting defaults on any failure.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Config unreadable, using defaults");
                return Self::default();
            }
        };

        match Self::parse(&text) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Configuration loaded");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Config malformed, using defaults");
                Self::default()
            }
        }
    }

    /// The configured exclusion set.
    #[must_use]
    pub fn excluded(&self) -> ExcludedKinds {
        ExcludedKinds::from_names(&self.excluded_items)
    }

    /// The configured permission grants.
    #[must_use]
    pub fn permission_table(&self) -> PermissionTable {
        if self.permissions.grant_all {
            PermissionTable::grant_all()
        } else {
            PermissionTable::granting(&self.permissions.granted)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clanskin_core::{ActorId, ItemKind, PermissionCheck, primitives::PERMISSION_SAVE};

    #[test]
    fn empty_text_is_defaults() {
        let config = ClanSkinConfig::parse("").expect("parse");
        assert_eq!(config, ClanSkinConfig::default());
        assert!(config.excluded().contains(&ItemKind::new("hat.beenie")));
    }

    #[test]
    fn parses_all_sections() {
        let text = r#"
data_file = "skins.json"
excluded_items = ["mask.bandana", "hat.cap"]
autosave_secs = 60

[permissions]
granted = ["42"]

[messages]
Saved = "stored"
"#;
        let config = ClanSkinConfig::parse(text).expect("parse");

        assert_eq!(config.data_file, PathBuf::from("skins.json"));
        assert_eq!(config.autosave_secs, 60);
        assert_eq!(config.excluded().len(), 2);
        assert!(!config.excluded().contains(&ItemKind::new("hat.beenie")));
        assert_eq!(config.messages.get("Saved").map(String::as_str), Some("stored"));

        let table = config.permission_table();
        assert!(table.has_permission(&ActorId::new("42"), PERMISSION_SAVE));
        assert!(!table.has_permission(&ActorId::new("43"), PERMISSION_SAVE));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("clanskin.toml");
        std::fs::write(&path, "data_file = [unterminated").expect("write");

        assert!(ClanSkinConfig::parse("data_file = [").is_err());
        assert_eq!(ClanSkinConfig::load(&path), ClanSkinConfig::default());
    }

    #[test]
    fn missing_file_is_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = ClanSkinConfig::load(&dir.path().join("absent.toml"));
        assert_eq!(config, ClanSkinConfig::default());
    }
}
