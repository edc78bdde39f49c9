//! # Profile Store
//!
//! The durable map of `GroupId -> Profile`.
//!
//! A group appears in the store iff a capture or an explicit edit-mode toggle
//! happened for it. Absence means "no profile yet": the group is treated as
//! capturing and nothing is enforced.
//!
//! The store is whole-object: it is loaded once (see
//! [`DataFile`](crate::storage::DataFile)), mutated in memory, and flushed on an
//! external "persist now" signal.

use crate::types::null_as_empty;
use crate::{ClanSkinError, GroupId, Profile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The full persisted state.
///
/// Serializes as `{"Teams": {"<groupId>": {"EditMode": .., "Skins": {..}}}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStore {
    #[serde(rename = "Teams", default, deserialize_with = "null_as_empty")]
    teams: BTreeMap<GroupId, Profile>,
}

impl ProfileStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the profile for a group. Never creates.
    #[must_use]
    pub fn get(&self, group: &GroupId) -> Option<&Profile> {
        self.teams.get(group)
    }

    /// Get the profile for a group, creating a default (capturing, empty) one
    /// if it does not exist yet.
    ///
    /// Check-then-insert is a single `entry` call; callers sharing the store
    /// across threads must still hold one lock around it.
    pub fn ensure(&mut self, group: &GroupId) -> &mut Profile {
        self.teams.entry(group.clone()).or_default()
    }

    /// Remove a group's profile.
    ///
    /// Returns `true` if a profile was removed, `false` if there was none.
    pub fn remove(&mut self, group: &GroupId) -> bool {
        self.teams.remove(group).is_some()
    }

    /// Check if a group has a profile.
    #[must_use]
    pub fn contains(&self, group: &GroupId) -> bool {
        self.teams.contains_key(group)
    }

    /// Number of profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Check if the store holds no profiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Iterate profiles in group-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupId, &Profile)> {
        self.teams.iter()
    }

    /// Check every group id and item kind against the input limits.
    ///
    /// Stores built through the engine always pass; this is for stores read
    /// from outside, such as an imported snapshot.
    pub fn validate(&self) -> Result<(), ClanSkinError> {
        for (group, profile) in &self.teams {
            group.validate()?;
            for kind in profile.variants.keys() {
                kind.validate()?;
            }
        }
        Ok(())
    }
}

impl FromIterator<(GroupId, Profile)> for ProfileStore {
    fn from_iter<I: IntoIterator<Item = (GroupId, Profile)>>(iter: I) -> Self {
        Self {
            teams: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
