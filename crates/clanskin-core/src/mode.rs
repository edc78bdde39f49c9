//! # Edit-Mode State Machine
//!
//! Per-group two-state toggle:
//!
//! | From | Event | To |
//! |------|-------|----|
//! | any | explicit "enter edit" | `Capturing` |
//! | `Capturing` | capture writing >= 1 variant | `Enforcing` |
//! | any | capture writing 0 variants | unchanged |
//!
//! A group without a profile is `Capturing`. There are no automatic
//! transitions; every change is user-driven.

use crate::{GroupId, Profile, ProfileStore};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a group's worn items are being recorded or forced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditState {
    /// Equipping never overwrites variants; the group is authoring a look.
    Capturing,
    /// Equipping a skinnable item applies the stored variant for its kind.
    Enforcing,
}

impl EditState {
    /// State of an optional profile. No profile means `Capturing`.
    #[must_use]
    pub fn of_profile(profile: Option<&Profile>) -> Self {
        match profile {
            Some(p) if !p.edit_mode => Self::Enforcing,
            _ => Self::Capturing,
        }
    }

    /// Check if this is the `Capturing` state.
    #[must_use]
    pub fn is_capturing(self) -> bool {
        matches!(self, Self::Capturing)
    }

    /// Get the state name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Capturing => "capturing",
            Self::Enforcing => "enforcing",
        }
    }
}

impl fmt::Display for EditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current state of a group. Read-only; never creates a profile.
#[must_use]
pub fn state_of(store: &ProfileStore, group: &GroupId) -> EditState {
    EditState::of_profile(store.get(group))
}

/// Explicit "enter edit" action.
///
/// Idempotent. Creates the profile lazily and leaves stored variants alone.
pub fn enter_edit(store: &mut ProfileStore, group: &GroupId) -> EditState {
    store.ensure(group).edit_mode = true;
    EditState::Capturing
}

/// Apply the outcome of a capture that wrote `written` variants.
///
/// Only a capture that wrote something moves the group to `Enforcing`.
pub(crate) fn commit_capture(store: &mut ProfileStore, group: &GroupId, written: usize) -> EditState {
    if written == 0 {
        return state_of(store, group);
    }
    store.ensure(group).edit_mode = false;
    EditState::Enforcing
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ItemKind, VariantId};

    #[test]
    fn absent_profile_is_capturing() {
        let store = ProfileStore::new();
        assert_eq!(state_of(&store, &GroupId::new("G1")), EditState::Capturing);
        assert!(store.is_empty());
    }

    #[test]
    fn enter_edit_is_idempotent_and_keeps_variants() {
        let mut store = ProfileStore::new();
        let group = GroupId::new("G1");
        {
            let profile = store.ensure(&group);
            profile.edit_mode = false;
            profile.set_variant(ItemKind::new("hoodie"), VariantId(9));
        }

        enter_edit(&mut store, &group);
        enter_edit(&mut store, &group);

        assert_eq!(state_of(&store, &group), EditState::Capturing);
        let profile = store.get(&group).expect("profile");
        assert_eq!(profile.variant_for(&ItemKind::new("hoodie")), Some(VariantId(9)));
    }

    #[test]
    fn commit_with_nothing_written_keeps_state() {
        let mut store = ProfileStore::new();
        let group = GroupId::new("G1");

        assert_eq!(commit_capture(&mut store, &group, 0), EditState::Capturing);
        assert!(!store.contains(&group));
    }

    #[test]
    fn commit_with_writes_enforces() {
        let mut store = ProfileStore::new();
        let group = GroupId::new("G1");
        enter_edit(&mut store, &group);

        assert_eq!(commit_capture(&mut store, &group, 2), EditState::Enforcing);
        assert_eq!(state_of(&store, &group), EditState::Enforcing);
    }
}
