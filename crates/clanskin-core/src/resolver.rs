//! # Variant Resolver
//!
//! Decides which visual variant applies to an item for a group, and records
//! worn variants into a group's profile.
//!
//! Resolution is pass-through: when a group has no stored variant for a kind,
//! the item's current variant is returned unchanged. The resolver never
//! invents a variant id.

use crate::mode;
use crate::primitives::DEFAULT_EXCLUDED_ITEMS;
use crate::{GroupId, ItemKind, ItemSnapshot, ProfileStore, VariantId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// EXCLUSIONS
// =============================================================================

/// Item kinds the operator excluded from capture and enforcement.
///
/// Matching is exact on the kind string; no prefixes or patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExcludedKinds(BTreeSet<ItemKind>);

impl ExcludedKinds {
    /// An empty exclusion set.
    #[must_use]
    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    /// Build from item kind strings.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(ItemKind::new).collect())
    }

    /// Check if a kind is excluded.
    #[must_use]
    pub fn contains(&self, kind: &ItemKind) -> bool {
        self.0.contains(kind)
    }

    /// Number of excluded kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ExcludedKinds {
    fn default() -> Self {
        Self::from_names(DEFAULT_EXCLUDED_ITEMS.iter().copied())
    }
}

// =============================================================================
// RESOLUTION
// =============================================================================

/// True iff the item's kind supports skinning and is not excluded.
#[must_use]
pub fn is_skinnable(item: &ItemSnapshot, excluded: &ExcludedKinds) -> bool {
    item.skinnable_kind && !excluded.contains(&item.kind)
}

/// Stored variant for `kind` in the group's profile, else `current`.
#[must_use]
pub fn resolve_variant(
    store: &ProfileStore,
    group: &GroupId,
    kind: &ItemKind,
    current: VariantId,
) -> VariantId {
    store
        .get(group)
        .and_then(|profile| profile.variant_for(kind))
        .unwrap_or(current)
}

/// Record the variants of every skinnable worn item into the group's profile.
///
/// Returns the number of items written. Writing at least one item moves the
/// group to `Enforcing`; writing none leaves the store untouched (no profile is
/// created for it).
pub fn capture_from(
    store: &mut ProfileStore,
    group: &GroupId,
    worn: &[ItemSnapshot],
    excluded: &ExcludedKinds,
) -> usize {
    let mut written = 0;
    for item in worn.iter().filter(|item| is_skinnable(item, excluded)) {
        store.ensure(group).set_variant(item.kind.clone(), item.variant);
        written += 1;
    }
    mode::commit_capture(store, group, written);
    written
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{EditState, state_of};

    #[test]
    fn excluded_kind_is_not_skinnable() {
        let excluded = ExcludedKinds::default();
        let beanie = ItemSnapshot::new("hat.beenie", true, 3);
        let hoodie = ItemSnapshot::new("hoodie", true, 3);

        assert!(!is_skinnable(&beanie, &excluded));
        assert!(is_skinnable(&hoodie, &excluded));
    }

    #[test]
    fn unskinnable_kind_is_not_skinnable() {
        let item = ItemSnapshot::new("rock", false, 0);
        assert!(!is_skinnable(&item, &ExcludedKinds::none()));
    }

    #[test]
    fn exclusion_is_exact_match() {
        let excluded = ExcludedKinds::from_names(["hat"]);
        let item = ItemSnapshot::new("hat.beenie", true, 0);
        assert!(is_skinnable(&item, &excluded));
    }

    #[test]
    fn resolve_passes_through_without_profile() {
        let store = ProfileStore::new();
        let kind = ItemKind::new("hoodie");
        assert_eq!(
            resolve_variant(&store, &GroupId::new("G1"), &kind, VariantId(12)),
            VariantId(12)
        );
    }

    #[test]
    fn resolve_passes_through_unknown_kind() {
        let mut store = ProfileStore::new();
        let group = GroupId::new("G1");
        store
            .ensure(&group)
            .set_variant(ItemKind::new("pants"), VariantId(7));

        let kind = ItemKind::new("hoodie");
        assert_eq!(resolve_variant(&store, &group, &kind, VariantId(1)), VariantId(1));
    }

    #[test]
    fn resolve_returns_stored_variant() {
        let mut store = ProfileStore::new();
        let group = GroupId::new("G1");
        store
            .ensure(&group)
            .set_variant(ItemKind::new("hoodie"), VariantId(7));

        let kind = ItemKind::new("hoodie");
        assert_eq!(resolve_variant(&store, &group, &kind, VariantId(0)), VariantId(7));
    }

    #[test]
    fn capture_skips_excluded_and_counts_written() {
        let mut store = ProfileStore::new();
        let group = GroupId::new("G1");
        let worn = vec![
            ItemSnapshot::new("hoodie", true, 11),
            ItemSnapshot::new("hat.beenie", true, 12),
            ItemSnapshot::new("burlap.gloves", false, 0),
        ];

        let written = capture_from(&mut store, &group, &worn, &ExcludedKinds::default());

        assert_eq!(written, 1);
        let profile = store.get(&group).expect("profile");
        assert_eq!(profile.variants.len(), 1);
        assert_eq!(state_of(&store, &group), EditState::Enforcing);
    }

    #[test]
    fn capture_of_nothing_creates_nothing() {
        let mut store = ProfileStore::new();
        let group = GroupId::new("G1");
        let worn = vec![ItemSnapshot::new("hat.beenie", true, 12)];

        let written = capture_from(&mut store, &group, &worn, &ExcludedKinds::default());

        assert_eq!(written, 0);
        assert!(store.is_empty());
    }
}
