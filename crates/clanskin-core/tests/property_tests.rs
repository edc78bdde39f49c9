//! # Property-Based Tests
//!
//! Laws of the profile store, resolver and persistence, checked with proptest.

use clanskin_core::{
    EditState, ExcludedKinds, GroupId, ItemKind, ItemSnapshot, ProfileStore, VariantId,
    capture_from, resolve_variant, state_of, store_from_json, store_from_snapshot, store_to_json,
    store_to_snapshot,
};
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

fn kind_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("hoodie".to_string()),
        Just("pants".to_string()),
        Just("shoes.boots".to_string()),
        Just("hat.beenie".to_string()),
        "[a-z]{1,8}\\.[a-z]{1,8}",
    ]
}

fn worn_item() -> impl Strategy<Value = ItemSnapshot> {
    (kind_name(), any::<bool>(), any::<u64>())
        .prop_map(|(kind, skinnable, variant)| ItemSnapshot::new(kind, skinnable, variant))
}

fn store() -> impl Strategy<Value = ProfileStore> {
    btree_map(
        "[A-Za-z0-9]{1,12}",
        (any::<bool>(), btree_map(kind_name(), any::<u64>(), 0..6)),
        0..8,
    )
    .prop_map(|groups| {
        let mut store = ProfileStore::new();
        for (group, (edit_mode, skins)) in groups {
            let profile = store.ensure(&GroupId::new(group));
            profile.edit_mode = edit_mode;
            for (kind, variant) in skins {
                profile.set_variant(ItemKind::new(kind), VariantId(variant));
            }
        }
        store
    })
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// A group without a profile always gets its input variant back.
    #[test]
    fn resolve_is_identity_without_profile(
        group in "[A-Za-z0-9]{1,12}",
        kind in kind_name(),
        current in any::<u64>()
    ) {
        let store = ProfileStore::new();
        let resolved = resolve_variant(
            &store,
            &GroupId::new(group),
            &ItemKind::new(kind),
            VariantId(current),
        );
        prop_assert_eq!(resolved, VariantId(current));
    }

    /// Capturing the same worn set twice stores the same mapping as once.
    #[test]
    fn capture_is_idempotent(worn in vec(worn_item(), 0..10)) {
        let excluded = ExcludedKinds::default();
        let group = GroupId::new("G1");

        let mut once = ProfileStore::new();
        capture_from(&mut once, &group, &worn, &excluded);

        let mut twice = ProfileStore::new();
        capture_from(&mut twice, &group, &worn, &excluded);
        capture_from(&mut twice, &group, &worn, &excluded);

        prop_assert_eq!(once, twice);
    }

    /// A capture that writes anything leaves the group enforcing.
    #[test]
    fn capture_with_writes_enforces(worn in vec(worn_item(), 1..10)) {
        let excluded = ExcludedKinds::default();
        let group = GroupId::new("G1");
        let mut store = ProfileStore::new();

        let written = capture_from(&mut store, &group, &worn, &excluded);

        if written > 0 {
            prop_assert_eq!(state_of(&store, &group), EditState::Enforcing);
        } else {
            prop_assert!(store.get(&group).is_none());
        }
    }

    /// Freshly ensured profiles are capturing and empty.
    #[test]
    fn ensure_creates_capturing_empty(group in "[A-Za-z0-9]{1,12}") {
        let mut store = ProfileStore::new();
        let profile = store.ensure(&GroupId::new(group.clone()));
        prop_assert!(profile.edit_mode);
        prop_assert!(profile.variants.is_empty());
        prop_assert_eq!(state_of(&store, &GroupId::new(group)), EditState::Capturing);
    }

    /// flush (JSON) followed by load reproduces an equal store.
    #[test]
    fn json_roundtrip(store in store()) {
        let bytes = store_to_json(&store).expect("encode");
        let restored = store_from_json(&bytes).expect("decode");
        prop_assert_eq!(restored, store);
    }

    /// Snapshot export followed by import reproduces an equal store.
    #[test]
    fn snapshot_roundtrip(store in store()) {
        let bytes = store_to_snapshot(&store).expect("encode");
        let restored = store_from_snapshot(&bytes).expect("decode");
        prop_assert_eq!(restored, store);
    }
}
