//! # Equip Interceptor
//!
//! Runs whenever an actor attempts to wear or hold an item.
//!
//! [`decide`] is pure: it looks at the item and the group's profile and
//! returns an [`EquipAction`]. The caller applies it with
//! [`EquipAction::apply`], which is the only mutation the interception makes.
//! Reading a missing profile resolves to `Keep`; the interceptor never creates
//! a profile.

use crate::mode::EditState;
use crate::resolver::{ExcludedKinds, is_skinnable};
use crate::{ItemSnapshot, Profile, VariantId};
use serde::{Deserialize, Serialize};

/// What to do with an item that is being equipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "variant", rename_all = "snake_case")]
pub enum EquipAction {
    /// Defer to the host's default behavior.
    Keep,
    /// Replace the item's variant before the equip completes.
    Overwrite(VariantId),
}

impl EquipAction {
    /// Apply the action to an item.
    pub fn apply(self, item: &mut ItemSnapshot) {
        if let Self::Overwrite(variant) = self {
            item.variant = variant;
        }
    }

    /// Check if the action mutates the item.
    #[must_use]
    pub fn is_overwrite(self) -> bool {
        matches!(self, Self::Overwrite(_))
    }
}

/// Decide what happens to `item` for a group whose profile is `profile`.
///
/// 1. Unskinnable or excluded kinds are left alone.
/// 2. A capturing group (including one with no profile) is left alone, so
///    an actor editing their look is never re-skinned behind their back.
/// 3. An enforcing group gets its stored variant for the kind, if one exists.
#[must_use]
pub fn decide(
    item: &ItemSnapshot,
    profile: Option<&Profile>,
    excluded: &ExcludedKinds,
) -> EquipAction {
    if !is_skinnable(item, excluded) {
        return EquipAction::Keep;
    }

    let Some(profile) = profile else {
        return EquipAction::Keep;
    };

    if EditState::of_profile(Some(profile)).is_capturing() {
        return EquipAction::Keep;
    }

    match profile.variant_for(&item.kind) {
        Some(stored) => EquipAction::Overwrite(stored),
        None => EquipAction::Keep,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemKind;

    fn enforcing_profile(kind: &str, variant: u64) -> Profile {
        let mut profile = Profile::new();
        profile.set_variant(ItemKind::new(kind), VariantId(variant));
        profile.edit_mode = false;
        profile
    }

    #[test]
    fn no_profile_keeps() {
        let item = ItemSnapshot::new("hoodie", true, 0);
        assert_eq!(decide(&item, None, &ExcludedKinds::none()), EquipAction::Keep);
    }

    #[test]
    fn capturing_profile_keeps() {
        let mut profile = enforcing_profile("hoodie", 77);
        profile.edit_mode = true;
        let item = ItemSnapshot::new("hoodie", true, 5);

        assert_eq!(
            decide(&item, Some(&profile), &ExcludedKinds::none()),
            EquipAction::Keep
        );
    }

    #[test]
    fn enforcing_profile_overwrites() {
        let profile = enforcing_profile("hoodie", 77);
        let mut item = ItemSnapshot::new("hoodie", true, 0);

        let action = decide(&item, Some(&profile), &ExcludedKinds::none());
        assert_eq!(action, EquipAction::Overwrite(VariantId(77)));

        action.apply(&mut item);
        assert_eq!(item.variant, VariantId(77));
    }

    #[test]
    fn enforcing_profile_without_kind_keeps() {
        let profile = enforcing_profile("pants", 77);
        let item = ItemSnapshot::new("hoodie", true, 3);

        assert_eq!(
            decide(&item, Some(&profile), &ExcludedKinds::none()),
            EquipAction::Keep
        );
    }

    #[test]
    fn excluded_kind_keeps_even_when_stored() {
        let profile = enforcing_profile("hat.beenie", 77);
        let item = ItemSnapshot::new("hat.beenie", true, 3);

        assert_eq!(
            decide(&item, Some(&profile), &ExcludedKinds::default()),
            EquipAction::Keep
        );
    }

    #[test]
    fn keep_does_not_touch_item() {
        let mut item = ItemSnapshot::new("hoodie", true, 3);
        EquipAction::Keep.apply(&mut item);
        assert_eq!(item.variant, VariantId(3));
        assert!(!EquipAction::Keep.is_overwrite());
    }
}
