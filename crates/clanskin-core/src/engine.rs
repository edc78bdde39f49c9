//! # Skin Engine
//!
//! The explicitly owned instance the host's hooks talk to.
//!
//! A `SkinEngine` combines:
//! - the [`ProfileStore`] (loaded at startup, flushed on demand)
//! - the configured [`ExcludedKinds`]
//! - an injected [`ClanLookup`] and [`PermissionCheck`]
//!
//! Every operation resolves the actor's group afresh. All operations are
//! synchronous in-memory map work; callers that share an engine across threads
//! wrap it in a single lock.

use crate::command::{Command, CommandReply, DenyAll, PermissionCheck};
use crate::identity::{ClanLookup, NoClans, resolve_group_id};
use crate::interceptor::{EquipAction, decide};
use crate::mode;
use crate::primitives::PERMISSION_SAVE;
use crate::resolver::{ExcludedKinds, capture_from, is_skinnable};
use crate::{Actor, GroupId, ItemSnapshot, ProfileStore};

/// Group profile engine with its collaborators.
pub struct SkinEngine {
    store: ProfileStore,
    excluded: ExcludedKinds,
    clans: Box<dyn ClanLookup>,
    permissions: Box<dyn PermissionCheck>,
}

impl std::fmt::Debug for SkinEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkinEngine")
            .field("store", &self.store)
            .field("excluded", &self.excluded)
            .finish_non_exhaustive()
    }
}

impl Default for SkinEngine {
    fn default() -> Self {
        Self::new(ProfileStore::new(), ExcludedKinds::default())
    }
}

impl SkinEngine {
    /// Create an engine with no clan system and no permissions granted.
    #[must_use]
    pub fn new(store: ProfileStore, excluded: ExcludedKinds) -> Self {
        Self {
            store,
            excluded,
            clans: Box::new(NoClans),
            permissions: Box::new(DenyAll),
        }
    }

    /// Use the given clan lookup.
    #[must_use]
    pub fn with_clans(mut self, clans: impl ClanLookup + 'static) -> Self {
        self.clans = Box::new(clans);
        self
    }

    /// Use the given permission check.
    #[must_use]
    pub fn with_permissions(mut self, permissions: impl PermissionCheck + 'static) -> Self {
        self.permissions = Box::new(permissions);
        self
    }

    /// Get a reference to the store.
    #[must_use]
    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Get the configured exclusions.
    #[must_use]
    pub fn excluded(&self) -> &ExcludedKinds {
        &self.excluded
    }

    /// The group `actor` belongs to right now.
    #[must_use]
    pub fn group_of(&self, actor: &Actor) -> GroupId {
        resolve_group_id(actor, self.clans.as_ref())
    }

    // =========================================================================
    // HOOKS
    // =========================================================================

    /// Equip attempt: decide and apply the variant for `item`.
    ///
    /// Group resolution is skipped for items that can never be touched.
    pub fn on_equip(&self, actor: &Actor, item: &mut ItemSnapshot) -> EquipAction {
        if !is_skinnable(item, &self.excluded) {
            return EquipAction::Keep;
        }
        let group = self.group_of(actor);
        let action = decide(item, self.store.get(&group), &self.excluded);
        action.apply(item);
        action
    }

    /// Group destroyed (clan disbanded, team disbanded).
    ///
    /// Returns `true` if a profile was removed.
    pub fn on_group_destroyed(&mut self, group: &GroupId) -> bool {
        self.store.remove(group)
    }

    // =========================================================================
    // COMMANDS
    // =========================================================================

    /// Run a `/clanskin` invocation.
    ///
    /// The permission check comes first, so a denied actor gets `NoPermission`
    /// even for `help`.
    pub fn run_command<S: AsRef<str>>(&mut self, actor: &Actor, args: &[S]) -> CommandReply {
        if !self.permitted(actor) {
            return CommandReply::NoPermission;
        }
        match Command::parse(args) {
            Command::Edit => self.enter_edit_unchecked(actor),
            Command::Save => self.save_outfit_unchecked(actor),
            Command::Help => CommandReply::Help,
        }
    }

    /// Enter edit mode for the actor's group.
    pub fn enter_edit(&mut self, actor: &Actor) -> CommandReply {
        if !self.permitted(actor) {
            return CommandReply::NoPermission;
        }
        self.enter_edit_unchecked(actor)
    }

    /// Save the actor's worn outfit to the actor's group.
    pub fn save_outfit(&mut self, actor: &Actor) -> CommandReply {
        if !self.permitted(actor) {
            return CommandReply::NoPermission;
        }
        self.save_outfit_unchecked(actor)
    }

    fn permitted(&self, actor: &Actor) -> bool {
        self.permissions.has_permission(&actor.id, PERMISSION_SAVE)
    }

    fn enter_edit_unchecked(&mut self, actor: &Actor) -> CommandReply {
        let group = self.group_of(actor);
        mode::enter_edit(&mut self.store, &group);
        CommandReply::EditModeEntered
    }

    fn save_outfit_unchecked(&mut self, actor: &Actor) -> CommandReply {
        let group = self.group_of(actor);
        if !mode::state_of(&self.store, &group).is_capturing() {
            return CommandReply::NotInEditMode;
        }
        match capture_from(&mut self.store, &group, &actor.worn, &self.excluded) {
            0 => CommandReply::NothingToSave,
            items => CommandReply::Saved { items },
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
