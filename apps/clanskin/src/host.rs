//! # Host Collaborators
//!
//! The engine's injected [`ClanLookup`] and [`PermissionCheck`], as seen from
//! outside the game process.
//!
//! The clans plugin lives in the host, so the bridge keeps a mirror of clan
//! membership that the host updates through `POST /clans/membership`.
//! Permissions come from the configuration file.

use clanskin_core::{ActorId, ClanLookup, PermissionCheck, primitives::PERMISSION_SAVE};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

// =============================================================================
// CLAN ROSTER
// =============================================================================

/// Shared mirror of clan membership.
///
/// Cloning yields another handle onto the same roster, so the engine and the
/// HTTP handlers observe the same memberships.
#[derive(Debug, Clone, Default)]
pub struct ClanRoster {
    members: Arc<RwLock<HashMap<ActorId, String>>>,
}

impl ClanRoster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `actor` is now in `clan`. Returns the previous clan.
    pub fn join(&self, actor: ActorId, clan: impl Into<String>) -> Option<String> {
        let mut members = self.members.write().unwrap_or_else(|e| e.into_inner());
        members.insert(actor, clan.into())
    }

    /// Record that `actor` left its clan. Returns the clan it left.
    pub fn leave(&self, actor: &ActorId) -> Option<String> {
        let mut members = self.members.write().unwrap_or_else(|e| e.into_inner());
        members.remove(actor)
    }

    /// Drop every membership of `clan`. Returns how many actors were removed.
    pub fn disband(&self, clan: &str) -> usize {
        let mut members = self.members.write().unwrap_or_else(|e| e.into_inner());
        let before = members.len();
        members.retain(|_, tag| tag != clan);
        before - members.len()
    }

    /// Number of actors currently in a clan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.read().map(|m| m.len()).unwrap_or_default()
    }

    /// Check if nobody is in a clan.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ClanLookup for ClanRoster {
    fn clan_of(&self, actor: &ActorId) -> Option<String> {
        self.members.read().ok()?.get(actor).cloned()
    }
}

// =============================================================================
// PERMISSION TABLE
// =============================================================================

/// Static grants of `clanskin.save`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionTable {
    grant_all: bool,
    granted: BTreeSet<ActorId>,
}

impl PermissionTable {
    /// Everyone holds the permission.
    #[must_use]
    pub fn grant_all() -> Self {
        Self {
            grant_all: true,
            granted: BTreeSet::new(),
        }
    }

    /// Only the listed actors hold the permission.
    pub fn granting<I, S>(actors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            grant_all: false,
            granted: actors.into_iter().map(ActorId::new).collect(),
        }
    }
}

impl PermissionCheck for PermissionTable {
    fn has_permission(&self, actor: &ActorId, permission: &str) -> bool {
        permission == PERMISSION_SAVE && (self.grant_all || self.granted.contains(actor))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_handles_share_state() {
        let roster = ClanRoster::new();
        let engine_side = roster.clone();

        assert_eq!(roster.join(ActorId::new("1"), "WOLF"), None);
        assert_eq!(engine_side.clan_of(&ActorId::new("1")).as_deref(), Some("WOLF"));

        assert_eq!(roster.join(ActorId::new("1"), "BEAR").as_deref(), Some("WOLF"));
        assert_eq!(roster.leave(&ActorId::new("1")).as_deref(), Some("BEAR"));
        assert_eq!(engine_side.clan_of(&ActorId::new("1")), None);
    }

    #[test]
    fn disband_removes_only_that_clan() {
        let roster = ClanRoster::new();
        roster.join(ActorId::new("1"), "WOLF");
        roster.join(ActorId::new("2"), "WOLF");
        roster.join(ActorId::new("3"), "BEAR");

        assert_eq!(roster.disband("WOLF"), 2);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.clan_of(&ActorId::new("3")).as_deref(), Some("BEAR"));
    }

    #[test]
    fn permission_table_grants() {
        let table = PermissionTable::granting(["7"]);
        assert!(table.has_permission(&ActorId::new("7"), PERMISSION_SAVE));
        assert!(!table.has_permission(&ActorId::new("8"), PERMISSION_SAVE));
        assert!(!table.has_permission(&ActorId::new("7"), "other.permission"));

        assert!(PermissionTable::grant_all().has_permission(&ActorId::new("8"), PERMISSION_SAVE));
        assert!(!PermissionTable::default().has_permission(&ActorId::new("7"), PERMISSION_SAVE));
    }
}
