//! # Group Identity Resolver
//!
//! Derives the canonical [`GroupId`] for an actor. First match wins:
//!
//! 1. Clan tag from the injected [`ClanLookup`], if non-empty
//! 2. The actor's native team id
//! 3. The actor's own id (a group of one)
//!
//! Resolution runs fresh on every operation. Affiliation can change between
//! calls, so nothing is cached here.

use crate::{Actor, ActorId, GroupId};

/// External clan-affiliation query.
///
/// Implementations must be `Send + Sync` so an engine can sit behind a lock
/// shared with network handlers.
pub trait ClanLookup: Send + Sync {
    /// Clan tag of the actor, if the actor is in a clan.
    fn clan_of(&self, actor: &ActorId) -> Option<String>;
}

/// Clan lookup used when no clan system is present. Always absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClans;

impl ClanLookup for NoClans {
    fn clan_of(&self, _actor: &ActorId) -> Option<String> {
        None
    }
}

/// Resolve the group an actor belongs to right now.
#[must_use]
pub fn resolve_group_id(actor: &Actor, clans: &dyn ClanLookup) -> GroupId {
    if let Some(tag) = clans.clan_of(&actor.id).filter(|tag| !tag.is_empty()) {
        return GroupId::new(tag);
    }

    if let Some(team) = &actor.team {
        return GroupId::new(team.clone());
    }

    GroupId::from(&actor.id)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    struct FixedClans(BTreeMap<String, String>);

    impl ClanLookup for FixedClans {
        fn clan_of(&self, actor: &ActorId) -> Option<String> {
            self.0.get(actor.as_str()).cloned()
        }
    }

    fn clans(pairs: &[(&str, &str)]) -> FixedClans {
        FixedClans(
            pairs
                .iter()
                .map(|(a, c)| ((*a).to_string(), (*c).to_string()))
                .collect(),
        )
    }

    #[test]
    fn clan_wins_over_team() {
        let actor = Actor::new("p1").in_team("1001");
        let group = resolve_group_id(&actor, &clans(&[("p1", "WOLF")]));
        assert_eq!(group.as_str(), "WOLF");
    }

    #[test]
    fn empty_clan_tag_falls_through() {
        let actor = Actor::new("p1").in_team("1001");
        let group = resolve_group_id(&actor, &clans(&[("p1", "")]));
        assert_eq!(group.as_str(), "1001");
    }

    #[test]
    fn team_used_without_clan() {
        let actor = Actor::new("p1").in_team("1001");
        assert_eq!(resolve_group_id(&actor, &NoClans).as_str(), "1001");
    }

    #[test]
    fn solo_actor_is_own_group() {
        let actor = Actor::new("p1");
        assert_eq!(resolve_group_id(&actor, &NoClans).as_str(), "p1");
    }
}
