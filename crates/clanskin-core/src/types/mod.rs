//! # Core Type Definitions
//!
//! This module contains the core types shared by every clanskin component:
//! - Identifiers (`GroupId`, `ActorId`, `ItemKind`, `VariantId`)
//! - The per-group `Profile`
//! - Host-provided views (`ItemSnapshot`, `Actor`)
//! - Error types (`ClanSkinError`)
//!
//! ## Determinism Guarantees
//!
//! Identifier types implement `Ord` so profiles and their variant mappings can
//! live in `BTreeMap`s and serialize in a stable order.

use crate::primitives::{MAX_GROUP_ID_LENGTH, MAX_ITEM_KIND_LENGTH, MAX_WORN_ITEMS};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Canonical key of a group: a clan tag, a native team id, or an actor id.
///
/// Actor identifiers and group identifiers share the same key space, so an
/// ungrouped actor is a group of one keyed by its own id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub String);

impl GroupId {
    /// Create a new group id.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the group id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&ActorId> for GroupId {
    fn from(actor: &ActorId) -> Self {
        Self(actor.0.clone())
    }
}

/// Unique identifier of an actor (player) in the host.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub String);

impl ActorId {
    /// Create a new actor id.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the actor id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Functional kind of an item (its shortname, e.g. `"hoodie"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKind(pub String);

impl ItemKind {
    /// Create a new item kind.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the item kind as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Numeric identifier selecting an item's visual appearance.
/// `VariantId(0)` is the host's stock look.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct VariantId(pub u64);

impl VariantId {
    /// Create a new variant id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw variant value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

// =============================================================================
// PROFILE
// =============================================================================

/// The persisted edit-mode flag and variant mapping for one group.
///
/// Field names follow the data file layout (`EditMode`, `Skins`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// `true` while the group is capturing; enforcement is off.
    #[serde(rename = "EditMode", default = "default_edit_mode")]
    pub edit_mode: bool,
    /// Item kind -> variant assignments.
    #[serde(rename = "Skins", default, deserialize_with = "null_as_empty")]
    pub variants: BTreeMap<ItemKind, VariantId>,
}

fn default_edit_mode() -> bool {
    true
}

/// A `null` map member loads as an empty map.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for Profile {
    /// A new profile has nothing saved, so it starts out capturing.
    fn default() -> Self {
        Self {
            edit_mode: true,
            variants: BTreeMap::new(),
        }
    }
}

impl Profile {
    /// Create a new capturing profile with no variants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored variant for an item kind, if any.
    #[must_use]
    pub fn variant_for(&self, kind: &ItemKind) -> Option<VariantId> {
        self.variants.get(kind).copied()
    }

    /// Insert or replace the variant for an item kind.
    pub fn set_variant(&mut self, kind: ItemKind, variant: VariantId) {
        self.variants.insert(kind, variant);
    }
}

// =============================================================================
// HOST VIEWS
// =============================================================================

/// Read-only view of one item as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    /// The item's shortname.
    pub kind: ItemKind,
    /// Whether the item's kind supports variant skinning at all.
    pub skinnable_kind: bool,
    /// The currently assigned variant.
    pub variant: VariantId,
}

impl ItemSnapshot {
    /// Create a new item snapshot.
    #[must_use]
    pub fn new(kind: impl Into<String>, skinnable_kind: bool, variant: u64) -> Self {
        Self {
            kind: ItemKind::new(kind),
            skinnable_kind,
            variant: VariantId(variant),
        }
    }
}

/// Everything the host knows about an actor at the moment of a hook call.
///
/// Clan affiliation is deliberately absent: it comes from a separate
/// [`ClanLookup`](crate::identity::ClanLookup) queried on every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The actor's unique identifier.
    pub id: ActorId,
    /// Native team the actor currently belongs to, if any.
    #[serde(default)]
    pub team: Option<String>,
    /// Items currently worn.
    #[serde(default)]
    pub worn: Vec<ItemSnapshot>,
}

impl Actor {
    /// Create an ungrouped actor wearing nothing.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: ActorId::new(id),
            team: None,
            worn: Vec::new(),
        }
    }

    /// Set the actor's native team.
    #[must_use]
    pub fn in_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// Set the actor's worn items.
    #[must_use]
    pub fn wearing(mut self, worn: Vec<ItemSnapshot>) -> Self {
        self.worn = worn;
        self
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in clanskin.
///
/// - No silent failures
/// - Use `Result<T, ClanSkinError>` for fallible operations
/// - The CORE should never panic; all errors must be recoverable
#[derive(Debug, Error)]
pub enum ClanSkinError {
    /// A group or actor identifier is empty or too long.
    #[error("Invalid group id: {0}")]
    InvalidGroupId(String),

    /// An item kind is empty or too long.
    #[error("Invalid item kind: {0}")]
    InvalidItemKind(String),

    /// More worn items than a single capture accepts.
    #[error("Too many worn items: {count} exceeds maximum {max}")]
    TooManyWornItems { count: usize, max: usize },

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// VALIDATION
// =============================================================================

fn validate_id(value: &str) -> Result<(), ClanSkinError> {
    if value.is_empty() {
        return Err(ClanSkinError::InvalidGroupId("empty identifier".to_string()));
    }
    if value.len() > MAX_GROUP_ID_LENGTH {
        return Err(ClanSkinError::InvalidGroupId(format!(
            "identifier length {} exceeds maximum {} bytes",
            value.len(),
            MAX_GROUP_ID_LENGTH
        )));
    }
    Ok(())
}

impl GroupId {
    /// Check that the id is non-empty and within `MAX_GROUP_ID_LENGTH`.
    pub fn validate(&self) -> Result<(), ClanSkinError> {
        validate_id(&self.0)
    }
}

impl ActorId {
    /// Check that the id is non-empty and within `MAX_GROUP_ID_LENGTH`.
    pub fn validate(&self) -> Result<(), ClanSkinError> {
        validate_id(&self.0)
    }
}

impl ItemKind {
    /// Check that the kind is non-empty and within `MAX_ITEM_KIND_LENGTH`.
    pub fn validate(&self) -> Result<(), ClanSkinError> {
        if self.0.is_empty() {
            return Err(ClanSkinError::InvalidItemKind("empty item kind".to_string()));
        }
        if self.0.len() > MAX_ITEM_KIND_LENGTH {
            return Err(ClanSkinError::InvalidItemKind(format!(
                "item kind length {} exceeds maximum {} bytes",
                self.0.len(),
                MAX_ITEM_KIND_LENGTH
            )));
        }
        Ok(())
    }
}

impl Actor {
    /// Validate the actor id, team id and every worn item.
    pub fn validate(&self) -> Result<(), ClanSkinError> {
        self.id.validate()?;
        if let Some(team) = &self.team {
            validate_id(team)?;
        }
        if self.worn.len() > MAX_WORN_ITEMS {
            return Err(ClanSkinError::TooManyWornItems {
                count: self.worn.len(),
                max: MAX_WORN_ITEMS,
            });
        }
        for item in &self.worn {
            item.kind.validate()?;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_group_id_rejected() {
        assert!(matches!(
            GroupId::new("").validate(),
            Err(ClanSkinError::InvalidGroupId(_))
        ));
    }

    #[test]
    fn oversized_item_kind_rejected() {
        let kind = ItemKind::new("x".repeat(MAX_ITEM_KIND_LENGTH + 1));
        assert!(matches!(kind.validate(), Err(ClanSkinError::InvalidItemKind(_))));
    }

    #[test]
    fn actor_with_empty_team_rejected() {
        let actor = Actor::new("1").in_team("");
        assert!(actor.validate().is_err());
    }

    #[test]
    fn too_many_worn_items_rejected() {
        let worn = vec![ItemSnapshot::new("hoodie", true, 1); MAX_WORN_ITEMS + 1];
        let actor = Actor::new("1").wearing(worn);
        assert!(matches!(
            actor.validate(),
            Err(ClanSkinError::TooManyWornItems { count, max })
                if count == MAX_WORN_ITEMS + 1 && max == MAX_WORN_ITEMS
        ));
    }

    #[test]
    fn new_profile_is_capturing_and_empty() {
        let profile = Profile::new();
        assert!(profile.edit_mode);
        assert!(profile.variants.is_empty());
    }

    #[test]
    fn set_variant_overwrites() {
        let mut profile = Profile::new();
        profile.set_variant(ItemKind::new("hoodie"), VariantId(1));
        profile.set_variant(ItemKind::new("hoodie"), VariantId(2));

        assert_eq!(profile.variant_for(&ItemKind::new("hoodie")), Some(VariantId(2)));
        assert_eq!(profile.variants.len(), 1);
    }

    #[test]
    fn profile_uses_data_file_field_names() {
        let mut profile = Profile::new();
        profile.edit_mode = false;
        profile.set_variant(ItemKind::new("pants"), VariantId(42));

        let json = serde_json::to_string(&profile).expect("serialize");
        assert_eq!(json, r#"{"EditMode":false,"Skins":{"pants":42}}"#);
    }

    #[test]
    fn profile_without_skins_member_deserializes() {
        let profile: Profile = serde_json::from_str(r#"{"EditMode":false}"#).expect("parse");
        assert!(!profile.edit_mode);
        assert!(profile.variants.is_empty());
    }

    #[test]
    fn profile_with_null_skins_deserializes() {
        let profile: Profile =
            serde_json::from_str(r#"{"EditMode":false,"Skins":null}"#).expect("parse");
        assert!(!profile.edit_mode);
        assert!(profile.variants.is_empty());
    }

    #[test]
    fn actor_group_of_one() {
        let actor = Actor::new("76561198000000001");
        assert_eq!(GroupId::from(&actor.id).as_str(), "76561198000000001");
    }
}
