//! # API Request/Response Types
//!
//! JSON structures exchanged with the game host.

use clanskin_core::{
    Actor, ActorId, ClanSkinError, CommandReply, EditState, EquipAction, GroupId, ItemSnapshot,
    Profile, StoreMetrics,
};
use serde::{Deserialize, Serialize};

/// Maximum number of command arguments accepted per request.
pub const MAX_COMMAND_ARGS: usize = 16;

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// Store status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub profiles: usize,
    pub capturing: usize,
    pub enforcing: usize,
    pub variants: usize,
    pub excluded_items: usize,
    pub clan_members: usize,
}

impl StatusResponse {
    pub fn new(metrics: StoreMetrics, excluded_items: usize, clan_members: usize) -> Self {
        Self {
            profiles: metrics.profiles,
            capturing: metrics.capturing,
            enforcing: metrics.enforcing,
            variants: metrics.variants,
            excluded_items,
            clan_members,
        }
    }
}

// =============================================================================
// EQUIP REQUEST/RESPONSE
// =============================================================================

/// An actor is about to equip an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipRequest {
    pub actor: Actor,
    pub item: ItemSnapshot,
}

impl EquipRequest {
    /// Validate the actor and the item kind.
    pub fn validate(&self) -> Result<(), ClanSkinError> {
        self.actor.validate()?;
        self.item.kind.validate()
    }
}

/// What the host should do with the equipped item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipResponse {
    pub success: bool,
    pub action: Option<EquipAction>,
    /// The variant the item ends up with.
    pub variant: Option<u64>,
    pub error: Option<String>,
}

impl EquipResponse {
    pub fn success(action: EquipAction, item: &ItemSnapshot) -> Self {
        Self {
            success: true,
            action: Some(action),
            variant: Some(item.variant.value()),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            action: None,
            variant: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// COMMAND REQUEST/RESPONSE
// =============================================================================

/// A chat command invocation (`/clanskin <args>`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    pub actor: Actor,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandRequest {
    /// Validate the actor and the argument count.
    pub fn validate(&self) -> Result<(), ClanSkinError> {
        self.actor.validate()?;
        if self.args.len() > MAX_COMMAND_ARGS {
            return Err(ClanSkinError::DeserializationError(format!(
                "{} arguments exceeds maximum {}",
                self.args.len(),
                MAX_COMMAND_ARGS
            )));
        }
        Ok(())
    }
}

/// A direct `edit` or `save` action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorRequest {
    pub actor: Actor,
}

/// Reply to a command, with the text to show the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    pub reply: Option<CommandReply>,
    pub key: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl CommandResponse {
    pub fn success(reply: CommandReply, message: String) -> Self {
        Self {
            success: true,
            reply: Some(reply),
            key: Some(reply.message_key().to_string()),
            message: Some(message),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            reply: None,
            key: None,
            message: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// GROUP LIFECYCLE
// =============================================================================

/// A clan was destroyed or a team disbanded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDestroyedRequest {
    pub group: GroupId,
}

/// Whether a profile was dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDestroyedResponse {
    pub success: bool,
    pub removed: bool,
    pub error: Option<String>,
}

impl GroupDestroyedResponse {
    pub fn success(removed: bool) -> Self {
        Self {
            success: true,
            removed,
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            removed: false,
            error: Some(msg.into()),
        }
    }
}

/// An actor joined a clan (`clan` set) or left one (`clan` absent or empty).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipRequest {
    pub actor: ActorId,
    #[serde(default)]
    pub clan: Option<String>,
}

impl MembershipRequest {
    /// Validate the actor id and clan tag.
    pub fn validate(&self) -> Result<(), ClanSkinError> {
        self.actor.validate()?;
        match self.joined_clan() {
            Some(clan) => GroupId::new(clan).validate(),
            None => Ok(()),
        }
    }

    /// The clan joined, if this is a join.
    pub fn joined_clan(&self) -> Option<&str> {
        self.clan.as_deref().filter(|clan| !clan.is_empty())
    }
}

/// Membership update result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipResponse {
    pub success: bool,
    /// The clan the actor was in before this update.
    pub previous: Option<String>,
    pub error: Option<String>,
}

impl MembershipResponse {
    pub fn success(previous: Option<String>) -> Self {
        Self {
            success: true,
            previous,
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            previous: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// PROFILE / PERSIST / EXPORT
// =============================================================================

/// One group's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub group: String,
    /// `capturing` or `enforcing`. Groups without a profile are capturing.
    pub state: Option<String>,
    pub profile: Option<Profile>,
    pub error: Option<String>,
}

impl ProfileResponse {
    pub fn success(group: &GroupId, profile: Option<&Profile>) -> Self {
        Self {
            success: true,
            group: group.to_string(),
            state: Some(EditState::of_profile(profile).name().to_string()),
            profile: profile.cloned(),
            error: None,
        }
    }

    pub fn error(group: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            success: false,
            group: group.into(),
            state: None,
            profile: None,
            error: Some(msg.into()),
        }
    }
}

/// Result of flushing the store to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistResponse {
    pub success: bool,
    pub profiles: usize,
    pub error: Option<String>,
}

impl PersistResponse {
    pub fn success(profiles: usize) -> Self {
        Self {
            success: true,
            profiles,
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            profiles: 0,
            error: Some(msg.into()),
        }
    }
}

/// Binary snapshot of the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    pub success: bool,
    /// Base64-encoded snapshot bytes.
    pub data: Option<String>,
    pub profiles: usize,
    pub error: Option<String>,
}

impl ExportResponse {
    pub fn success(data: String, profiles: usize) -> Self {
        Self {
            success: true,
            data: Some(data),
            profiles,
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            profiles: 0,
            error: Some(msg.into()),
        }
    }
}
