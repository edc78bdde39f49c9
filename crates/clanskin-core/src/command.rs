//! # Commands
//!
//! The user-invocable actions (`edit`, `save`) and their replies.
//!
//! Replies carry a stable message key; turning a key into text is up to the
//! host (see the binary's message catalog).

use crate::ActorId;
use serde::{Deserialize, Serialize};

// =============================================================================
// PERMISSIONS
// =============================================================================

/// Host permission query.
pub trait PermissionCheck: Send + Sync {
    /// Whether `actor` holds `permission`.
    fn has_permission(&self, actor: &ActorId, permission: &str) -> bool;
}

/// Grants every permission to everyone.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl PermissionCheck for AllowAll {
    fn has_permission(&self, _actor: &ActorId, _permission: &str) -> bool {
        true
    }
}

/// Grants nothing. The default until the host wires in its permission system.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl PermissionCheck for DenyAll {
    fn has_permission(&self, _actor: &ActorId, _permission: &str) -> bool {
        false
    }
}

// =============================================================================
// COMMAND
// =============================================================================

/// A parsed `/clanskin` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Enter edit mode.
    Edit,
    /// Save the current outfit.
    Save,
    /// Show usage.
    Help,
}

impl Command {
    /// Parse command arguments.
    ///
    /// Exactly one argument is accepted; anything else, including unknown
    /// words, is a request for help.
    #[must_use]
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        match args {
            [arg] => match arg.as_ref() {
                "edit" => Self::Edit,
                "save" => Self::Save,
                _ => Self::Help,
            },
            _ => Self::Help,
        }
    }
}

// =============================================================================
// REPLY
// =============================================================================

/// Outcome of a command, reported back to the invoking actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum CommandReply {
    /// Usage text.
    Help,
    /// The group is now capturing.
    EditModeEntered,
    /// Save was attempted while the group was enforcing.
    NotInEditMode,
    /// Variants were written and the group is now enforcing.
    Saved {
        /// Number of items written.
        items: usize,
    },
    /// No skinnable item was worn; nothing changed.
    NothingToSave,
    /// The actor lacks the permission; nothing changed.
    NoPermission,
}

impl CommandReply {
    /// Stable key used to look up the reply text.
    #[must_use]
    pub fn message_key(self) -> &'static str {
        match self {
            Self::Help => "HelpText",
            Self::EditModeEntered => "EditModeEntered",
            Self::NotInEditMode => "NotInEditMode",
            Self::Saved { .. } => "Saved",
            Self::NothingToSave => "NothingToSave",
            Self::NoPermission => "NoPerms",
        }
    }

    /// Check if the command changed stored state.
    #[must_use]
    pub fn changed_state(self) -> bool {
        matches!(self, Self::EditModeEntered | Self::Saved { .. })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_commands() {
        assert_eq!(Command::parse(&["edit"]), Command::Edit);
        assert_eq!(Command::parse(&["save"]), Command::Save);
        assert_eq!(Command::parse(&["help"]), Command::Help);
    }

    #[test]
    fn parse_malformed_is_help() {
        let none: [&str; 0] = [];
        assert_eq!(Command::parse(&none), Command::Help);
        assert_eq!(Command::parse(&["edit", "now"]), Command::Help);
        assert_eq!(Command::parse(&["EDIT"]), Command::Help);
        assert_eq!(Command::parse(&[String::from("bogus")]), Command::Help);
    }

    #[test]
    fn reply_keys() {
        assert_eq!(CommandReply::Saved { items: 3 }.message_key(), "Saved");
        assert_eq!(CommandReply::NoPermission.message_key(), "NoPerms");
        assert!(!CommandReply::NothingToSave.changed_state());
    }

    #[test]
    fn permission_defaults() {
        let actor = ActorId::new("1");
        assert!(AllowAll.has_permission(&actor, "clanskin.save"));
        assert!(!DenyAll.has_permission(&actor, "clanskin.save"));
    }
}
