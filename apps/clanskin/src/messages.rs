//! # Message Catalog
//!
//! Reply text shown to players, keyed by [`CommandReply::message_key`].
//!
//! The usage text spans three keys (`HelpText1`..`HelpText3`) and renders as
//! one line each. Text may carry the game chat's `<color>` markup.

use clanskin_core::CommandReply;
use std::collections::BTreeMap;

const ENGLISH: &[(&str, &str)] = &[
    ("HelpText1", "usage: /clanskin [argument]"),
    (
        "HelpText2",
        "<color=orange>/clanskin edit</color> will activate edit mode (any clothes you put on will not be skinned automatically)",
    ),
    (
        "HelpText3",
        "<color=orange>/clanskin save</color> will save the current skins you're wearing to your team/clan profile",
    ),
    (
        "EditModeEntered",
        "You can now edit your dress. When you're done run <color=orange>/clanskin save</color> to save",
    ),
    (
        "NotInEditMode",
        "You're not in edit mode. run <color=orange>/clanskin edit</color> first",
    ),
    ("Saved", "Clan skins saved to profile"),
    ("NothingToSave", "You are not wearing any skinnable attire"),
    ("NoPerms", "You don't have permission to use this command"),
];

const HELP_KEYS: [&str; 3] = ["HelpText1", "HelpText2", "HelpText3"];

/// Message key to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    entries: BTreeMap<String, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::english()
    }
}

impl MessageCatalog {
    /// The built-in English catalog.
    #[must_use]
    pub fn english() -> Self {
        Self {
            entries: ENGLISH
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    /// Replace entries with operator-supplied text.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Self {
        for (key, text) in overrides {
            self.entries.insert(key.clone(), text.clone());
        }
        self
    }

    /// Text for a key. Unknown keys render as the key itself.
    #[must_use]
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Render a reply as the text the player sees.
    #[must_use]
    pub fn render(&self, reply: CommandReply) -> String {
        match reply {
            CommandReply::Help => HELP_KEYS
                .iter()
                .map(|key| self.get(key))
                .collect::<Vec<_>>()
                .join("\n"),
            other => self.get(other.message_key()).to_string(),
        }
    }
}
