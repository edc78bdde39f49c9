//! # clanskin-core
//!
//! Per-group appearance profiles - THE LOGIC.
//!
//! A group (clan, native team, or a lone actor) owns a profile mapping item
//! kinds to visual variants, plus an edit toggle. While a group is
//! *capturing*, equipping never re-skins anything and members can save what
//! they wear. Once a save writes at least one variant the group is
//! *enforcing*: every skinnable item a member equips gets the stored variant.
//!
//! ## Components (leaf-first)
//!
//! - `store` - the `GroupId -> Profile` map
//! - `mode` - the capturing/enforcing state machine
//! - `resolver` - skinnability, variant resolution, capture
//! - `interceptor` - the pure equip decision
//! - `identity` - clan > team > self group resolution
//! - `engine` - the owned instance host hooks talk to
//!
//! ## Architectural Constraints
//!
//! - No async, no network dependencies (pure Rust)
//! - Collaborators (clans, permissions) are injected traits
//! - The only I/O is the whole-file load/flush in `storage`

// =============================================================================
// MODULES
// =============================================================================

pub mod command;
pub mod engine;
pub mod formats;
pub mod identity;
pub mod interceptor;
pub mod mode;
pub mod primitives;
pub mod resolver;
pub mod storage;
pub mod store;
pub mod system;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Actor, ActorId, ClanSkinError, GroupId, ItemKind, ItemSnapshot, Profile, VariantId};

// =============================================================================
// RE-EXPORTS: Components
// =============================================================================

pub use command::{AllowAll, Command, CommandReply, DenyAll, PermissionCheck};
pub use engine::SkinEngine;
pub use identity::{ClanLookup, NoClans, resolve_group_id};
pub use interceptor::{EquipAction, decide};
pub use mode::{EditState, enter_edit, state_of};
pub use resolver::{ExcludedKinds, capture_from, is_skinnable, resolve_variant};
pub use storage::{DataFile, LoadOutcome};
pub use store::ProfileStore;
pub use system::StoreMetrics;

// =============================================================================
// RE-EXPORTS: Formats
// =============================================================================

pub use formats::{
    SnapshotHeader, store_from_json, store_from_snapshot, store_to_json, store_to_snapshot,
};
