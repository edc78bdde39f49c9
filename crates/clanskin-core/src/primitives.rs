//! # Primitives
//!
//! Hardcoded constants for the clanskin CORE: format markers, the permission
//! name, default exclusions and input validation limits.

/// Magic bytes for the binary snapshot header.
///
/// - Snapshot = Magic Bytes ("CSKN") + Version (u8) before payload.
pub const MAGIC_BYTES: &[u8; 4] = b"CSKN";

/// Current snapshot format version.
///
/// Increment this when making breaking changes to the snapshot format.
pub const FORMAT_VERSION: u8 = 1;

/// Permission an actor needs to enter edit mode or save an outfit.
pub const PERMISSION_SAVE: &str = "clanskin.save";

/// Item kinds excluded from capture and enforcement out of the box.
pub const DEFAULT_EXCLUDED_ITEMS: &[&str] = &["hat.beenie"];

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length for group, clan, team and actor identifiers.
pub const MAX_GROUP_ID_LENGTH: usize = 128;

/// Maximum length for item kind strings.
pub const MAX_ITEM_KIND_LENGTH: usize = 64;

/// Maximum number of worn items accepted for a single capture.
///
/// Wear containers are small; anything larger is malformed input.
pub const MAX_WORN_ITEMS: usize = 64;
