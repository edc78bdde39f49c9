//! # Store Metrics
//!
//! Counts derived from the profile store for status output. Informational
//! only; nothing is gated on them.

use crate::ProfileStore;
use crate::mode::EditState;
use serde::{Deserialize, Serialize};

/// Snapshot of store-wide counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreMetrics {
    /// Number of group profiles.
    pub profiles: usize,
    /// Profiles currently capturing.
    pub capturing: usize,
    /// Profiles currently enforcing.
    pub enforcing: usize,
    /// Variant assignments across all profiles.
    pub variants: usize,
}

impl StoreMetrics {
    /// Compute metrics from a store.
    #[must_use]
    pub fn from_store(store: &ProfileStore) -> Self {
        store.iter().fold(Self::default(), |mut acc, (_, profile)| {
            acc.profiles += 1;
            acc.variants += profile.variants.len();
            match EditState::of_profile(Some(profile)) {
                EditState::Capturing => acc.capturing += 1,
                EditState::Enforcing => acc.enforcing += 1,
            }
            acc
        })
    }
}
