//! Cache Replacement Policies.
//!
//! Resolves a single access against one set: hit detection, fill of an empty
//! way, or eviction of a victim.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used, driven by per-line recency counters.

/// Least Recently Used replacement policy.
pub mod lru;

pub use lru::LruPolicy;

use super::CacheSet;

/// What a single cache access did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub enum AccessOutcome {
    /// The block was already cached.
    Hit,
    /// The block was missing and went into an empty way.
    Miss,
    /// The block was missing and displaced a valid line.
    MissEvict {
        /// Tag of the block that was thrown out.
        evicted_tag: u64,
    },
}

impl AccessOutcome {
    /// Whether the access hit.
    pub fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }

    /// Whether the access missed (with or without eviction).
    pub fn is_miss(self) -> bool {
        !self.is_hit()
    }

    /// Whether the access evicted a valid line.
    pub fn is_eviction(self) -> bool {
        matches!(self, Self::MissEvict { .. })
    }
}

/// Trait for cache replacement policies.
///
/// A policy owns the whole access decision for one set: it must report a hit
/// when a valid line holds `tag`, and otherwise place `tag` in the set.
/// Implementations must never leave two valid lines with the same tag.
pub trait ReplacementPolicy: Send + Sync {
    /// Short policy name for logs.
    fn name(&self) -> &'static str;

    /// Resolves an access to `tag` within `set`, updating the set in place.
    ///
    /// # Arguments
    ///
    /// * `set` - The set the address maps to.
    /// * `tag` - Tag of the requested block.
    ///
    /// # Returns
    ///
    /// The [`AccessOutcome`] of the access.
    fn access(&mut self, set: &mut CacheSet<'_>, tag: u64) -> AccessOutcome;
}
