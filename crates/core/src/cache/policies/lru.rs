//! Least Recently Used (LRU) Replacement Policy.
//!
//! Every valid line carries a recency counter: `0` for the line used last,
//! growing by one each time another line of the same set is used. The victim
//! on a full-set miss is the line with the largest counter.
//!
//! # Performance
//!
//! - **Time Complexity:** `access()`: O(W) where W is the number of ways
//! - **Space Complexity:** no state beyond one counter per line
//! - **Worst Case:** Scanning patterns larger than cache capacity (thrashing)

use super::{AccessOutcome, ReplacementPolicy};
use crate::cache::CacheSet;
use crate::common::constants::MOST_RECENT;

/// LRU policy. Stateless: all bookkeeping lives in the set's lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct LruPolicy;

/// What one pass over a set found.
enum Scan {
    Hit(usize),
    Fill(usize),
    Evict(usize),
}

impl LruPolicy {
    /// Single pass over the set in way order.
    ///
    /// The first valid line holding `tag` ends the scan. Otherwise the first
    /// invalid way is remembered as the fill target, and the victim is the
    /// valid line with the largest recency, compared with `>=` so that the
    /// last of several equal maxima is chosen.
    fn scan(set: &CacheSet<'_>, tag: u64) -> Scan {
        let mut first_invalid = None;
        let mut victim = 0;
        let mut max_recency = MOST_RECENT;

        for (way, line) in set.lines().iter().enumerate() {
            match line.recency() {
                Some(_) if line.holds(tag) => return Scan::Hit(way),
                Some(recency) => {
                    if recency >= max_recency {
                        victim = way;
                        max_recency = recency;
                    }
                }
                None => {
                    if first_invalid.is_none() {
                        first_invalid = Some(way);
                    }
                }
            }
        }

        first_invalid.map_or(Scan::Evict(victim), Scan::Fill)
    }
}

impl ReplacementPolicy for LruPolicy {
    fn name(&self) -> &'static str {
        "lru"
    }

    fn access(&mut self, set: &mut CacheSet<'_>, tag: u64) -> AccessOutcome {
        match Self::scan(set, tag) {
            Scan::Hit(way) => {
                set.touch(way);
                AccessOutcome::Hit
            }
            Scan::Fill(way) => {
                let _ = set.install(way, tag);
                AccessOutcome::Miss
            }
            Scan::Evict(way) => match set.install(way, tag) {
                Some(evicted_tag) => AccessOutcome::MissEvict { evicted_tag },
                // A full set never yields an invalid victim.
                None => AccessOutcome::Miss,
            },
        }
    }
}
