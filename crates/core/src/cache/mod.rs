//! Set-Associative Cache Model.
//!
//! This module holds the simulated cache state. It provides:
//! 1. **Lines:** Validity, tag and an LRU recency counter per line.
//! 2. **Sets:** A view of `E` consecutive lines, with the recency aging shared by all policies.
//! 3. **Cache:** One flat array of `2^s * E` lines, with accesses dispatched to a replacement policy.
//!
//! Block contents are not modelled: no replacement decision ever reads them.

/// Cache replacement policy implementations.
pub mod policies;

use tracing::debug;

use self::policies::{AccessOutcome, LruPolicy, ReplacementPolicy};
use crate::common::addr::DecodedAddress;
use crate::common::constants::MOST_RECENT;
use crate::common::error::{Result, SimError};
use crate::config::CacheGeometry;

/// One cache line.
///
/// `recency` counts how many accesses to the owning set have happened since
/// the line was last used; it is only meaningful while the line is valid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    valid: bool,
    tag: u64,
    recency: u64,
}

impl CacheLine {
    /// Whether the line currently holds a block.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Tag of the held block, or `None` if the line is invalid.
    pub fn tag(&self) -> Option<u64> {
        self.valid.then_some(self.tag)
    }

    /// Recency counter, or `None` if the line is invalid.
    pub fn recency(&self) -> Option<u64> {
        self.valid.then_some(self.recency)
    }

    /// Whether the line is valid and holds `tag`.
    pub fn holds(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }

    /// Replaces the line's contents with the block identified by `tag`.
    ///
    /// Validity, tag and recency are reset together; the new block is the
    /// most recently used one.
    pub fn install(&mut self, tag: u64) {
        *self = Self {
            valid: true,
            tag,
            recency: MOST_RECENT,
        };
    }
}

/// A mutable view of one set's `E` lines.
///
/// Sets do not own storage: every line of the cache lives in one flat array
/// and a `CacheSet` borrows the `E` consecutive lines of a single set.
#[derive(Debug)]
pub struct CacheSet<'a> {
    lines: &'a mut [CacheLine],
}

impl<'a> CacheSet<'a> {
    /// Wraps the lines of one set.
    pub fn new(lines: &'a mut [CacheLine]) -> Self {
        Self { lines }
    }

    /// The lines in way order.
    pub fn lines(&self) -> &[CacheLine] {
        self.lines
    }

    /// Associativity of the set.
    pub fn ways(&self) -> usize {
        self.lines.len()
    }

    /// Way holding `tag`, if any.
    pub fn find(&self, tag: u64) -> Option<usize> {
        self.lines.iter().position(|line| line.holds(tag))
    }

    /// Number of valid lines.
    pub fn occupancy(&self) -> usize {
        occupancy(self.lines)
    }

    /// Marks `way` as most recently used and ages every other valid line by one.
    pub fn touch(&mut self, way: usize) {
        for (i, line) in self.lines.iter_mut().enumerate() {
            if i == way {
                line.recency = MOST_RECENT;
            } else if line.valid {
                line.recency += 1;
            }
        }
    }

    /// Installs `tag` into `way` and makes it the most recently used line.
    ///
    /// Returns the tag previously held by `way`, if the line was valid.
    pub fn install(&mut self, way: usize, tag: u64) -> Option<u64> {
        let previous = self.lines[way].tag();
        self.lines[way].install(tag);
        self.touch(way);
        previous
    }
}

fn occupancy(lines: &[CacheLine]) -> usize {
    lines.iter().filter(|line| line.valid).count()
}

/// The simulated cache: `2^s` sets of `E` lines each.
///
/// All `2^s * E` lines are allocated once, in one array, with every line
/// invalid. Set `i` occupies lines `i * E .. (i + 1) * E`. The array is
/// mutated in place by [`Cache::access`] and dropped when the run ends.
pub struct Cache {
    lines: Vec<CacheLine>,
    ways: usize,
    geometry: CacheGeometry,
    policy: Box<dyn ReplacementPolicy>,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("geometry", &self.geometry)
            .field("policy", &self.policy.name())
            .finish_non_exhaustive()
    }
}

impl Cache {
    /// Creates an LRU cache with the given geometry.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidGeometry`] if the geometry is rejected, or
    /// [`SimError::ResourceExhaustion`] if the sets cannot be allocated.
    pub fn new(geometry: CacheGeometry) -> Result<Self> {
        Self::with_policy(geometry, Box::new(LruPolicy))
    }

    /// Creates a cache that uses `policy` to resolve accesses.
    ///
    /// # Arguments
    ///
    /// * `geometry` - Number of sets, lines per set and block size.
    /// * `policy` - Replacement policy consulted on every access.
    ///
    /// # Errors
    ///
    /// Same as [`Cache::new`].
    pub fn with_policy(
        geometry: CacheGeometry,
        policy: Box<dyn ReplacementPolicy>,
    ) -> Result<Self> {
        geometry.validate()?;
        let num_sets = geometry.num_sets();
        let ways = geometry.lines_per_set;
        let exhausted = || SimError::ResourceExhaustion {
            sets: num_sets,
            lines: ways,
        };

        // One allocation covers every line of every set.
        let total = num_sets.checked_mul(ways).ok_or_else(exhausted)?;
        let mut lines = Vec::new();
        lines.try_reserve_exact(total).map_err(|_| exhausted())?;
        lines.resize(total, CacheLine::default());

        debug!(
            sets = num_sets,
            ways,
            block_size = geometry.block_size(),
            policy = policy.name(),
            "cache allocated"
        );

        Ok(Self {
            lines,
            ways,
            geometry,
            policy,
        })
    }

    /// Geometry the cache was built with.
    pub fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// Number of sets (`2^s`).
    pub fn num_sets(&self) -> usize {
        self.lines.len() / self.ways
    }

    /// The lines of every set, in set index order.
    pub fn sets(&self) -> std::slice::ChunksExact<'_, CacheLine> {
        self.lines.chunks_exact(self.ways)
    }

    /// The lines of set `index`, or `None` if there is no such set.
    pub fn set(&self, index: usize) -> Option<&[CacheLine]> {
        let start = index.checked_mul(self.ways)?;
        self.lines.get(start..start.checked_add(self.ways)?)
    }

    /// Number of valid lines in set `index`; `0` if there is no such set.
    pub fn occupancy(&self, index: usize) -> usize {
        self.set(index).map_or(0, occupancy)
    }

    /// Performs one access to the block at `addr`.
    ///
    /// # Panics
    ///
    /// This function will not panic for addresses produced by an
    /// [`AddressDecoder`](crate::common::addr::AddressDecoder) built for this
    /// cache's geometry: the set index is masked to `2^s - 1`.
    pub fn access(&mut self, addr: DecodedAddress) -> AccessOutcome {
        let start = addr.set_index * self.ways;
        let mut set = CacheSet::new(&mut self.lines[start..start + self.ways]);
        self.policy.access(&mut set, addr.tag)
    }

    /// Whether the block at `addr` is currently cached. Does not update recency.
    pub fn contains(&self, addr: DecodedAddress) -> bool {
        self.set(addr.set_index)
            .is_some_and(|lines| lines.iter().any(|line| line.holds(addr.tag)))
    }
}
