//! Trace-driven set-associative cache simulator.
//!
//! This crate replays a valgrind-style memory trace against a cache of
//! configurable geometry and reports hit, miss and eviction counts under LRU
//! replacement. It is organised as follows:
//! 1. **Common:** Address decoding, access kinds, constants and the error type.
//! 2. **Cache:** Lines, sets, the cache array and replacement policies.
//! 3. **Trace:** Parsing of individual trace lines.
//! 4. **Simulation:** Trace loading, the record-by-record runner and entry points.
//! 5. **Configuration and statistics:** Geometry, run options and outcome counters.

/// Common types and constants (addresses, access kinds, errors).
pub mod common;
/// Simulator configuration (geometry, verbosity, address width).
pub mod config;
/// Cache model (lines, sets, cache array, replacement policies).
pub mod cache;
/// Trace line parsing.
pub mod trace;
/// Trace loading and replay.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `SimConfig::new` or deserialize from JSON.
pub use crate::config::{CacheGeometry, SimConfig};
/// The simulated cache.
pub use crate::cache::Cache;
/// Crate error type.
pub use crate::common::{Result, SimError};
/// Trace replay driver and one-call entry points.
pub use crate::sim::{TraceRunner, simulate, simulate_file};
/// Outcome counters.
pub use crate::stats::SimStats;
