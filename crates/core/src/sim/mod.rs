//! Simulation driver and trace loading.
//!
//! Provides the trace runner plus one-call entry points that build a fresh
//! cache, replay a trace through it, and hand back the final counters.

/// Trace file opening.
pub mod loader;

/// Record-by-record trace replay.
pub mod runner;

use std::io::{BufRead, Write};
use std::path::Path;

pub use runner::TraceRunner;

use crate::common::error::Result;
use crate::config::SimConfig;
use crate::stats::SimStats;

/// Replays `reader` against a freshly created cache.
///
/// # Arguments
///
/// * `config` - Geometry and run options.
/// * `reader` - Trace source, positioned at its first line.
/// * `out` - Destination for verbose annotations (pass [`std::io::sink`] when not verbose).
///
/// # Errors
///
/// Any fatal [`SimError`](crate::common::SimError) raised while building the
/// cache or replaying the trace.
///
/// # Examples
///
/// ```
/// use csim_core::config::{CacheGeometry, SimConfig};
/// use csim_core::sim::simulate;
///
/// let config = SimConfig::new(CacheGeometry::new(0, 1, 0));
/// let trace = " L 10,1\n L 20,1\n L 10,1\n";
/// let stats = simulate(&config, trace.as_bytes(), std::io::sink()).unwrap();
/// assert_eq!((stats.hits, stats.misses, stats.evictions), (0, 3, 2));
/// ```
pub fn simulate<R: BufRead, W: Write>(config: &SimConfig, reader: R, out: W) -> Result<SimStats> {
    TraceRunner::new(config)?.run(reader, out)
}

/// Opens the trace at `path`, replays it, and closes it.
///
/// # Errors
///
/// [`SimError::TraceOpen`](crate::common::SimError::TraceOpen) if the file
/// cannot be opened, otherwise as [`simulate`].
pub fn simulate_file<W: Write>(
    config: &SimConfig,
    path: impl AsRef<Path>,
    out: W,
) -> Result<SimStats> {
    let reader = loader::open_trace(path)?;
    simulate(config, reader, out)
}
