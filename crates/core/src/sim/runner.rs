//! Trace Runner.
//!
//! Replays a trace against one cache, record by record, in file order:
//! 1. **Classification:** Blank lines and `I` records are skipped; unknown types are reported.
//! 2. **Decoding:** Data records are split into tag and set index for the cache geometry.
//! 3. **Access:** `L`/`S` access the cache once, `M` twice (load then store).
//! 4. **Accounting:** Each access bumps hits or misses, plus evictions when a line is displaced.
//! 5. **Verbose output:** Optionally echoes each record followed by its outcomes.

use std::io::{BufRead, Write};

use tracing::{debug, trace, warn};

use crate::cache::Cache;
use crate::cache::policies::AccessOutcome;
use crate::common::addr::AddressDecoder;
use crate::common::error::{Result, SimError};
use crate::config::SimConfig;
use crate::stats::SimStats;
use crate::trace::{self, TraceLine, TraceRecord};

/// Verbose-mode tokens for one access, in the order they are printed.
fn annotation(outcome: AccessOutcome) -> &'static str {
    match outcome {
        AccessOutcome::Hit => " hit",
        AccessOutcome::Miss => " miss",
        AccessOutcome::MissEvict { .. } => " miss eviction",
    }
}

/// Drives one simulation run.
///
/// Owns the cache and the counters; both start fresh in [`TraceRunner::new`]
/// so replaying the same trace through a new runner always gives the same
/// counters.
#[derive(Debug)]
pub struct TraceRunner {
    cache: Cache,
    decoder: AddressDecoder,
    stats: SimStats,
    verbose: bool,
    lines_read: usize,
}

impl TraceRunner {
    /// Builds an empty cache for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidGeometry`] or [`SimError::ResourceExhaustion`]
    /// if the cache cannot be created.
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let geometry = config.geometry;
        Ok(Self {
            cache: Cache::new(geometry)?,
            decoder: AddressDecoder::new(
                geometry.set_bits,
                geometry.block_bits,
                config.address_width(),
            ),
            stats: SimStats::default(),
            verbose: config.verbose,
            lines_read: 0,
        })
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// The simulated cache.
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Processes one trace line.
    ///
    /// Unknown access types are not errors here: they are logged, counted in
    /// [`SimStats::unknown_records`], and skipped.
    ///
    /// # Arguments
    ///
    /// * `text` - The line without its terminator.
    /// * `out` - Destination for the verbose annotation; untouched when not verbose.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::MalformedAddress`] for an unparsable data record and
    /// [`SimError::Output`] if writing the annotation fails.
    pub fn step<W: Write>(&mut self, text: &str, out: &mut W) -> Result<()> {
        self.lines_read += 1;
        let line_no = self.lines_read;

        match trace::parse_line(text, line_no)? {
            TraceLine::Blank => Ok(()),
            TraceLine::Instruction => {
                self.stats.instruction_fetches += 1;
                Ok(())
            }
            TraceLine::Unknown(kind) => {
                self.stats.unknown_records += 1;
                let err = SimError::UnknownAccessType {
                    line: line_no,
                    kind,
                };
                warn!("{err}, record skipped");
                if self.verbose {
                    writeln!(out, "{text} error")?;
                }
                Ok(())
            }
            TraceLine::Access(record) => self.apply(text, &record, out),
        }
    }

    fn apply<W: Write>(
        &mut self,
        text: &str,
        record: &TraceRecord,
        out: &mut W,
    ) -> Result<()> {
        let addr = self.decoder.decode(record.address, record.hex_digits);
        if self.verbose {
            write!(out, "{text}")?;
        }

        // A modify is a load then a store to the same block; nothing
        // intervenes, so the store always hits.
        for _ in 0..record.kind.cache_accesses() {
            let outcome = self.cache.access(addr);
            self.stats.record(outcome);
            trace!(
                kind = %record.kind,
                address = format_args!("{:#x}", record.address.val()),
                set = addr.set_index,
                tag = format_args!("{:#x}", addr.tag),
                ?outcome,
                "access"
            );
            if self.verbose {
                write!(out, "{}", annotation(outcome))?;
            }
        }

        if self.verbose {
            writeln!(out)?;
        }
        Ok(())
    }

    /// Replays every line of `reader`, writing verbose annotations to `out`.
    ///
    /// Lines are read as bytes; invalid UTF-8 is replaced rather than
    /// rejected, so such a line is classified like any other (usually as an
    /// unknown record). Pass `&mut reader` to keep ownership of the reader.
    ///
    /// # Errors
    ///
    /// Stops at the first fatal error: [`SimError::TraceRead`],
    /// [`SimError::MalformedAddress`] or [`SimError::Output`].
    pub fn run<R: BufRead, W: Write>(&mut self, mut reader: R, mut out: W) -> Result<SimStats> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| SimError::TraceRead {
                    line: self.lines_read + 1,
                    source,
                })?;
            if read == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            self.step(trace::strip_line_ending(&line), &mut out)?;
        }
        out.flush()?;

        debug!(
            lines = self.lines_read,
            hits = self.stats.hits,
            misses = self.stats.misses,
            evictions = self.stats.evictions,
            "trace replay finished"
        );
        Ok(self.stats)
    }
}
