//! Simulation error definitions.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Trace Errors:** Malformed addresses (fatal) and unknown access types (non-fatal).
//! 2. **Configuration Errors:** Rejected cache geometry and unreadable config files.
//! 3. **Resource Errors:** Allocation failure while building the cache arrays.
//! 4. **I/O Errors:** Failures opening or reading the trace source.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors raised while configuring or running a simulation.
///
/// Only [`SimError::UnknownAccessType`] is recoverable: the runner reports it
/// and moves on to the next record. Every other variant aborts the run.
#[derive(Debug, Error)]
pub enum SimError {
    /// A trace line does not carry a well-formed `<hex address>,<size>` field.
    #[error("malformed address on trace line {line}: {text:?}")]
    MalformedAddress {
        /// 1-based line number within the trace.
        line: usize,
        /// The offending line, without its line terminator.
        text: String,
    },

    /// A trace record's type character is not one of `I`, `L`, `S`, `M`.
    #[error("unknown access type '{kind}' on trace line {line}")]
    UnknownAccessType {
        /// 1-based line number within the trace.
        line: usize,
        /// The unrecognised type character.
        kind: char,
    },

    /// The cache arrays could not be allocated.
    #[error("unable to allocate cache of {sets} sets x {lines} lines")]
    ResourceExhaustion {
        /// Requested number of sets.
        sets: usize,
        /// Requested number of lines per set.
        lines: usize,
    },

    /// The requested geometry cannot be simulated.
    #[error("invalid cache geometry: {0}")]
    InvalidGeometry(String),

    /// The trace file could not be opened.
    #[error("could not open trace file '{}'", path.display())]
    TraceOpen {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading from the trace source failed part way through.
    #[error("failed reading trace line {line}")]
    TraceRead {
        /// 1-based line number being read when the failure occurred.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A configuration file could not be read or parsed.
    #[error("could not load config '{}': {reason}", path.display())]
    Config {
        /// Path of the configuration file.
        path: PathBuf,
        /// Human-readable reason (I/O or JSON error text).
        reason: String,
    },

    /// Writing simulator output (verbose annotations or results file) failed.
    #[error("failed writing simulator output")]
    Output(#[from] io::Error),
}

impl SimError {
    /// Returns `true` if the run must stop after this error.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::UnknownAccessType { .. })
    }
}
