//! Memory Access Types.
//!
//! This module defines the classification of trace records used throughout the simulator.
//! These types are used for the following:
//! 1. **Trace Parsing:** Mapping the type character of a trace line to a kind.
//! 2. **Access Expansion:** Determining how many cache accesses a record generates.
//! 3. **Statistics Tracking:** Separating counted accesses from skipped instruction fetches.

use std::fmt;

/// Type of memory access recorded in a trace line.
///
/// Traces use the single-character codes `I`, `L`, `S` and `M`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Instruction fetch (`I`).
    ///
    /// Never simulated: the data cache does not see instruction fetches.
    Instruction,

    /// Data load (`L`).
    Load,

    /// Data store (`S`).
    Store,

    /// Data modify (`M`).
    ///
    /// A load immediately followed by a store to the same address, so it
    /// produces two cache accesses.
    Modify,
}

impl AccessKind {
    /// Maps a trace type character to its kind, or `None` if unrecognised.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Self::Instruction),
            'L' => Some(Self::Load),
            'S' => Some(Self::Store),
            'M' => Some(Self::Modify),
            _ => None,
        }
    }

    /// Returns the trace type character for this kind.
    pub fn as_char(self) -> char {
        match self {
            Self::Instruction => 'I',
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
        }
    }

    /// Number of cache accesses a record of this kind generates.
    pub fn cache_accesses(self) -> usize {
        match self {
            Self::Instruction => 0,
            Self::Load | Self::Store => 1,
            Self::Modify => 2,
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
