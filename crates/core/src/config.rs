//! Configuration system for the cache simulator.
//!
//! This module defines the structures used to parameterize a simulation run.
//! It provides:
//! 1. **Defaults:** Baseline geometry constants used when a field is omitted.
//! 2. **Structures:** Cache geometry (`s`, `E`, `b`) and per-run options.
//! 3. **Validation:** Rejection of geometries the decoder or allocator cannot handle.
//!
//! Configuration is supplied from JSON files or assembled directly by the CLI.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::addr::AddressWidth;
use crate::common::constants::{MAX_ADDRESS_BITS, MAX_SET_BITS};
use crate::common::error::{Result, SimError};

/// Default configuration constants for the simulator.
///
/// These values describe a small direct-mapped cache of 16 sets with
/// 16-byte blocks, the usual starting point for trace experiments.
mod defaults {
    /// Default number of set-index bits (16 sets).
    pub const SET_BITS: u32 = 4;

    /// Default associativity (1 line per set = direct-mapped).
    pub const LINES_PER_SET: usize = 1;

    /// Default number of block-offset bits (16-byte blocks).
    pub const BLOCK_BITS: u32 = 4;
}

/// Shape of the simulated cache.
///
/// Keys may be written long-form (`set_bits`, `lines_per_set`, `block_bits`)
/// or with the conventional single-letter names (`s`, `E`, `b`).
///
/// # Examples
///
/// ```
/// use csim_core::config::CacheGeometry;
///
/// let geometry: CacheGeometry = serde_json::from_str(r#"{ "s": 8, "E": 2, "b": 4 }"#).unwrap();
/// assert_eq!(geometry.num_sets(), 256);
/// assert_eq!(geometry.block_size(), 16);
/// assert_eq!(geometry.total_bytes(), 8192);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CacheGeometry {
    /// Number of set-index bits; the cache has `2^set_bits` sets.
    #[serde(default = "CacheGeometry::default_set_bits", alias = "s")]
    pub set_bits: u32,

    /// Associativity: number of lines in each set.
    #[serde(default = "CacheGeometry::default_lines_per_set", alias = "E")]
    pub lines_per_set: usize,

    /// Number of block-offset bits; each block holds `2^block_bits` bytes.
    #[serde(default = "CacheGeometry::default_block_bits", alias = "b")]
    pub block_bits: u32,
}

impl CacheGeometry {
    /// Creates a geometry from the conventional `s`, `E`, `b` triple.
    pub fn new(set_bits: u32, lines_per_set: usize, block_bits: u32) -> Self {
        Self {
            set_bits,
            lines_per_set,
            block_bits,
        }
    }

    fn default_set_bits() -> u32 {
        defaults::SET_BITS
    }

    fn default_lines_per_set() -> usize {
        defaults::LINES_PER_SET
    }

    fn default_block_bits() -> u32 {
        defaults::BLOCK_BITS
    }

    /// Number of sets (`2^s`).
    pub fn num_sets(&self) -> usize {
        1usize << self.set_bits
    }

    /// Block size in bytes (`2^b`).
    pub fn block_size(&self) -> u64 {
        1u64 << self.block_bits
    }

    /// Total data capacity in bytes (`S * E * B`), saturating on overflow.
    pub fn total_bytes(&self) -> u64 {
        (self.num_sets() as u64)
            .saturating_mul(self.lines_per_set as u64)
            .saturating_mul(self.block_size())
    }

    /// Checks that the geometry can be decoded and allocated.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidGeometry`] when the set has no lines, when
    /// `s` exceeds the supported maximum, or when `s + b` leaves no room in a
    /// 64-bit address.
    pub fn validate(&self) -> Result<()> {
        if self.lines_per_set == 0 {
            return Err(SimError::InvalidGeometry(
                "lines per set (E) must be at least 1".to_string(),
            ));
        }
        if self.set_bits > MAX_SET_BITS {
            return Err(SimError::InvalidGeometry(format!(
                "set-index bits (s) must be at most {MAX_SET_BITS}, got {}",
                self.set_bits
            )));
        }
        if self.set_bits.saturating_add(self.block_bits) >= MAX_ADDRESS_BITS {
            return Err(SimError::InvalidGeometry(format!(
                "s + b must be below {MAX_ADDRESS_BITS}, got {} + {}",
                self.set_bits, self.block_bits
            )));
        }
        Ok(())
    }
}

impl Default for CacheGeometry {
    fn default() -> Self {
        Self {
            set_bits: defaults::SET_BITS,
            lines_per_set: defaults::LINES_PER_SET,
            block_bits: defaults::BLOCK_BITS,
        }
    }
}

/// Root configuration for one simulation run.
///
/// # Examples
///
/// ```
/// use csim_core::config::SimConfig;
///
/// let config: SimConfig = serde_json::from_str(r#"{
///     "geometry": { "set_bits": 1, "lines_per_set": 2, "block_bits": 3 },
///     "verbose": true,
///     "address_bits": 48
/// }"#).unwrap();
/// assert!(config.verbose);
/// assert_eq!(config.geometry.lines_per_set, 2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimConfig {
    /// Cache geometry.
    #[serde(default)]
    pub geometry: CacheGeometry,

    /// Emit one annotated line per trace record.
    #[serde(default)]
    pub verbose: bool,

    /// Fixed address width in bits; when absent the width is inferred from
    /// each record's hex digit count.
    #[serde(default)]
    pub address_bits: Option<u32>,
}

impl SimConfig {
    /// Creates a non-verbose configuration with an inferred address width.
    pub fn new(geometry: CacheGeometry) -> Self {
        Self {
            geometry,
            verbose: false,
            address_bits: None,
        }
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the file cannot be read or is not valid JSON
    /// for this structure. The result is not validated; call [`SimConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SimError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| SimError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// How the decoder should size tags.
    pub fn address_width(&self) -> AddressWidth {
        self.address_bits
            .map_or(AddressWidth::Inferred, AddressWidth::Fixed)
    }

    /// Validates the geometry and the address width.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidGeometry`] for any rejected setting.
    pub fn validate(&self) -> Result<()> {
        self.geometry.validate()?;
        match self.address_bits {
            Some(bits) if !(1..=MAX_ADDRESS_BITS).contains(&bits) => {
                Err(SimError::InvalidGeometry(format!(
                    "address width must be between 1 and {MAX_ADDRESS_BITS} bits, got {bits}"
                )))
            }
            _ => Ok(()),
        }
    }
}
