//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Address Types:** The `MemAddr` newtype and the tag/set/offset decoder.
//! 2. **Constants:** Address width limits and recency sentinels.
//! 3. **Access Kinds:** Classification of trace records (`I`/`L`/`S`/`M`).
//! 4. **Error Handling:** The crate-wide `SimError` type.

/// Address types and tag/set/offset decomposition.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Trace access kind definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{AddressDecoder, AddressWidth, DecodedAddress, MemAddr};
pub use data::AccessKind;
pub use error::{Result, SimError};
