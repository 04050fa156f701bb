//! Global Simulator Constants.
//!
//! This module defines constants shared across the simulator. It includes:
//! 1. **Address Constants:** Address width limits and hex digit sizing.
//! 2. **Geometry Limits:** Upper bounds accepted for set-index bits.
//! 3. **Recency Constants:** The counter value of a just-touched line.

/// Widest address the simulator can decode, in bits.
pub const MAX_ADDRESS_BITS: u32 = u64::BITS;

/// Number of address bits encoded by one hexadecimal digit.
pub const BITS_PER_HEX_DIGIT: u32 = 4;

/// Largest accepted set-index bit count (2^32 sets).
pub const MAX_SET_BITS: u32 = 32;

/// Recency value of the most recently used line in a set.
pub const MOST_RECENT: u64 = 0;
