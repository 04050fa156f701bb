//! Memory addresses and their decomposition.
//!
//! This module turns a raw trace address into the fields a set-associative cache
//! indexes by. It provides the following:
//! 1. **Type Safety:** A `MemAddr` newtype so raw integers and addresses are not mixed.
//! 2. **Address Width:** Either inferred per record from its hex digit count, or fixed.
//! 3. **Decomposition:** `(tag, set index, block offset)` extraction for a given geometry.

use super::constants::{BITS_PER_HEX_DIGIT, MAX_ADDRESS_BITS};

/// A byte address as it appears in a memory trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemAddr(pub u64);

impl MemAddr {
    /// Creates a new address from a raw 64-bit value.
    #[inline(always)]
    pub fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub fn val(&self) -> u64 {
        self.0
    }
}

/// How many bits of an address are significant when building the tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AddressWidth {
    /// Four bits per hex digit written in the trace record.
    #[default]
    Inferred,
    /// A fixed width in bits (1..=64) regardless of how the address was written.
    Fixed(u32),
}

impl AddressWidth {
    /// Resolves the width for a record whose address field had `hex_digits` digits.
    pub fn bits(self, hex_digits: u32) -> u32 {
        match self {
            Self::Inferred => hex_digits
                .saturating_mul(BITS_PER_HEX_DIGIT)
                .min(MAX_ADDRESS_BITS),
            Self::Fixed(bits) => bits.min(MAX_ADDRESS_BITS),
        }
    }
}

/// The cache-relevant fields of one address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddress {
    /// High-order bits identifying the block.
    pub tag: u64,
    /// Which set the block maps to.
    pub set_index: usize,
    /// Byte within the block.
    pub offset: u64,
}

/// Splits addresses into tag, set index and block offset for one cache geometry.
///
/// With `s` set-index bits and `b` block-offset bits:
///
/// ```text
/// | tag (width - s - b) | set index (s) | block offset (b) |
/// ```
///
/// # Examples
///
/// ```
/// use csim_core::common::addr::{AddressDecoder, AddressWidth, MemAddr};
///
/// let decoder = AddressDecoder::new(4, 4, AddressWidth::Inferred);
/// let fields = decoder.decode(MemAddr::new(0x7ff0_005c8), 9);
/// assert_eq!(fields.offset, 0x8);
/// assert_eq!(fields.set_index, 0xc);
/// assert_eq!(fields.tag, 0x7ff0005);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct AddressDecoder {
    set_bits: u32,
    block_bits: u32,
    set_mask: u64,
    offset_mask: u64,
    width: AddressWidth,
}

/// Mask with the low `bits` bits set.
fn low_mask(bits: u32) -> u64 {
    if bits >= MAX_ADDRESS_BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

impl AddressDecoder {
    /// Creates a decoder for `set_bits` index bits and `block_bits` offset bits.
    ///
    /// The caller guarantees `set_bits + block_bits < 64`; configuration
    /// validation rejects anything wider before a decoder is built.
    pub fn new(set_bits: u32, block_bits: u32, width: AddressWidth) -> Self {
        Self {
            set_bits,
            block_bits,
            set_mask: low_mask(set_bits),
            offset_mask: low_mask(block_bits),
            width,
        }
    }

    /// Number of tag bits for a record written with `hex_digits` digits.
    pub fn tag_bits(&self, hex_digits: u32) -> u32 {
        self.width
            .bits(hex_digits)
            .saturating_sub(self.set_bits + self.block_bits)
    }

    /// Decomposes `addr`.
    ///
    /// # Arguments
    ///
    /// * `addr` - The address to decode.
    /// * `hex_digits` - How many hex digits the trace used to write it; only
    ///   consulted when the width is [`AddressWidth::Inferred`].
    pub fn decode(&self, addr: MemAddr, hex_digits: u32) -> DecodedAddress {
        let raw = addr.val();
        let tag_mask = low_mask(self.tag_bits(hex_digits));
        DecodedAddress {
            tag: (raw >> (self.set_bits + self.block_bits)) & tag_mask,
            set_index: ((raw >> self.block_bits) & self.set_mask) as usize,
            offset: raw & self.offset_mask,
        }
    }
}
