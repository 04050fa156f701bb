//! Address Decoder Unit Tests.
//!
//! Verifies the split of trace addresses into tag, set index and block offset
//! for several geometries, under both inferred and fixed address widths.

use csim_core::common::addr::{AddressDecoder, AddressWidth, DecodedAddress, MemAddr};

// ══════════════════════════════════════════════════════════
// 1. Field Extraction
// ══════════════════════════════════════════════════════════

/// The classic `s=4, b=4` split of a stack address.
#[test]
fn test_decode_stack_address() {
    let decoder = AddressDecoder::new(4, 4, AddressWidth::Inferred);
    let fields = decoder.decode(MemAddr::new(0x7ff0_005c8), 9);
    assert_eq!(
        fields,
        DecodedAddress {
            tag: 0x7ff_0005,
            set_index: 0xc,
            offset: 0x8,
        }
    );
}

/// With no index or offset bits the whole address is the tag.
#[test]
fn test_decode_fully_associative_zero_block_bits() {
    let decoder = AddressDecoder::new(0, 0, AddressWidth::Inferred);
    let fields = decoder.decode(MemAddr::new(0x2a), 2);
    assert_eq!(fields.tag, 0x2a);
    assert_eq!(fields.set_index, 0);
    assert_eq!(fields.offset, 0);
}

/// Addresses within the same block share tag and set.
#[test]
fn test_decode_same_block_same_fields() {
    let decoder = AddressDecoder::new(4, 4, AddressWidth::Inferred);
    let a = decoder.decode(MemAddr::new(0x10), 2);
    let b = decoder.decode(MemAddr::new(0x1f), 2);
    assert_eq!((a.tag, a.set_index), (b.tag, b.set_index));
    assert_eq!(a.offset, 0x0);
    assert_eq!(b.offset, 0xf);
}

/// Addresses one set-span apart map to the same set with different tags.
#[test]
fn test_decode_conflicting_blocks() {
    let decoder = AddressDecoder::new(4, 4, AddressWidth::Inferred);
    let a = decoder.decode(MemAddr::new(0x010), 3);
    let b = decoder.decode(MemAddr::new(0x110), 3);
    assert_eq!(a.set_index, 1);
    assert_eq!(b.set_index, 1);
    assert_eq!(a.tag, 0);
    assert_eq!(b.tag, 1);
}

// ══════════════════════════════════════════════════════════
// 2. Address Width
// ══════════════════════════════════════════════════════════

/// When the address is narrower than `s + b`, the tag is empty.
#[test]
fn test_tag_bits_saturate_at_zero() {
    let decoder = AddressDecoder::new(4, 4, AddressWidth::Inferred);
    assert_eq!(decoder.tag_bits(1), 0);
    assert_eq!(decoder.tag_bits(2), 0);
    assert_eq!(decoder.tag_bits(3), 4);
    assert_eq!(decoder.decode(MemAddr::new(0xff), 2).tag, 0);
}

/// Inferred width grows four bits per hex digit.
#[test]
fn test_inferred_tag_bits_follow_digit_count() {
    let decoder = AddressDecoder::new(2, 3, AddressWidth::Inferred);
    assert_eq!(decoder.tag_bits(8), 27);
    assert_eq!(decoder.tag_bits(16), 59);
}

/// A fixed width masks off high bits regardless of how the address was written.
#[test]
fn test_fixed_width_truncates_tag() {
    let decoder = AddressDecoder::new(4, 4, AddressWidth::Fixed(12));
    let fields = decoder.decode(MemAddr::new(0xfff00), 5);
    assert_eq!(fields.tag, 0xf);
    assert_eq!(fields.set_index, 0);
}

/// A full 64-bit width keeps every high bit.
#[test]
fn test_fixed_width_64_keeps_high_bits() {
    let decoder = AddressDecoder::new(4, 4, AddressWidth::Fixed(64));
    let fields = decoder.decode(MemAddr::new(u64::MAX), 1);
    assert_eq!(fields.tag, u64::MAX >> 8);
    assert_eq!(fields.set_index, 0xf);
    assert_eq!(fields.offset, 0xf);
}

/// Fixed widths beyond 64 bits are clamped.
#[test]
fn test_fixed_width_clamped() {
    assert_eq!(AddressWidth::Fixed(128).bits(1), 64);
    assert_eq!(AddressWidth::Fixed(20).bits(16), 20);
}
