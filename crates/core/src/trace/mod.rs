//! Memory trace parsing.
//!
//! Traces use the valgrind `lackey` layout, one access per line:
//!
//! ```text
//! I 0400d7d4,8
//!  L 7ff0005c8,8
//!  S 7ff0005c8,8
//!  M 0421c7f0,4
//! ```
//!
//! The type character selects how the line is handled. Instruction fetches
//! and unknown types are classified without touching the address field; data
//! accesses must carry a hex address followed by `,`. Whatever follows the
//! comma is the access size; it is kept when it reads as a decimal number and
//! otherwise ignored, since no outcome depends on it.

use tracing::debug;
use winnow::ascii::{hex_digit1, space0};
use winnow::combinator::preceded;
use winnow::error::StrContext;
use winnow::token::rest;
use winnow::{ModalResult, Parser};

use crate::common::addr::MemAddr;
use crate::common::data::AccessKind;
use crate::common::error::{Result, SimError};

/// A data access decoded from one trace line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// `Load`, `Store` or `Modify`.
    pub kind: AccessKind,
    /// Accessed byte address.
    pub address: MemAddr,
    /// Number of hex digits the address was written with.
    pub hex_digits: u32,
    /// Access size in bytes, if it parsed as a decimal number. Never used for simulation.
    pub size: Option<u32>,
}

/// Classification of one line of trace text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceLine {
    /// Empty or whitespace-only line.
    Blank,
    /// An `I` record; its address is never decoded.
    Instruction,
    /// An `L`, `S` or `M` record.
    Access(TraceRecord),
    /// A record whose type character is not recognised.
    Unknown(char),
}

/// Strips a trailing `\n` / `\r\n` from a line read with `read_line`.
pub fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Parses one trace line.
///
/// # Arguments
///
/// * `text` - The line, without its line terminator.
/// * `line_no` - 1-based line number, used for error reporting.
///
/// # Errors
///
/// Returns [`SimError::MalformedAddress`] if an `L`/`S`/`M` record lacks a
/// valid hex address followed by `,`.
pub fn parse_line(text: &str, line_no: usize) -> Result<TraceLine> {
    let body = text.trim_start();
    let mut chars = body.chars();
    let Some(type_char) = chars.next() else {
        return Ok(TraceLine::Blank);
    };

    let kind = match AccessKind::from_char(type_char) {
        Some(AccessKind::Instruction) => return Ok(TraceLine::Instruction),
        Some(kind) => kind,
        None => return Ok(TraceLine::Unknown(type_char)),
    };

    let ((address, hex_digits), size) = access_fields.parse(chars.as_str()).map_err(|e| {
        debug!(line = line_no, error = %e, "trace parse failure");
        SimError::MalformedAddress {
            line: line_no,
            text: text.to_string(),
        }
    })?;

    Ok(TraceLine::Access(TraceRecord {
        kind,
        address: MemAddr::new(address),
        hex_digits,
        size,
    }))
}

/// `<spaces><hex address>,<size>`
fn access_fields(input: &mut &str) -> ModalResult<((u64, u32), Option<u32>)> {
    (address, size).parse_next(input)
}

fn address(input: &mut &str) -> ModalResult<(u64, u32)> {
    preceded(space0, hex_digit1)
        .try_map(|digits: &str| {
            u64::from_str_radix(digits, 16).map(|value| (value, digits.len() as u32))
        })
        .context(StrContext::Label("address"))
        .parse_next(input)
}

/// Everything after the comma; `None` unless it is a decimal `u32`.
fn size(input: &mut &str) -> ModalResult<Option<u32>> {
    preceded(',', rest)
        .map(|text: &str| text.trim().parse::<u32>().ok())
        .context(StrContext::Label("size"))
        .parse_next(input)
}
