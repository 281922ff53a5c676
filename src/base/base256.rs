//! # Base-256 Integer Codec
//!
//! Raw big-endian bytes: digit value and output byte coincide, so order
//! preservation is immediate. Every width from 1 to 8 is implemented and
//! `measure` is simply the minimal byte count.
//!
//! This base trades ASCII safety for density; it is provided for buffers
//! that never pass through text-only channels.

use crate::error::{Result, TupleError};

/// Returns true if `width` is one of the implemented fixed widths.
pub fn is_supported_width(width: usize) -> bool {
    (1..=8).contains(&width)
}

/// Returns the minimal byte count for `value`.
pub fn measure(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.div_ceil(8).max(1)
}

/// Minimal size of the nullable encoding: `None` costs nothing.
pub fn measure_nullable(value: Option<u64>) -> usize {
    value.map_or(0, measure)
}

/// Writes exactly `width` big-endian bytes of `value`.
///
/// Unchecked: excess high-order bytes of an oversized value are dropped.
pub fn write_fixed(width: usize, value: u64, buf: &mut [u8]) {
    let bytes = value.to_be_bytes();
    buf[..width].copy_from_slice(&bytes[8 - width..]);
}

/// Reads exactly `width` big-endian bytes.
pub fn read_fixed(width: usize, buf: &[u8]) -> u64 {
    let mut value = 0u64;
    for &byte in &buf[..width] {
        value = (value << 8) | byte as u64;
    }
    value
}

/// Writes `value` at its minimal width and returns that width.
pub fn write_variable(value: u64, buf: &mut [u8]) -> usize {
    let width = measure(value);
    write_fixed(width, value, buf);
    width
}

/// Inverse of [`write_variable`] for a region of known width.
pub fn read_variable(width: usize, buf: &[u8]) -> u64 {
    read_fixed(width, buf)
}

/// Writes `value` if present; `None` writes nothing.
pub fn write_nullable(value: Option<u64>, buf: &mut [u8]) -> usize {
    match value {
        Some(v) => write_variable(v, buf),
        None => 0,
    }
}

/// A zero-length region is `None`; anything else decodes normally.
pub fn read_nullable(width: usize, buf: &[u8]) -> Option<u64> {
    if width == 0 {
        None
    } else {
        Some(read_fixed(width, buf))
    }
}

/// Validating decoder for the safe tier. Every byte is a valid digit in
/// base 256, so only the width needs checking.
pub fn read_checked(width: usize, buf: &[u8]) -> Result<u64> {
    if !is_supported_width(width) {
        return Err(TupleError::decode(format!(
            "unsupported base-256 width {width}"
        )));
    }
    if buf.len() < width {
        return Err(TupleError::decode(format!(
            "need {width} bytes, region holds {}",
            buf.len()
        )));
    }
    Ok(read_fixed(width, buf))
}
