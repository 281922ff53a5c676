//! # Base-32 Integer Codec
//!
//! 5-bit digit variant of the base-64 codec, using the extended-hex
//! alphabet `0`..`9` `A`..`V` (ASCII-sorted, so fixed-width encodings are
//! byte-comparable in value order).
//!
//! ## Width Inventory
//!
//! | Width | Capacity (bits) | Maximum value       |
//! |-------|-----------------|---------------------|
//! | 1     | 5               | 31                  |
//! | 2     | 10              | 1_023               |
//! | 3     | 15              | 32_767              |
//! | 4     | 20              | 1_048_575           |
//! | 6     | 30              | 1_073_741_823       |
//! | 7     | 35              | 34_359_738_367      |
//! | 13    | 65              | u64::MAX            |
//!
//! Width 5 is not implemented and rounds up to 6; widths 8..=12 round up
//! to 13.

use crate::error::{Result, TupleError};

const ENCODE: &[u8; 32] = b"0123456789ABCDEFGHIJKLMNOPQRSTUV";

const DECODE: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut digit = 0;
    while digit < 32 {
        table[ENCODE[digit] as usize] = digit as u8;
        digit += 1;
    }
    table
};

const VALID: [bool; 256] = {
    let mut table = [false; 256];
    let mut digit = 0;
    while digit < 32 {
        table[ENCODE[digit] as usize] = true;
        digit += 1;
    }
    table
};

/// Returns true if `width` is one of the implemented fixed widths.
pub fn is_supported_width(width: usize) -> bool {
    matches!(width, 1..=4 | 6 | 7 | 13)
}

/// Returns the minimal supported digit count for `value`.
pub fn measure(value: u64) -> usize {
    if value <= 0x1F {
        1
    } else if value <= 0x3FF {
        2
    } else if value <= 0x7FFF {
        3
    } else if value <= 0xF_FFFF {
        4
    } else if value <= 0x3FFF_FFFF {
        6
    } else if value <= 0x7_FFFF_FFFF {
        7
    } else {
        13
    }
}

/// Minimal size of the nullable encoding: `None` costs nothing.
pub fn measure_nullable(value: Option<u64>) -> usize {
    value.map_or(0, measure)
}

/// Writes exactly `width` digits of `value`, high digit first.
///
/// Unchecked: excess high-order digits of an oversized value are dropped.
pub fn write_fixed(width: usize, value: u64, buf: &mut [u8]) {
    let mut shift = 5 * width;
    for slot in &mut buf[..width] {
        shift -= 5;
        let digit = if shift < 64 { (value >> shift) & 0x1F } else { 0 };
        *slot = ENCODE[digit as usize];
    }
}

/// Reads exactly `width` digits. Unchecked: bytes outside the alphabet
/// decode as digit 0.
pub fn read_fixed(width: usize, buf: &[u8]) -> u64 {
    let mut value = 0u64;
    for &byte in &buf[..width] {
        value = (value << 5) | DECODE[byte as usize] as u64;
    }
    value
}

/// Writes `value` at its minimal supported width and returns that width.
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

/// Validating decoder for the safe tier.
pub fn read_checked(width: usize, buf: &[u8]) -> Result<u64> {
    if !is_supported_width(width) {
        return Err(TupleError::decode(format!(
            "unsupported base-32 width {width}"
        )));
    }
    if buf.len() < width {
        return Err(TupleError::decode(format!(
            "need {width} digits, region holds {}",
            buf.len()
        )));
    }
    let mut value = 0u64;
    for &byte in &buf[..width] {
        if !VALID[byte as usize] {
            return Err(TupleError::decode(format!(
                "byte 0x{byte:02x} is not a base-32 digit"
            )));
        }
        value = (value << 5) | DECODE[byte as usize] as u64;
    }
    Ok(value)
}
