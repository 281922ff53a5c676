//! # Base-64 Integer Codec
//!
//! Encodes unsigned 64-bit integers as big-endian sequences of 6-bit digits
//! mapped through an ASCII-sorted, URL-safe alphabet. This is the digit
//! codec used by the tuple offset table and by every typed value codec.
//!
//! ## Width Inventory
//!
//! Only a fixed set of digit counts is implemented; values whose minimal
//! width is unsupported round up to the next supported width:
//!
//! | Width | Capacity (bits) | Maximum value        |
//! |-------|-----------------|----------------------|
//! | 1     | 6               | 63                   |
//! | 2     | 12              | 4_095                |
//! | 3     | 18              | 262_143              |
//! | 4     | 24              | 16_777_215           |
//! | 5     | 30              | 1_073_741_823        |
//! | 6     | 36              | 68_719_476_735       |
//! | 8     | 48              | 281_474_976_710_655  |
//! | 11    | 66              | u64::MAX             |
//!
//! Widths 7, 9 and 10 are intentionally absent: 7 rounds to 8 and 9..10
//! round to 11.
//!
//! ## Nullable Encoding
//!
//! An absent value occupies zero bytes; any positive-length region decodes
//! through the normal variable decoder. Zero is therefore not null and
//! still costs one digit.

use crate::error::{Result, TupleError};

/// Digit values 0..=63 in ascending ASCII order, so that fixed-width
/// encodings compare byte-wise in numeric order.
const ENCODE: &[u8; 64] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

const DECODE: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut digit = 0;
    while digit < 64 {
        table[ENCODE[digit] as usize] = digit as u8;
        digit += 1;
    }
    table
};

const VALID: [bool; 256] = {
    let mut table = [false; 256];
    let mut digit = 0;
    while digit < 64 {
        table[ENCODE[digit] as usize] = true;
        digit += 1;
    }
    table
};

/// Largest value-region size a tuple can address: offsets are at most
/// five digits wide.
pub const MAX_OFFSET_VALUE: u64 = (1 << 30) - 1;

/// Returns true if `width` is one of the implemented fixed widths.
pub fn is_supported_width(width: usize) -> bool {
    matches!(width, 1..=6 | 8 | 11)
}

/// Returns the minimal supported digit count for `value`.
pub fn measure(value: u64) -> usize {
    if value <= 0x3F {
        1
    } else if value <= 0xFFF {
        2
    } else if value <= 0x3_FFFF {
        3
    } else if value <= 0xFF_FFFF {
        4
    } else if value <= 0x3FFF_FFFF {
        5
    } else if value <= 0xF_FFFF_FFFF {
        6
    } else if value <= 0xFFFF_FFFF_FFFF {
        8
    } else {
        11
    }
}

/// Minimal size of the nullable encoding: `None` costs nothing.
pub fn measure_nullable(value: Option<u64>) -> usize {
    value.map_or(0, measure)
}

/// Writes exactly `width` digits of `value`, high digit first.
///
/// Unchecked: if `value >= 64^width` the excess high-order digits are
/// silently dropped and the round trip will not match.
pub fn write_fixed(width: usize, value: u64, buf: &mut [u8]) {
    let mut shift = 6 * width;
    for slot in &mut buf[..width] {
        shift -= 6;
        // Shifts above 63 would panic; width 11 tops out at shift 60.
        let digit = if shift < 64 { (value >> shift) & 0x3F } else { 0 };
        *slot = ENCODE[digit as usize];
    }
}

/// Reads exactly `width` digits. Unchecked: bytes outside the alphabet
/// decode as digit 0.
pub fn read_fixed(width: usize, buf: &[u8]) -> u64 {
    let mut value = 0u64;
    for &byte in &buf[..width] {
        value = (value << 6) | DECODE[byte as usize] as u64;
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

/// Validating decoder for the safe tier: the width must be in the
/// implemented inventory and every byte must belong to the alphabet.
pub fn read_checked(width: usize, buf: &[u8]) -> Result<u64> {
    if !is_supported_width(width) {
        return Err(TupleError::decode(format!(
            "unsupported base-64 width {width}"
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
                "byte 0x{byte:02x} is not a base-64 digit"
            )));
        }
        value = (value << 6) | DECODE[byte as usize] as u64;
    }
    Ok(value)
}

/// Validating nullable decoder.
pub fn read_nullable_checked(width: usize, buf: &[u8]) -> Result<Option<u64>> {
    if width == 0 {
        Ok(None)
    } else {
        read_checked(width, buf).map(Some)
    }
}

/// Decodes one byte to its digit value, or `None` if it is outside the
/// alphabet.
pub fn decode_digit(byte: u8) -> Option<u8> {
    if VALID[byte as usize] {
        Some(DECODE[byte as usize])
    } else {
        None
    }
}

/// Encodes one digit value (0..=63) to its alphabet byte.
pub fn encode_digit(digit: u8) -> u8 {
    ENCODE[(digit & 0x3F) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_is_ascii_sorted() {
        for pair in ENCODE.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn measure_boundaries() {
        assert_eq!(measure(0), 1);
        assert_eq!(measure(63), 1);
        assert_eq!(measure(64), 2);
        assert_eq!(measure(64 * 64 - 1), 2);
        assert_eq!(measure(64 * 64), 3);
        assert_eq!(measure(64 * 64 * 64 - 1), 3);
        assert_eq!(measure(64 * 64 * 64), 4);
        assert_eq!(measure(64 * 64 * 64 * 64 - 1), 4);
        assert_eq!(measure(64 * 64 * 64 * 64), 5);
        assert_eq!(measure(64u64.pow(5) - 1), 5);
        assert_eq!(measure(64u64.pow(5)), 6);
        assert_eq!(measure(64u64.pow(6) - 1), 6);
        // Width 7 is not implemented; it rounds up to 8.
        assert_eq!(measure(64u64.pow(6)), 8);
        assert_eq!(measure(64u64.pow(8) - 1), 8);
        // Widths 9 and 10 round up to 11.
        assert_eq!(measure(64u64.pow(8)), 11);
        assert_eq!(measure(u64::MAX), 11);
    }

    #[test]
    fn fixed_round_trip_at_width_boundaries() {
        let mut buf = [0u8; 11];
        for &width in &[1usize, 2, 3, 4, 5, 6, 8, 11] {
            let max = if width == 11 {
                u64::MAX
            } else {
                64u64.pow(width as u32) - 1
            };
            for value in [0, 1, max / 2, max - 1, max] {
                write_fixed(width, value, &mut buf);
                assert_eq!(read_fixed(width, &buf), value, "width {width}");
            }
        }
    }

    #[test]
    fn fixed_width_overflow_drops_high_digits() {
        // Writing base^width reads back as zero: the unchecked-tier
        // contract for out-of-range fixed writes.
        let mut buf = [0u8; 11];
        write_fixed(1, 64, &mut buf);
        assert_ne!(read_fixed(1, &buf), 64);
        assert_eq!(read_fixed(1, &buf), 0);

        write_fixed(2, 64 * 64 + 5, &mut buf);
        assert_eq!(read_fixed(2, &buf), 5);
    }

    #[test]
    fn fixed_width_preserves_order() {
        let mut prev = [0u8; 4];
        let mut next = [0u8; 4];
        let samples = [0u64, 1, 63, 64, 4095, 4096, 100_000, 16_777_214];
        for pair in samples.windows(2) {
            write_fixed(4, pair[0], &mut prev);
            write_fixed(4, pair[1], &mut next);
            assert!(prev < next, "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn variable_write_matches_measure() {
        let mut buf = [0u8; 11];
        for value in [
            0u64,
            63,
            64,
            4095,
            4096,
            1 << 24,
            1 << 30,
            1 << 36,
            1 << 48,
            u64::MAX,
        ] {
            let written = write_variable(value, &mut buf);
            assert_eq!(written, measure(value));
            assert_eq!(read_variable(written, &buf), value);
        }
    }

    #[test]
    fn nullable_zero_length_sentinel() {
        let mut buf = [0u8; 11];
        assert_eq!(measure_nullable(None), 0);
        assert_eq!(measure_nullable(Some(0)), 1);
        assert_eq!(write_nullable(None, &mut buf), 0);
        assert_eq!(read_nullable(0, &buf), None);

        let written = write_nullable(Some(0), &mut buf);
        assert_eq!(written, 1);
        assert_eq!(read_nullable(written, &buf), Some(0));

        let written = write_nullable(Some(u64::MAX), &mut buf);
        assert_eq!(written, 11);
        assert_eq!(read_nullable(written, &buf), Some(u64::MAX));
    }

    #[test]
    fn checked_read_rejects_garbage() {
        assert!(matches!(
            read_checked(7, b"-------"),
            Err(TupleError::Decode(_))
        ));
        assert!(matches!(
            read_checked(2, b"!!"),
            Err(TupleError::Decode(_))
        ));
        assert!(matches!(
            read_checked(3, b"00"),
            Err(TupleError::Decode(_))
        ));
        assert_eq!(read_checked(1, b"0").unwrap(), 1);
    }

    #[test]
    fn digit_helpers() {
        assert_eq!(decode_digit(b'-'), Some(0));
        assert_eq!(decode_digit(b'z'), Some(63));
        assert_eq!(decode_digit(b' '), None);
        assert_eq!(encode_digit(0), b'-');
        assert_eq!(encode_digit(63), b'z');
    }
}
