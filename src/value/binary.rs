//! # Binary Codec
//!
//! Byte strings are packed into the base-64 alphabet three raw bytes at a
//! time, which keeps the value region printable:
//!
//! | raw bytes | digits | packing                          |
//! |-----------|--------|----------------------------------|
//! | 3         | 4      | 24-bit group, four 6-bit digits  |
//! | 2 (tail)  | 3      | 16 bits left-aligned in 18       |
//! | 1 (tail)  | 2      | 8 bits left-aligned in 12        |
//!
//! A full group never encodes to a length of 1 mod anything that collides
//! with the null sentinel: packed lengths are 0, 2, 3 or >= 4, so the
//! single digit `1` unambiguously marks a null value. Empty input encodes
//! to a zero-length region.

use crate::base::base64;
use crate::error::{Result, TupleError};

const NULL_SENTINEL: u64 = 1;

/// Encoded length in digits for a present value of `len` raw bytes.
pub fn measure_bytes(len: usize) -> usize {
    let tail = match len % 3 {
        0 => 0,
        1 => 2,
        _ => 3,
    };
    len / 3 * 4 + tail
}

pub fn measure_bytes_nullable(value: Option<&[u8]>) -> usize {
    match value {
        None => 1,
        Some(v) => measure_bytes(v.len()),
    }
}

pub fn write_bytes(value: &[u8], buf: &mut [u8]) -> usize {
    let mut pos = 0;
    let mut chunks = value.chunks_exact(3);
    for chunk in &mut chunks {
        let group =
            (chunk[0] as u64) << 16 | (chunk[1] as u64) << 8 | chunk[2] as u64;
        base64::write_fixed(4, group, &mut buf[pos..]);
        pos += 4;
    }
    match chunks.remainder() {
        [] => {}
        // Partial groups are left-aligned so leading digits stay significant.
        [a] => {
            base64::write_fixed(2, (*a as u64) << 4, &mut buf[pos..]);
            pos += 2;
        }
        [a, b] => {
            let group = (*a as u64) << 8 | *b as u64;
            base64::write_fixed(3, group << 2, &mut buf[pos..]);
            pos += 3;
        }
        _ => unreachable!(),
    }
    pos
}

pub fn write_bytes_nullable(value: Option<&[u8]>, buf: &mut [u8]) -> usize {
    match value {
        None => {
            base64::write_fixed(1, NULL_SENTINEL, buf);
            1
        }
        Some(v) => write_bytes(v, buf),
    }
}

/// Raw byte count for an encoded region of `enc_len` digits. A length of
/// 1 mod 4 other than the null sentinel cannot occur in valid data.
pub fn decoded_len(enc_len: usize) -> Result<usize> {
    let tail = match enc_len % 4 {
        0 => 0,
        2 => 1,
        3 => 2,
        _ => {
            return Err(TupleError::decode(format!(
                "invalid binary encoding length {enc_len}"
            )))
        }
    };
    Ok(enc_len / 4 * 3 + tail)
}

pub fn read_bytes(buf: &[u8]) -> Result<Option<Vec<u8>>> {
    if buf.len() == 1 {
        return match base64::read_checked(1, buf)? {
            NULL_SENTINEL => Ok(None),
            other => Err(TupleError::decode(format!(
                "invalid binary null sentinel digit {other}"
            ))),
        };
    }
    let mut out = vec![0u8; decoded_len(buf.len())?];
    let written = read_bytes_into(buf, &mut out)?;
    debug_assert_eq!(written, out.len());
    Ok(Some(out))
}

/// Decodes into a caller-supplied buffer. Returns the raw byte count;
/// fails with `ValueTooBig` when `out` is too small and `BadArguments`
/// when the value is null.
pub fn read_bytes_into(buf: &[u8], out: &mut [u8]) -> Result<usize> {
    if buf.len() == 1 {
        return Err(TupleError::bad_arguments(
            "binary value is null, cannot decode into a byte buffer",
        ));
    }
    let needed = decoded_len(buf.len())?;
    if needed > out.len() {
        return Err(TupleError::ValueTooBig {
            needed,
            available: out.len(),
        });
    }
    let mut pos = 0;
    let mut chunks = buf.chunks_exact(4);
    for chunk in &mut chunks {
        let group = base64::read_checked(4, chunk)?;
        out[pos] = (group >> 16) as u8;
        out[pos + 1] = (group >> 8) as u8;
        out[pos + 2] = group as u8;
        pos += 3;
    }
    match chunks.remainder().len() {
        0 => {}
        2 => {
            let group = base64::read_checked(2, chunks.remainder())?;
            out[pos] = (group >> 4) as u8;
            pos += 1;
        }
        3 => {
            let group = base64::read_checked(3, chunks.remainder())? >> 2;
            out[pos] = (group >> 8) as u8;
            out[pos + 1] = group as u8;
            pos += 2;
        }
        _ => unreachable!(),
    }
    Ok(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_all_tail_lengths() {
        let mut buf = [0u8; 64];
        for len in 0..=9usize {
            let value: Vec<u8> = (0..len as u8).map(|i| i.wrapping_mul(37)).collect();
            let written = write_bytes(&value, &mut buf);
            assert_eq!(written, measure_bytes(len));
            assert_eq!(read_bytes(&buf[..written]).unwrap(), Some(value));
        }
    }

    #[test]
    fn extreme_byte_values_survive() {
        let mut buf = [0u8; 16];
        let value = [0x00, 0xFF, 0x80, 0x7F, 0x01];
        let written = write_bytes(&value, &mut buf);
        assert_eq!(
            read_bytes(&buf[..written]).unwrap().as_deref(),
            Some(&value[..])
        );
    }

    #[test]
    fn null_sentinel_is_one_digit() {
        let mut buf = [0u8; 4];
        assert_eq!(write_bytes_nullable(None, &mut buf), 1);
        assert_eq!(read_bytes(&buf[..1]).unwrap(), None);
    }

    #[test]
    fn empty_is_zero_length() {
        let mut buf = [0u8; 4];
        assert_eq!(write_bytes_nullable(Some(&[]), &mut buf), 0);
        assert_eq!(read_bytes(&buf[..0]).unwrap(), Some(Vec::new()));
    }

    #[test]
    fn packed_lengths_never_collide_with_the_sentinel() {
        for len in 1..=32usize {
            assert_ne!(measure_bytes(len), 1);
        }
    }

    #[test]
    fn invalid_encoded_length_is_a_decode_error() {
        // 5 digits is 1 mod 4 and longer than the sentinel.
        let buf = [b'0'; 5];
        assert!(matches!(read_bytes(&buf), Err(TupleError::Decode(_))));
    }

    #[test]
    fn decode_into_reports_needed_size() {
        let mut buf = [0u8; 16];
        let written = write_bytes(&[1, 2, 3, 4, 5, 6], &mut buf);
        let mut tiny = [0u8; 4];
        assert_eq!(
            read_bytes_into(&buf[..written], &mut tiny),
            Err(TupleError::ValueTooBig {
                needed: 6,
                available: 4
            })
        );
    }
}
