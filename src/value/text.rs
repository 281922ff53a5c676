//! # String Codec
//!
//! A string value is one null-flag digit followed by its UTF-8 bytes
//! verbatim. The tuple offset table delimits the region, so no internal
//! length prefix is needed:
//!
//! ```text
//! present:  [digit 0][utf-8 bytes...]
//! null:     [digit 1]
//! empty:    (zero-length region)
//! ```
//!
//! The empty string claims the zero-length encoding, which is why null
//! needs an in-band flag here instead of the zero-length sentinel used by
//! the numeric codecs. Decoding validates UTF-8 and the flag digit.

use crate::base::base64;
use crate::error::{Result, TupleError};

const FLAG_PRESENT: u64 = 0;
const FLAG_NULL: u64 = 1;

pub fn measure_str(value: Option<&str>) -> usize {
    match value {
        None => 1,
        Some("") => 0,
        Some(s) => 1 + s.len(),
    }
}

pub fn write_str(value: Option<&str>, buf: &mut [u8]) -> usize {
    match value {
        None => {
            base64::write_fixed(1, FLAG_NULL, buf);
            1
        }
        Some("") => 0,
        Some(s) => {
            base64::write_fixed(1, FLAG_PRESENT, buf);
            buf[1..1 + s.len()].copy_from_slice(s.as_bytes());
            1 + s.len()
        }
    }
}

/// Decodes the delimited region. UTF-8 validity and the flag digit are
/// inherent failure modes, so even the fast tier returns `Result` here.
pub fn read_str(buf: &[u8]) -> Result<Option<&str>> {
    if buf.is_empty() {
        return Ok(Some(""));
    }
    match base64::read_fixed(1, buf) {
        FLAG_NULL => Ok(None),
        FLAG_PRESENT => std::str::from_utf8(&buf[1..])
            .map(Some)
            .map_err(|e| TupleError::decode(format!("invalid UTF-8 in string value: {e}"))),
        other => Err(TupleError::decode(format!(
            "invalid string null-flag digit {other}"
        ))),
    }
}

/// Decodes into a caller-supplied char buffer, avoiding allocation.
/// Returns the number of chars written; fails with `ValueTooBig` when the
/// destination is too small and `BadArguments` when the value is null.
pub fn read_str_into(buf: &[u8], out: &mut [char]) -> Result<usize> {
    let decoded = read_str(buf)?.ok_or_else(|| {
        TupleError::bad_arguments("string value is null, cannot decode into a char buffer")
    })?;
    let mut written = 0;
    for ch in decoded.chars() {
        if written == out.len() {
            return Err(TupleError::ValueTooBig {
                needed: decoded.chars().count(),
                available: out.len(),
            });
        }
        out[written] = ch;
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_present_null_empty() {
        let mut buf = [0u8; 64];
        for value in [Some("hello"), Some(""), None, Some("åäö"), Some("日本語")] {
            let written = write_str(value, &mut buf);
            assert_eq!(written, measure_str(value));
            assert_eq!(read_str(&buf[..written]).unwrap(), value);
        }
    }

    #[test]
    fn empty_is_zero_length_and_distinct_from_null() {
        let mut buf = [0u8; 4];
        assert_eq!(write_str(Some(""), &mut buf), 0);
        assert_eq!(write_str(None, &mut buf), 1);
        assert_eq!(read_str(&buf[..0]).unwrap(), Some(""));
        assert_eq!(read_str(&buf[..1]).unwrap(), None);
    }

    #[test]
    fn decode_into_char_buffer() {
        let mut buf = [0u8; 16];
        let written = write_str(Some("abc"), &mut buf);

        let mut out = ['\0'; 8];
        assert_eq!(read_str_into(&buf[..written], &mut out).unwrap(), 3);
        assert_eq!(&out[..3], &['a', 'b', 'c']);

        let mut tiny = ['\0'; 2];
        assert!(matches!(
            read_str_into(&buf[..written], &mut tiny),
            Err(TupleError::ValueTooBig { .. })
        ));
    }

    #[test]
    fn decode_into_rejects_null() {
        let mut buf = [0u8; 1];
        let written = write_str(None, &mut buf);
        let mut out = ['\0'; 4];
        assert!(matches!(
            read_str_into(&buf[..written], &mut out),
            Err(TupleError::BadArguments(_))
        ));
    }

    #[test]
    fn invalid_utf8_is_a_decode_error() {
        let mut buf = [0u8; 4];
        base64::write_fixed(1, FLAG_PRESENT, &mut buf);
        buf[1] = 0xFF;
        buf[2] = 0xFE;
        assert!(matches!(
            read_str(&buf[..3]),
            Err(TupleError::Decode(_))
        ));
    }
}
