//! # Boolean Codec
//!
//! One base-64 digit: 0 = false, 1 = true. The nullable variant is
//! tri-state: a zero-length region is null, otherwise the same two
//! digits apply.

use crate::base::base64;
use crate::error::{Result, TupleError};

pub fn measure_bool(_value: bool) -> usize {
    1
}

pub fn measure_bool_nullable(value: Option<bool>) -> usize {
    value.map_or(0, |_| 1)
}

pub fn write_bool(value: bool, buf: &mut [u8]) -> usize {
    base64::write_fixed(1, value as u64, buf);
    1
}

/// Unchecked: any nonzero digit reads as true.
pub fn read_bool(buf: &[u8]) -> bool {
    base64::read_fixed(1, buf) != 0
}

pub fn write_bool_nullable(value: Option<bool>, buf: &mut [u8]) -> usize {
    match value {
        Some(v) => write_bool(v, buf),
        None => 0,
    }
}

pub fn read_bool_nullable(width: usize, buf: &[u8]) -> Option<bool> {
    if width == 0 {
        None
    } else {
        Some(read_bool(buf))
    }
}

pub fn read_bool_checked(width: usize, buf: &[u8]) -> Result<bool> {
    if width != 1 {
        return Err(TupleError::decode(format!(
            "boolean region must be one digit, found {width}"
        )));
    }
    match base64::read_checked(1, buf)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(TupleError::decode(format!(
            "invalid boolean digit value {other}"
        ))),
    }
}

pub fn read_bool_nullable_checked(width: usize, buf: &[u8]) -> Result<Option<bool>> {
    if width == 0 {
        Ok(None)
    } else {
        read_bool_checked(width, buf).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let mut buf = [0u8; 1];
        for value in [false, true] {
            assert_eq!(write_bool(value, &mut buf), 1);
            assert_eq!(read_bool(&buf), value);
        }
    }

    #[test]
    fn tri_state_nullable() {
        let mut buf = [0u8; 1];
        assert_eq!(measure_bool_nullable(None), 0);
        assert_eq!(measure_bool_nullable(Some(true)), 1);
        assert_eq!(write_bool_nullable(None, &mut buf), 0);
        assert_eq!(read_bool_nullable(0, &buf), None);

        for value in [Some(false), Some(true)] {
            let written = write_bool_nullable(value, &mut buf);
            assert_eq!(written, 1);
            assert_eq!(read_bool_nullable(written, &buf), value);
        }
    }

    #[test]
    fn false_and_true_encode_distinctly() {
        let mut f = [0u8; 1];
        let mut t = [0u8; 1];
        write_bool(false, &mut f);
        write_bool(true, &mut t);
        assert_ne!(f, t);
        assert!(f < t);
    }

    #[test]
    fn checked_rejects_other_digits() {
        let mut buf = [0u8; 1];
        base64::write_fixed(1, 7, &mut buf);
        assert!(matches!(
            read_bool_checked(1, &buf),
            Err(TupleError::Decode(_))
        ));
        assert!(matches!(
            read_bool_checked(2, b"00"),
            Err(TupleError::Decode(_))
        ));
    }
}
