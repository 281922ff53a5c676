//! # Integer Codecs
//!
//! Unsigned values use the variable base-64 encoding directly. Signed
//! values are first mapped onto the unsigned domain by the total-order-
//! preserving offset `unsigned = signed - i64::MIN` (implemented as a
//! sign-bit flip), so `i64::MIN` encodes as 0 and `i64::MAX` as
//! `u64::MAX`, and fixed-width encodings of signed values compare in
//! numeric order.
//!
//! Nullable variants reserve the zero-length region for `None`; `Some(0)`
//! still costs one digit.

use crate::base::base64;
use crate::error::Result;

const SIGN_FLIP: u64 = 1 << 63;

/// Maps a signed value onto the unsigned domain, preserving total order.
pub fn to_unsigned(value: i64) -> u64 {
    (value as u64) ^ SIGN_FLIP
}

/// Inverse of [`to_unsigned`].
pub fn to_signed(mapped: u64) -> i64 {
    (mapped ^ SIGN_FLIP) as i64
}

pub fn measure_u64(value: u64) -> usize {
    base64::measure(value)
}

pub fn measure_u64_nullable(value: Option<u64>) -> usize {
    base64::measure_nullable(value)
}

pub fn measure_i64(value: i64) -> usize {
    base64::measure(to_unsigned(value))
}

pub fn measure_i64_nullable(value: Option<i64>) -> usize {
    base64::measure_nullable(value.map(to_unsigned))
}

pub fn write_u64(value: u64, buf: &mut [u8]) -> usize {
    base64::write_variable(value, buf)
}

pub fn read_u64(width: usize, buf: &[u8]) -> u64 {
    base64::read_variable(width, buf)
}

pub fn write_u64_nullable(value: Option<u64>, buf: &mut [u8]) -> usize {
    base64::write_nullable(value, buf)
}

pub fn read_u64_nullable(width: usize, buf: &[u8]) -> Option<u64> {
    base64::read_nullable(width, buf)
}

pub fn write_i64(value: i64, buf: &mut [u8]) -> usize {
    base64::write_variable(to_unsigned(value), buf)
}

pub fn read_i64(width: usize, buf: &[u8]) -> i64 {
    to_signed(base64::read_variable(width, buf))
}

pub fn write_i64_nullable(value: Option<i64>, buf: &mut [u8]) -> usize {
    base64::write_nullable(value.map(to_unsigned), buf)
}

pub fn read_i64_nullable(width: usize, buf: &[u8]) -> Option<i64> {
    base64::read_nullable(width, buf).map(to_signed)
}

pub fn read_u64_checked(width: usize, buf: &[u8]) -> Result<u64> {
    base64::read_checked(width, buf)
}

pub fn read_u64_nullable_checked(width: usize, buf: &[u8]) -> Result<Option<u64>> {
    base64::read_nullable_checked(width, buf)
}

pub fn read_i64_checked(width: usize, buf: &[u8]) -> Result<i64> {
    base64::read_checked(width, buf).map(to_signed)
}

pub fn read_i64_nullable_checked(width: usize, buf: &[u8]) -> Result<Option<i64>> {
    Ok(base64::read_nullable_checked(width, buf)?.map(to_signed))
}
