//! # Decimal Codecs
//!
//! Two exact decimal types:
//!
//! * [`Decimal`] is a 96-bit unsigned mantissa with a sign and a scale in
//!   `0..=28`, matching the classic database decimal range. Its encoding
//!   is one header digit packing `scale | sign << 5`, then the mantissa
//!   at its minimal digit count.
//! * [`X6Decimal`] is a fixed-point `i64` holding `value * 10^6`. Its
//!   raw form packs into 62 bits as `int_part << 20 | fraction`, encoded
//!   as one sign digit plus the variable base-64 magnitude of that
//!   packed kernel form.

use std::fmt;

use crate::base::base64;
use crate::error::{Result, TupleError};

/// Scale cap shared with the 128-bit decimal types of SQL engines.
pub const MAX_SCALE: u8 = 28;

/// Mantissas are 96 bits.
const MAX_MANTISSA: u128 = (1 << 96) - 1;

const SIGN_BIT: u64 = 1 << 5;

/// An exact decimal value `(-1)^negative * mantissa * 10^-scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decimal {
    mantissa: u128,
    scale: u8,
    negative: bool,
}

impl Decimal {
    pub fn new(mantissa: u128, scale: u8, negative: bool) -> Result<Self> {
        if scale > MAX_SCALE {
            return Err(TupleError::bad_arguments(format!(
                "decimal scale {scale} exceeds {MAX_SCALE}"
            )));
        }
        if mantissa > MAX_MANTISSA {
            return Err(TupleError::bad_arguments(format!(
                "decimal mantissa {mantissa} exceeds 96 bits"
            )));
        }
        Ok(Decimal {
            mantissa,
            scale,
            negative,
        })
    }

    pub fn mantissa(&self) -> u128 {
        self.mantissa
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative && self.mantissa != 0 {
            "-"
        } else {
            ""
        };
        if self.scale == 0 {
            return write!(f, "{sign}{}", self.mantissa);
        }
        let divisor = 10u128.pow(self.scale as u32);
        let int_part = self.mantissa / divisor;
        let fraction = self.mantissa % divisor;
        write!(
            f,
            "{sign}{int_part}.{fraction:0width$}",
            width = self.scale as usize
        )
    }
}

// Mantissas exceed u64, so the wide digit loop lives here instead of the
// base codec.
fn measure_u128(value: u128) -> usize {
    let bits = 128 - value.leading_zeros() as usize;
    bits.div_ceil(6).max(1)
}

fn write_u128(width: usize, value: u128, buf: &mut [u8]) {
    let mut shift = 6 * width;
    for slot in &mut buf[..width] {
        shift -= 6;
        let digit = if shift < 128 {
            ((value >> shift) & 0x3F) as u8
        } else {
            0
        };
        *slot = base64::encode_digit(digit);
    }
}

fn read_u128(width: usize, buf: &[u8]) -> u128 {
    let mut value = 0u128;
    for &byte in &buf[..width] {
        let digit = base64::decode_digit(byte).unwrap_or(0);
        value = (value << 6) | digit as u128;
    }
    value
}

fn read_u128_checked(width: usize, buf: &[u8]) -> Result<u128> {
    if width == 0 || width > 16 {
        return Err(TupleError::decode(format!(
            "invalid decimal mantissa width {width}"
        )));
    }
    let mut value = 0u128;
    for &byte in &buf[..width] {
        let digit = base64::decode_digit(byte).ok_or_else(|| {
            TupleError::decode(format!("byte 0x{byte:02x} is not a base-64 digit"))
        })?;
        value = (value << 6) | digit as u128;
    }
    Ok(value)
}

pub fn measure_decimal(value: Decimal) -> usize {
    1 + measure_u128(value.mantissa)
}

pub fn measure_decimal_nullable(value: Option<Decimal>) -> usize {
    value.map_or(0, measure_decimal)
}

pub fn write_decimal(value: Decimal, buf: &mut [u8]) -> usize {
    let header = value.scale as u64 | if value.negative { SIGN_BIT } else { 0 };
    base64::write_fixed(1, header, buf);
    let width = measure_u128(value.mantissa);
    write_u128(width, value.mantissa, &mut buf[1..]);
    1 + width
}

pub fn write_decimal_nullable(value: Option<Decimal>, buf: &mut [u8]) -> usize {
    match value {
        None => 0,
        Some(v) => write_decimal(v, buf),
    }
}

pub fn read_decimal(buf: &[u8]) -> Decimal {
    let header = base64::read_fixed(1, buf);
    Decimal {
        mantissa: read_u128(buf.len() - 1, &buf[1..]),
        scale: (header & 0x1F) as u8,
        negative: header & SIGN_BIT != 0,
    }
}

pub fn read_decimal_nullable(buf: &[u8]) -> Option<Decimal> {
    if buf.is_empty() {
        None
    } else {
        Some(read_decimal(buf))
    }
}

pub fn read_decimal_checked(buf: &[u8]) -> Result<Decimal> {
    if buf.len() < 2 {
        return Err(TupleError::decode("truncated decimal region"));
    }
    let header = base64::read_checked(1, buf)?;
    let scale = (header & 0x1F) as u8;
    if scale > MAX_SCALE {
        return Err(TupleError::decode(format!(
            "decimal scale {scale} exceeds {MAX_SCALE}"
        )));
    }
    let mantissa = read_u128_checked(buf.len() - 1, &buf[1..])?;
    if mantissa > MAX_MANTISSA {
        return Err(TupleError::decode("decimal mantissa exceeds 96 bits"));
    }
    Ok(Decimal {
        mantissa,
        scale,
        negative: header & SIGN_BIT != 0,
    })
}

pub fn read_decimal_nullable_checked(buf: &[u8]) -> Result<Option<Decimal>> {
    if buf.is_empty() {
        Ok(None)
    } else {
        read_decimal_checked(buf).map(Some)
    }
}

/// Scale factor of the fixed-point type: six fractional decimal digits.
const X6_SCALE: i64 = 1_000_000;

/// A fixed-point decimal storing `value * 10^6` in an `i64`.
///
/// The kernel-packed form `int_part << 20 | fraction` needs the fraction
/// to fit 20 bits and the whole word to fit 62 bits, which bounds the raw
/// value symmetrically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct X6Decimal {
    raw: i64,
}

impl X6Decimal {
    pub const MAX_RAW: i64 = 4_398_046_511_103_999_999;
    pub const MIN_RAW: i64 = -4_398_046_511_103_999_999;

    pub const MAX: X6Decimal = X6Decimal { raw: Self::MAX_RAW };
    pub const MIN: X6Decimal = X6Decimal { raw: Self::MIN_RAW };

    /// Builds from a raw `value * 10^6` representation.
    pub fn from_raw(raw: i64) -> Result<Self> {
        if !(Self::MIN_RAW..=Self::MAX_RAW).contains(&raw) {
            return Err(TupleError::bad_arguments(format!(
                "x6 decimal raw value {raw} is out of range"
            )));
        }
        Ok(X6Decimal { raw })
    }

    /// Builds from an integer part and a microsecond-style fraction in
    /// `0..10^6`. The fraction carries the sign of the whole value.
    pub fn from_parts(int_part: i64, fraction: u32) -> Result<Self> {
        if fraction as i64 >= X6_SCALE {
            return Err(TupleError::bad_arguments(format!(
                "x6 decimal fraction {fraction} must be below 10^6"
            )));
        }
        let magnitude = int_part
            .unsigned_abs()
            .checked_mul(X6_SCALE as u64)
            .and_then(|m| m.checked_add(fraction as u64))
            .filter(|&m| m <= Self::MAX_RAW as u64)
            .ok_or_else(|| {
                TupleError::bad_arguments(format!(
                    "x6 decimal {int_part}.{fraction:06} is out of range"
                ))
            })?;
        let raw = if int_part < 0 {
            -(magnitude as i64)
        } else {
            magnitude as i64
        };
        Ok(X6Decimal { raw })
    }

    pub fn to_raw(self) -> i64 {
        self.raw
    }

    pub fn int_part(self) -> i64 {
        self.raw / X6_SCALE
    }

    pub fn fraction(self) -> u32 {
        (self.raw % X6_SCALE).unsigned_abs() as u32
    }

    /// Packs the magnitude as `int_part << 20 | fraction`. The fraction
    /// is below `10^6 < 2^20`, so the fields never overlap.
    pub fn to_encoded(self) -> u64 {
        let magnitude = self.raw.unsigned_abs();
        (magnitude / X6_SCALE as u64) << 20 | magnitude % X6_SCALE as u64
    }

    /// Inverse of [`to_encoded`](Self::to_encoded) for a given sign.
    pub fn from_encoded(encoded: u64, negative: bool) -> Result<Self> {
        let fraction = encoded & 0xF_FFFF;
        if fraction as i64 >= X6_SCALE {
            return Err(TupleError::decode(format!(
                "x6 decimal fraction field {fraction} is not a valid fraction"
            )));
        }
        let magnitude = (encoded >> 20)
            .checked_mul(X6_SCALE as u64)
            .and_then(|m| m.checked_add(fraction))
            .filter(|&m| m <= Self::MAX_RAW as u64)
            .ok_or_else(|| TupleError::decode("x6 decimal magnitude is out of range"))?;
        let raw = if negative {
            -(magnitude as i64)
        } else {
            magnitude as i64
        };
        Ok(X6Decimal { raw })
    }

    /// Widens to the 96-bit decimal type at scale 6.
    pub fn to_decimal(self) -> Decimal {
        Decimal {
            mantissa: self.raw.unsigned_abs() as u128,
            scale: 6,
            negative: self.raw < 0,
        }
    }
}

impl fmt::Display for X6Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.raw < 0 { "-" } else { "" };
        write!(
            f,
            "{sign}{}.{:06}",
            self.raw.unsigned_abs() / X6_SCALE as u64,
            self.fraction()
        )
    }
}

pub fn measure_x6(value: X6Decimal) -> usize {
    1 + base64::measure(value.to_encoded())
}

pub fn measure_x6_nullable(value: Option<X6Decimal>) -> usize {
    value.map_or(0, measure_x6)
}

pub fn write_x6(value: X6Decimal, buf: &mut [u8]) -> usize {
    base64::write_fixed(1, (value.to_raw() < 0) as u64, buf);
    1 + base64::write_variable(value.to_encoded(), &mut buf[1..])
}

pub fn write_x6_nullable(value: Option<X6Decimal>, buf: &mut [u8]) -> usize {
    match value {
        None => 0,
        Some(v) => write_x6(v, buf),
    }
}

pub fn read_x6(buf: &[u8]) -> X6Decimal {
    let negative = base64::read_fixed(1, buf) != 0;
    let encoded = base64::read_variable(buf.len() - 1, &buf[1..]);
    X6Decimal::from_encoded(encoded, negative).unwrap_or(X6Decimal { raw: 0 })
}

pub fn read_x6_nullable(buf: &[u8]) -> Option<X6Decimal> {
    if buf.is_empty() {
        None
    } else {
        Some(read_x6(buf))
    }
}

pub fn read_x6_checked(buf: &[u8]) -> Result<X6Decimal> {
    if buf.len() < 2 {
        return Err(TupleError::decode("truncated x6 decimal region"));
    }
    let sign = base64::read_checked(1, buf)?;
    if sign > 1 {
        return Err(TupleError::decode(format!(
            "invalid x6 decimal sign digit {sign}"
        )));
    }
    let encoded = base64::read_checked(buf.len() - 1, &buf[1..])?;
    X6Decimal::from_encoded(encoded, sign == 1)
}

pub fn read_x6_nullable_checked(buf: &[u8]) -> Result<Option<X6Decimal>> {
    if buf.is_empty() {
        Ok(None)
    } else {
        read_x6_checked(buf).map(Some)
    }
}
