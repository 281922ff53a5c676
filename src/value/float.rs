//! # Float Codec
//!
//! Lossless `f64`/`f32` encoding that spends digits proportional to how
//! "human" the value is. The first digit is a class tag; the rest of the
//! region depends on the class:
//!
//! | tag | class            | tail                                  |
//! |-----|------------------|---------------------------------------|
//! | 0   | +0.0             | none                                  |
//! | 1   | -0.0             | none                                  |
//! | 2   | NaN              | none                                  |
//! | 3   | +infinity        | none                                  |
//! | 4   | -infinity        | none                                  |
//! | 5/6 | +/- integer      | variable magnitude                    |
//! | 7/8 | +/- decimal      | scale digit, then variable mantissa   |
//! | 9   | raw bits         | fixed 11 digits (`f64`) / 6 (`f32`)   |
//!
//! The decimal class covers values exactly equal to `m / 10^k`; the
//! encoder verifies the reconstruction bit for bit before committing to
//! it, so every value either gets a compact form or falls back to raw
//! bits. Region length disambiguates the variable tails. Null is the
//! zero-length region.

use crate::base::base64;
use crate::error::{Result, TupleError};

const TAG_POS_ZERO: u64 = 0;
const TAG_NEG_ZERO: u64 = 1;
const TAG_NAN: u64 = 2;
const TAG_POS_INF: u64 = 3;
const TAG_NEG_INF: u64 = 4;
const TAG_POS_INT: u64 = 5;
const TAG_NEG_INT: u64 = 6;
const TAG_POS_DEC: u64 = 7;
const TAG_NEG_DEC: u64 = 8;
const TAG_RAW: u64 = 9;

// Compact magnitudes are capped at 36 bits so they fit the widest
// single-step variable width below the raw forms.
const MAX_COMPACT: u64 = 1 << 36;
const MAX_COMPACT_F32: u64 = 1 << 24;

const POW10: [u64; 18] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
];

enum Class {
    Special(u64),
    Integer { negative: bool, magnitude: u64 },
    Decimal { negative: bool, scale: u64, mantissa: u64 },
    Raw(u64),
}

fn classify_f64(value: f64) -> Class {
    if value == 0.0 {
        return Class::Special(if value.is_sign_negative() {
            TAG_NEG_ZERO
        } else {
            TAG_POS_ZERO
        });
    }
    if value.is_nan() {
        return Class::Special(TAG_NAN);
    }
    if value.is_infinite() {
        return Class::Special(if value > 0.0 { TAG_POS_INF } else { TAG_NEG_INF });
    }
    let negative = value < 0.0;
    let abs = value.abs();
    if abs == abs.trunc() && abs < MAX_COMPACT as f64 {
        return Class::Integer {
            negative,
            magnitude: abs as u64,
        };
    }
    for scale in 1..=17u64 {
        let scaled = abs * POW10[scale as usize] as f64;
        if scaled >= MAX_COMPACT as f64 {
            break;
        }
        let mantissa = scaled.round() as u64;
        // Commit only when the division reproduces the exact value.
        if mantissa as f64 / POW10[scale as usize] as f64 == abs {
            return Class::Decimal {
                negative,
                scale,
                mantissa,
            };
        }
    }
    Class::Raw(value.to_bits())
}

fn classify_f32(value: f32) -> Class {
    if value == 0.0 {
        return Class::Special(if value.is_sign_negative() {
            TAG_NEG_ZERO
        } else {
            TAG_POS_ZERO
        });
    }
    if value.is_nan() {
        return Class::Special(TAG_NAN);
    }
    if value.is_infinite() {
        return Class::Special(if value > 0.0 { TAG_POS_INF } else { TAG_NEG_INF });
    }
    let negative = value < 0.0;
    let abs = value.abs();
    if abs == abs.trunc() && abs < MAX_COMPACT_F32 as f32 {
        return Class::Integer {
            negative,
            magnitude: abs as u64,
        };
    }
    for scale in 1..=9u64 {
        let scaled = abs as f64 * POW10[scale as usize] as f64;
        if scaled >= MAX_COMPACT_F32 as f64 {
            break;
        }
        let mantissa = scaled.round() as u64;
        if mantissa as f32 / POW10[scale as usize] as f32 == abs {
            return Class::Decimal {
                negative,
                scale,
                mantissa,
            };
        }
    }
    Class::Raw(value.to_bits() as u64)
}

fn measure_class(class: &Class, raw_width: usize) -> usize {
    match class {
        Class::Special(_) => 1,
        Class::Integer { magnitude, .. } => 1 + base64::measure(*magnitude),
        Class::Decimal { mantissa, .. } => 2 + base64::measure(*mantissa),
        Class::Raw(_) => 1 + raw_width,
    }
}

fn write_class(class: &Class, raw_width: usize, buf: &mut [u8]) -> usize {
    match class {
        Class::Special(tag) => {
            base64::write_fixed(1, *tag, buf);
            1
        }
        Class::Integer {
            negative,
            magnitude,
        } => {
            let tag = if *negative { TAG_NEG_INT } else { TAG_POS_INT };
            base64::write_fixed(1, tag, buf);
            1 + base64::write_variable(*magnitude, &mut buf[1..])
        }
        Class::Decimal {
            negative,
            scale,
            mantissa,
        } => {
            let tag = if *negative { TAG_NEG_DEC } else { TAG_POS_DEC };
            base64::write_fixed(1, tag, buf);
            base64::write_fixed(1, *scale, &mut buf[1..]);
            2 + base64::write_variable(*mantissa, &mut buf[2..])
        }
        Class::Raw(bits) => {
            base64::write_fixed(1, TAG_RAW, buf);
            base64::write_fixed(raw_width, *bits, &mut buf[1..]);
            1 + raw_width
        }
    }
}

pub fn measure_f64(value: f64) -> usize {
    measure_class(&classify_f64(value), 11)
}

pub fn measure_f64_nullable(value: Option<f64>) -> usize {
    value.map_or(0, measure_f64)
}

pub fn write_f64(value: f64, buf: &mut [u8]) -> usize {
    write_class(&classify_f64(value), 11, buf)
}

pub fn write_f64_nullable(value: Option<f64>, buf: &mut [u8]) -> usize {
    match value {
        None => 0,
        Some(v) => write_f64(v, buf),
    }
}

pub fn read_f64(buf: &[u8]) -> f64 {
    match base64::read_fixed(1, buf) {
        TAG_POS_ZERO => 0.0,
        TAG_NEG_ZERO => -0.0,
        TAG_NAN => f64::NAN,
        TAG_POS_INF => f64::INFINITY,
        TAG_NEG_INF => f64::NEG_INFINITY,
        TAG_POS_INT => base64::read_variable(buf.len() - 1, &buf[1..]) as f64,
        TAG_NEG_INT => -(base64::read_variable(buf.len() - 1, &buf[1..]) as f64),
        TAG_POS_DEC | TAG_NEG_DEC => {
            let tag = base64::read_fixed(1, buf);
            let scale = base64::read_fixed(1, &buf[1..]);
            let mantissa = base64::read_variable(buf.len() - 2, &buf[2..]);
            let abs = mantissa as f64 / POW10[scale as usize] as f64;
            if tag == TAG_NEG_DEC {
                -abs
            } else {
                abs
            }
        }
        _ => f64::from_bits(base64::read_fixed(11, &buf[1..])),
    }
}

pub fn read_f64_nullable(buf: &[u8]) -> Option<f64> {
    if buf.is_empty() {
        None
    } else {
        Some(read_f64(buf))
    }
}

pub fn read_f64_checked(buf: &[u8]) -> Result<f64> {
    if buf.is_empty() {
        return Err(TupleError::decode("empty float region"));
    }
    match base64::read_checked(1, buf)? {
        tag @ (TAG_POS_ZERO | TAG_NEG_ZERO | TAG_NAN | TAG_POS_INF | TAG_NEG_INF) => {
            if buf.len() != 1 {
                return Err(TupleError::decode(format!(
                    "float tag {tag} takes no tail, region has {} digits",
                    buf.len()
                )));
            }
            Ok(read_f64(buf))
        }
        TAG_POS_INT | TAG_NEG_INT => {
            if buf.len() < 2 {
                return Err(TupleError::decode("truncated float integer tail"));
            }
            base64::read_checked(buf.len() - 1, &buf[1..])?;
            Ok(read_f64(buf))
        }
        TAG_POS_DEC | TAG_NEG_DEC => {
            if buf.len() < 3 {
                return Err(TupleError::decode("truncated float decimal tail"));
            }
            let scale = base64::read_checked(1, &buf[1..])?;
            if !(1..=17).contains(&scale) {
                return Err(TupleError::decode(format!(
                    "float decimal scale {scale} out of range"
                )));
            }
            base64::read_checked(buf.len() - 2, &buf[2..])?;
            Ok(read_f64(buf))
        }
        TAG_RAW => {
            if buf.len() != 12 {
                return Err(TupleError::decode(format!(
                    "raw f64 region must be 12 digits, got {}",
                    buf.len()
                )));
            }
            base64::read_checked(11, &buf[1..])?;
            Ok(read_f64(buf))
        }
        other => Err(TupleError::decode(format!("invalid float tag {other}"))),
    }
}

pub fn read_f64_nullable_checked(buf: &[u8]) -> Result<Option<f64>> {
    if buf.is_empty() {
        Ok(None)
    } else {
        read_f64_checked(buf).map(Some)
    }
}

pub fn measure_f32(value: f32) -> usize {
    measure_class(&classify_f32(value), 6)
}

pub fn measure_f32_nullable(value: Option<f32>) -> usize {
    value.map_or(0, measure_f32)
}

pub fn write_f32(value: f32, buf: &mut [u8]) -> usize {
    write_class(&classify_f32(value), 6, buf)
}

pub fn write_f32_nullable(value: Option<f32>, buf: &mut [u8]) -> usize {
    match value {
        None => 0,
        Some(v) => write_f32(v, buf),
    }
}

pub fn read_f32(buf: &[u8]) -> f32 {
    match base64::read_fixed(1, buf) {
        TAG_POS_ZERO => 0.0,
        TAG_NEG_ZERO => -0.0,
        TAG_NAN => f32::NAN,
        TAG_POS_INF => f32::INFINITY,
        TAG_NEG_INF => f32::NEG_INFINITY,
        TAG_POS_INT => base64::read_variable(buf.len() - 1, &buf[1..]) as f32,
        TAG_NEG_INT => -(base64::read_variable(buf.len() - 1, &buf[1..]) as f32),
        TAG_POS_DEC | TAG_NEG_DEC => {
            let tag = base64::read_fixed(1, buf);
            let scale = base64::read_fixed(1, &buf[1..]);
            let mantissa = base64::read_variable(buf.len() - 2, &buf[2..]);
            let abs = mantissa as f32 / POW10[scale as usize] as f32;
            if tag == TAG_NEG_DEC {
                -abs
            } else {
                abs
            }
        }
        _ => f32::from_bits(base64::read_fixed(6, &buf[1..]) as u32),
    }
}

pub fn read_f32_nullable(buf: &[u8]) -> Option<f32> {
    if buf.is_empty() {
        None
    } else {
        Some(read_f32(buf))
    }
}

pub fn read_f32_checked(buf: &[u8]) -> Result<f32> {
    if buf.is_empty() {
        return Err(TupleError::decode("empty float region"));
    }
    match base64::read_checked(1, buf)? {
        tag @ (TAG_POS_ZERO | TAG_NEG_ZERO | TAG_NAN | TAG_POS_INF | TAG_NEG_INF) => {
            if buf.len() != 1 {
                return Err(TupleError::decode(format!(
                    "float tag {tag} takes no tail, region has {} digits",
                    buf.len()
                )));
            }
            Ok(read_f32(buf))
        }
        TAG_POS_INT | TAG_NEG_INT => {
            if buf.len() < 2 {
                return Err(TupleError::decode("truncated float integer tail"));
            }
            base64::read_checked(buf.len() - 1, &buf[1..])?;
            Ok(read_f32(buf))
        }
        TAG_POS_DEC | TAG_NEG_DEC => {
            if buf.len() < 3 {
                return Err(TupleError::decode("truncated float decimal tail"));
            }
            let scale = base64::read_checked(1, &buf[1..])?;
            if !(1..=9).contains(&scale) {
                return Err(TupleError::decode(format!(
                    "float decimal scale {scale} out of range"
                )));
            }
            base64::read_checked(buf.len() - 2, &buf[2..])?;
            Ok(read_f32(buf))
        }
        TAG_RAW => {
            if buf.len() != 7 {
                return Err(TupleError::decode(format!(
                    "raw f32 region must be 7 digits, got {}",
                    buf.len()
                )));
            }
            base64::read_checked(6, &buf[1..])?;
            Ok(read_f32(buf))
        }
        other => Err(TupleError::decode(format!("invalid float tag {other}"))),
    }
}

pub fn read_f32_nullable_checked(buf: &[u8]) -> Result<Option<f32>> {
    if buf.is_empty() {
        Ok(None)
    } else {
        read_f32_checked(buf).map(Some)
    }
}
