//! # Safe Tier
//!
//! Validating wrappers over the tuple format. [`SafeTupleWriter`] tracks
//! a declared byte budget and refuses any write that would overflow it,
//! leaving the buffer untouched on failure; [`SafeTupleReader`] validates
//! indices, stored offsets and every digit it decodes. All failures come
//! back as [`TupleError`] values, never panics.

use crate::base::base64;
use crate::error::{Result, TupleError};
use crate::tuple::reader::TupleReader;
use crate::tuple::writer::{TupleWriter, HEADER_SIZE, MAX_OFFSET_WIDTH};
use crate::value::decimal::{Decimal, X6Decimal};
use crate::value::{binary, boolean, decimal, float, int, text};

/// A [`TupleWriter`] with a declared byte budget.
///
/// Lifecycle: construct, [`set_tuple_length`](Self::set_tuple_length),
/// write exactly `arity` values, [`seal`](Self::seal). Writing before
/// the length is set fails with [`TupleError::NotWriteSave`]; sealing
/// early fails with [`TupleError::Incomplete`].
pub struct SafeTupleWriter<'a> {
    inner: TupleWriter<'a>,
    // 0 until set_tuple_length; a valid budget is never 0 because the
    // header alone costs a byte.
    max_length: usize,
}

impl<'a> SafeTupleWriter<'a> {
    pub fn new(buf: &'a mut [u8], arity: usize, offset_width: usize) -> Result<Self> {
        if !(1..=MAX_OFFSET_WIDTH).contains(&offset_width) {
            return Err(TupleError::bad_arguments(format!(
                "offset width {offset_width} is not in 1..={MAX_OFFSET_WIDTH}"
            )));
        }
        let table = HEADER_SIZE + arity * offset_width;
        if buf.len() < table {
            return Err(TupleError::bad_arguments(format!(
                "buffer of {} bytes cannot hold a {arity}-value offset table of {table} bytes",
                buf.len()
            )));
        }
        Ok(SafeTupleWriter {
            inner: TupleWriter::with_offset_width(buf, arity, offset_width),
            max_length: 0,
        })
    }

    /// Declares the total byte budget for this tuple. Must cover at
    /// least the header and offset table, fit the buffer, and stay
    /// below the five-digit offset addressing limit.
    pub fn set_tuple_length(&mut self, total: usize) -> Result<()> {
        if total as u64 > base64::MAX_OFFSET_VALUE {
            return Err(TupleError::bad_arguments(format!(
                "tuple length {total} exceeds the addressable maximum"
            )));
        }
        if total < self.inner.byte_len() {
            return Err(TupleError::bad_arguments(format!(
                "tuple length {total} cannot hold the current {} header bytes",
                self.inner.byte_len()
            )));
        }
        if total > self.inner.capacity() {
            return Err(TupleError::bad_arguments(format!(
                "tuple length {total} exceeds the buffer capacity {}",
                self.inner.capacity()
            )));
        }
        self.max_length = total;
        Ok(())
    }

    pub fn arity(&self) -> usize {
        self.inner.arity()
    }

    pub fn written(&self) -> usize {
        self.inner.written()
    }

    pub fn byte_len(&self) -> usize {
        self.inner.byte_len()
    }

    /// Budget still available for values and any widening they trigger.
    pub fn available(&self) -> usize {
        self.max_length.saturating_sub(self.inner.byte_len())
    }

    /// Checks a prospective value of `encoded` bytes: slots first, then
    /// the budget including the offset-table widening the new cumulative
    /// offset would force.
    fn validate(&self, encoded: usize) -> Result<()> {
        if self.max_length == 0 {
            return Err(TupleError::NotWriteSave);
        }
        let arity = self.inner.arity();
        if self.inner.written() == arity {
            return Err(TupleError::OutOfRange {
                index: self.inner.written(),
                arity,
            });
        }
        let table = HEADER_SIZE + arity * self.inner.offset_width();
        let new_offset = (self.inner.byte_len() - table + encoded) as u64;
        let needed_width = base64::measure(new_offset);
        let widening = arity * needed_width.saturating_sub(self.inner.offset_width());
        let needed = encoded + widening;
        let available = self.available();
        if needed_width > MAX_OFFSET_WIDTH || needed > available {
            return Err(TupleError::ValueTooBig { needed, available });
        }
        Ok(())
    }

    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.validate(int::measure_u64(value))?;
        self.inner.write_u64(value);
        Ok(())
    }

    pub fn write_u64_nullable(&mut self, value: Option<u64>) -> Result<()> {
        self.validate(int::measure_u64_nullable(value))?;
        self.inner.write_u64_nullable(value);
        Ok(())
    }

    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.validate(int::measure_i64(value))?;
        self.inner.write_i64(value);
        Ok(())
    }

    pub fn write_i64_nullable(&mut self, value: Option<i64>) -> Result<()> {
        self.validate(int::measure_i64_nullable(value))?;
        self.inner.write_i64_nullable(value);
        Ok(())
    }

    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.validate(boolean::measure_bool(value))?;
        self.inner.write_bool(value);
        Ok(())
    }

    pub fn write_bool_nullable(&mut self, value: Option<bool>) -> Result<()> {
        self.validate(boolean::measure_bool_nullable(value))?;
        self.inner.write_bool_nullable(value);
        Ok(())
    }

    pub fn write_str(&mut self, value: &str) -> Result<()> {
        self.write_str_nullable(Some(value))
    }

    pub fn write_str_nullable(&mut self, value: Option<&str>) -> Result<()> {
        self.validate(text::measure_str(value))?;
        self.inner.write_str_nullable(value);
        Ok(())
    }

    pub fn write_bytes(&mut self, value: &[u8]) -> Result<()> {
        self.validate(binary::measure_bytes(value.len()))?;
        self.inner.write_bytes(value);
        Ok(())
    }

    pub fn write_bytes_nullable(&mut self, value: Option<&[u8]>) -> Result<()> {
        self.validate(binary::measure_bytes_nullable(value))?;
        self.inner.write_bytes_nullable(value);
        Ok(())
    }

    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.validate(float::measure_f64(value))?;
        self.inner.write_f64(value);
        Ok(())
    }

    pub fn write_f64_nullable(&mut self, value: Option<f64>) -> Result<()> {
        self.validate(float::measure_f64_nullable(value))?;
        self.inner.write_f64_nullable(value);
        Ok(())
    }

    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.validate(float::measure_f32(value))?;
        self.inner.write_f32(value);
        Ok(())
    }

    pub fn write_f32_nullable(&mut self, value: Option<f32>) -> Result<()> {
        self.validate(float::measure_f32_nullable(value))?;
        self.inner.write_f32_nullable(value);
        Ok(())
    }

    pub fn write_decimal(&mut self, value: Decimal) -> Result<()> {
        self.validate(decimal::measure_decimal(value))?;
        self.inner.write_decimal(value);
        Ok(())
    }

    pub fn write_decimal_nullable(&mut self, value: Option<Decimal>) -> Result<()> {
        self.validate(decimal::measure_decimal_nullable(value))?;
        self.inner.write_decimal_nullable(value);
        Ok(())
    }

    pub fn write_x6(&mut self, value: X6Decimal) -> Result<()> {
        self.validate(decimal::measure_x6(value))?;
        self.inner.write_x6(value);
        Ok(())
    }

    pub fn write_x6_nullable(&mut self, value: Option<X6Decimal>) -> Result<()> {
        self.validate(decimal::measure_x6_nullable(value))?;
        self.inner.write_x6_nullable(value);
        Ok(())
    }

    /// Budget-capped tail at the value cursor, for building a nested
    /// tuple in place. Commit its sealed length with
    /// [`have_written`](Self::have_written).
    pub fn remaining_mut(&mut self) -> Result<&mut [u8]> {
        if self.max_length == 0 {
            return Err(TupleError::NotWriteSave);
        }
        let budget = self.available();
        Ok(&mut self.inner.remaining_mut()[..budget])
    }

    /// Commits `len` bytes already placed at the cursor. Unlike the
    /// typed writers, the bytes are in place before validation; a
    /// failure leaves them beyond the committed region, which is
    /// harmless but not rolled back.
    pub fn have_written(&mut self, len: usize) -> Result<()> {
        self.validate(len)?;
        self.inner.have_written(len);
        Ok(())
    }

    pub fn seal(self) -> Result<usize> {
        if self.inner.written() != self.inner.arity() {
            return Err(TupleError::Incomplete {
                written: self.inner.written(),
                arity: self.inner.arity(),
            });
        }
        Ok(self.inner.seal())
    }
}

/// A [`TupleReader`] that validates everything it touches.
pub struct SafeTupleReader<'a> {
    buf: &'a [u8],
    arity: usize,
    offset_width: usize,
}

impl<'a> SafeTupleReader<'a> {
    pub fn new(buf: &'a [u8], arity: usize) -> Result<Self> {
        if buf.is_empty() {
            return Err(TupleError::decode("empty tuple buffer"));
        }
        let offset_width = base64::read_checked(HEADER_SIZE, buf)? as usize;
        if !(1..=MAX_OFFSET_WIDTH).contains(&offset_width) {
            return Err(TupleError::decode(format!(
                "invalid offset width digit {offset_width}"
            )));
        }
        let table = HEADER_SIZE + arity * offset_width;
        if buf.len() < table {
            return Err(TupleError::decode(format!(
                "buffer of {} bytes cannot hold a {arity}-value offset table of {table} bytes",
                buf.len()
            )));
        }
        Ok(SafeTupleReader {
            buf,
            arity,
            offset_width,
        })
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    fn value_start(&self) -> usize {
        HEADER_SIZE + self.arity * self.offset_width
    }

    fn end_offset(&self, index: usize) -> Result<usize> {
        let entry = HEADER_SIZE + index * self.offset_width;
        Ok(base64::read_checked(self.offset_width, &self.buf[entry..])? as usize)
    }

    pub fn byte_len(&self) -> Result<usize> {
        if self.arity == 0 {
            return Ok(self.value_start());
        }
        Ok(self.value_start() + self.end_offset(self.arity - 1)?)
    }

    /// The encoded region of slot `index`, with the stored offsets
    /// checked for monotonicity and buffer bounds.
    pub fn value_slice(&self, index: usize) -> Result<&'a [u8]> {
        if index >= self.arity {
            return Err(TupleError::OutOfRange {
                index,
                arity: self.arity,
            });
        }
        let start = if index == 0 {
            0
        } else {
            self.end_offset(index - 1)?
        };
        let end = self.end_offset(index)?;
        if start > end {
            return Err(TupleError::decode(format!(
                "offset table not monotonic at slot {index}: {start} > {end}"
            )));
        }
        let value_start = self.value_start();
        if value_start + end > self.buf.len() {
            return Err(TupleError::decode(format!(
                "slot {index} ends at {} beyond the {}-byte buffer",
                value_start + end,
                self.buf.len()
            )));
        }
        Ok(&self.buf[value_start + start..value_start + end])
    }

    pub fn get_u64(&self, index: usize) -> Result<u64> {
        let region = self.value_slice(index)?;
        int::read_u64_checked(region.len(), region)
    }

    pub fn get_u64_nullable(&self, index: usize) -> Result<Option<u64>> {
        let region = self.value_slice(index)?;
        int::read_u64_nullable_checked(region.len(), region)
    }

    pub fn get_i64(&self, index: usize) -> Result<i64> {
        let region = self.value_slice(index)?;
        int::read_i64_checked(region.len(), region)
    }

    pub fn get_i64_nullable(&self, index: usize) -> Result<Option<i64>> {
        let region = self.value_slice(index)?;
        int::read_i64_nullable_checked(region.len(), region)
    }

    pub fn get_bool(&self, index: usize) -> Result<bool> {
        let region = self.value_slice(index)?;
        boolean::read_bool_checked(region.len(), region)
    }

    pub fn get_bool_nullable(&self, index: usize) -> Result<Option<bool>> {
        let region = self.value_slice(index)?;
        boolean::read_bool_nullable_checked(region.len(), region)
    }

    pub fn get_str(&self, index: usize) -> Result<Option<&'a str>> {
        text::read_str(self.value_slice(index)?)
    }

    pub fn get_str_into(&self, index: usize, out: &mut [char]) -> Result<usize> {
        text::read_str_into(self.value_slice(index)?, out)
    }

    pub fn get_bytes(&self, index: usize) -> Result<Option<Vec<u8>>> {
        binary::read_bytes(self.value_slice(index)?)
    }

    pub fn get_bytes_into(&self, index: usize, out: &mut [u8]) -> Result<usize> {
        binary::read_bytes_into(self.value_slice(index)?, out)
    }

    pub fn get_f64(&self, index: usize) -> Result<f64> {
        float::read_f64_checked(self.value_slice(index)?)
    }

    pub fn get_f64_nullable(&self, index: usize) -> Result<Option<f64>> {
        float::read_f64_nullable_checked(self.value_slice(index)?)
    }

    pub fn get_f32(&self, index: usize) -> Result<f32> {
        float::read_f32_checked(self.value_slice(index)?)
    }

    pub fn get_f32_nullable(&self, index: usize) -> Result<Option<f32>> {
        float::read_f32_nullable_checked(self.value_slice(index)?)
    }

    pub fn get_decimal(&self, index: usize) -> Result<Decimal> {
        decimal::read_decimal_checked(self.value_slice(index)?)
    }

    pub fn get_decimal_nullable(&self, index: usize) -> Result<Option<Decimal>> {
        decimal::read_decimal_nullable_checked(self.value_slice(index)?)
    }

    pub fn get_x6(&self, index: usize) -> Result<X6Decimal> {
        decimal::read_x6_checked(self.value_slice(index)?)
    }

    pub fn get_x6_nullable(&self, index: usize) -> Result<Option<X6Decimal>> {
        decimal::read_x6_nullable_checked(self.value_slice(index)?)
    }

    pub fn get_tuple(&self, index: usize, child_arity: usize) -> Result<SafeTupleReader<'a>> {
        SafeTupleReader::new(self.value_slice(index)?, child_arity)
    }

    /// Drops into the unchecked reader once the buffer is trusted.
    pub fn into_unchecked(self) -> TupleReader<'a> {
        TupleReader::new(self.buf, self.arity)
    }
}
