//! # Tuple Reader (unchecked tier)
//!
//! Zero-copy reader over a sealed tuple. The offset width comes from the
//! header digit, so construction needs only the buffer and the arity.
//! Indexed `get_*` accessors are idempotent and work in any order;
//! sequential `read_*` accessors advance an internal cursor. No
//! validation beyond what a value codec inherently requires (UTF-8,
//! binary region lengths): malformed input yields wrong values or an
//! index panic. The validating counterpart is
//! [`SafeTupleReader`](crate::SafeTupleReader).

use crate::base::base64;
use crate::error::Result;
use crate::tuple::writer::HEADER_SIZE;
use crate::value::decimal::{Decimal, X6Decimal};
use crate::value::{binary, boolean, decimal, float, int, text};

pub struct TupleReader<'a> {
    buf: &'a [u8],
    arity: usize,
    offset_width: usize,
    cursor: usize,
}

impl<'a> TupleReader<'a> {
    pub fn new(buf: &'a [u8], arity: usize) -> Self {
        let offset_width = base64::read_fixed(HEADER_SIZE, buf) as usize;
        TupleReader {
            buf,
            arity,
            offset_width,
            cursor: 0,
        }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn offset_width(&self) -> usize {
        self.offset_width
    }

    fn value_start(&self) -> usize {
        HEADER_SIZE + self.arity * self.offset_width
    }

    fn end_offset(&self, index: usize) -> usize {
        let entry = HEADER_SIZE + index * self.offset_width;
        base64::read_fixed(self.offset_width, &self.buf[entry..]) as usize
    }

    /// Total bytes of the sealed tuple.
    pub fn byte_len(&self) -> usize {
        let value_len = if self.arity == 0 {
            0
        } else {
            self.end_offset(self.arity - 1)
        };
        self.value_start() + value_len
    }

    /// The encoded region of slot `index`.
    pub fn value_slice(&self, index: usize) -> &'a [u8] {
        let start = if index == 0 {
            0
        } else {
            self.end_offset(index - 1)
        };
        let end = self.end_offset(index);
        &self.buf[self.value_start() + start..self.value_start() + end]
    }

    pub fn get_u64(&self, index: usize) -> u64 {
        let region = self.value_slice(index);
        int::read_u64(region.len(), region)
    }

    pub fn get_u64_nullable(&self, index: usize) -> Option<u64> {
        let region = self.value_slice(index);
        int::read_u64_nullable(region.len(), region)
    }

    pub fn get_i64(&self, index: usize) -> i64 {
        let region = self.value_slice(index);
        int::read_i64(region.len(), region)
    }

    pub fn get_i64_nullable(&self, index: usize) -> Option<i64> {
        let region = self.value_slice(index);
        int::read_i64_nullable(region.len(), region)
    }

    pub fn get_bool(&self, index: usize) -> bool {
        boolean::read_bool(self.value_slice(index))
    }

    pub fn get_bool_nullable(&self, index: usize) -> Option<bool> {
        let region = self.value_slice(index);
        boolean::read_bool_nullable(region.len(), region)
    }

    pub fn get_str(&self, index: usize) -> Result<Option<&'a str>> {
        text::read_str(self.value_slice(index))
    }

    /// Decodes slot `index` into `out`, returning the char count.
    pub fn get_str_into(&self, index: usize, out: &mut [char]) -> Result<usize> {
        text::read_str_into(self.value_slice(index), out)
    }

    pub fn get_bytes(&self, index: usize) -> Result<Option<Vec<u8>>> {
        binary::read_bytes(self.value_slice(index))
    }

    pub fn get_bytes_into(&self, index: usize, out: &mut [u8]) -> Result<usize> {
        binary::read_bytes_into(self.value_slice(index), out)
    }

    pub fn get_f64(&self, index: usize) -> f64 {
        float::read_f64(self.value_slice(index))
    }

    pub fn get_f64_nullable(&self, index: usize) -> Option<f64> {
        float::read_f64_nullable(self.value_slice(index))
    }

    pub fn get_f32(&self, index: usize) -> f32 {
        float::read_f32(self.value_slice(index))
    }

    pub fn get_f32_nullable(&self, index: usize) -> Option<f32> {
        float::read_f32_nullable(self.value_slice(index))
    }

    pub fn get_decimal(&self, index: usize) -> Decimal {
        decimal::read_decimal(self.value_slice(index))
    }

    pub fn get_decimal_nullable(&self, index: usize) -> Option<Decimal> {
        decimal::read_decimal_nullable(self.value_slice(index))
    }

    pub fn get_x6(&self, index: usize) -> X6Decimal {
        decimal::read_x6(self.value_slice(index))
    }

    pub fn get_x6_nullable(&self, index: usize) -> Option<X6Decimal> {
        decimal::read_x6_nullable(self.value_slice(index))
    }

    /// A reader over a nested tuple stored in slot `index`.
    pub fn get_tuple(&self, index: usize, child_arity: usize) -> TupleReader<'a> {
        TupleReader::new(self.value_slice(index), child_arity)
    }

    fn advance(&mut self) -> usize {
        let index = self.cursor;
        self.cursor += 1;
        index
    }

    /// Skips the next slot of the sequential cursor.
    pub fn skip(&mut self) {
        self.cursor += 1;
    }

    pub fn read_u64(&mut self) -> u64 {
        let index = self.advance();
        self.get_u64(index)
    }

    pub fn read_u64_nullable(&mut self) -> Option<u64> {
        let index = self.advance();
        self.get_u64_nullable(index)
    }

    pub fn read_i64(&mut self) -> i64 {
        let index = self.advance();
        self.get_i64(index)
    }

    pub fn read_i64_nullable(&mut self) -> Option<i64> {
        let index = self.advance();
        self.get_i64_nullable(index)
    }

    pub fn read_bool(&mut self) -> bool {
        let index = self.advance();
        self.get_bool(index)
    }

    pub fn read_bool_nullable(&mut self) -> Option<bool> {
        let index = self.advance();
        self.get_bool_nullable(index)
    }

    pub fn read_str(&mut self) -> Result<Option<&'a str>> {
        let index = self.advance();
        self.get_str(index)
    }

    pub fn read_bytes(&mut self) -> Result<Option<Vec<u8>>> {
        let index = self.advance();
        self.get_bytes(index)
    }

    pub fn read_f64(&mut self) -> f64 {
        let index = self.advance();
        self.get_f64(index)
    }

    pub fn read_f32(&mut self) -> f32 {
        let index = self.advance();
        self.get_f32(index)
    }

    pub fn read_decimal(&mut self) -> Decimal {
        let index = self.advance();
        self.get_decimal(index)
    }

    pub fn read_x6(&mut self) -> X6Decimal {
        let index = self.advance();
        self.get_x6(index)
    }

    pub fn read_tuple(&mut self, child_arity: usize) -> TupleReader<'a> {
        let index = self.advance();
        self.get_tuple(index, child_arity)
    }
}
