//! # Tuple Writer (unchecked tier)
//!
//! Sequential writer over a caller-supplied buffer. No validation: the
//! caller guarantees the buffer is large enough and exactly `arity`
//! values are written before sealing. Misuse panics on slice indexing or
//! produces silently wrong bytes, never memory unsafety. The validating
//! counterpart is [`SafeTupleWriter`](crate::SafeTupleWriter).

use crate::base::base64;
use crate::value::{binary, boolean, decimal, float, int, text};
use crate::value::decimal::{Decimal, X6Decimal};

/// Offset table entries never exceed five digits; the value region of a
/// single tuple stays below `64^5` bytes.
pub const MAX_OFFSET_WIDTH: usize = 5;

/// Starting width when the caller has no better estimate: two digits
/// cover value regions up to 4 KiB without widening.
pub const DEFAULT_OFFSET_WIDTH: usize = 2;

/// One digit of self-describing offset width.
pub const HEADER_SIZE: usize = 1;

/// Appends values left to right, maintaining the offset table as it
/// goes. Widening is transparent: when a cumulative offset no longer
/// fits the current width the written region shifts right in place.
pub struct TupleWriter<'a> {
    buf: &'a mut [u8],
    arity: usize,
    offset_width: usize,
    value_offset: u64,
    written: usize,
}

impl<'a> TupleWriter<'a> {
    pub fn new(buf: &'a mut [u8], arity: usize) -> Self {
        Self::with_offset_width(buf, arity, DEFAULT_OFFSET_WIDTH)
    }

    pub fn with_offset_width(buf: &'a mut [u8], arity: usize, offset_width: usize) -> Self {
        debug_assert!((1..=MAX_OFFSET_WIDTH).contains(&offset_width));
        base64::write_fixed(HEADER_SIZE, offset_width as u64, buf);
        TupleWriter {
            buf,
            arity,
            offset_width,
            value_offset: 0,
            written: 0,
        }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn offset_width(&self) -> usize {
        self.offset_width
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buf.len()
    }

    fn value_start(&self) -> usize {
        HEADER_SIZE + self.arity * self.offset_width
    }

    fn cursor(&self) -> usize {
        self.value_start() + self.value_offset as usize
    }

    /// Bytes the tuple occupies so far: header, full offset table and
    /// the value region written to date.
    pub fn byte_len(&self) -> usize {
        self.value_start() + self.value_offset as usize
    }

    /// Unwritten tail starting at the value cursor. Nested tuples are
    /// built here, then committed with [`have_written`](Self::have_written).
    pub fn remaining_mut(&mut self) -> &mut [u8] {
        let cursor = self.cursor();
        &mut self.buf[cursor..]
    }

    /// Commits `len` bytes already placed at the cursor as the next
    /// value: records its end offset and widens the table first if the
    /// new cumulative offset demands it.
    pub fn have_written(&mut self, len: usize) {
        debug_assert!(self.written < self.arity);
        self.value_offset += len as u64;
        let needed = base64::measure(self.value_offset);
        if needed > self.offset_width {
            self.grow(needed);
        }
        let entry = HEADER_SIZE + self.written * self.offset_width;
        base64::write_fixed(self.offset_width, self.value_offset, &mut self.buf[entry..]);
        self.written += 1;
    }

    /// Widens the offset table in place. The value region (including the
    /// bytes just written) moves right by `arity * (new - old)`; stored
    /// entries are rewritten highest index first, so an entry's new
    /// position is never overwritten before it has been read.
    fn grow(&mut self, new_width: usize) {
        debug_assert!(new_width <= MAX_OFFSET_WIDTH);
        let old_width = self.offset_width;
        let old_start = HEADER_SIZE + self.arity * old_width;
        let new_start = HEADER_SIZE + self.arity * new_width;
        let value_len = self.value_offset as usize;
        self.buf
            .copy_within(old_start..old_start + value_len, new_start);
        for index in (0..self.written).rev() {
            let entry =
                base64::read_fixed(old_width, &self.buf[HEADER_SIZE + index * old_width..]);
            base64::write_fixed(
                new_width,
                entry,
                &mut self.buf[HEADER_SIZE + index * new_width..],
            );
        }
        base64::write_fixed(HEADER_SIZE, new_width as u64, self.buf);
        self.offset_width = new_width;
    }

    pub fn write_u64(&mut self, value: u64) {
        let cursor = self.cursor();
        let len = int::write_u64(value, &mut self.buf[cursor..]);
        self.have_written(len);
    }

    pub fn write_u64_nullable(&mut self, value: Option<u64>) {
        let cursor = self.cursor();
        let len = int::write_u64_nullable(value, &mut self.buf[cursor..]);
        self.have_written(len);
    }

    pub fn write_i64(&mut self, value: i64) {
        let cursor = self.cursor();
        let len = int::write_i64(value, &mut self.buf[cursor..]);
        self.have_written(len);
    }

    pub fn write_i64_nullable(&mut self, value: Option<i64>) {
        let cursor = self.cursor();
        let len = int::write_i64_nullable(value, &mut self.buf[cursor..]);
        self.have_written(len);
    }

    pub fn write_bool(&mut self, value: bool) {
        let cursor = self.cursor();
        let len = boolean::write_bool(value, &mut self.buf[cursor..]);
        self.have_written(len);
    }

    pub fn write_bool_nullable(&mut self, value: Option<bool>) {
        let cursor = self.cursor();
        let len = boolean::write_bool_nullable(value, &mut self.buf[cursor..]);
        self.have_written(len);
    }

    pub fn write_str(&mut self, value: &str) {
        self.write_str_nullable(Some(value));
    }

    pub fn write_str_nullable(&mut self, value: Option<&str>) {
        let cursor = self.cursor();
        let len = text::write_str(value, &mut self.buf[cursor..]);
        self.have_written(len);
    }

    pub fn write_bytes(&mut self, value: &[u8]) {
        let cursor = self.cursor();
        let len = binary::write_bytes(value, &mut self.buf[cursor..]);
        self.have_written(len);
    }

    pub fn write_bytes_nullable(&mut self, value: Option<&[u8]>) {
        let cursor = self.cursor();
        let len = binary::write_bytes_nullable(value, &mut self.buf[cursor..]);
        self.have_written(len);
    }

    pub fn write_f64(&mut self, value: f64) {
        let cursor = self.cursor();
        let len = float::write_f64(value, &mut self.buf[cursor..]);
        self.have_written(len);
    }

    pub fn write_f64_nullable(&mut self, value: Option<f64>) {
        let cursor = self.cursor();
        let len = float::write_f64_nullable(value, &mut self.buf[cursor..]);
        self.have_written(len);
    }

    pub fn write_f32(&mut self, value: f32) {
        let cursor = self.cursor();
        let len = float::write_f32(value, &mut self.buf[cursor..]);
        self.have_written(len);
    }

    pub fn write_f32_nullable(&mut self, value: Option<f32>) {
        let cursor = self.cursor();
        let len = float::write_f32_nullable(value, &mut self.buf[cursor..]);
        self.have_written(len);
    }

    pub fn write_decimal(&mut self, value: Decimal) {
        let cursor = self.cursor();
        let len = decimal::write_decimal(value, &mut self.buf[cursor..]);
        self.have_written(len);
    }

    pub fn write_decimal_nullable(&mut self, value: Option<Decimal>) {
        let cursor = self.cursor();
        let len = decimal::write_decimal_nullable(value, &mut self.buf[cursor..]);
        self.have_written(len);
    }

    pub fn write_x6(&mut self, value: X6Decimal) {
        let cursor = self.cursor();
        let len = decimal::write_x6(value, &mut self.buf[cursor..]);
        self.have_written(len);
    }

    pub fn write_x6_nullable(&mut self, value: Option<X6Decimal>) {
        let cursor = self.cursor();
        let len = decimal::write_x6_nullable(value, &mut self.buf[cursor..]);
        self.have_written(len);
    }

    /// Finishes the tuple and returns its total byte length.
    pub fn seal(self) -> usize {
        debug_assert_eq!(self.written, self.arity);
        self.byte_len()
    }
}
