// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::config::DEFAULT_MAX_CAPACITY;
use crate::error::Error;
use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Smallest capacity an allocator grows to on its first reservation.
const MIN_GROWTH_CAPACITY: usize = 256;

/// Width of the placeholder reserved by [`Allocator::anchor`].
pub const ANCHOR_WIDTH: usize = 4;

/// Largest value a length prefix can carry.
pub const MAX_LENGTH_PREFIX_VALUE: usize = 0x3FFF_FFFF;

/// Returns the number of bytes the length prefix of `len` occupies.
#[inline(always)]
pub fn length_prefix_width(len: usize) -> Result<usize, Error> {
    match len {
        0..=0x7F => Ok(1),
        0x80..=0x3FFF => Ok(2),
        0x4000..=MAX_LENGTH_PREFIX_VALUE => Ok(4),
        _ => Err(Error::encode_error(format!(
            "length {} exceeds the length prefix range {}",
            len, MAX_LENGTH_PREFIX_VALUE
        ))),
    }
}

// `out` must be exactly `length_prefix_width(len)` bytes.
#[inline(always)]
fn put_length_prefix(out: &mut [u8], len: usize) {
    match out.len() {
        1 => out[0] = len as u8,
        2 => BigEndian::write_u16(out, 0x8000 | len as u16),
        _ => BigEndian::write_u32(out, 0xC000_0000 | len as u32),
    }
}

enum Storage<'a> {
    Owned(Vec<u8>),
    Borrowed(&'a mut Vec<u8>),
}

impl Storage<'_> {
    #[inline(always)]
    fn vec(&self) -> &Vec<u8> {
        match self {
            Storage::Owned(v) => v,
            Storage::Borrowed(v) => v,
        }
    }

    #[inline(always)]
    fn vec_mut(&mut self) -> &mut Vec<u8> {
        match self {
            Storage::Owned(v) => v,
            Storage::Borrowed(v) => v,
        }
    }
}

/// A reserved length prefix position inside an [`Allocator`].
///
/// Returned by [`Allocator::anchor`] and consumed by
/// [`Allocator::finish_anchor`] once the body that follows it is written.
#[must_use = "an anchor must be finished or the placeholder stays in the output"]
#[derive(Debug)]
pub struct Anchor {
    offset: usize,
}

impl Anchor {
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// Growable output buffer used by every converter on the encode side.
///
/// The buffer is either owned by the allocator or borrowed from the caller,
/// in which case new bytes are appended after the existing content. The
/// write cursor is the buffer length.
pub struct Allocator<'a> {
    bf: Storage<'a>,
    max_capacity: usize,
}

impl Default for Allocator<'_> {
    fn default() -> Self {
        Allocator::new()
    }
}

impl<'a> Allocator<'a> {
    pub fn new() -> Self {
        Allocator {
            bf: Storage::Owned(Vec::new()),
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Allocator {
            bf: Storage::Owned(Vec::with_capacity(capacity)),
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }

    /// Creates an owned allocator that refuses to grow beyond `max_capacity` bytes.
    pub fn with_max_capacity(capacity: usize, max_capacity: usize) -> Self {
        Allocator {
            bf: Storage::Owned(Vec::with_capacity(capacity.min(max_capacity))),
            max_capacity,
        }
    }

    /// Appends to a caller owned buffer.
    pub fn from_buffer(buffer: &'a mut Vec<u8>) -> Self {
        Allocator {
            bf: Storage::Borrowed(buffer),
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }

    pub fn set_max_capacity(&mut self, max_capacity: usize) {
        self.max_capacity = max_capacity;
    }

    #[inline(always)]
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bf.vec().len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bf.vec().is_empty()
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.bf.vec().capacity()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        self.bf.vec()
    }

    /// Keeps the capacity and resets the cursor to zero.
    pub fn clear(&mut self) {
        self.bf.vec_mut().clear();
    }

    /// Returns the written bytes. A borrowed allocator hands back a copy.
    pub fn into_vec(self) -> Vec<u8> {
        match self.bf {
            Storage::Owned(v) => v,
            Storage::Borrowed(v) => v.clone(),
        }
    }

    /// Makes room for `additional` more bytes, doubling the capacity until it fits.
    pub fn ensure(&mut self, additional: usize) -> Result<(), Error> {
        let max_capacity = self.max_capacity;
        let bf = self.bf.vec_mut();
        let len = bf.len();
        let required = len
            .checked_add(additional)
            .ok_or_else(|| Error::capacity_exceeded(usize::MAX, max_capacity))?;
        if required > max_capacity {
            return Err(Error::capacity_exceeded(required, max_capacity));
        }
        let capacity = bf.capacity();
        if required <= capacity {
            return Ok(());
        }
        let mut target = capacity.max(MIN_GROWTH_CAPACITY / 2).saturating_mul(2);
        while target < required {
            target = target.saturating_mul(2);
        }
        let target = target.min(max_capacity);
        tracing::trace!(from = capacity, to = target, "allocator grow");
        bf.reserve_exact(target - len);
        Ok(())
    }

    /// Reserves `n` zeroed bytes at the cursor and returns them for writing.
    #[inline(always)]
    pub fn assign(&mut self, n: usize) -> Result<&mut [u8], Error> {
        self.ensure(n)?;
        let bf = self.bf.vec_mut();
        let start = bf.len();
        bf.resize(start + n, 0);
        Ok(&mut bf[start..])
    }

    #[inline(always)]
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.ensure(bytes.len())?;
        self.bf.vec_mut().extend_from_slice(bytes);
        Ok(())
    }

    #[inline(always)]
    pub fn write_u8(&mut self, value: u8) -> Result<(), Error> {
        self.ensure(1)?;
        self.bf.vec_mut().push(value);
        Ok(())
    }

    #[inline(always)]
    pub fn write_i8(&mut self, value: i8) -> Result<(), Error> {
        self.write_u8(value as u8)
    }

    #[inline(always)]
    pub fn write_u16(&mut self, value: u16) -> Result<(), Error> {
        LittleEndian::write_u16(self.assign(2)?, value);
        Ok(())
    }

    #[inline(always)]
    pub fn write_i16(&mut self, value: i16) -> Result<(), Error> {
        LittleEndian::write_i16(self.assign(2)?, value);
        Ok(())
    }

    #[inline(always)]
    pub fn write_u32(&mut self, value: u32) -> Result<(), Error> {
        LittleEndian::write_u32(self.assign(4)?, value);
        Ok(())
    }

    #[inline(always)]
    pub fn write_i32(&mut self, value: i32) -> Result<(), Error> {
        LittleEndian::write_i32(self.assign(4)?, value);
        Ok(())
    }

    #[inline(always)]
    pub fn write_u64(&mut self, value: u64) -> Result<(), Error> {
        LittleEndian::write_u64(self.assign(8)?, value);
        Ok(())
    }

    #[inline(always)]
    pub fn write_i64(&mut self, value: i64) -> Result<(), Error> {
        LittleEndian::write_i64(self.assign(8)?, value);
        Ok(())
    }

    #[inline(always)]
    pub fn write_u128(&mut self, value: u128) -> Result<(), Error> {
        LittleEndian::write_u128(self.assign(16)?, value);
        Ok(())
    }

    #[inline(always)]
    pub fn write_i128(&mut self, value: i128) -> Result<(), Error> {
        LittleEndian::write_i128(self.assign(16)?, value);
        Ok(())
    }

    #[inline(always)]
    pub fn write_f32(&mut self, value: f32) -> Result<(), Error> {
        LittleEndian::write_f32(self.assign(4)?, value);
        Ok(())
    }

    #[inline(always)]
    pub fn write_f64(&mut self, value: f64) -> Result<(), Error> {
        LittleEndian::write_f64(self.assign(8)?, value);
        Ok(())
    }

    /// Writes `len` as a length prefix of minimal width.
    pub fn append_length_prefix(&mut self, len: usize) -> Result<(), Error> {
        let width = length_prefix_width(len)?;
        put_length_prefix(self.assign(width)?, len);
        Ok(())
    }

    pub fn append_with_length_prefix(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.append_length_prefix(bytes.len())?;
        self.append(bytes)
    }

    /// Reserves a maximum width length prefix at the cursor.
    pub fn anchor(&mut self) -> Result<Anchor, Error> {
        let offset = self.len();
        self.assign(ANCHOR_WIDTH)?;
        Ok(Anchor { offset })
    }

    /// Patches the prefix reserved by `anchor` with the length of everything
    /// written after it, then moves the body left over the unused placeholder bytes.
    pub fn finish_anchor(&mut self, anchor: Anchor) -> Result<(), Error> {
        let bf = self.bf.vec_mut();
        let body_start = anchor.offset + ANCHOR_WIDTH;
        if body_start > bf.len() {
            return Err(Error::invalid_data(format!(
                "anchor at {} is past the cursor {}",
                anchor.offset,
                bf.len()
            )));
        }
        let body_len = bf.len() - body_start;
        let width = length_prefix_width(body_len)?;
        put_length_prefix(&mut bf[anchor.offset..anchor.offset + width], body_len);
        if width < ANCHOR_WIDTH {
            bf.copy_within(body_start.., anchor.offset + width);
            let new_len = bf.len() - (ANCHOR_WIDTH - width);
            bf.truncate(new_len);
        }
        Ok(())
    }
}

/// Bounds-checked cursor over an input span.
///
/// Every slice handed out borrows the input, so decoding never copies the
/// bytes of nested values.
#[derive(Clone, Copy, Debug)]
pub struct Reader<'a> {
    bf: &'a [u8],
    cursor: usize,
}

impl<'a> Reader<'a> {
    #[inline(always)]
    pub fn new(bf: &'a [u8]) -> Reader<'a> {
        Reader { bf, cursor: 0 }
    }

    #[inline(always)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.bf.len() - self.cursor
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.cursor >= self.bf.len()
    }

    /// Everything not yet consumed.
    #[inline(always)]
    pub fn rest(&self) -> &'a [u8] {
        &self.bf[self.cursor..]
    }

    #[inline(always)]
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], Error> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(Error::insufficient_data(n, remaining));
        }
        let bytes = &self.bf[self.cursor..self.cursor + n];
        self.cursor += n;
        Ok(bytes)
    }

    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<u8, Error> {
        Ok(self.read_bytes(1)?[0])
    }

    #[inline(always)]
    pub fn read_u16(&mut self) -> Result<u16, Error> {
        Ok(LittleEndian::read_u16(self.read_bytes(2)?))
    }

    #[inline(always)]
    pub fn read_u32(&mut self) -> Result<u32, Error> {
        Ok(LittleEndian::read_u32(self.read_bytes(4)?))
    }

    #[inline(always)]
    pub fn read_i32(&mut self) -> Result<i32, Error> {
        Ok(LittleEndian::read_i32(self.read_bytes(4)?))
    }

    #[inline(always)]
    pub fn read_u64(&mut self) -> Result<u64, Error> {
        Ok(LittleEndian::read_u64(self.read_bytes(8)?))
    }

    #[inline(always)]
    pub fn read_i64(&mut self) -> Result<i64, Error> {
        Ok(LittleEndian::read_i64(self.read_bytes(8)?))
    }

    /// Reads a length prefix written by [`Allocator::append_length_prefix`].
    pub fn read_length_prefix(&mut self) -> Result<usize, Error> {
        let first = self.read_u8()?;
        match first >> 6 {
            0 | 1 => Ok(first as usize),
            2 => {
                let low = self.read_u8()?;
                Ok(((first & 0x3F) as usize) << 8 | low as usize)
            }
            _ => {
                let low = BigEndian::read_u24(self.read_bytes(3)?);
                Ok(((first & 0x3F) as usize) << 24 | low as usize)
            }
        }
    }

    /// Reads a length prefix and returns the span it covers.
    pub fn read_length_prefixed(&mut self) -> Result<&'a [u8], Error> {
        let len = self.read_length_prefix()?;
        self.read_bytes(len)
    }
}
