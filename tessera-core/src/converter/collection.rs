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

//! Sequence strategies shared by every collection converter.

use crate::buffer::{Allocator, Reader};
use crate::converter::core::Converter;
use crate::converter::handle::ConverterHandle;
use crate::ensure;
use crate::error::Error;
use std::marker::PhantomData;
use std::mem;
use std::sync::Arc;

/// Non-contiguous collections at or below this size are encoded element by
/// element even when a bulk copy is available.
pub const SMALL_COLLECTION_THRESHOLD: usize = 8;

const INITIAL_DECODE_CAPACITY: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceStrategy {
    /// One memory copy of the whole element array.
    Raw,
    /// Elements of identical size, no framing.
    Fixed,
    /// Every element carries its own length prefix.
    Variable,
}

/// Encodes and decodes a run of elements of type `E` with one strategy.
pub trait SequenceAdapter<E>: Send + Sync {
    fn strategy(&self) -> SequenceStrategy;

    fn encode_slice(&self, allocator: &mut Allocator<'_>, items: &[E]) -> Result<(), Error>;

    /// `count` must equal the number of items the iterator yields.
    fn encode_iter<'a>(
        &self,
        allocator: &mut Allocator<'_>,
        count: usize,
        items: &mut dyn Iterator<Item = &'a E>,
    ) -> Result<(), Error>
    where
        E: 'a;

    fn decode(&self, span: &[u8]) -> Result<Vec<E>, Error>;
}

/// Picks the strategy for elements served by `element`.
pub fn select_adapter<E: Send + Sync + 'static>(
    element: &ConverterHandle,
) -> Result<Arc<dyn SequenceAdapter<E>>, Error> {
    if let Some(raw) = element.raw_adapter::<E>() {
        return Ok(raw);
    }
    let converter = element.downcast::<E>()?;
    let length = converter.length();
    if length > 0 {
        Ok(Arc::new(FixedAdapter { converter, length }))
    } else {
        Ok(Arc::new(VariableAdapter { converter }))
    }
}

/// Numeric primitives whose in-memory layout is their little-endian wire
/// layout on little-endian targets.
///
/// # Safety
///
/// Every bit pattern of `Self` must be a valid value and the type must have
/// no padding.
pub unsafe trait RawElement: Copy + Send + Sync + 'static {}

macro_rules! impl_raw_element {
    ($($ty:ty),+) => {
        $(unsafe impl RawElement for $ty {})+
    };
}

impl_raw_element!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, f32, f64);

#[derive(Default)]
pub struct RawAdapter<E> {
    _marker: PhantomData<fn() -> E>,
}

impl<E> RawAdapter<E> {
    pub fn new() -> Self {
        RawAdapter {
            _marker: PhantomData,
        }
    }
}

impl<E: RawElement> SequenceAdapter<E> for RawAdapter<E> {
    fn strategy(&self) -> SequenceStrategy {
        SequenceStrategy::Raw
    }

    #[inline(always)]
    fn encode_slice(&self, allocator: &mut Allocator<'_>, items: &[E]) -> Result<(), Error> {
        let size = mem::size_of_val(items);
        // SAFETY: `E: RawElement` has no padding, so the slice is `size` initialized bytes.
        let bytes = unsafe { std::slice::from_raw_parts(items.as_ptr() as *const u8, size) };
        allocator.append(bytes)
    }

    fn encode_iter<'a>(
        &self,
        allocator: &mut Allocator<'_>,
        count: usize,
        items: &mut dyn Iterator<Item = &'a E>,
    ) -> Result<(), Error>
    where
        E: 'a,
    {
        if count <= SMALL_COLLECTION_THRESHOLD {
            allocator.ensure(count * mem::size_of::<E>())?;
            for item in items {
                self.encode_slice(allocator, std::slice::from_ref(item))?;
            }
            return Ok(());
        }
        let mut contiguous = Vec::with_capacity(count);
        contiguous.extend(items.copied());
        self.encode_slice(allocator, &contiguous)
    }

    fn decode(&self, span: &[u8]) -> Result<Vec<E>, Error> {
        let size = mem::size_of::<E>();
        ensure!(
            span.len() % size == 0,
            Error::invalid_data(format!(
                "span of {} bytes is not a multiple of the {} byte element size",
                span.len(),
                size
            ))
        );
        let count = span.len() / size;
        let mut items = Vec::<E>::with_capacity(count);
        // SAFETY: capacity holds `count` elements, the source is exactly
        // `count * size` bytes and every bit pattern of `E` is valid.
        unsafe {
            std::ptr::copy_nonoverlapping(span.as_ptr(), items.as_mut_ptr() as *mut u8, span.len());
            items.set_len(count);
        }
        Ok(items)
    }
}

pub struct FixedAdapter<E: 'static> {
    converter: Arc<dyn Converter<E>>,
    length: usize,
}

impl<E: 'static> FixedAdapter<E> {
    /// Fails unless `converter` has a fixed length.
    pub fn new(converter: Arc<dyn Converter<E>>) -> Result<Self, Error> {
        let length = converter.length();
        ensure!(
            length > 0,
            Error::type_error("fixed stride requires a fixed length element converter")
        );
        Ok(FixedAdapter { converter, length })
    }
}

impl<E: 'static> SequenceAdapter<E> for FixedAdapter<E> {
    fn strategy(&self) -> SequenceStrategy {
        SequenceStrategy::Fixed
    }

    fn encode_slice(&self, allocator: &mut Allocator<'_>, items: &[E]) -> Result<(), Error> {
        self.encode_iter(allocator, items.len(), &mut items.iter())
    }

    fn encode_iter<'a>(
        &self,
        allocator: &mut Allocator<'_>,
        count: usize,
        items: &mut dyn Iterator<Item = &'a E>,
    ) -> Result<(), Error>
    where
        E: 'a,
    {
        allocator.ensure(count.saturating_mul(self.length))?;
        for item in items {
            self.converter.encode(allocator, item)?;
        }
        Ok(())
    }

    fn decode(&self, span: &[u8]) -> Result<Vec<E>, Error> {
        ensure!(
            span.len() % self.length == 0,
            Error::invalid_data(format!(
                "span of {} bytes is not a multiple of the {} byte element length",
                span.len(),
                self.length
            ))
        );
        span.chunks_exact(self.length)
            .map(|chunk| self.converter.decode(chunk))
            .collect()
    }
}

pub struct VariableAdapter<E: 'static> {
    converter: Arc<dyn Converter<E>>,
}

impl<E: 'static> VariableAdapter<E> {
    pub fn new(converter: Arc<dyn Converter<E>>) -> Self {
        VariableAdapter { converter }
    }
}

impl<E: 'static> SequenceAdapter<E> for VariableAdapter<E> {
    fn strategy(&self) -> SequenceStrategy {
        SequenceStrategy::Variable
    }

    fn encode_slice(&self, allocator: &mut Allocator<'_>, items: &[E]) -> Result<(), Error> {
        for item in items {
            self.converter.encode_auto(allocator, item)?;
        }
        Ok(())
    }

    fn encode_iter<'a>(
        &self,
        allocator: &mut Allocator<'_>,
        _count: usize,
        items: &mut dyn Iterator<Item = &'a E>,
    ) -> Result<(), Error>
    where
        E: 'a,
    {
        for item in items {
            self.converter.encode_auto(allocator, item)?;
        }
        Ok(())
    }

    fn decode(&self, span: &[u8]) -> Result<Vec<E>, Error> {
        let mut reader = Reader::new(span);
        let mut items = Vec::with_capacity(INITIAL_DECODE_CAPACITY);
        while !reader.is_empty() {
            items.push(self.converter.decode_auto(&mut reader)?);
        }
        Ok(items)
    }
}
