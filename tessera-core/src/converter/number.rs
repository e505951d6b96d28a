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

use crate::buffer::Allocator;
use crate::converter::core::{fixed_span, Converter};
use crate::error::Error;
use crate::types::{Describe, TypeDescriptor, TypeKind};
use byteorder::{ByteOrder, LittleEndian};
use std::marker::PhantomData;

/// Stateless converter for the built-in leaf types.
pub struct PrimitiveConverter<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> PrimitiveConverter<T> {
    pub const fn new() -> Self {
        PrimitiveConverter {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for PrimitiveConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[inline(always)]
fn read_u8(bytes: &[u8]) -> u8 {
    bytes[0]
}

#[inline(always)]
fn read_i8(bytes: &[u8]) -> i8 {
    bytes[0] as i8
}

macro_rules! impl_number_converter {
    ($ty:ty, $size:expr, $write:ident, $read:path) => {
        impl Converter<$ty> for PrimitiveConverter<$ty> {
            #[inline(always)]
            fn length(&self) -> usize {
                $size
            }

            #[inline(always)]
            fn encode(&self, allocator: &mut Allocator<'_>, value: &$ty) -> Result<(), Error> {
                allocator.$write(*value)
            }

            #[inline(always)]
            fn decode(&self, span: &[u8]) -> Result<$ty, Error> {
                Ok($read(fixed_span(span, $size)?))
            }
        }

        impl Describe for $ty {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::new::<$ty>(TypeKind::Primitive)
            }
        }
    };
}

impl_number_converter!(u8, 1, write_u8, read_u8);
impl_number_converter!(i8, 1, write_i8, read_i8);
impl_number_converter!(u16, 2, write_u16, LittleEndian::read_u16);
impl_number_converter!(i16, 2, write_i16, LittleEndian::read_i16);
impl_number_converter!(u32, 4, write_u32, LittleEndian::read_u32);
impl_number_converter!(i32, 4, write_i32, LittleEndian::read_i32);
impl_number_converter!(u64, 8, write_u64, LittleEndian::read_u64);
impl_number_converter!(i64, 8, write_i64, LittleEndian::read_i64);
impl_number_converter!(u128, 16, write_u128, LittleEndian::read_u128);
impl_number_converter!(i128, 16, write_i128, LittleEndian::read_i128);
impl_number_converter!(f32, 4, write_f32, LittleEndian::read_f32);
impl_number_converter!(f64, 8, write_f64, LittleEndian::read_f64);

impl Converter<bool> for PrimitiveConverter<bool> {
    fn length(&self) -> usize {
        1
    }

    fn encode(&self, allocator: &mut Allocator<'_>, value: &bool) -> Result<(), Error> {
        allocator.write_u8(*value as u8)
    }

    fn decode(&self, span: &[u8]) -> Result<bool, Error> {
        match fixed_span(span, 1)?[0] {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(Error::invalid_data(format!("invalid bool value {}", other))),
        }
    }
}

impl Converter<char> for PrimitiveConverter<char> {
    fn length(&self) -> usize {
        4
    }

    fn encode(&self, allocator: &mut Allocator<'_>, value: &char) -> Result<(), Error> {
        allocator.write_u32(*value as u32)
    }

    fn decode(&self, span: &[u8]) -> Result<char, Error> {
        let scalar = LittleEndian::read_u32(fixed_span(span, 4)?);
        char::from_u32(scalar)
            .ok_or_else(|| Error::invalid_data(format!("invalid char scalar {:#x}", scalar)))
    }
}

// Pointer sized integers always travel as 64 bits.
impl Converter<usize> for PrimitiveConverter<usize> {
    fn length(&self) -> usize {
        8
    }

    fn encode(&self, allocator: &mut Allocator<'_>, value: &usize) -> Result<(), Error> {
        allocator.write_u64(*value as u64)
    }

    fn decode(&self, span: &[u8]) -> Result<usize, Error> {
        let value = LittleEndian::read_u64(fixed_span(span, 8)?);
        usize::try_from(value)
            .map_err(|_| Error::invalid_data(format!("{} does not fit in usize", value)))
    }
}

impl Converter<isize> for PrimitiveConverter<isize> {
    fn length(&self) -> usize {
        8
    }

    fn encode(&self, allocator: &mut Allocator<'_>, value: &isize) -> Result<(), Error> {
        allocator.write_i64(*value as i64)
    }

    fn decode(&self, span: &[u8]) -> Result<isize, Error> {
        let value = LittleEndian::read_i64(fixed_span(span, 8)?);
        isize::try_from(value)
            .map_err(|_| Error::invalid_data(format!("{} does not fit in isize", value)))
    }
}

describe_primitive!(bool, char, usize, isize);
