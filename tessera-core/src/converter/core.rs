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

use crate::buffer::{Allocator, Reader};
use crate::error::Error;

/// Encodes and decodes values of one type.
///
/// A converter offers three framings:
///
/// - [`encode`](Converter::encode) / [`decode`](Converter::decode): the bare
///   body. Only valid when the extent is known to the reader, either because
///   the converter has a fixed [`length`](Converter::length) or because the
///   body runs to the end of the span.
/// - [`encode_with_length_prefix`](Converter::encode_with_length_prefix) /
///   [`decode_with_length_prefix`](Converter::decode_with_length_prefix):
///   the body preceded by a self describing byte count.
/// - [`encode_auto`](Converter::encode_auto) /
///   [`decode_auto`](Converter::decode_auto): the framing used when the value
///   is embedded in a larger stream. Bare for fixed length converters,
///   prefixed otherwise.
///
/// Converters are immutable once built and are shared between threads.
pub trait Converter<T>: Send + Sync + 'static {
    /// `0` for variable length values, otherwise the exact size of every body.
    ///
    /// The value must not change over the lifetime of the converter.
    fn length(&self) -> usize {
        0
    }

    fn encode(&self, allocator: &mut Allocator<'_>, value: &T) -> Result<(), Error>;

    /// Decodes a value from a span holding exactly one body.
    fn decode(&self, span: &[u8]) -> Result<T, Error>;

    #[inline(always)]
    fn encode_auto(&self, allocator: &mut Allocator<'_>, value: &T) -> Result<(), Error> {
        if self.length() > 0 {
            self.encode(allocator, value)
        } else {
            self.encode_with_length_prefix(allocator, value)
        }
    }

    #[inline(always)]
    fn decode_auto(&self, reader: &mut Reader<'_>) -> Result<T, Error> {
        let length = self.length();
        if length > 0 {
            self.decode(reader.read_bytes(length)?)
        } else {
            self.decode_with_length_prefix(reader)
        }
    }

    fn encode_with_length_prefix(
        &self,
        allocator: &mut Allocator<'_>,
        value: &T,
    ) -> Result<(), Error> {
        let length = self.length();
        if length > 0 {
            allocator.append_length_prefix(length)?;
            return self.encode(allocator, value);
        }
        let anchor = allocator.anchor()?;
        self.encode(allocator, value)?;
        allocator.finish_anchor(anchor)
    }

    fn decode_with_length_prefix(&self, reader: &mut Reader<'_>) -> Result<T, Error> {
        let span = reader.read_length_prefixed()?;
        self.decode(span)
    }
}

impl<T: 'static> std::fmt::Debug for dyn Converter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("length", &self.length())
            .finish()
    }
}

/// Fails with [`Error::InsufficientData`] if a fixed length body is shorter than `length`.
#[inline(always)]
pub fn fixed_span(span: &[u8], length: usize) -> Result<&[u8], Error> {
    if span.len() < length {
        return Err(Error::insufficient_data(length, span.len()));
    }
    Ok(&span[..length])
}
