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
use crate::converter::collection::{select_adapter, SequenceAdapter, SequenceStrategy};
use crate::converter::core::Converter;
use crate::converter::handle::ConverterHandle;
use crate::error::Error;
use crate::types::{Describe, TypeDescriptor, TypeKind, TypeRef, WrapperShape};
use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};
use std::hash::Hash;
use std::sync::Arc;

/// A collection encoded as the bare run of its elements.
pub trait Sequence: Sized + Send + Sync + 'static {
    type Item: Describe;

    fn encode_items(
        &self,
        adapter: &dyn SequenceAdapter<Self::Item>,
        allocator: &mut Allocator<'_>,
    ) -> Result<(), Error>;

    fn from_items(items: Vec<Self::Item>) -> Result<Self, Error>;
}

impl<T: Describe> Sequence for Vec<T> {
    type Item = T;

    fn encode_items(
        &self,
        adapter: &dyn SequenceAdapter<T>,
        allocator: &mut Allocator<'_>,
    ) -> Result<(), Error> {
        adapter.encode_slice(allocator, self)
    }

    fn from_items(items: Vec<T>) -> Result<Self, Error> {
        Ok(items)
    }
}

impl<T: Describe> Sequence for Box<[T]> {
    type Item = T;

    fn encode_items(
        &self,
        adapter: &dyn SequenceAdapter<T>,
        allocator: &mut Allocator<'_>,
    ) -> Result<(), Error> {
        adapter.encode_slice(allocator, self)
    }

    fn from_items(items: Vec<T>) -> Result<Self, Error> {
        Ok(items.into_boxed_slice())
    }
}

impl<T: Describe, const N: usize> Sequence for [T; N] {
    type Item = T;

    fn encode_items(
        &self,
        adapter: &dyn SequenceAdapter<T>,
        allocator: &mut Allocator<'_>,
    ) -> Result<(), Error> {
        adapter.encode_slice(allocator, self)
    }

    fn from_items(items: Vec<T>) -> Result<Self, Error> {
        <[T; N]>::try_from(items).map_err(|items| {
            Error::invalid_data(format!(
                "expected an array of {} elements, got {}",
                N,
                items.len()
            ))
        })
    }
}

impl<T: Describe> Sequence for VecDeque<T> {
    type Item = T;

    fn encode_items(
        &self,
        adapter: &dyn SequenceAdapter<T>,
        allocator: &mut Allocator<'_>,
    ) -> Result<(), Error> {
        let (front, back) = self.as_slices();
        adapter.encode_slice(allocator, front)?;
        adapter.encode_slice(allocator, back)
    }

    fn from_items(items: Vec<T>) -> Result<Self, Error> {
        Ok(VecDeque::from(items))
    }
}

impl<T: Describe> Sequence for LinkedList<T> {
    type Item = T;

    fn encode_items(
        &self,
        adapter: &dyn SequenceAdapter<T>,
        allocator: &mut Allocator<'_>,
    ) -> Result<(), Error> {
        adapter.encode_iter(allocator, self.len(), &mut self.iter())
    }

    fn from_items(items: Vec<T>) -> Result<Self, Error> {
        Ok(items.into_iter().collect())
    }
}

impl<T: Describe + Eq + Hash> Sequence for HashSet<T> {
    type Item = T;

    fn encode_items(
        &self,
        adapter: &dyn SequenceAdapter<T>,
        allocator: &mut Allocator<'_>,
    ) -> Result<(), Error> {
        adapter.encode_iter(allocator, self.len(), &mut self.iter())
    }

    fn from_items(items: Vec<T>) -> Result<Self, Error> {
        Ok(items.into_iter().collect())
    }
}

impl<T: Describe + Ord> Sequence for BTreeSet<T> {
    type Item = T;

    fn encode_items(
        &self,
        adapter: &dyn SequenceAdapter<T>,
        allocator: &mut Allocator<'_>,
    ) -> Result<(), Error> {
        adapter.encode_iter(allocator, self.len(), &mut self.iter())
    }

    fn from_items(items: Vec<T>) -> Result<Self, Error> {
        Ok(items.into_iter().collect())
    }
}

/// Variable length converter for any [`Sequence`]. An empty collection
/// encodes to an empty body.
pub struct SequenceConverter<S: Sequence> {
    adapter: Arc<dyn SequenceAdapter<S::Item>>,
}

impl<S: Sequence> SequenceConverter<S> {
    pub fn new(adapter: Arc<dyn SequenceAdapter<S::Item>>) -> Self {
        SequenceConverter { adapter }
    }

    pub fn strategy(&self) -> SequenceStrategy {
        self.adapter.strategy()
    }
}

impl<S: Sequence> Converter<S> for SequenceConverter<S> {
    #[inline(always)]
    fn encode(&self, allocator: &mut Allocator<'_>, value: &S) -> Result<(), Error> {
        value.encode_items(&*self.adapter, allocator)
    }

    #[inline(always)]
    fn decode(&self, span: &[u8]) -> Result<S, Error> {
        S::from_items(self.adapter.decode(span)?)
    }
}

fn build_sequence<S: Sequence>(element: ConverterHandle) -> Result<ConverterHandle, Error> {
    let adapter = select_adapter::<S::Item>(&element)?;
    tracing::debug!(
        sequence = std::any::type_name::<S>(),
        strategy = ?adapter.strategy(),
        "sequence strategy selected"
    );
    Ok(ConverterHandle::from_converter::<S, _>(
        SequenceConverter::<S>::new(adapter),
    ))
}

fn describe_sequence<S: Sequence>() -> TypeDescriptor {
    TypeDescriptor::new::<S>(TypeKind::Sequence(WrapperShape {
        inner: TypeRef::of::<S::Item>(),
        build: build_sequence::<S>,
    }))
}

impl<T: Describe> Describe for Vec<T> {
    fn describe() -> TypeDescriptor {
        describe_sequence::<Self>()
    }
}

impl<T: Describe> Describe for Box<[T]> {
    fn describe() -> TypeDescriptor {
        describe_sequence::<Self>()
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> TypeDescriptor {
        describe_sequence::<Self>()
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn describe() -> TypeDescriptor {
        describe_sequence::<Self>()
    }
}

impl<T: Describe> Describe for LinkedList<T> {
    fn describe() -> TypeDescriptor {
        describe_sequence::<Self>()
    }
}

impl<T: Describe + Eq + Hash> Describe for HashSet<T> {
    fn describe() -> TypeDescriptor {
        describe_sequence::<Self>()
    }
}

impl<T: Describe + Ord> Describe for BTreeSet<T> {
    fn describe() -> TypeDescriptor {
        describe_sequence::<Self>()
    }
}
