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
use crate::converter::core::Converter;
use crate::converter::handle::ConverterHandle;
use crate::ensure;
use crate::error::Error;
use crate::types::{Describe, MapShape, TypeDescriptor, TypeKind, TypeRef};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::sync::Arc;

const INITIAL_MAP_CAPACITY: usize = 8;

pub trait MapLike: Sized + Send + Sync + 'static {
    type Key: Describe;
    type Value: Describe;

    fn entry_count(&self) -> usize;

    fn try_for_each_entry(
        &self,
        f: &mut dyn FnMut(&Self::Key, &Self::Value) -> Result<(), Error>,
    ) -> Result<(), Error>;

    fn with_capacity(capacity: usize) -> Self;

    /// Replaces any previous value of `key`.
    fn insert_entry(&mut self, key: Self::Key, value: Self::Value);
}

impl<K: Describe + Eq + Hash, V: Describe> MapLike for HashMap<K, V> {
    type Key = K;
    type Value = V;

    fn entry_count(&self) -> usize {
        self.len()
    }

    fn try_for_each_entry(
        &self,
        f: &mut dyn FnMut(&K, &V) -> Result<(), Error>,
    ) -> Result<(), Error> {
        self.iter().try_for_each(|(k, v)| f(k, v))
    }

    fn with_capacity(capacity: usize) -> Self {
        HashMap::with_capacity(capacity)
    }

    fn insert_entry(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

impl<K: Describe + Ord, V: Describe> MapLike for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn entry_count(&self) -> usize {
        self.len()
    }

    fn try_for_each_entry(
        &self,
        f: &mut dyn FnMut(&K, &V) -> Result<(), Error>,
    ) -> Result<(), Error> {
        self.iter().try_for_each(|(k, v)| f(k, v))
    }

    fn with_capacity(_capacity: usize) -> Self {
        BTreeMap::new()
    }

    fn insert_entry(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

/// Entries are `(key, value)` pairs, each half framed with `encode_auto`.
/// Fixed-stride when both halves are fixed, variable otherwise.
pub struct MapConverter<M: MapLike> {
    key: Arc<dyn Converter<M::Key>>,
    value: Arc<dyn Converter<M::Value>>,
    pair_length: usize,
}

impl<M: MapLike> Converter<M> for MapConverter<M> {
    fn encode(&self, allocator: &mut Allocator<'_>, map: &M) -> Result<(), Error> {
        if self.pair_length > 0 {
            allocator.ensure(map.entry_count().saturating_mul(self.pair_length))?;
        }
        map.try_for_each_entry(&mut |key: &M::Key, value: &M::Value| {
            self.key.encode_auto(allocator, key)?;
            self.value.encode_auto(allocator, value)
        })
    }

    fn decode(&self, span: &[u8]) -> Result<M, Error> {
        let capacity = if self.pair_length > 0 {
            ensure!(
                span.len() % self.pair_length == 0,
                Error::invalid_data(format!(
                    "span of {} bytes is not a multiple of the {} byte entry length",
                    span.len(),
                    self.pair_length
                ))
            );
            span.len() / self.pair_length
        } else {
            INITIAL_MAP_CAPACITY
        };
        let mut map = M::with_capacity(capacity);
        let mut reader = Reader::new(span);
        while !reader.is_empty() {
            let key = self.key.decode_auto(&mut reader)?;
            let value = self.value.decode_auto(&mut reader)?;
            map.insert_entry(key, value);
        }
        Ok(map)
    }
}

fn build_map<M: MapLike>(
    key: ConverterHandle,
    value: ConverterHandle,
) -> Result<ConverterHandle, Error> {
    let pair_length = if key.length() > 0 && value.length() > 0 {
        key.length() + value.length()
    } else {
        0
    };
    let converter = MapConverter::<M> {
        key: key.downcast::<M::Key>()?,
        value: value.downcast::<M::Value>()?,
        pair_length,
    };
    Ok(ConverterHandle::from_converter::<M, _>(converter))
}

fn describe_map<M: MapLike>() -> TypeDescriptor {
    TypeDescriptor::new::<M>(TypeKind::Map(MapShape {
        key: TypeRef::of::<M::Key>(),
        value: TypeRef::of::<M::Value>(),
        build: build_map::<M>,
    }))
}

impl<K: Describe + Eq + Hash, V: Describe> Describe for HashMap<K, V> {
    fn describe() -> TypeDescriptor {
        describe_map::<Self>()
    }
}

impl<K: Describe + Ord, V: Describe> Describe for BTreeMap<K, V> {
    fn describe() -> TypeDescriptor {
        describe_map::<Self>()
    }
}
