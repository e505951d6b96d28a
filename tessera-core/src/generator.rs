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
use crate::config::Config;
use crate::converter::core::Converter;
use crate::converter::handle::ConverterHandle;
use crate::error::Error;
use crate::resolver::context::GeneratorContext;
use crate::resolver::converter_resolver::ConverterResolver;
use crate::resolver::creator::{builtin_creators, ConverterCreator};
use crate::resolver::pool::Pool;
use crate::types::{Describe, TypeRef};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// Builds, caches and applies converters.
///
/// A generator owns an ordered chain of [`ConverterCreator`]s and a registry
/// holding exactly one converter per type. It is `Send + Sync`; share it
/// between threads with an `Arc` or a `static`.
///
/// ```rust
/// use tessera_core::generator::Generator;
///
/// let generator = Generator::default();
/// let bytes = generator.encode(&vec![1i32, 2, 3]).unwrap();
/// assert_eq!(bytes.len(), 12);
/// let back: Vec<i32> = generator.decode(&bytes).unwrap();
/// assert_eq!(back, vec![1, 2, 3]);
/// ```
pub struct Generator {
    config: Config,
    creators: Vec<Arc<dyn ConverterCreator>>,
    resolver: ConverterResolver,
    allocators: Pool<Allocator<'static>>,
}

impl Default for Generator {
    fn default() -> Self {
        Generator::builder().build()
    }
}

impl Generator {
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::default()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn creators(&self) -> &[Arc<dyn ConverterCreator>] {
        &self.creators
    }

    pub(crate) fn resolver(&self) -> &ConverterResolver {
        &self.resolver
    }

    /// Number of converters resolved or registered so far.
    pub fn converter_count(&self) -> usize {
        self.resolver.len()
    }

    /// Returns the converter of `T`, building it and everything it depends on if needed.
    pub fn get_converter<T: Describe>(&self) -> Result<Arc<dyn Converter<T>>, Error> {
        self.get_converter_handle(TypeRef::of::<T>())
            .and_then(|handle| handle.downcast::<T>())
            .map_err(Error::with_type_name::<T>)
    }

    pub fn get_converter_handle(&self, type_ref: TypeRef) -> Result<ConverterHandle, Error> {
        if let Some(handle) = self.resolver.get(type_ref.type_id) {
            return Ok(handle);
        }
        let _guard = self.resolver.build_lock();
        if let Some(handle) = self.resolver.get(type_ref.type_id) {
            return Ok(handle);
        }
        let mut context = GeneratorContext::new(self);
        let handle = context.get_converter_handle(type_ref)?;
        self.resolver.publish(context.into_created());
        Ok(handle)
    }

    /// Resolves `T` ahead of time, making it reachable through [`Generator::encode_any`]
    /// and [`Generator::decode_any`].
    pub fn register<T: Describe>(&self) -> Result<(), Error> {
        self.get_converter::<T>().map(|_| ())
    }

    pub fn encode<T: Describe>(&self, value: &T) -> Result<Vec<u8>, Error> {
        let converter = self.get_converter::<T>()?;
        self.allocators.borrow_mut(|allocator| {
            allocator.clear();
            let result = converter
                .encode(allocator, value)
                .map(|_| allocator.as_slice().to_vec());
            allocator.clear();
            result
        })
    }

    /// Appends the encoding of `value` to a caller supplied allocator.
    pub fn encode_to<T: Describe>(
        &self,
        allocator: &mut Allocator<'_>,
        value: &T,
    ) -> Result<(), Error> {
        self.get_converter::<T>()?.encode(allocator, value)
    }

    pub fn decode<T: Describe>(&self, span: &[u8]) -> Result<T, Error> {
        self.get_converter::<T>()?.decode(span)
    }

    fn resolved(&self, type_id: TypeId) -> Result<ConverterHandle, Error> {
        self.resolver.get(type_id).ok_or_else(|| {
            Error::unsupported_type(format!(
                "no converter resolved for {:?}; register the type first",
                type_id
            ))
        })
    }

    /// Encodes a value whose type was already resolved or registered.
    pub fn encode_any(&self, value: &dyn Any) -> Result<Vec<u8>, Error> {
        let handle = self.resolved(Any::type_id(value))?;
        self.allocators.borrow_mut(|allocator| {
            allocator.clear();
            let result = handle
                .dynamic()
                .encode_any(allocator, value)
                .map(|_| allocator.as_slice().to_vec());
            allocator.clear();
            result
        })
    }

    pub fn decode_any(&self, type_id: TypeId, span: &[u8]) -> Result<Box<dyn Any + Send>, Error> {
        self.resolved(type_id)?.dynamic().decode_any(span)
    }
}

/// Configures and builds a [`Generator`].
#[derive(Default)]
pub struct GeneratorBuilder {
    config: Config,
    creators: Vec<Arc<dyn ConverterCreator>>,
    converters: HashMap<TypeId, ConverterHandle>,
}

impl GeneratorBuilder {
    /// Ceiling for the allocators used by [`Generator::encode`].
    pub fn max_capacity(mut self, max_capacity: usize) -> Self {
        self.config.max_capacity = max_capacity;
        self
    }

    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.config.initial_capacity = initial_capacity;
        self
    }

    /// Adds a creator consulted before the built-in ones, after any creator added earlier.
    pub fn add_creator<C: ConverterCreator + 'static>(mut self, creator: C) -> Self {
        self.creators.push(Arc::new(creator));
        self
    }

    /// Uses `converter` for `T` instead of resolving one, including when `T`
    /// is nested inside other types.
    pub fn add_converter<T, C>(mut self, converter: C) -> Self
    where
        T: Send + Sync + 'static,
        C: Converter<T>,
    {
        let handle = ConverterHandle::from_converter::<T, C>(converter);
        self.converters.insert(handle.type_id(), handle);
        self
    }

    pub fn build(self) -> Generator {
        let mut creators = self.creators;
        creators.extend(builtin_creators());
        let initial_capacity = self.config.initial_capacity();
        let max_capacity = self.config.max_capacity();
        Generator {
            config: self.config,
            creators,
            resolver: ConverterResolver::new(self.converters),
            allocators: Pool::new(move || {
                Allocator::with_max_capacity(initial_capacity, max_capacity)
            }),
        }
    }
}
