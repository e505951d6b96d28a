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
use crate::converter::collection::SequenceAdapter;
use crate::converter::core::Converter;
use crate::error::Error;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Encode/decode through `dyn Any`, for callers that only know a `TypeId`.
pub trait AnyConverter: Send + Sync {
    fn length(&self) -> usize;

    fn type_name(&self) -> &'static str;

    fn encode_any(&self, allocator: &mut Allocator<'_>, value: &dyn Any) -> Result<(), Error>;

    fn decode_any(&self, span: &[u8]) -> Result<Box<dyn Any + Send>, Error>;
}

struct Erased<T: 'static> {
    inner: Arc<dyn Converter<T>>,
}

impl<T: Send + 'static> AnyConverter for Erased<T> {
    fn length(&self) -> usize {
        self.inner.length()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn encode_any(&self, allocator: &mut Allocator<'_>, value: &dyn Any) -> Result<(), Error> {
        let value = value.downcast_ref::<T>().ok_or_else(|| {
            Error::type_error(format!(
                "value passed to the converter of {} has a different type",
                std::any::type_name::<T>()
            ))
        })?;
        self.inner.encode(allocator, value)
    }

    fn decode_any(&self, span: &[u8]) -> Result<Box<dyn Any + Send>, Error> {
        Ok(Box::new(self.inner.decode(span)?))
    }
}

/// How an `Option` of the type treats `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Semantics {
    Value,
    /// Tuple-like object with reference semantics: null is not encodable.
    ReferenceTuple,
}

/// Type erased registry entry for the converter of one type.
///
/// Cloning a handle shares the converter instance.
#[derive(Clone)]
pub struct ConverterHandle {
    type_id: TypeId,
    type_name: &'static str,
    length: usize,
    semantics: Semantics,
    // Holds an `Arc<dyn Converter<T>>`.
    typed: Arc<dyn Any + Send + Sync>,
    dynamic: Arc<dyn AnyConverter>,
    // Holds an `Arc<dyn SequenceAdapter<T>>` for bulk copyable primitives.
    raw: Option<Arc<dyn Any + Send + Sync>>,
}

impl ConverterHandle {
    pub fn new<T: Send + Sync + 'static>(converter: Arc<dyn Converter<T>>) -> ConverterHandle {
        ConverterHandle {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            length: converter.length(),
            semantics: Semantics::Value,
            dynamic: Arc::new(Erased {
                inner: converter.clone(),
            }),
            typed: Arc::new(converter),
            raw: None,
        }
    }

    pub fn from_converter<T: Send + Sync + 'static, C: Converter<T>>(
        converter: C,
    ) -> ConverterHandle {
        ConverterHandle::new::<T>(Arc::new(converter))
    }

    pub(crate) fn with_semantics(mut self, semantics: Semantics) -> ConverterHandle {
        self.semantics = semantics;
        self
    }

    pub(crate) fn with_raw_adapter<T: 'static>(
        mut self,
        adapter: Arc<dyn SequenceAdapter<T>>,
    ) -> ConverterHandle {
        self.raw = Some(Arc::new(adapter));
        self
    }

    #[inline(always)]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline(always)]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline(always)]
    pub fn length(&self) -> usize {
        self.length
    }

    #[inline(always)]
    pub fn semantics(&self) -> Semantics {
        self.semantics
    }

    pub fn dynamic(&self) -> &Arc<dyn AnyConverter> {
        &self.dynamic
    }

    /// Returns the typed converter, or a [`Error::TypeError`] if the handle belongs to another type.
    pub fn downcast<T: 'static>(&self) -> Result<Arc<dyn Converter<T>>, Error> {
        self.typed
            .downcast_ref::<Arc<dyn Converter<T>>>()
            .cloned()
            .ok_or_else(|| {
                Error::type_error(format!(
                    "converter of {} requested as converter of {}",
                    self.type_name,
                    std::any::type_name::<T>()
                ))
            })
    }

    pub(crate) fn raw_adapter<T: 'static>(&self) -> Option<Arc<dyn SequenceAdapter<T>>> {
        self.raw
            .as_ref()?
            .downcast_ref::<Arc<dyn SequenceAdapter<T>>>()
            .cloned()
    }

    pub fn ptr_eq(&self, other: &ConverterHandle) -> bool {
        Arc::ptr_eq(&self.typed, &other.typed)
    }
}

impl fmt::Debug for ConverterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterHandle")
            .field("type_name", &self.type_name)
            .field("length", &self.length)
            .field("semantics", &self.semantics)
            .finish()
    }
}
