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
use crate::converter::core::Converter;
use crate::converter::handle::ConverterHandle;
use crate::error::Error;
use crate::types::{Describe, TypeDescriptor, TypeKind, TypeRef, WrapperShape};
use std::sync::Arc;

/// Owning pointers that encode exactly like their target.
pub trait Pointer: Sized + Send + Sync + 'static {
    type Target: Describe;

    fn target(&self) -> &Self::Target;

    fn wrap(target: Self::Target) -> Self;
}

impl<T: Describe> Pointer for Box<T> {
    type Target = T;

    fn target(&self) -> &T {
        self
    }

    fn wrap(target: T) -> Self {
        Box::new(target)
    }
}

impl<T: Describe> Pointer for Arc<T> {
    type Target = T;

    fn target(&self) -> &T {
        self
    }

    fn wrap(target: T) -> Self {
        Arc::new(target)
    }
}

pub struct PointerConverter<P: Pointer> {
    inner: Arc<dyn Converter<P::Target>>,
}

impl<P: Pointer> Converter<P> for PointerConverter<P> {
    fn length(&self) -> usize {
        self.inner.length()
    }

    fn encode(&self, allocator: &mut Allocator<'_>, value: &P) -> Result<(), Error> {
        self.inner.encode(allocator, value.target())
    }

    fn decode(&self, span: &[u8]) -> Result<P, Error> {
        Ok(P::wrap(self.inner.decode(span)?))
    }
}

fn build_pointer<P: Pointer>(inner: ConverterHandle) -> Result<ConverterHandle, Error> {
    let converter = PointerConverter::<P> {
        inner: inner.downcast::<P::Target>()?,
    };
    Ok(ConverterHandle::from_converter::<P, _>(converter).with_semantics(inner.semantics()))
}

impl<T: Describe> Describe for Box<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new::<Self>(TypeKind::Pointer(WrapperShape {
            inner: TypeRef::of::<T>(),
            build: build_pointer::<Self>,
        }))
    }
}

impl<T: Describe> Describe for Arc<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new::<Self>(TypeKind::Pointer(WrapperShape {
            inner: TypeRef::of::<T>(),
            build: build_pointer::<Self>,
        }))
    }
}
