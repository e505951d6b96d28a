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

use crate::bail;
use crate::buffer::Allocator;
use crate::converter::core::Converter;
use crate::converter::handle::{ConverterHandle, Semantics};
use crate::error::Error;
use crate::types::{Describe, TypeDescriptor, TypeKind, TypeRef, WrapperShape};
use std::sync::Arc;

const NONE_TAG: u8 = 0;
const SOME_TAG: u8 = 1;

/// One tag byte, followed by the bare body of the value when present.
pub struct OptionConverter<T: 'static> {
    inner: Arc<dyn Converter<T>>,
}

impl<T: Send + Sync + 'static> Converter<Option<T>> for OptionConverter<T> {
    fn encode(&self, allocator: &mut Allocator<'_>, value: &Option<T>) -> Result<(), Error> {
        match value {
            None => allocator.write_u8(NONE_TAG),
            Some(v) => {
                allocator.write_u8(SOME_TAG)?;
                self.inner.encode(allocator, v)
            }
        }
    }

    fn decode(&self, span: &[u8]) -> Result<Option<T>, Error> {
        let Some((&tag, body)) = span.split_first() else {
            return Err(Error::insufficient_data(1, 0));
        };
        match tag {
            NONE_TAG => Ok(None),
            SOME_TAG => Ok(Some(self.inner.decode(body)?)),
            other => bail!("invalid option tag {}", other),
        }
    }
}

/// `Option` of a reference tuple object: no tag, `None` cannot be encoded.
pub struct NonNullConverter<T: 'static> {
    inner: Arc<dyn Converter<T>>,
}

impl<T: Send + Sync + 'static> Converter<Option<T>> for NonNullConverter<T> {
    fn length(&self) -> usize {
        self.inner.length()
    }

    fn encode(&self, allocator: &mut Allocator<'_>, value: &Option<T>) -> Result<(), Error> {
        match value {
            Some(v) => self.inner.encode(allocator, v),
            None => Err(Error::null_forbidden(std::any::type_name::<T>())),
        }
    }

    fn decode(&self, span: &[u8]) -> Result<Option<T>, Error> {
        Ok(Some(self.inner.decode(span)?))
    }
}

fn build_option<T: Describe>(inner: ConverterHandle) -> Result<ConverterHandle, Error> {
    let converter = inner.downcast::<T>()?;
    Ok(match inner.semantics() {
        Semantics::ReferenceTuple => ConverterHandle::from_converter::<Option<T>, _>(
            NonNullConverter { inner: converter },
        ),
        Semantics::Value => {
            ConverterHandle::from_converter::<Option<T>, _>(OptionConverter { inner: converter })
        }
    })
}

impl<T: Describe> Describe for Option<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new::<Self>(TypeKind::Nullable(WrapperShape {
            inner: TypeRef::of::<T>(),
            build: build_option::<T>,
        }))
    }
}
