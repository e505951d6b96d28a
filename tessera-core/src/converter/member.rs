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

//! Accessors binding aggregate members to their converters.

use crate::buffer::{Allocator, Reader};
use crate::converter::core::Converter;
use crate::converter::handle::ConverterHandle;
use crate::error::Error;
use std::sync::Arc;

pub(crate) type Getter<T, M> = Arc<dyn Fn(&T) -> Option<&M> + Send + Sync>;
pub(crate) type Setter<T, M> = Arc<dyn Fn(&mut T, M) + Send + Sync>;

/// Builds the codec of one member once its converter is resolved.
pub(crate) type Binder<T> =
    Box<dyn Fn(&ConverterHandle) -> Result<Box<dyn MemberCodec<T>>, Error> + Send + Sync>;

pub(crate) fn getter<T, M, F>(f: F) -> Getter<T, M>
where
    F: Fn(&T) -> Option<&M> + Send + Sync + 'static,
{
    Arc::new(f)
}

pub(crate) fn setter<T, M, F>(f: F) -> Setter<T, M>
where
    F: Fn(&mut T, M) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Reads and writes one member of an aggregate `T`.
pub(crate) trait MemberCodec<T>: Send + Sync {
    fn length(&self) -> usize;

    /// Positional members are always present.
    fn encode_positional(&self, allocator: &mut Allocator<'_>, value: &T) -> Result<(), Error>;

    fn decode_positional(&self, reader: &mut Reader<'_>, target: &mut T) -> Result<(), Error>;

    /// Writes `prefixed_key` and the length-prefixed value, or nothing for an absent member.
    fn encode_keyed(
        &self,
        allocator: &mut Allocator<'_>,
        prefixed_key: &[u8],
        value: &T,
    ) -> Result<(), Error>;

    fn decode_keyed(&self, span: &[u8], target: &mut T) -> Result<(), Error>;
}

struct BoundMember<T, M: 'static> {
    get: Getter<T, M>,
    set: Setter<T, M>,
    converter: Arc<dyn Converter<M>>,
    owner: &'static str,
}

impl<T: 'static, M: 'static> MemberCodec<T> for BoundMember<T, M> {
    fn length(&self) -> usize {
        self.converter.length()
    }

    fn encode_positional(&self, allocator: &mut Allocator<'_>, value: &T) -> Result<(), Error> {
        match (self.get)(value) {
            Some(member) => self.converter.encode_auto(allocator, member),
            None => Err(Error::null_forbidden(self.owner)),
        }
    }

    fn decode_positional(&self, reader: &mut Reader<'_>, target: &mut T) -> Result<(), Error> {
        let member = self.converter.decode_auto(reader)?;
        (self.set)(target, member);
        Ok(())
    }

    fn encode_keyed(
        &self,
        allocator: &mut Allocator<'_>,
        prefixed_key: &[u8],
        value: &T,
    ) -> Result<(), Error> {
        if let Some(member) = (self.get)(value) {
            allocator.append(prefixed_key)?;
            self.converter.encode_with_length_prefix(allocator, member)?;
        }
        Ok(())
    }

    fn decode_keyed(&self, span: &[u8], target: &mut T) -> Result<(), Error> {
        let member = self.converter.decode(span)?;
        (self.set)(target, member);
        Ok(())
    }
}

pub(crate) fn binder<T, M>(get: Getter<T, M>, set: Setter<T, M>) -> Binder<T>
where
    T: Send + Sync + 'static,
    M: Send + Sync + 'static,
{
    Box::new(
        move |handle: &ConverterHandle| -> Result<Box<dyn MemberCodec<T>>, Error> {
            let codec: Box<dyn MemberCodec<T>> = Box::new(BoundMember {
                get: get.clone(),
                set: set.clone(),
                converter: handle.downcast::<M>()?,
                owner: std::any::type_name::<T>(),
            });
            Ok(codec)
        },
    )
}
