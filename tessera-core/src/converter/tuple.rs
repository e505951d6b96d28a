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

//! Positional aggregates: std tuples and user tuple objects.
//!
//! The body is the concatenation of every member's `encode_auto` output in
//! declaration order. The length is the sum of the member lengths when every
//! member is fixed, otherwise variable.

use crate::buffer::{Allocator, Reader};
use crate::converter::core::Converter;
use crate::converter::handle::{ConverterHandle, Semantics};
use crate::converter::member::{binder, getter, setter, Binder, MemberCodec};
use crate::ensure;
use crate::error::Error;
use crate::types::{Describe, TupleShape, TypeDescriptor, TypeKind, TypeRef};
use std::marker::PhantomData;
use std::sync::Arc;

fn combined_length(lengths: impl Iterator<Item = usize>) -> usize {
    let mut total = 0;
    for length in lengths {
        if length == 0 {
            return 0;
        }
        total += length;
    }
    total
}

fn check_arity(handles: &[ConverterHandle], expected: usize) -> Result<(), Error> {
    ensure!(
        handles.len() == expected,
        Error::type_error(format!(
            "expected {} member converters, got {}",
            expected,
            handles.len()
        ))
    );
    Ok(())
}

/// Std tuples whose members can be bound to converters.
pub trait TupleParts: Sized + Send + Sync + 'static {
    type Converters: Send + Sync + 'static;

    fn bind(handles: &[ConverterHandle]) -> Result<Self::Converters, Error>;

    fn encode_parts(
        converters: &Self::Converters,
        allocator: &mut Allocator<'_>,
        value: &Self,
    ) -> Result<(), Error>;

    fn decode_parts(converters: &Self::Converters, reader: &mut Reader<'_>) -> Result<Self, Error>;
}

pub struct TupleConverter<T: TupleParts> {
    converters: T::Converters,
    length: usize,
}

impl<T: TupleParts> Converter<T> for TupleConverter<T> {
    fn length(&self) -> usize {
        self.length
    }

    fn encode(&self, allocator: &mut Allocator<'_>, value: &T) -> Result<(), Error> {
        T::encode_parts(&self.converters, allocator, value)
    }

    // Trailing bytes after the last member are ignored.
    fn decode(&self, span: &[u8]) -> Result<T, Error> {
        T::decode_parts(&self.converters, &mut Reader::new(span))
    }
}

fn build_tuple<T: TupleParts>(handles: &[ConverterHandle]) -> Result<ConverterHandle, Error> {
    let converter = TupleConverter::<T> {
        converters: T::bind(handles)?,
        length: combined_length(handles.iter().map(|h| h.length())),
    };
    Ok(ConverterHandle::from_converter::<T, _>(converter))
}

macro_rules! impl_tuple {
    ($arity:expr; $($T:ident $idx:tt),+) => {
        impl<$($T: Describe),+> TupleParts for ($($T,)+) {
            type Converters = ($(Arc<dyn Converter<$T>>,)+);

            fn bind(handles: &[ConverterHandle]) -> Result<Self::Converters, Error> {
                check_arity(handles, $arity)?;
                Ok(($(handles[$idx].downcast::<$T>()?,)+))
            }

            #[inline(always)]
            fn encode_parts(
                converters: &Self::Converters,
                allocator: &mut Allocator<'_>,
                value: &Self,
            ) -> Result<(), Error> {
                $(converters.$idx.encode_auto(allocator, &value.$idx)?;)+
                Ok(())
            }

            #[inline(always)]
            fn decode_parts(
                converters: &Self::Converters,
                reader: &mut Reader<'_>,
            ) -> Result<Self, Error> {
                Ok(($(converters.$idx.decode_auto(reader)?,)+))
            }
        }

        impl<$($T: Describe),+> Describe for ($($T,)+) {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::new::<Self>(TypeKind::Tuple(TupleShape {
                    members: vec![$(TypeRef::of::<$T>()),+],
                    reference: false,
                    build: Arc::new(build_tuple::<Self>),
                }))
            }
        }
    };
}

impl_tuple!(1; A 0);
impl_tuple!(2; A 0, B 1);
impl_tuple!(3; A 0, B 1, C 2);
impl_tuple!(4; A 0, B 1, C 2, D 3);
impl_tuple!(5; A 0, B 1, C 2, D 3, E 4);
impl_tuple!(6; A 0, B 1, C 2, D 3, E 4, F 5);
impl_tuple!(7; A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_tuple!(8; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);

/// Describes a user type encoded positionally, like a tuple.
///
/// Tuple objects have reference semantics: an `Option` of a tuple object
/// carries no null tag, and encoding `None` fails with
/// [`Error::NullForbidden`].
///
/// ```rust
/// use tessera_core::converter::tuple::TupleObject;
/// use tessera_core::types::{Describe, TypeDescriptor};
///
/// #[derive(Default)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Describe for Point {
///     fn describe() -> TypeDescriptor {
///         TupleObject::<Point>::new()
///             .member(|p| &p.x, |p, v| p.x = v)
///             .member(|p| &p.y, |p, v| p.y = v)
///             .describe()
///     }
/// }
/// ```
pub struct TupleObject<T> {
    members: Vec<TypeRef>,
    binders: Vec<Binder<T>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Default + Send + Sync + 'static> Default for TupleObject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default + Send + Sync + 'static> TupleObject<T> {
    pub fn new() -> Self {
        TupleObject {
            members: Vec::new(),
            binders: Vec::new(),
            _marker: PhantomData,
        }
    }

    pub fn member<M, G, S>(mut self, get: G, set: S) -> Self
    where
        M: Describe,
        G: Fn(&T) -> &M + Send + Sync + 'static,
        S: Fn(&mut T, M) + Send + Sync + 'static,
    {
        self.members.push(TypeRef::of::<M>());
        self.binders
            .push(binder(getter(move |t: &T| Some(get(t))), setter(set)));
        self
    }

    pub fn describe(self) -> TypeDescriptor {
        let binders = self.binders;
        TypeDescriptor::new::<T>(TypeKind::Tuple(TupleShape {
            members: self.members,
            reference: true,
            build: Arc::new(move |handles: &[ConverterHandle]| -> Result<ConverterHandle, Error> {
                check_arity(handles, binders.len())?;
                let members = binders
                    .iter()
                    .zip(handles)
                    .map(|(bind, handle)| bind(handle))
                    .collect::<Result<Vec<_>, Error>>()?;
                let converter = TupleObjectConverter::<T> {
                    length: combined_length(members.iter().map(|m| m.length())),
                    members,
                };
                Ok(ConverterHandle::from_converter::<T, _>(converter)
                    .with_semantics(Semantics::ReferenceTuple))
            }),
        }))
    }
}

pub struct TupleObjectConverter<T> {
    members: Vec<Box<dyn MemberCodec<T>>>,
    length: usize,
}

impl<T: Default + Send + Sync + 'static> Converter<T> for TupleObjectConverter<T> {
    fn length(&self) -> usize {
        self.length
    }

    fn encode(&self, allocator: &mut Allocator<'_>, value: &T) -> Result<(), Error> {
        for member in &self.members {
            member.encode_positional(allocator, value)?;
        }
        Ok(())
    }

    fn decode(&self, span: &[u8]) -> Result<T, Error> {
        let mut reader = Reader::new(span);
        let mut value = T::default();
        for member in &self.members {
            member.decode_positional(&mut reader, &mut value)?;
        }
        Ok(value)
    }
}
