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

//! Keyed aggregates.
//!
//! A keyed object is a run of `<prefixed key><prefixed value>` records with
//! no count and no terminator. Absent optional members write no record.
//! Unknown keys are skipped on decode.

use crate::buffer::{Allocator, Reader};
use crate::converter::core::Converter;
use crate::converter::handle::ConverterHandle;
use crate::converter::member::{binder, getter, setter, Binder, MemberCodec};
use crate::error::Error;
use crate::meta::BinaryKeyDictionary;
use crate::types::{
    Describe, NamedBuild, NamedMember, NamedParts, NamedShape, TypeDescriptor, TypeKind, TypeRef,
};
use std::marker::PhantomData;
use std::sync::Arc;

/// Describes a user type encoded as keyed members.
///
/// ```rust
/// use tessera_core::converter::named::NamedObject;
/// use tessera_core::types::{Describe, TypeDescriptor};
///
/// #[derive(Default)]
/// struct Person {
///     id: i32,
///     name: Option<String>,
/// }
///
/// impl Describe for Person {
///     fn describe() -> TypeDescriptor {
///         NamedObject::<Person>::new()
///             .required("id", |p| &p.id, |p, v| p.id = v)
///             .optional("name", |p| p.name.as_ref(), |p, v| p.name = Some(v))
///             .describe()
///     }
/// }
/// ```
pub struct NamedObject<T> {
    members: Vec<NamedMember>,
    binders: Vec<Binder<T>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Default + Send + Sync + 'static> Default for NamedObject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default + Send + Sync + 'static> NamedObject<T> {
    pub fn new() -> Self {
        NamedObject {
            members: Vec::new(),
            binders: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// A member that must be present in every encoded object.
    pub fn required<M, G, S>(mut self, key: &'static str, get: G, set: S) -> Self
    where
        M: Describe,
        G: Fn(&T) -> &M + Send + Sync + 'static,
        S: Fn(&mut T, M) + Send + Sync + 'static,
    {
        self.members.push(NamedMember {
            key,
            optional: false,
            type_ref: TypeRef::of::<M>(),
        });
        self.binders
            .push(binder(getter(move |t: &T| Some(get(t))), setter(set)));
        self
    }

    /// A member that is omitted from the stream when `get` returns `None`.
    pub fn optional<M, G, S>(mut self, key: &'static str, get: G, set: S) -> Self
    where
        M: Describe,
        G: Fn(&T) -> Option<&M> + Send + Sync + 'static,
        S: Fn(&mut T, M) + Send + Sync + 'static,
    {
        self.members.push(NamedMember {
            key,
            optional: true,
            type_ref: TypeRef::of::<M>(),
        });
        self.binders.push(binder(getter(get), setter(set)));
        self
    }

    pub fn describe(self) -> TypeDescriptor {
        let binders = self.binders;
        let members = self.members.clone();
        TypeDescriptor::new::<T>(TypeKind::Named(NamedShape {
            members: self.members,
            build: named_build(move |parts| {
                NamedObjectConverter::<T>::new(&members, &binders, parts)
                    .map(ConverterHandle::from_converter::<T, _>)
            }),
        }))
    }
}

fn named_build<F>(build: F) -> NamedBuild
where
    F: Fn(NamedParts<'_>) -> Result<ConverterHandle, Error> + Send + Sync + 'static,
{
    Arc::new(build)
}

struct Slot<T> {
    key: &'static str,
    prefixed_key: Box<[u8]>,
    optional: bool,
    codec: Box<dyn MemberCodec<T>>,
}

pub struct NamedObjectConverter<T> {
    slots: Vec<Slot<T>>,
    dictionary: Arc<BinaryKeyDictionary>,
}

impl<T: Default + Send + Sync + 'static> NamedObjectConverter<T> {
    fn new(
        members: &[NamedMember],
        binders: &[Binder<T>],
        parts: NamedParts<'_>,
    ) -> Result<Self, Error> {
        if members.len() != parts.converters.len() || members.len() != parts.dictionary.len() {
            return Err(Error::type_error(format!(
                "{} declares {} members but {} converters were resolved",
                std::any::type_name::<T>(),
                members.len(),
                parts.converters.len()
            )));
        }
        let mut slots = Vec::with_capacity(members.len());
        for ((member, bind), handle) in members.iter().zip(binders).zip(parts.converters) {
            let mut prefixed_key = Allocator::new();
            prefixed_key.append_with_length_prefix(member.key.as_bytes())?;
            slots.push(Slot {
                key: member.key,
                prefixed_key: prefixed_key.into_vec().into_boxed_slice(),
                optional: member.optional,
                codec: bind(handle)?,
            });
        }
        Ok(NamedObjectConverter {
            slots,
            dictionary: parts.dictionary,
        })
    }
}

impl<T: Default + Send + Sync + 'static> Converter<T> for NamedObjectConverter<T> {
    fn encode(&self, allocator: &mut Allocator<'_>, value: &T) -> Result<(), Error> {
        for slot in &self.slots {
            slot.codec.encode_keyed(allocator, &slot.prefixed_key, value)?;
        }
        Ok(())
    }

    fn decode(&self, span: &[u8]) -> Result<T, Error> {
        let type_name = std::any::type_name::<T>();
        let mut found: Vec<Option<&[u8]>> = vec![None; self.slots.len()];
        let mut reader = Reader::new(span);
        while !reader.is_empty() {
            let key = reader.read_length_prefixed()?;
            let value = reader.read_length_prefixed()?;
            let Some(index) = self.dictionary.get_index(key) else {
                continue;
            };
            if found[index].is_some() {
                return Err(Error::duplicate_field(self.slots[index].key, type_name));
            }
            found[index] = Some(value);
        }

        let mut target = T::default();
        for (slot, value) in self.slots.iter().zip(found) {
            match value {
                Some(value) => slot.codec.decode_keyed(value, &mut target)?,
                None if slot.optional => {}
                None => return Err(Error::missing_field(slot.key, type_name)),
            }
        }
        Ok(target)
    }
}
