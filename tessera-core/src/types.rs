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

//! Type descriptors: the data the resolution engine consumes instead of reflection.

use crate::converter::handle::ConverterHandle;
use crate::error::Error;
use crate::meta::BinaryKeyDictionary;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// Provides the [`TypeDescriptor`] of a type.
///
/// Built-in types are described by this crate. User aggregates describe
/// themselves with [`NamedObject`](crate::converter::named::NamedObject) or
/// [`TupleObject`](crate::converter::tuple::TupleObject).
pub trait Describe: Sized + Send + Sync + 'static {
    fn describe() -> TypeDescriptor;
}

/// A lazy reference to another type, used for members and elements.
#[derive(Clone, Copy)]
pub struct TypeRef {
    pub type_id: TypeId,
    pub type_name: &'static str,
    pub describe: fn() -> TypeDescriptor,
}

impl TypeRef {
    pub fn of<T: Describe>() -> TypeRef {
        TypeRef {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            describe: T::describe,
        }
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

pub struct TypeDescriptor {
    pub type_id: TypeId,
    pub type_name: &'static str,
    pub kind: TypeKind,
}

impl TypeDescriptor {
    pub fn new<T: 'static>(kind: TypeKind) -> TypeDescriptor {
        TypeDescriptor {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            kind,
        }
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("kind", &self.kind.name())
            .finish()
    }
}

/// Builds a wrapper converter from the converter of the wrapped type.
pub type WrapperBuild = fn(ConverterHandle) -> Result<ConverterHandle, Error>;

/// Builds a map converter from the key and value converters.
pub type MapBuild = fn(ConverterHandle, ConverterHandle) -> Result<ConverterHandle, Error>;

pub type TupleBuild = Arc<dyn Fn(&[ConverterHandle]) -> Result<ConverterHandle, Error> + Send + Sync>;

pub type NamedBuild =
    Arc<dyn Fn(NamedParts<'_>) -> Result<ConverterHandle, Error> + Send + Sync>;

#[derive(Clone)]
pub struct WrapperShape {
    pub inner: TypeRef,
    pub build: WrapperBuild,
}

#[derive(Clone)]
pub struct MapShape {
    pub key: TypeRef,
    pub value: TypeRef,
    pub build: MapBuild,
}

/// Positional members, encoded in declaration order.
#[derive(Clone)]
pub struct TupleShape {
    pub members: Vec<TypeRef>,
    /// Reference semantics: an `Option` of this type may not hold `None`.
    pub reference: bool,
    pub build: TupleBuild,
}

#[derive(Clone, Debug)]
pub struct NamedMember {
    pub key: &'static str,
    pub optional: bool,
    pub type_ref: TypeRef,
}

#[derive(Clone)]
pub struct NamedShape {
    pub members: Vec<NamedMember>,
    pub build: NamedBuild,
}

/// Everything resolved for a keyed object before its converter is built.
pub struct NamedParts<'a> {
    /// One converter per member, in declaration order.
    pub converters: &'a [ConverterHandle],
    pub dictionary: Arc<BinaryKeyDictionary>,
}

#[derive(Clone)]
pub enum TypeKind {
    /// Served from the process-wide table of built-in converters.
    Primitive,
    Nullable(WrapperShape),
    Pointer(WrapperShape),
    Sequence(WrapperShape),
    Map(MapShape),
    Tuple(TupleShape),
    Named(NamedShape),
    /// Nothing the built-in creators can handle. A user creator or an
    /// explicitly added converter has to serve the type.
    Opaque,
}

impl TypeKind {
    pub fn name(&self) -> &'static str {
        match self {
            TypeKind::Primitive => "primitive",
            TypeKind::Nullable(_) => "nullable",
            TypeKind::Pointer(_) => "pointer",
            TypeKind::Sequence(_) => "sequence",
            TypeKind::Map(_) => "map",
            TypeKind::Tuple(_) => "tuple",
            TypeKind::Named(_) => "named",
            TypeKind::Opaque => "opaque",
        }
    }
}
