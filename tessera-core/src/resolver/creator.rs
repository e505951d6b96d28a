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

use crate::converter::handle::ConverterHandle;
use crate::converter::shared::builtin_converter;
use crate::error::Error;
use crate::meta::BinaryKeyDictionary;
use crate::resolver::context::GeneratorContext;
use crate::types::{NamedParts, TypeDescriptor, TypeKind};
use std::sync::Arc;

/// One link of the generator's creator chain.
///
/// A creator inspects a [`TypeDescriptor`] and either builds the converter,
/// returning `Ok(Some(handle))`, or declines with `Ok(None)` so the next
/// creator is asked. Nested types are resolved through `context`, never
/// through the generator directly.
pub trait ConverterCreator: Send + Sync {
    fn get_converter(
        &self,
        context: &mut GeneratorContext<'_>,
        descriptor: &TypeDescriptor,
    ) -> Result<Option<ConverterHandle>, Error>;
}

pub struct PrimitiveCreator;

impl ConverterCreator for PrimitiveCreator {
    fn get_converter(
        &self,
        _context: &mut GeneratorContext<'_>,
        descriptor: &TypeDescriptor,
    ) -> Result<Option<ConverterHandle>, Error> {
        match descriptor.kind {
            TypeKind::Primitive => Ok(builtin_converter(descriptor.type_id).cloned()),
            _ => Ok(None),
        }
    }
}

pub struct NullableCreator;

impl ConverterCreator for NullableCreator {
    fn get_converter(
        &self,
        context: &mut GeneratorContext<'_>,
        descriptor: &TypeDescriptor,
    ) -> Result<Option<ConverterHandle>, Error> {
        let TypeKind::Nullable(shape) = &descriptor.kind else {
            return Ok(None);
        };
        let inner = context.get_converter_handle(shape.inner)?;
        (shape.build)(inner).map(Some)
    }
}

pub struct PointerCreator;

impl ConverterCreator for PointerCreator {
    fn get_converter(
        &self,
        context: &mut GeneratorContext<'_>,
        descriptor: &TypeDescriptor,
    ) -> Result<Option<ConverterHandle>, Error> {
        let TypeKind::Pointer(shape) = &descriptor.kind else {
            return Ok(None);
        };
        let inner = context.get_converter_handle(shape.inner)?;
        (shape.build)(inner).map(Some)
    }
}

pub struct SequenceCreator;

impl ConverterCreator for SequenceCreator {
    fn get_converter(
        &self,
        context: &mut GeneratorContext<'_>,
        descriptor: &TypeDescriptor,
    ) -> Result<Option<ConverterHandle>, Error> {
        let TypeKind::Sequence(shape) = &descriptor.kind else {
            return Ok(None);
        };
        let element = context.get_converter_handle(shape.inner)?;
        (shape.build)(element).map(Some)
    }
}

pub struct MapCreator;

impl ConverterCreator for MapCreator {
    fn get_converter(
        &self,
        context: &mut GeneratorContext<'_>,
        descriptor: &TypeDescriptor,
    ) -> Result<Option<ConverterHandle>, Error> {
        let TypeKind::Map(shape) = &descriptor.kind else {
            return Ok(None);
        };
        let key = context.get_converter_handle(shape.key)?;
        let value = context.get_converter_handle(shape.value)?;
        (shape.build)(key, value).map(Some)
    }
}

/// Std tuples and user tuple objects.
pub struct TupleObjectCreator;

impl ConverterCreator for TupleObjectCreator {
    fn get_converter(
        &self,
        context: &mut GeneratorContext<'_>,
        descriptor: &TypeDescriptor,
    ) -> Result<Option<ConverterHandle>, Error> {
        let TypeKind::Tuple(shape) = &descriptor.kind else {
            return Ok(None);
        };
        let members = shape
            .members
            .iter()
            .map(|member| context.get_converter_handle(*member))
            .collect::<Result<Vec<_>, Error>>()?;
        (shape.build)(&members).map(Some)
    }
}

/// Keyed objects. Builds the key dictionary of the type once, here.
pub struct NamedObjectCreator;

impl ConverterCreator for NamedObjectCreator {
    fn get_converter(
        &self,
        context: &mut GeneratorContext<'_>,
        descriptor: &TypeDescriptor,
    ) -> Result<Option<ConverterHandle>, Error> {
        let TypeKind::Named(shape) = &descriptor.kind else {
            return Ok(None);
        };
        let keys: Vec<&[u8]> = shape.members.iter().map(|m| m.key.as_bytes()).collect();
        let dictionary = BinaryKeyDictionary::new(&keys).map_err(|e| match e {
            Error::MalformedKeySet(msg) => {
                Error::malformed_key_set(format!("{} in {}", msg, descriptor.type_name))
            }
            other => other,
        })?;
        tracing::debug!(
            type_name = descriptor.type_name,
            keys = dictionary.len(),
            hashed = dictionary.is_hashed(),
            "key dictionary built"
        );
        let converters = shape
            .members
            .iter()
            .map(|member| context.get_converter_handle(member.type_ref))
            .collect::<Result<Vec<_>, Error>>()?;
        (shape.build)(NamedParts {
            converters: &converters,
            dictionary: Arc::new(dictionary),
        })
        .map(Some)
    }
}

/// The built-in chain, in resolution order.
pub fn builtin_creators() -> Vec<Arc<dyn ConverterCreator>> {
    vec![
        Arc::new(PrimitiveCreator),
        Arc::new(NullableCreator),
        Arc::new(PointerCreator),
        Arc::new(SequenceCreator),
        Arc::new(MapCreator),
        Arc::new(TupleObjectCreator),
        Arc::new(NamedObjectCreator),
    ]
}
