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

use crate::config::Config;
use crate::converter::core::Converter;
use crate::converter::handle::ConverterHandle;
use crate::error::Error;
use crate::generator::Generator;
use crate::types::{Describe, TypeRef};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

/// State of one first-time resolution.
///
/// Converters built while resolving a type graph are kept here and only
/// published to the generator's registry once the whole graph succeeded.
pub struct GeneratorContext<'g> {
    generator: &'g Generator,
    created: HashMap<TypeId, ConverterHandle>,
    // Types whose converters are being built, outermost first.
    pending: Vec<TypeRef>,
}

impl<'g> GeneratorContext<'g> {
    pub(crate) fn new(generator: &'g Generator) -> GeneratorContext<'g> {
        GeneratorContext {
            generator,
            created: HashMap::new(),
            pending: Vec::new(),
        }
    }

    pub fn config(&self) -> &'g Config {
        self.generator.config()
    }

    pub fn get_converter<T: Describe>(&mut self) -> Result<Arc<dyn Converter<T>>, Error> {
        self.get_converter_handle(TypeRef::of::<T>())?
            .downcast::<T>()
    }

    pub fn get_converter_handle(&mut self, type_ref: TypeRef) -> Result<ConverterHandle, Error> {
        if let Some(handle) = self.generator.resolver().get(type_ref.type_id) {
            return Ok(handle);
        }
        if let Some(handle) = self.created.get(&type_ref.type_id) {
            return Ok(handle.clone());
        }
        if self.pending.iter().any(|p| p.type_id == type_ref.type_id) {
            let chain: Vec<&str> = self.pending.iter().map(|p| p.type_name).collect();
            return Err(Error::type_error(format!(
                "Self type reference detected: {} -> {}",
                chain.join(" -> "),
                type_ref.type_name
            )));
        }
        self.pending.push(type_ref);
        let result = self.create(type_ref);
        self.pending.pop();
        let handle = result?;
        self.created.insert(type_ref.type_id, handle.clone());
        Ok(handle)
    }

    fn create(&mut self, type_ref: TypeRef) -> Result<ConverterHandle, Error> {
        let descriptor = (type_ref.describe)();
        let generator = self.generator;
        for creator in generator.creators() {
            let Some(handle) = creator.get_converter(self, &descriptor)? else {
                continue;
            };
            if handle.type_id() != descriptor.type_id {
                return Err(Error::type_error(format!(
                    "creator returned a converter of {} for {}",
                    handle.type_name(),
                    descriptor.type_name
                )));
            }
            tracing::debug!(
                type_name = descriptor.type_name,
                kind = descriptor.kind.name(),
                length = handle.length(),
                "converter created"
            );
            return Ok(handle);
        }
        Err(Error::unsupported_type(format!(
            "no converter creator supports {} (kind: {})",
            descriptor.type_name,
            descriptor.kind.name()
        )))
    }

    pub(crate) fn into_created(self) -> HashMap<TypeId, ConverterHandle> {
        self.created
    }
}
