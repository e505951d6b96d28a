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
use arc_swap::ArcSwap;
use parking_lot::{Mutex, MutexGuard};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

/// Append-only registry of the converters built by one generator.
///
/// Readers load an immutable snapshot without locking. Writers hold the
/// build lock, so every type is built at most once, and publish a new
/// snapshot containing everything a resolution created.
pub struct ConverterResolver {
    converters: ArcSwap<HashMap<TypeId, ConverterHandle>>,
    build_lock: Mutex<()>,
}

impl Default for ConverterResolver {
    fn default() -> Self {
        ConverterResolver::new(HashMap::new())
    }
}

impl ConverterResolver {
    pub fn new(seed: HashMap<TypeId, ConverterHandle>) -> ConverterResolver {
        ConverterResolver {
            converters: ArcSwap::from_pointee(seed),
            build_lock: Mutex::new(()),
        }
    }

    #[inline(always)]
    pub fn get(&self, type_id: TypeId) -> Option<ConverterHandle> {
        self.converters.load().get(&type_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.converters.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.load().is_empty()
    }

    pub(crate) fn build_lock(&self) -> MutexGuard<'_, ()> {
        self.build_lock.lock()
    }

    /// Must be called with the build lock held.
    pub(crate) fn publish(&self, created: HashMap<TypeId, ConverterHandle>) {
        if created.is_empty() {
            return;
        }
        let mut next = HashMap::clone(&self.converters.load());
        for (type_id, handle) in created {
            next.entry(type_id).or_insert(handle);
        }
        self.converters.store(Arc::new(next));
    }
}
