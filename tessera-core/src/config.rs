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

/// Default upper bound for a single allocator, matching the largest span a
/// 32-bit signed length can address.
pub const DEFAULT_MAX_CAPACITY: usize = i32::MAX as usize;

/// Default starting capacity of pooled allocators.
pub const DEFAULT_INITIAL_CAPACITY: usize = 256;

/// Configuration for a [`Generator`](crate::generator::Generator).
///
/// The configuration is fixed when the generator is built and shared
/// read-only with every resolution context and pooled allocator.
#[derive(Clone, Debug)]
pub struct Config {
    /// Hard ceiling on the number of bytes any allocator may hold.
    pub max_capacity: usize,
    /// Capacity reserved by allocators created for `Generator::encode`.
    pub initial_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_capacity: DEFAULT_MAX_CAPACITY,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    #[inline(always)]
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity.min(self.max_capacity)
    }
}
