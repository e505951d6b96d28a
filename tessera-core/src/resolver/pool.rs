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

//! Reusable encode buffers.
//!
//! `Generator::encode` needs a scratch `Allocator` per call. Keeping the
//! grown buffers around avoids reallocating them on every call, and spreading
//! them over several independently locked shelves keeps threads that encode
//! at the same time from queueing on a single lock.

use parking_lot::Mutex;
use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};

const SHELF_COUNT: usize = 16;

static NEXT_SHELF: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    // Assigned round-robin the first time a thread touches any pool.
    static HOME_SHELF: Cell<usize> =
        Cell::new(NEXT_SHELF.fetch_add(1, Ordering::Relaxed) % SHELF_COUNT);
}

/// Pool of reusable items, sharded into shelves selected by thread.
///
/// An item is taken off the calling thread's shelf for the duration of one
/// call and put back afterwards, so a shelf lock is never held while the
/// item is in use.
pub struct Pool<T> {
    shelves: [Mutex<Vec<T>>; SHELF_COUNT],
    factory: Box<dyn Fn() -> T + Send + Sync>,
}

impl<T> Pool<T> {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Pool {
            shelves: std::array::from_fn(|_| Mutex::new(Vec::new())),
            factory: Box::new(factory),
        }
    }

    #[inline(always)]
    fn shelf(&self) -> &Mutex<Vec<T>> {
        &self.shelves[HOME_SHELF.with(Cell::get)]
    }

    /// Runs `handler` with an item from the pool, creating one if the shelf is empty.
    #[inline(always)]
    pub fn borrow_mut<R>(&self, handler: impl FnOnce(&mut T) -> R) -> R {
        let shelf = self.shelf();
        let taken = shelf.lock().pop();
        let mut item = taken.unwrap_or_else(|| (self.factory)());
        let result = handler(&mut item);
        shelf.lock().push(item);
        result
    }
}
