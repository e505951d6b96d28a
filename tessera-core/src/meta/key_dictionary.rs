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

use crate::error::Error;
use crate::meta::hash::murmurhash3_x64_128;
use byteorder::{ByteOrder, LittleEndian};

/// Key sets at or below both limits are matched by a linear scan.
const LINEAR_MAX_KEYS: usize = 8;
const LINEAR_MAX_BYTES: usize = 256;

const HASH_SEED: u64 = 47;

#[derive(Debug)]
enum Lookup {
    Linear,
    /// Open addressing table of `(hash, key index)`, length is a power of two.
    Hashed {
        mask: usize,
        table: Vec<Option<(u64, usize)>>,
    },
}

/// Maps the byte spans of member keys to their slot indexes.
///
/// The dictionary is built once per keyed type and never mutated, so it can
/// be shared freely between threads. Unknown spans resolve to `None`.
#[derive(Debug)]
pub struct BinaryKeyDictionary {
    keys: Vec<Box<[u8]>>,
    lookup: Lookup,
}

#[inline(always)]
fn hash_of(bytes: &[u8]) -> u64 {
    murmurhash3_x64_128(bytes, HASH_SEED).0
}

#[inline(always)]
fn chunked_eq(a: &[u8], b: &[u8]) -> bool {
    let mut left = a.chunks_exact(8);
    let mut right = b.chunks_exact(8);
    for (x, y) in (&mut left).zip(&mut right) {
        if LittleEndian::read_u64(x) != LittleEndian::read_u64(y) {
            return false;
        }
    }
    left.remainder() == right.remainder()
}

impl BinaryKeyDictionary {
    /// Builds a dictionary where `keys[i]` resolves to slot `i`.
    ///
    /// Fails with [`Error::MalformedKeySet`] if two keys are byte-equal.
    pub fn new<K: AsRef<[u8]>>(keys: &[K]) -> Result<BinaryKeyDictionary, Error> {
        let keys: Vec<Box<[u8]>> = keys.iter().map(|k| Box::from(k.as_ref())).collect();
        for (i, key) in keys.iter().enumerate() {
            if keys[..i].iter().any(|other| other == key) {
                return Err(Error::malformed_key_set(format!(
                    "duplicate key `{}`",
                    String::from_utf8_lossy(key)
                )));
            }
        }
        let total_bytes: usize = keys.iter().map(|k| k.len()).sum();
        let lookup = if keys.len() <= LINEAR_MAX_KEYS && total_bytes <= LINEAR_MAX_BYTES {
            Lookup::Linear
        } else {
            let size = (keys.len() * 2).next_power_of_two();
            let mask = size - 1;
            let mut table = vec![None; size];
            for (index, key) in keys.iter().enumerate() {
                let hash = hash_of(key);
                let mut pos = hash as usize & mask;
                while table[pos].is_some() {
                    pos = (pos + 1) & mask;
                }
                table[pos] = Some((hash, index));
            }
            Lookup::Hashed { mask, table }
        };
        Ok(BinaryKeyDictionary { keys, lookup })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn is_hashed(&self) -> bool {
        matches!(self.lookup, Lookup::Hashed { .. })
    }

    pub fn key(&self, index: usize) -> Option<&[u8]> {
        self.keys.get(index).map(|k| &k[..])
    }

    /// Returns the slot index of `span`, or `None` for an unknown key.
    #[inline]
    pub fn get_index(&self, span: &[u8]) -> Option<usize> {
        match &self.lookup {
            Lookup::Linear => self
                .keys
                .iter()
                .position(|key| key.len() == span.len() && chunked_eq(key, span)),
            Lookup::Hashed { mask, table } => {
                let hash = hash_of(span);
                let mut pos = hash as usize & mask;
                while let Some((stored, index)) = table[pos] {
                    if stored == hash && *self.keys[index] == *span {
                        return Some(index);
                    }
                    pos = (pos + 1) & mask;
                }
                None
            }
        }
    }
}
