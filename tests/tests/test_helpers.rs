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

#![allow(dead_code)]

use std::fmt::Debug;
use tessera_core::buffer::{Allocator, Reader};
use tessera_core::generator::Generator;
use tessera_core::types::Describe;

/// Encodes and decodes `value`, asserting the result is equal.
pub fn test_roundtrip<T>(generator: &Generator, value: T)
where
    T: Describe + PartialEq + Debug,
{
    let bytes = generator.encode(&value).unwrap();
    let result: T = generator.decode(&bytes).unwrap();
    assert_eq!(value, result);
}

/// Asserts every value encodes to exactly the converter's fixed length.
pub fn assert_fixed_length<T>(generator: &Generator, values: &[T], expected: usize)
where
    T: Describe + PartialEq + Debug,
{
    let converter = generator.get_converter::<T>().unwrap();
    assert_eq!(converter.length(), expected);
    for value in values {
        let bytes = generator.encode(value).unwrap();
        assert_eq!(bytes.len(), expected, "{:?}", value);
        assert_eq!(&converter.decode(&bytes).unwrap(), value);
    }
}

/// Asserts `encode_auto` of a variable length converter is the length-prefixed form.
pub fn assert_auto_framing<T>(generator: &Generator, value: &T)
where
    T: Describe + PartialEq + Debug,
{
    let converter = generator.get_converter::<T>().unwrap();
    assert_eq!(converter.length(), 0);

    let mut auto = Allocator::new();
    converter.encode_auto(&mut auto, value).unwrap();
    let mut prefixed = Allocator::new();
    converter
        .encode_with_length_prefix(&mut prefixed, value)
        .unwrap();
    assert_eq!(auto.as_slice(), prefixed.as_slice());

    let mut reader = Reader::new(auto.as_slice());
    assert_eq!(&converter.decode_auto(&mut reader).unwrap(), value);
    assert!(reader.is_empty());
}
