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

mod test_helpers;

use tessera_core::error::Error;
use tessera_core::generator::Generator;
use test_helpers::{assert_auto_framing, assert_fixed_length, test_roundtrip};

#[test]
fn test_numbers() {
    let generator = Generator::default();
    test_roundtrip(&generator, 0u8);
    test_roundtrip(&generator, -128i8);
    test_roundtrip(&generator, u16::MAX);
    test_roundtrip(&generator, i16::MIN);
    test_roundtrip(&generator, 0xDEAD_BEEFu32);
    test_roundtrip(&generator, -1i32);
    test_roundtrip(&generator, u64::MAX);
    test_roundtrip(&generator, i64::MIN);
    test_roundtrip(&generator, u128::MAX - 7);
    test_roundtrip(&generator, i128::MIN + 3);
    test_roundtrip(&generator, 3.5f32);
    test_roundtrip(&generator, -0.125f64);
    test_roundtrip(&generator, usize::MAX);
    test_roundtrip(&generator, isize::MIN);
}

#[test]
fn test_bool_and_char() {
    let generator = Generator::default();
    test_roundtrip(&generator, true);
    test_roundtrip(&generator, false);
    test_roundtrip(&generator, 'z');
    test_roundtrip(&generator, '🦀');
}

#[test]
fn test_fixed_lengths() {
    let generator = Generator::default();
    assert_fixed_length(&generator, &[0i32, -1, i32::MAX, i32::MIN], 4);
    assert_fixed_length(&generator, &[0u8, 255], 1);
    assert_fixed_length(&generator, &[f64::MIN, 0.0, f64::MAX], 8);
    assert_fixed_length(&generator, &[0u128, u128::MAX], 16);
    assert_fixed_length(&generator, &[true, false], 1);
    assert_fixed_length(&generator, &['a', '\u{10FFFF}'], 4);
}

#[test]
fn test_top_level_has_no_framing() {
    let generator = Generator::default();
    assert_eq!(generator.encode(&0x0102_0304u32).unwrap(), vec![4, 3, 2, 1]);
    assert_eq!(
        generator.encode(&"abc".to_string()).unwrap(),
        b"abc".to_vec()
    );
}

#[test]
fn test_strings() {
    let generator = Generator::default();
    test_roundtrip(&generator, String::new());
    test_roundtrip(&generator, "hello, world".to_string());
    test_roundtrip(&generator, "日本語テキスト".to_string());
    test_roundtrip(&generator, "x".repeat(70_000));
}

#[test]
fn test_string_auto_framing() {
    let generator = Generator::default();
    assert_auto_framing(&generator, &String::new());
    assert_auto_framing(&generator, &"short".to_string());
    assert_auto_framing(&generator, &"m".repeat(1025));
    assert_auto_framing(&generator, &"l".repeat(1_048_575));
}

#[test]
fn test_short_input_fails() {
    if tessera_core::error::should_panic_on_error() {
        return;
    }
    let generator = Generator::default();
    let err = generator.decode::<i64>(&[1, 2, 3, 4]).unwrap_err();
    assert!(matches!(err, Error::InsufficientData(8, 4)));
}

#[test]
fn test_invalid_utf8_fails() {
    if tessera_core::error::should_panic_on_error() {
        return;
    }
    let generator = Generator::default();
    let err = generator.decode::<String>(&[0xFF, 0xFE]).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
}
