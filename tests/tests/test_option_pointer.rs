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

use std::sync::Arc;
use tessera_core::error::Error;
use tessera_core::generator::Generator;
use test_helpers::test_roundtrip;

#[test]
fn test_option_layout() {
    let generator = Generator::default();
    assert_eq!(generator.encode(&None::<u32>).unwrap(), vec![0]);
    assert_eq!(generator.encode(&Some(2u32)).unwrap(), vec![1, 2, 0, 0, 0]);
    assert_eq!(
        generator.encode(&Some("ab".to_string())).unwrap(),
        vec![1, b'a', b'b']
    );
    assert_eq!(generator.get_converter::<Option<u32>>().unwrap().length(), 0);
}

#[test]
fn test_option_roundtrip() {
    let generator = Generator::default();
    test_roundtrip(&generator, Some(1.5f64));
    test_roundtrip(&generator, None::<String>);
    test_roundtrip(&generator, Some(Some(3i8)));
    test_roundtrip(&generator, Some(None::<i8>));
    test_roundtrip(&generator, vec![Some(1u16), None, Some(3)]);
}

#[test]
fn test_invalid_option_tag() {
    if tessera_core::error::should_panic_on_error() {
        return;
    }
    let generator = Generator::default();
    let err = generator.decode::<Option<u8>>(&[2, 1]).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
    let err = generator.decode::<Option<u8>>(&[]).unwrap_err();
    assert!(matches!(err, Error::InsufficientData(1, 0)));
}

#[test]
fn test_pointers_are_transparent() {
    let generator = Generator::default();
    assert_eq!(
        generator.encode(&Box::new(5u16)).unwrap(),
        generator.encode(&5u16).unwrap()
    );
    assert_eq!(generator.get_converter::<Arc<u64>>().unwrap().length(), 8);
    test_roundtrip(&generator, Box::new("boxed".to_string()));
    test_roundtrip(&generator, Arc::new(vec![1i64, -1]));
    test_roundtrip(&generator, vec![Box::new(1u8), Box::new(2u8)]);
    test_roundtrip(&generator, Some(Arc::new(String::from("shared"))));
}
