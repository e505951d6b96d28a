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

use std::any::TypeId;
use tessera_core::buffer::Allocator;
use tessera_core::converter::core::fixed_span;
use tessera_core::converter::{Converter, ConverterHandle, NamedObject};
use tessera_core::error::Error;
use tessera_core::generator::Generator;
use tessera_core::resolver::{ConverterCreator, GeneratorContext};
use tessera_core::types::{Describe, TypeDescriptor, TypeKind};
use test_helpers::test_roundtrip;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rgb(u8, u8, u8);

impl Describe for Rgb {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new::<Rgb>(TypeKind::Opaque)
    }
}

struct RgbConverter;

impl Converter<Rgb> for RgbConverter {
    fn length(&self) -> usize {
        3
    }

    fn encode(&self, allocator: &mut Allocator<'_>, value: &Rgb) -> Result<(), Error> {
        allocator.append(&[value.0, value.1, value.2])
    }

    fn decode(&self, span: &[u8]) -> Result<Rgb, Error> {
        let span = fixed_span(span, 3)?;
        Ok(Rgb(span[0], span[1], span[2]))
    }
}

struct ShoutingString;

impl Converter<String> for ShoutingString {
    fn encode(&self, allocator: &mut Allocator<'_>, value: &String) -> Result<(), Error> {
        allocator.append(value.to_uppercase().as_bytes())
    }

    fn decode(&self, span: &[u8]) -> Result<String, Error> {
        String::from_utf8(span.to_vec()).map_err(|e| Error::invalid_data(e.to_string()))
    }
}

struct ShoutingCreator;

impl ConverterCreator for ShoutingCreator {
    fn get_converter(
        &self,
        _context: &mut GeneratorContext<'_>,
        descriptor: &TypeDescriptor,
    ) -> Result<Option<ConverterHandle>, Error> {
        if descriptor.type_id != TypeId::of::<String>() {
            return Ok(None);
        }
        Ok(Some(ConverterHandle::from_converter::<String, _>(
            ShoutingString,
        )))
    }
}

#[derive(Default, Debug, PartialEq)]
struct Node {
    value: i32,
    next: Option<Box<Node>>,
}

impl Describe for Node {
    fn describe() -> TypeDescriptor {
        NamedObject::<Node>::new()
            .required("value", |n| &n.value, |n, v| n.value = v)
            .optional("next", |n| n.next.as_ref(), |n, v| n.next = Some(v))
            .describe()
    }
}

#[test]
fn test_added_converter_is_used_when_nested() {
    let generator = Generator::builder()
        .add_converter::<Rgb, _>(RgbConverter)
        .build();
    assert_eq!(generator.converter_count(), 1);
    assert_eq!(generator.encode(&Rgb(1, 2, 3)).unwrap(), vec![1, 2, 3]);

    let palette = vec![Rgb(255, 0, 0), Rgb(0, 255, 0), Rgb(0, 0, 255)];
    let bytes = generator.encode(&palette).unwrap();
    assert_eq!(bytes, vec![255, 0, 0, 0, 255, 0, 0, 0, 255]);
    test_roundtrip(&generator, palette);
    test_roundtrip(&generator, (Rgb(9, 9, 9), Some(Rgb(1, 1, 1))));
}

#[test]
fn test_opaque_type_without_converter() {
    if tessera_core::error::should_panic_on_error() {
        return;
    }
    let generator = Generator::default();
    let err = generator.encode(&Rgb(0, 0, 0)).unwrap_err();
    assert!(matches!(err, Error::UnsupportedType(ref msg) if msg.contains("Rgb")));
    let err = generator.get_converter::<Vec<Rgb>>().unwrap_err();
    assert!(matches!(err, Error::UnsupportedType(_)));
}

#[test]
fn test_user_creators_run_first() {
    let generator = Generator::builder().add_creator(ShoutingCreator).build();
    assert_eq!(generator.encode(&"quiet".to_string()).unwrap(), b"QUIET");
    let nested = vec!["a".to_string(), "b".to_string()];
    assert_eq!(generator.encode(&nested).unwrap(), vec![1, b'A', 1, b'B']);
    assert_eq!(
        generator.decode::<Vec<String>>(&[1, b'x']).unwrap(),
        vec!["x".to_string()]
    );
}

#[test]
fn test_self_reference_is_rejected() {
    if tessera_core::error::should_panic_on_error() {
        return;
    }
    let generator = Generator::default();
    let err = generator.get_converter::<Node>().unwrap_err();
    assert!(matches!(err, Error::TypeError(ref msg) if msg.contains("Self type reference")));
    assert_eq!(generator.converter_count(), 0);

    // Everything else still resolves afterwards.
    test_roundtrip(&generator, vec![1u8, 2]);
}

#[test]
fn test_converters_are_cached() {
    let generator = Generator::default();
    let first = generator.get_converter::<Vec<String>>().unwrap();
    let count = generator.converter_count();
    assert_eq!(count, 2);
    let second = generator.get_converter::<Vec<String>>().unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(generator.converter_count(), count);
}

#[test]
fn test_capacity_limit() {
    if tessera_core::error::should_panic_on_error() {
        return;
    }
    let generator = Generator::builder().max_capacity(16).build();
    assert_eq!(generator.config().max_capacity(), 16);
    assert_eq!(generator.encode(&vec![7u8; 16]).unwrap().len(), 16);
    let err = generator.encode(&vec![0u8; 17]).unwrap_err();
    assert!(matches!(err, Error::CapacityExceeded(17, 16)));

    // The pooled allocator is reusable after a failure.
    assert_eq!(generator.encode(&vec![1u8; 4]).unwrap(), vec![1; 4]);
}

#[test]
fn test_dynamic_api() {
    let generator = Generator::default();
    generator.register::<Vec<String>>().unwrap();
    let value = vec!["x".to_string(), "yz".to_string()];
    let bytes = generator.encode_any(&value).unwrap();
    assert_eq!(bytes, generator.encode(&value).unwrap());

    let decoded = generator
        .decode_any(TypeId::of::<Vec<String>>(), &bytes)
        .unwrap();
    assert_eq!(*decoded.downcast::<Vec<String>>().unwrap(), value);
}

#[test]
fn test_dynamic_api_requires_registration() {
    if tessera_core::error::should_panic_on_error() {
        return;
    }
    let generator = Generator::default();
    let err = generator.encode_any(&3.5f32).unwrap_err();
    assert!(matches!(err, Error::UnsupportedType(_)));
    let err = generator.decode_any(TypeId::of::<u16>(), &[0, 0]).unwrap_err();
    assert!(matches!(err, Error::UnsupportedType(_)));
}

#[test]
fn test_encode_to_caller_buffer() {
    let generator = Generator::default();
    let mut buffer = vec![0xAA];
    {
        let mut allocator = Allocator::from_buffer(&mut buffer);
        generator.encode_to(&mut allocator, &7u16).unwrap();
        generator
            .encode_to(&mut allocator, &"ok".to_string())
            .unwrap();
    }
    assert_eq!(buffer, vec![0xAA, 7, 0, b'o', b'k']);
}

#[test]
fn test_facade() {
    let bytes = tessera::encode(&(1u8, "two".to_string())).unwrap();
    assert_eq!(bytes, vec![1, 3, b't', b'w', b'o']);
    let back: (u8, String) = tessera::decode(&bytes).unwrap();
    assert_eq!(back, (1, "two".to_string()));
    assert!(tessera::default_generator().converter_count() >= 3);
}
