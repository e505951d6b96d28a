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

use tessera_core::converter::TupleObject;
use tessera_core::error::Error;
use tessera_core::generator::Generator;
use tessera_core::types::{Describe, TypeDescriptor};
use test_helpers::{assert_fixed_length, test_roundtrip};

#[derive(Default, Debug, Clone, Copy, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

impl Describe for Point {
    fn describe() -> TypeDescriptor {
        TupleObject::<Point>::new()
            .member(|p| &p.x, |p, v| p.x = v)
            .member(|p| &p.y, |p, v| p.y = v)
            .describe()
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
struct Segment {
    label: String,
    from: Point,
    to: Point,
}

impl Describe for Segment {
    fn describe() -> TypeDescriptor {
        TupleObject::<Segment>::new()
            .member(|s| &s.label, |s, v| s.label = v)
            .member(|s| &s.from, |s, v| s.from = v)
            .member(|s| &s.to, |s, v| s.to = v)
            .describe()
    }
}

#[test]
fn test_std_tuples() {
    let generator = Generator::default();
    test_roundtrip(&generator, (1u8,));
    test_roundtrip(&generator, (1u8, -2i16));
    test_roundtrip(&generator, ("a".to_string(), 2u32, vec![3i8]));
    test_roundtrip(&generator, (1u8, 2u16, 3u32, 4u64, 5i8, 6i16, 7i32, 8i64));
    test_roundtrip(&generator, ((1u8, 2u8), (String::new(), None::<bool>)));
}

#[test]
fn test_tuple_lengths() {
    let generator = Generator::default();
    assert_fixed_length(&generator, &[(1i32, 2.5f64, true)], 13);
    let converter = generator.get_converter::<(i32, String)>().unwrap();
    assert_eq!(converter.length(), 0);
    assert_eq!(
        generator.encode(&(7u8, "hi".to_string())).unwrap(),
        vec![7, 2, b'h', b'i']
    );
}

#[test]
fn test_tuple_object() {
    let generator = Generator::default();
    let point = Point { x: 1, y: -1 };
    assert_fixed_length(&generator, &[point], 8);
    assert_eq!(
        generator.encode(&point).unwrap(),
        vec![1, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]
    );

    let segment = Segment {
        label: "diagonal".to_string(),
        from: Point { x: 0, y: 0 },
        to: Point { x: 10, y: 10 },
    };
    test_roundtrip(&generator, segment.clone());
    let bytes = generator.encode(&segment).unwrap();
    assert_eq!(bytes.len(), 1 + 8 + 8 + 8);

    let points: Vec<Point> = (0..5).map(|i| Point { x: i, y: i * i }).collect();
    assert_eq!(generator.encode(&points).unwrap().len(), 40);
    test_roundtrip(&generator, points);
}

#[test]
fn test_optional_tuple_object_has_no_tag() {
    let generator = Generator::default();
    let point = Some(Point { x: 3, y: 4 });
    let bytes = generator.encode(&point).unwrap();
    assert_eq!(bytes, generator.encode(&Point { x: 3, y: 4 }).unwrap());
    test_roundtrip(&generator, point);
    assert_eq!(generator.get_converter::<Option<Point>>().unwrap().length(), 8);
}

#[test]
fn test_null_tuple_object_is_rejected() {
    if tessera_core::error::should_panic_on_error() {
        return;
    }
    let generator = Generator::default();
    let err = generator.encode(&None::<Point>).unwrap_err();
    assert!(matches!(err, Error::NullForbidden(name) if name.ends_with("Point")));

    let err = generator
        .encode(&vec![Some(Point::default()), None])
        .unwrap_err();
    assert!(matches!(err, Error::NullForbidden(_)));
}

#[test]
fn test_optional_std_tuple_keeps_tag() {
    let generator = Generator::default();
    assert_eq!(generator.encode(&None::<(u8, u8)>).unwrap(), vec![0]);
    assert_eq!(generator.encode(&Some((1u8, 2u8))).unwrap(), vec![1, 1, 2]);
}
