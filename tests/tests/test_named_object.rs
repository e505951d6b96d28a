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

use std::collections::HashMap;
use tessera_core::converter::NamedObject;
use tessera_core::error::Error;
use tessera_core::generator::Generator;
use tessera_core::types::{Describe, TypeDescriptor};
use test_helpers::test_roundtrip;

#[derive(Default, Debug, Clone, PartialEq)]
struct Person {
    id: i32,
    name: Option<String>,
}

impl Describe for Person {
    fn describe() -> TypeDescriptor {
        NamedObject::<Person>::new()
            .required("id", |p| &p.id, |p, v| p.id = v)
            .optional("name", |p| p.name.as_ref(), |p, v| p.name = Some(v))
            .describe()
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
struct Team {
    title: String,
    lead: Person,
    members: Vec<Person>,
    tags: HashMap<String, u32>,
}

impl Describe for Team {
    fn describe() -> TypeDescriptor {
        NamedObject::<Team>::new()
            .required("title", |t| &t.title, |t, v| t.title = v)
            .required("lead", |t| &t.lead, |t, v| t.lead = v)
            .required("members", |t| &t.members, |t, v| t.members = v)
            .required("tags", |t| &t.tags, |t, v| t.tags = v)
            .describe()
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
struct Settings {
    host: String,
    port: u16,
    user: Option<String>,
    retries: u8,
    timeout_ms: u32,
    verbose: bool,
    tags: Vec<String>,
    weight: f64,
    region: Option<String>,
    limits: (u32, u32),
    owner_id: i64,
}

impl Describe for Settings {
    fn describe() -> TypeDescriptor {
        NamedObject::<Settings>::new()
            .required("host", |s| &s.host, |s, v| s.host = v)
            .required("port", |s| &s.port, |s, v| s.port = v)
            .optional("user", |s| s.user.as_ref(), |s, v| s.user = Some(v))
            .required("retries", |s| &s.retries, |s, v| s.retries = v)
            .required("timeout_ms", |s| &s.timeout_ms, |s, v| s.timeout_ms = v)
            .required("verbose", |s| &s.verbose, |s, v| s.verbose = v)
            .required("tags", |s| &s.tags, |s, v| s.tags = v)
            .required("weight", |s| &s.weight, |s, v| s.weight = v)
            .optional("region", |s| s.region.as_ref(), |s, v| s.region = Some(v))
            .required("limits", |s| &s.limits, |s, v| s.limits = v)
            .required("owner_id", |s| &s.owner_id, |s, v| s.owner_id = v)
            .describe()
    }
}

#[derive(Default, Debug)]
struct Clashing {
    a: u8,
    b: u8,
}

impl Describe for Clashing {
    fn describe() -> TypeDescriptor {
        NamedObject::<Clashing>::new()
            .required("key", |c| &c.a, |c, v| c.a = v)
            .required("key", |c| &c.b, |c, v| c.b = v)
            .describe()
    }
}

fn record(out: &mut Vec<u8>, key: &[u8], value: &[u8]) {
    out.push(key.len() as u8);
    out.extend_from_slice(key);
    out.push(value.len() as u8);
    out.extend_from_slice(value);
}

#[test]
fn test_absent_optional_member_is_omitted() {
    let generator = Generator::default();
    let person = Person { id: 5, name: None };
    let bytes = generator.encode(&person).unwrap();
    assert_eq!(bytes, vec![2, b'i', b'd', 4, 5, 0, 0, 0]);
    test_roundtrip(&generator, person);
}

#[test]
fn test_present_optional_member() {
    let generator = Generator::default();
    let person = Person {
        id: 1,
        name: Some("Ann".to_string()),
    };
    let mut expected = Vec::new();
    record(&mut expected, b"id", &[1, 0, 0, 0]);
    record(&mut expected, b"name", b"Ann");
    assert_eq!(generator.encode(&person).unwrap(), expected);
    test_roundtrip(&generator, person);

    let empty_name = Person {
        id: 2,
        name: Some(String::new()),
    };
    test_roundtrip(&generator, empty_name);
}

#[test]
fn test_unknown_keys_are_skipped() {
    let generator = Generator::default();
    let mut bytes = generator.encode(&Person { id: 5, name: None }).unwrap();
    record(&mut bytes, b"extra", &[9]);
    let person: Person = generator.decode(&bytes).unwrap();
    assert_eq!(person, Person { id: 5, name: None });
}

#[test]
fn test_unknown_key_between_variable_members() {
    let generator = Generator::default();
    let expected = Person {
        id: 42,
        name: Some("x".to_string()),
    };

    let mut between = Vec::new();
    record(&mut between, b"id", &[42, 0, 0, 0]);
    record(&mut between, b"extra", b"y");
    record(&mut between, b"name", b"x");
    assert_eq!(generator.decode::<Person>(&between).unwrap(), expected);

    let mut after = generator.encode(&expected).unwrap();
    record(&mut after, b"extra", b"y");
    assert_eq!(generator.decode::<Person>(&after).unwrap(), expected);

    let mut before = Vec::new();
    record(&mut before, b"extra", b"y");
    before.extend(generator.encode(&expected).unwrap());
    assert_eq!(generator.decode::<Person>(&before).unwrap(), expected);
}

#[test]
fn test_many_members() {
    let generator = Generator::default();
    let settings = Settings {
        host: "db.internal".to_string(),
        port: 5432,
        user: Some("admin".to_string()),
        retries: 3,
        timeout_ms: 2500,
        verbose: true,
        tags: vec!["primary".to_string(), "eu".to_string()],
        weight: 0.75,
        region: None,
        limits: (10, 100),
        owner_id: -9,
    };
    test_roundtrip(&generator, settings.clone());

    let mut bytes = Vec::new();
    record(&mut bytes, b"unused", &[1, 2, 3]);
    bytes.extend(generator.encode(&settings).unwrap());
    record(&mut bytes, b"host_", b"other");
    record(&mut bytes, b"region2", b"x");
    assert_eq!(generator.decode::<Settings>(&bytes).unwrap(), settings);

    let mut reordered = Vec::new();
    record(&mut reordered, b"owner_id", &(-9i64).to_le_bytes());
    record(&mut reordered, b"region", b"eu-west");
    let mut rest = generator.encode(&settings).unwrap();
    // Drop the trailing owner_id record (1 + 8 key bytes, 1 + 8 value bytes).
    rest.truncate(rest.len() - 18);
    reordered.extend(rest);
    let decoded: Settings = generator.decode(&reordered).unwrap();
    assert_eq!(decoded.region.as_deref(), Some("eu-west"));
    assert_eq!(decoded.owner_id, -9);
    assert_eq!(decoded.host, "db.internal");
}

#[test]
fn test_many_members_missing_required() {
    if tessera_core::error::should_panic_on_error() {
        return;
    }
    let generator = Generator::default();
    let mut bytes = Vec::new();
    record(&mut bytes, b"host", b"h");
    record(&mut bytes, b"port", &[1, 0]);
    let err = generator.decode::<Settings>(&bytes).unwrap_err();
    assert!(matches!(err, Error::MissingField(ref key, _) if key == "retries"));
}

#[test]
fn test_member_order_is_free_on_decode() {
    let generator = Generator::default();
    let mut bytes = Vec::new();
    record(&mut bytes, b"name", b"Bo");
    record(&mut bytes, b"id", &[7, 0, 0, 0]);
    let person: Person = generator.decode(&bytes).unwrap();
    assert_eq!(
        person,
        Person {
            id: 7,
            name: Some("Bo".to_string())
        }
    );
}

#[test]
fn test_missing_required_member() {
    if tessera_core::error::should_panic_on_error() {
        return;
    }
    let generator = Generator::default();
    let mut bytes = Vec::new();
    record(&mut bytes, b"name", b"Bo");
    let err = generator.decode::<Person>(&bytes).unwrap_err();
    assert!(matches!(err, Error::MissingField(ref key, _) if key == "id"));

    let err = generator.decode::<Person>(&[]).unwrap_err();
    assert!(matches!(err, Error::MissingField(..)));
}

#[test]
fn test_duplicate_member() {
    if tessera_core::error::should_panic_on_error() {
        return;
    }
    let generator = Generator::default();
    let mut bytes = Vec::new();
    record(&mut bytes, b"id", &[1, 0, 0, 0]);
    record(&mut bytes, b"id", &[2, 0, 0, 0]);
    let err = generator.decode::<Person>(&bytes).unwrap_err();
    assert!(matches!(err, Error::DuplicateField(ref key, _) if key == "id"));
}

#[test]
fn test_truncated_record() {
    if tessera_core::error::should_panic_on_error() {
        return;
    }
    let generator = Generator::default();
    let err = generator
        .decode::<Person>(&[2, b'i', b'd', 4, 5, 0])
        .unwrap_err();
    assert!(matches!(err, Error::InsufficientData(..)));
}

#[test]
fn test_nested_named_objects() {
    let generator = Generator::default();
    let team = Team {
        title: "core".to_string(),
        lead: Person {
            id: 1,
            name: Some("Lee".to_string()),
        },
        members: (2..6)
            .map(|id| Person {
                id,
                name: (id % 2 == 0).then(|| format!("member-{}", id)),
            })
            .collect(),
        tags: HashMap::from([("infra".to_string(), 3), ("oncall".to_string(), 1)]),
    };
    test_roundtrip(&generator, team);
    test_roundtrip(&generator, Team::default());
}

#[test]
fn test_duplicate_description_keys() {
    if tessera_core::error::should_panic_on_error() {
        return;
    }
    let generator = Generator::default();
    let err = generator.get_converter::<Clashing>().unwrap_err();
    assert!(matches!(err, Error::MalformedKeySet(_)));
    assert_eq!(generator.converter_count(), 0);
}
