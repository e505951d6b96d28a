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

use std::collections::BTreeMap;
use std::sync::{Arc, Barrier};
use std::thread;
use tessera_core::converter::NamedObject;
use tessera_core::generator::Generator;
use tessera_core::types::{Describe, TypeDescriptor};

#[derive(Default, Debug, Clone, PartialEq)]
struct Event {
    id: u64,
    payload: Vec<u8>,
    labels: BTreeMap<String, String>,
}

impl Describe for Event {
    fn describe() -> TypeDescriptor {
        NamedObject::<Event>::new()
            .required("id", |e| &e.id, |e, v| e.id = v)
            .required("payload", |e| &e.payload, |e, v| e.payload = v)
            .required("labels", |e| &e.labels, |e, v| e.labels = v)
            .describe()
    }
}

#[test]
fn test_concurrent_resolution_yields_one_converter() {
    let generator = Arc::new(Generator::default());
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let generator = Arc::clone(&generator);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                generator.get_converter::<Vec<Event>>().unwrap()
            })
        })
        .collect();
    let converters: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for converter in &converters[1..] {
        assert!(Arc::ptr_eq(&converters[0], converter));
    }
}

#[test]
fn test_concurrent_encode_decode() {
    let generator = Arc::new(Generator::default());
    let handles: Vec<_> = (0..8u64)
        .map(|i| {
            let generator = Arc::clone(&generator);
            thread::spawn(move || {
                for round in 0..100u64 {
                    let event = Event {
                        id: i * 1000 + round,
                        payload: vec![i as u8; (round % 40) as usize],
                        labels: BTreeMap::from([(format!("thread-{}", i), round.to_string())]),
                    };
                    let bytes = generator.encode(&event).unwrap();
                    let back: Event = generator.decode(&bytes).unwrap();
                    assert_eq!(back, event);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
