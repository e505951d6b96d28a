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

//! # Tessera
//!
//! Tessera is a compact, schema-less binary serializer. Values are encoded by
//! converters that a [`Generator`] builds once per type from a description of
//! the type, then caches and shares between threads.
//!
//! ## Key Features
//!
//! - **Compact**: no headers, no type tags, fixed length values written bare
//! - **Zero-copy decoding** of nested spans, bounded by the input length
//! - **Bulk copies** for sequences of numeric primitives
//! - **Optional-field tolerance**: keyed objects skip unknown members and
//!   accept missing optional ones
//! - **Pluggable**: add hand written converters or whole converter creators
//!
//! ## Quick start
//!
//! ```rust
//! use std::collections::HashMap;
//! use tessera::{Describe, Error, NamedObject, TypeDescriptor};
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Order {
//!     id: u64,
//!     items: Vec<String>,
//!     prices: HashMap<String, f64>,
//!     note: Option<String>,
//! }
//!
//! impl Describe for Order {
//!     fn describe() -> TypeDescriptor {
//!         NamedObject::<Order>::new()
//!             .required("id", |o| &o.id, |o, v| o.id = v)
//!             .required("items", |o| &o.items, |o, v| o.items = v)
//!             .required("prices", |o| &o.prices, |o, v| o.prices = v)
//!             .optional("note", |o| o.note.as_ref(), |o, v| o.note = Some(v))
//!             .describe()
//!     }
//! }
//!
//! fn round_trip(order: &Order) -> Result<Order, Error> {
//!     let bytes = tessera::encode(order)?;
//!     tessera::decode(&bytes)
//! }
//!
//! let order = Order {
//!     id: 42,
//!     items: vec!["apple".to_string()],
//!     prices: HashMap::from([("apple".to_string(), 0.5)]),
//!     note: None,
//! };
//! assert_eq!(round_trip(&order).unwrap(), order);
//! ```
//!
//! ## Positional objects
//!
//! [`TupleObject`] describes a type encoded like a tuple: members in
//! declaration order without keys. It is smaller than a keyed object but does
//! not tolerate member changes between writer and reader.
//!
//! ## Custom converters
//!
//! A [`Converter`] written by hand, or produced by a code generator, is
//! registered with [`GeneratorBuilder::add_converter`]. The generator then
//! uses it wherever the type appears, including inside collections and
//! objects. Types that only a custom converter can handle describe
//! themselves with [`TypeKind::Opaque`].
//!
//! ## Debugging
//!
//! Build with `TESSERA_PANIC_ON_ERROR=1` to panic where an error is created,
//! and enable `tracing` at `debug` level to see converters as they are built.

use std::sync::OnceLock;

pub use tessera_core::{
    bail,
    buffer::{Allocator, Anchor, Reader},
    config::Config,
    converter::{
        AnyConverter, Converter, ConverterHandle, NamedObject, PrimitiveConverter,
        SequenceStrategy, TupleObject,
    },
    ensure,
    error::Error,
    generator::{Generator, GeneratorBuilder},
    meta::BinaryKeyDictionary,
    resolver::{ConverterCreator, GeneratorContext},
    types::{Describe, TypeDescriptor, TypeKind, TypeRef},
};

static DEFAULT_GENERATOR: OnceLock<Generator> = OnceLock::new();

/// The process-wide generator used by [`encode`] and [`decode`].
pub fn default_generator() -> &'static Generator {
    DEFAULT_GENERATOR.get_or_init(Generator::default)
}

/// Encodes `value` with the process-wide generator.
pub fn encode<T: Describe>(value: &T) -> Result<Vec<u8>, Error> {
    default_generator().encode(value)
}

/// Decodes a `T` with the process-wide generator.
pub fn decode<T: Describe>(span: &[u8]) -> Result<T, Error> {
    default_generator().decode(span)
}
