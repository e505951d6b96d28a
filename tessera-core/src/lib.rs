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

//! # Tessera Core
//!
//! Core of the tessera binary serialization engine: the converter model,
//! the output buffer, the key dictionary and the converter resolution engine.
//!
//! ## Architecture
//!
//! - **`buffer`**: growable [`Allocator`](buffer::Allocator) with anchor/backpatch
//!   support, and the bounds-checked [`Reader`](buffer::Reader)
//! - **`converter`**: the [`Converter`](converter::Converter) contract and the
//!   built-in converters (numbers, strings, chrono, uuid, net, options,
//!   pointers, collections, maps, tuples, keyed and positional objects)
//! - **`meta`**: the binary key dictionary used to match member keys
//! - **`resolver`**: creator chain, resolution context, registry and pools
//! - **`generator`**: the [`Generator`](generator::Generator) tying it together
//! - **`types`**: type descriptors supplied through [`Describe`](types::Describe)
//! - **`error`**: the error type and `ensure!`/`bail!` helpers
//!
//! ## Wire format
//!
//! There is no header, version tag or type information in the stream. Fixed
//! length values are written bare in little-endian order. Variable length
//! values embedded in a larger value carry a big-endian length prefix of 1,
//! 2 or 4 bytes, whose class sits in the leading bits of the first byte.
//! Collections are the bare run of their elements, keyed objects a run of
//! `<key><value>` records, tuples the concatenation of their members.
//!
//! ## Recursive types
//!
//! A type whose description reaches itself while its converter is still
//! being built, such as a list node holding `Option<Box<Self>>`, is rejected
//! at resolution time with an [`Error::TypeError`](error::Error::TypeError)
//! reading "Self type reference detected", and nothing is cached for it. The
//! engine does no cycle detection while encoding: the built-in converters
//! only reach owned, acyclic data, but a hand written converter that follows
//! cyclic data recurses until the stack is exhausted.
//!
//! ```rust
//! use tessera_core::converter::NamedObject;
//! use tessera_core::generator::Generator;
//! use tessera_core::types::{Describe, TypeDescriptor};
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Person {
//!     id: i32,
//!     name: Option<String>,
//! }
//!
//! impl Describe for Person {
//!     fn describe() -> TypeDescriptor {
//!         NamedObject::<Person>::new()
//!             .required("id", |p| &p.id, |p, v| p.id = v)
//!             .optional("name", |p| p.name.as_ref(), |p, v| p.name = Some(v))
//!             .describe()
//!     }
//! }
//!
//! let generator = Generator::default();
//! let person = Person { id: 7, name: None };
//! let bytes = generator.encode(&person).unwrap();
//! let back: Person = generator.decode(&bytes).unwrap();
//! assert_eq!(back, person);
//! ```

pub mod buffer;
pub mod config;
pub mod converter;
pub mod error;
pub mod generator;
pub mod meta;
pub mod resolver;
pub mod types;

pub use buffer::{Allocator, Anchor, Reader};
pub use config::Config;
pub use converter::{Converter, ConverterHandle, NamedObject, TupleObject};
pub use error::Error;
pub use generator::{Generator, GeneratorBuilder};
pub use resolver::{ConverterCreator, GeneratorContext};
pub use types::{Describe, TypeDescriptor, TypeKind, TypeRef};
