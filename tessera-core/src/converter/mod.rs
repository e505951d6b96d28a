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

macro_rules! describe_primitive {
    ($($ty:ty),+) => {
        $(
            impl $crate::types::Describe for $ty {
                fn describe() -> $crate::types::TypeDescriptor {
                    $crate::types::TypeDescriptor::new::<$ty>($crate::types::TypeKind::Primitive)
                }
            }
        )+
    };
}

pub mod collection;
pub mod core;
pub mod datetime;
pub mod guid;
pub mod handle;
pub mod list;
pub mod map;
pub(crate) mod member;
pub mod named;
pub mod net;
pub mod number;
pub mod option;
pub mod pointer;
pub mod shared;
pub mod string;
pub mod tuple;

pub use self::core::Converter;
pub use collection::{SequenceAdapter, SequenceStrategy};
pub use handle::{AnyConverter, ConverterHandle};
pub use named::NamedObject;
pub use number::PrimitiveConverter;
pub use tuple::TupleObject;
