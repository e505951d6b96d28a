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

//! Process-wide converters for the built-in leaf types.
//!
//! Built once on first use and shared read-only by every generator.

use crate::converter::collection::{RawAdapter, RawElement};
use crate::converter::core::Converter;
use crate::converter::handle::ConverterHandle;
use crate::converter::number::PrimitiveConverter;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::any::TypeId;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use uuid::Uuid;

static BUILTINS: OnceLock<HashMap<TypeId, ConverterHandle>> = OnceLock::new();

fn primitive<T>() -> ConverterHandle
where
    T: Send + Sync + 'static,
    PrimitiveConverter<T>: Converter<T>,
{
    ConverterHandle::from_converter::<T, _>(PrimitiveConverter::<T>::new())
}

fn raw_primitive<T>() -> ConverterHandle
where
    T: RawElement,
    PrimitiveConverter<T>: Converter<T>,
{
    let handle = primitive::<T>();
    if cfg!(target_endian = "little") {
        handle.with_raw_adapter::<T>(Arc::new(RawAdapter::<T>::new()))
    } else {
        handle
    }
}

macro_rules! insert_all {
    ($map:ident, $make:ident; $($ty:ty),+) => {
        $($map.insert(TypeId::of::<$ty>(), $make::<$ty>());)+
    };
}

fn build_table() -> HashMap<TypeId, ConverterHandle> {
    let mut table = HashMap::new();
    insert_all!(table, raw_primitive; u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, f32, f64);
    insert_all!(table, primitive; bool, char, usize, isize, String, Uuid, Duration);
    insert_all!(table, primitive; NaiveDate, NaiveTime, NaiveDateTime, DateTime<Utc>);
    insert_all!(table, primitive; Ipv4Addr, Ipv6Addr, IpAddr, SocketAddr);
    tracing::debug!(count = table.len(), "built-in converters initialized");
    table
}

/// Returns the shared converter of a built-in leaf type.
pub fn builtin_converter(type_id: TypeId) -> Option<&'static ConverterHandle> {
    BUILTINS.get_or_init(build_table).get(&type_id)
}
