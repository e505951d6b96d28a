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

use crate::buffer::Allocator;
use crate::converter::core::{fixed_span, Converter};
use crate::converter::number::PrimitiveConverter;
use crate::error::Error;
use uuid::Uuid;

/// GUIDs are stored in RFC 4122 byte order.
impl Converter<Uuid> for PrimitiveConverter<Uuid> {
    fn length(&self) -> usize {
        16
    }

    fn encode(&self, allocator: &mut Allocator<'_>, value: &Uuid) -> Result<(), Error> {
        allocator.append(value.as_bytes())
    }

    fn decode(&self, span: &[u8]) -> Result<Uuid, Error> {
        Uuid::from_slice(fixed_span(span, 16)?).map_err(|e| Error::invalid_data(e.to_string()))
    }
}

describe_primitive!(Uuid);
