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
use crate::converter::core::Converter;
use crate::converter::number::PrimitiveConverter;
use crate::error::Error;

impl Converter<String> for PrimitiveConverter<String> {
    #[inline(always)]
    fn encode(&self, allocator: &mut Allocator<'_>, value: &String) -> Result<(), Error> {
        allocator.append(value.as_bytes())
    }

    #[inline(always)]
    fn decode(&self, span: &[u8]) -> Result<String, Error> {
        std::str::from_utf8(span)
            .map(str::to_owned)
            .map_err(|e| Error::invalid_data(format!("invalid utf-8 string: {}", e)))
    }
}

describe_primitive!(String);
