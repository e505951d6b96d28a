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

use crate::buffer::{Allocator, Reader};
use crate::converter::core::{fixed_span, Converter};
use crate::converter::number::PrimitiveConverter;
use crate::error::Error;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use std::time::Duration;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

fn read_instant(span: &[u8]) -> Result<DateTime<Utc>, Error> {
    let mut reader = Reader::new(fixed_span(span, 12)?);
    let seconds = reader.read_i64()?;
    let nanos = reader.read_u32()?;
    DateTime::from_timestamp(seconds, nanos).ok_or_else(|| {
        Error::invalid_data(format!(
            "timestamp {}s {}ns is out of the supported range",
            seconds, nanos
        ))
    })
}

fn write_instant(allocator: &mut Allocator<'_>, instant: &DateTime<Utc>) -> Result<(), Error> {
    allocator.write_i64(instant.timestamp())?;
    allocator.write_u32(instant.timestamp_subsec_nanos())
}

impl Converter<NaiveDate> for PrimitiveConverter<NaiveDate> {
    fn length(&self) -> usize {
        4
    }

    fn encode(&self, allocator: &mut Allocator<'_>, value: &NaiveDate) -> Result<(), Error> {
        allocator.write_i32(value.num_days_from_ce())
    }

    fn decode(&self, span: &[u8]) -> Result<NaiveDate, Error> {
        let days = Reader::new(fixed_span(span, 4)?).read_i32()?;
        NaiveDate::from_num_days_from_ce_opt(days)
            .ok_or_else(|| Error::invalid_data(format!("date {} days from CE is out of range", days)))
    }
}

impl Converter<NaiveTime> for PrimitiveConverter<NaiveTime> {
    fn length(&self) -> usize {
        8
    }

    fn encode(&self, allocator: &mut Allocator<'_>, value: &NaiveTime) -> Result<(), Error> {
        allocator.write_u32(value.num_seconds_from_midnight())?;
        allocator.write_u32(value.nanosecond())
    }

    fn decode(&self, span: &[u8]) -> Result<NaiveTime, Error> {
        let mut reader = Reader::new(fixed_span(span, 8)?);
        let seconds = reader.read_u32()?;
        let nanos = reader.read_u32()?;
        NaiveTime::from_num_seconds_from_midnight_opt(seconds, nanos).ok_or_else(|| {
            Error::invalid_data(format!("invalid time of day {}s {}ns", seconds, nanos))
        })
    }
}

impl Converter<NaiveDateTime> for PrimitiveConverter<NaiveDateTime> {
    fn length(&self) -> usize {
        12
    }

    fn encode(&self, allocator: &mut Allocator<'_>, value: &NaiveDateTime) -> Result<(), Error> {
        write_instant(allocator, &value.and_utc())
    }

    fn decode(&self, span: &[u8]) -> Result<NaiveDateTime, Error> {
        Ok(read_instant(span)?.naive_utc())
    }
}

impl Converter<DateTime<Utc>> for PrimitiveConverter<DateTime<Utc>> {
    fn length(&self) -> usize {
        12
    }

    fn encode(&self, allocator: &mut Allocator<'_>, value: &DateTime<Utc>) -> Result<(), Error> {
        write_instant(allocator, value)
    }

    fn decode(&self, span: &[u8]) -> Result<DateTime<Utc>, Error> {
        read_instant(span)
    }
}

impl Converter<Duration> for PrimitiveConverter<Duration> {
    fn length(&self) -> usize {
        12
    }

    fn encode(&self, allocator: &mut Allocator<'_>, value: &Duration) -> Result<(), Error> {
        allocator.write_u64(value.as_secs())?;
        allocator.write_u32(value.subsec_nanos())
    }

    fn decode(&self, span: &[u8]) -> Result<Duration, Error> {
        let mut reader = Reader::new(fixed_span(span, 12)?);
        let seconds = reader.read_u64()?;
        let nanos = reader.read_u32()?;
        if nanos >= NANOS_PER_SECOND {
            return Err(Error::invalid_data(format!(
                "duration nanoseconds {} out of range",
                nanos
            )));
        }
        Ok(Duration::new(seconds, nanos))
    }
}

describe_primitive!(NaiveDate, NaiveTime, NaiveDateTime, DateTime<Utc>, Duration);
