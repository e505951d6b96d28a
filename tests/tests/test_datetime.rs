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

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::time::Duration;
use tessera_core::generator::Generator;
use test_helpers::{assert_fixed_length, test_roundtrip};

#[test]
fn test_naive_date() {
    let generator = Generator::default();
    let dates = [
        NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        NaiveDate::from_ymd_opt(-44, 3, 15).unwrap(),
        NaiveDate::MAX,
    ];
    assert_fixed_length(&generator, &dates, 4);
}

#[test]
fn test_naive_time() {
    let generator = Generator::default();
    let times = [
        NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
        NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap(),
        NaiveTime::from_hms_milli_opt(12, 0, 1, 500).unwrap(),
    ];
    assert_fixed_length(&generator, &times, 8);
}

#[test]
fn test_timestamps() {
    let generator = Generator::default();
    let naive: Vec<NaiveDateTime> = vec![
        NaiveDate::from_ymd_opt(2021, 11, 23)
            .unwrap()
            .and_hms_nano_opt(10, 30, 0, 123_456_789)
            .unwrap(),
        NaiveDate::from_ymd_opt(1969, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap(),
    ];
    assert_fixed_length(&generator, &naive, 12);

    let utc: Vec<DateTime<Utc>> = naive.iter().map(|n| n.and_utc()).collect();
    assert_fixed_length(&generator, &utc, 12);
    test_roundtrip(&generator, utc);
}

#[test]
fn test_duration() {
    let generator = Generator::default();
    assert_fixed_length(
        &generator,
        &[
            Duration::ZERO,
            Duration::from_millis(1500),
            Duration::new(u64::MAX, 999_999_999),
        ],
        12,
    );
}

#[test]
fn test_dates_in_collections() {
    let generator = Generator::default();
    let days: Vec<NaiveDate> = (0..100)
        .map(|i| NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + chrono::Days::new(i))
        .collect();
    let bytes = generator.encode(&days).unwrap();
    assert_eq!(bytes.len(), 400);
    let back: Vec<NaiveDate> = generator.decode(&bytes).unwrap();
    assert_eq!(back, days);
}
