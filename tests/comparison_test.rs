// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Compares the cached clock against chrono-tz for a real zone.
//!
//! The transition table for Europe/Paris is derived from chrono-tz by probing
//! every hour, and local fields are produced by chrono-tz as well, so any
//! disagreement comes from the cache.

use chrono::{DateTime, Offset, TimeZone};
use chrono_tz::Europe::Paris;
use llrt_fast_now::{
    ClockReadError, FastNow, FixedTz, LocalDateTime, LocalFields, LocalTimeConversionError,
    TimeSource, Timestamp, TransitionTable,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// 2020-01-01 00:00:00 UTC
const FROM: i64 = 1577836800;
/// 2025-01-01 00:00:00 UTC
const TO: i64 = 1735689600;

fn paris_offset(secs: i64) -> i32 {
    let utc = DateTime::from_timestamp(secs, 0).unwrap();
    Paris
        .offset_from_utc_datetime(&utc.naive_utc())
        .fix()
        .local_minus_utc()
}

fn descriptor(offset: i32) -> Option<FixedTz> {
    let name = match offset {
        3600 => "CET",
        7200 => "CEST",
        _ => "LMT",
    };
    FixedTz::east(name, offset)
}

fn paris_table() -> TransitionTable<FixedTz> {
    let mut descriptors: Vec<Option<FixedTz>> = Vec::new();
    let mut index_of = |offset: i32| {
        let tz = descriptor(offset);
        match descriptors.iter().position(|known| *known == tz) {
            Some(index) => index,
            None => {
                descriptors.push(tz);
                descriptors.len() - 1
            },
        }
    };

    let mut boundaries = Vec::new();
    let mut indexes = Vec::new();
    let mut previous = paris_offset(FROM);
    let default_index = index_of(previous);
    for secs in (FROM..TO).step_by(3600) {
        let current = paris_offset(secs);
        if current != previous {
            boundaries.push(secs);
            indexes.push(index_of(previous));
            previous = current;
        }
    }

    TransitionTable::new(descriptors, boundaries, indexes, default_index).unwrap()
}

struct ParisSource;

impl TimeSource for ParisSource {
    fn now(&self) -> Result<Timestamp, ClockReadError> {
        Err(ClockReadError::new("replay only"))
    }

    fn local_fields(&self, secs: i64) -> Result<LocalFields, LocalTimeConversionError> {
        let utc = DateTime::from_timestamp(secs, 0).ok_or(LocalTimeConversionError::new(secs))?;
        Ok(LocalFields::from_naive(
            &utc.with_timezone(&Paris).naive_local(),
        ))
    }
}

fn paris_clock() -> FastNow<FixedTz, LocalDateTime<FixedTz>, ParisSource> {
    FastNow::with_source(paris_table(), ParisSource)
}

fn assert_matches_chrono_tz(value: &LocalDateTime<FixedTz>, secs: i64) {
    let tz = value.tz().unwrap();
    assert_eq!(
        tz.local_minus_utc(),
        paris_offset(secs),
        "Offset mismatch at {}: got {}",
        secs,
        tz.name()
    );
    assert_eq!(
        value.to_fixed_offset().unwrap().timestamp(),
        secs,
        "Local fields do not round trip at {}",
        secs
    );
}

#[test]
fn test_table_shape() {
    let table = paris_table();
    // Two transitions per year.
    assert_eq!(table.len(), 10);
    assert_eq!(table.descriptors().len(), 2);
    // 2020-03-29 01:00:00 UTC
    assert_eq!(table.boundaries()[0], 1585443600);
}

#[test]
fn test_monotonic_queries() {
    let mut clock = paris_clock();
    let last = *clock.table().boundaries().last().unwrap();

    for secs in (FROM..last).step_by(1799) {
        let value = clock.at(Timestamp::from_secs(secs)).unwrap();
        assert_matches_chrono_tz(&value, secs);
    }
}

#[test]
fn test_around_boundaries() {
    let mut clock = paris_clock();
    let boundaries = clock.table().boundaries().to_vec();
    let (last, inner) = boundaries.split_last().unwrap();

    for &boundary in inner {
        for secs in [boundary - 1, boundary, boundary + 1] {
            let value = clock.at(Timestamp::from_secs(secs)).unwrap();
            assert_matches_chrono_tz(&value, secs);
        }
    }

    // At the final boundary the table runs out and summer time is kept.
    let before = clock.at(Timestamp::from_secs(last - 1)).unwrap();
    assert_matches_chrono_tz(&before, last - 1);
    for secs in [*last, last + 1] {
        let value = clock.at(Timestamp::from_secs(secs)).unwrap();
        assert_eq!(value.tz().map(FixedTz::name), Some("CEST"));
    }
}

#[test]
fn test_random_jumps() {
    let mut clock = paris_clock();
    let last = *clock.table().boundaries().last().unwrap();
    let mut rng = StdRng::seed_from_u64(0x5A544C4C);

    for _ in 0..2000 {
        let secs = rng.gen_range(FROM..last);
        let value = clock.at(Timestamp::from_secs(secs)).unwrap();
        assert_matches_chrono_tz(&value, secs);
    }
}

#[test]
fn test_backward_jump_matches_fresh_clock() {
    let mut clock = paris_clock();
    let last = *clock.table().boundaries().last().unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        clock.at(Timestamp::from_secs(last - 1)).unwrap();
        let secs = rng.gen_range(FROM..last);
        let warm = clock.at(Timestamp::from_secs(secs)).unwrap();

        let mut fresh = paris_clock();
        let cold = fresh.at(Timestamp::from_secs(secs)).unwrap();
        assert_eq!(warm, cold);
        assert_eq!(clock.cache().window(), fresh.cache().window());
    }
}

#[test]
fn test_beyond_table_keeps_last_offset() {
    let mut clock = paris_clock();
    let last = *clock.table().boundaries().last().unwrap();

    let before = clock.at(Timestamp::from_secs(last - 1)).unwrap();
    // The final boundary is the end of summer time 2024.
    assert_eq!(before.tz().map(FixedTz::name), Some("CEST"));

    for secs in [last, last + 86400, last + 86400 * 365] {
        let value = clock.at(Timestamp::from_secs(secs)).unwrap();
        assert_eq!(value.tz(), before.tz());
    }
}
