// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Platform clock and local-time conversion.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    error::{ClockReadError, LocalTimeConversionError},
    value::LocalFields,
};

#[cfg(not(unix))]
mod fallback;
#[cfg(unix)]
mod unix;

#[cfg(not(unix))]
use self::fallback::local_fields;
#[cfg(unix)]
use self::unix::local_fields;

const MICROS_PER_SECOND: u32 = 1_000_000;
const NANOS_PER_SECOND: u32 = 1_000_000_000;
const NANOS_PER_MICRO: u32 = 1_000;

/// An instant as whole epoch seconds, floored, plus microseconds in
/// `[0, 1_000_000)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    secs: i64,
    micros: u32,
}

impl Timestamp {
    pub fn new(secs: i64, micros: u32) -> Option<Self> {
        (micros < MICROS_PER_SECOND).then_some(Self { secs, micros })
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self { secs, micros: 0 }
    }

    /// Floors toward negative infinity, so instants before the epoch keep a
    /// non-negative sub-second part.
    pub fn from_system_time(time: SystemTime) -> Result<Self, ClockReadError> {
        match time.duration_since(UNIX_EPOCH) {
            Ok(elapsed) => {
                let secs = i64::try_from(elapsed.as_secs())
                    .map_err(|_| ClockReadError::new("time is out of range"))?;
                Ok(Self {
                    secs,
                    micros: elapsed.subsec_micros(),
                })
            },
            Err(err) => {
                let before = err.duration();
                let whole = i64::try_from(before.as_secs())
                    .map_err(|_| ClockReadError::new("time is out of range"))?;
                let nanos = before.subsec_nanos();
                if nanos == 0 {
                    return Ok(Self {
                        secs: -whole,
                        micros: 0,
                    });
                }
                let secs = (-whole)
                    .checked_sub(1)
                    .ok_or(ClockReadError::new("time is out of range"))?;
                Ok(Self {
                    secs,
                    micros: (NANOS_PER_SECOND - nanos) / NANOS_PER_MICRO,
                })
            },
        }
    }

    pub fn secs(&self) -> i64 {
        self.secs
    }

    pub fn micros(&self) -> u32 {
        self.micros
    }
}

/// Source of the current instant and of local calendar fields.
pub trait TimeSource {
    fn now(&self) -> Result<Timestamp, ClockReadError>;

    /// Local calendar fields for `secs`. The second may be 60 on platforms that
    /// report leap seconds.
    fn local_fields(&self, secs: i64) -> Result<LocalFields, LocalTimeConversionError>;
}

/// The system clock with the operating system's local-time conversion
/// (`localtime_r` on unix).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    #[inline]
    fn now(&self) -> Result<Timestamp, ClockReadError> {
        Timestamp::from_system_time(SystemTime::now())
    }

    #[inline]
    fn local_fields(&self, secs: i64) -> Result<LocalFields, LocalTimeConversionError> {
        local_fields(secs)
    }
}

impl<S: TimeSource + ?Sized> TimeSource for &S {
    fn now(&self) -> Result<Timestamp, ClockReadError> {
        (**self).now()
    }

    fn local_fields(&self, secs: i64) -> Result<LocalFields, LocalTimeConversionError> {
        (**self).local_fields(secs)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_timestamp_after_epoch() {
        let time = UNIX_EPOCH + Duration::new(1_700_000_000, 123_456_789);
        let ts = Timestamp::from_system_time(time).unwrap();
        assert_eq!(ts.secs(), 1_700_000_000);
        assert_eq!(ts.micros(), 123_456);
    }

    #[test]
    fn test_timestamp_before_epoch_is_floored() {
        let time = UNIX_EPOCH - Duration::new(1, 500_000_000);
        let ts = Timestamp::from_system_time(time).unwrap();
        assert_eq!(ts.secs(), -2);
        assert_eq!(ts.micros(), 500_000);

        let time = UNIX_EPOCH - Duration::new(0, 100);
        let ts = Timestamp::from_system_time(time).unwrap();
        assert_eq!(ts.secs(), -1);
        assert_eq!(ts.micros(), 999_999);

        let time = UNIX_EPOCH - Duration::from_secs(10);
        let ts = Timestamp::from_system_time(time).unwrap();
        assert_eq!(ts.secs(), -10);
        assert_eq!(ts.micros(), 0);
    }

    #[test]
    fn test_timestamp_new() {
        assert!(Timestamp::new(0, 999_999).is_some());
        assert!(Timestamp::new(0, 1_000_000).is_none());
    }

    #[test]
    fn test_system_source() {
        let source = SystemTimeSource;
        let ts = source.now().unwrap();
        assert!(ts.secs() > 1_600_000_000);
        let fields = source.local_fields(ts.secs()).unwrap();
        assert!((1..=12).contains(&fields.month));
        assert!(fields.second <= 60);
    }
}
