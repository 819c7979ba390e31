// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Calendar values produced by the clock.
//!
//! The clock never calls a general-purpose constructor on the hot path. It hands
//! already-validated platform fields to [`FromLocalFields::from_local_fields`],
//! which only stores them. [`LocalDateTime::new`] is the checked constructor for
//! everyone else.

use std::{cmp::Ordering, fmt};

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, Timelike};

use crate::error::ValueError;

const MICROS_PER_SECOND: u32 = 1_000_000;

/// Broken-down local time as reported by the platform.
///
/// Ordered chronologically: fields are compared from year down to second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalFields {
    pub year: i32,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    /// May be 60 when the platform reports a leap second.
    pub second: u8,
}

impl LocalFields {
    pub fn from_naive(naive: &NaiveDateTime) -> Self {
        Self {
            year: naive.year(),
            month: naive.month() as u8,
            day: naive.day() as u8,
            hour: naive.hour() as u8,
            minute: naive.minute() as u8,
            second: naive.second() as u8,
        }
    }

    /// Leap seconds are folded into second 59.
    #[inline]
    pub fn with_clamped_second(mut self) -> Self {
        self.second = self.second.min(59);
        self
    }
}

/// A calendar type the clock can assemble directly from platform fields.
///
/// Implementations must not re-validate: `fields` already came from the
/// platform conversion, the second is at most 59 and `microsecond` is below
/// one million.
pub trait FromLocalFields<Z> {
    fn from_local_fields(fields: LocalFields, microsecond: u32, tz: Option<Z>) -> Self;
}

/// Local wall-clock time with an optional timezone descriptor.
///
/// `fold` is always `0`: the repeated hour of a fall-back transition is not
/// disambiguated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalDateTime<Z> {
    fields: LocalFields,
    microsecond: u32,
    tz: Option<Z>,
}

impl<Z> LocalDateTime<Z> {
    /// Checked constructor. Rejects impossible dates and out of range times,
    /// including leap seconds.
    pub fn new(fields: LocalFields, microsecond: u32, tz: Option<Z>) -> Result<Self, ValueError> {
        if !(1..=12).contains(&fields.month) {
            return Err(ValueError::new("month", fields.month.into()));
        }
        if NaiveDate::from_ymd_opt(fields.year, fields.month.into(), fields.day.into()).is_none() {
            return Err(ValueError::new("day", fields.day.into()));
        }
        if fields.hour > 23 {
            return Err(ValueError::new("hour", fields.hour.into()));
        }
        if fields.minute > 59 {
            return Err(ValueError::new("minute", fields.minute.into()));
        }
        if fields.second > 59 {
            return Err(ValueError::new("second", fields.second.into()));
        }
        if microsecond >= MICROS_PER_SECOND {
            return Err(ValueError::new("microsecond", microsecond.into()));
        }
        Ok(Self {
            fields,
            microsecond,
            tz,
        })
    }

    pub fn year(&self) -> i32 {
        self.fields.year
    }

    pub fn month(&self) -> u8 {
        self.fields.month
    }

    pub fn day(&self) -> u8 {
        self.fields.day
    }

    pub fn hour(&self) -> u8 {
        self.fields.hour
    }

    pub fn minute(&self) -> u8 {
        self.fields.minute
    }

    pub fn second(&self) -> u8 {
        self.fields.second
    }

    pub fn microsecond(&self) -> u32 {
        self.microsecond
    }

    pub fn fold(&self) -> u8 {
        0
    }

    pub fn fields(&self) -> LocalFields {
        self.fields
    }

    pub fn tz(&self) -> Option<&Z> {
        self.tz.as_ref()
    }

    pub fn is_naive(&self) -> bool {
        self.tz.is_none()
    }

    /// The wall-clock time without its descriptor.
    pub fn naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(
            self.fields.year,
            self.fields.month.into(),
            self.fields.day.into(),
        )?
        .and_hms_micro_opt(
            self.fields.hour.into(),
            self.fields.minute.into(),
            self.fields.second.into(),
            self.microsecond,
        )
    }
}

impl<Z: Offset> LocalDateTime<Z> {
    /// Returns `None` for naive values.
    pub fn to_fixed_offset(&self) -> Option<DateTime<FixedOffset>> {
        let offset = self.tz.as_ref()?.fix();
        self.naive()?.and_local_timezone(offset).single()
    }
}

/// Orders by wall-clock time. Values with the same wall-clock time but
/// different descriptors are not comparable.
impl<Z: PartialEq> PartialOrd for LocalDateTime<Z> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.fields, self.microsecond).cmp(&(other.fields, other.microsecond)) {
            Ordering::Equal => (self.tz == other.tz).then_some(Ordering::Equal),
            ordering => Some(ordering),
        }
    }
}

impl<Z> FromLocalFields<Z> for LocalDateTime<Z> {
    #[inline]
    fn from_local_fields(fields: LocalFields, microsecond: u32, tz: Option<Z>) -> Self {
        Self {
            fields,
            microsecond,
            tz,
        }
    }
}

impl<Z: fmt::Display> fmt::Display for LocalDateTime<Z> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let LocalFields {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = self.fields;
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:06}",
            year, month, day, hour, minute, second, self.microsecond
        )?;
        if let Some(tz) = &self.tz {
            write!(f, "{}", tz)?;
        }
        Ok(())
    }
}
