// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Fixed-offset timezone descriptor.
//!
//! A transition table provider typically resolves each distinct offset of a zone
//! into one `FixedTz` and refers to it by index. The type is `Copy` so that
//! stamping it on every calendar value costs nothing.

use std::fmt;

use chrono::{FixedOffset, Offset, Utc};

const SECONDS_PER_DAY: i32 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedTz {
    name: &'static str,
    /// Offset in seconds from UTC (positive = east of UTC)
    offset_secs: i32,
}

impl FixedTz {
    pub const fn utc() -> Self {
        Self {
            name: "UTC",
            offset_secs: 0,
        }
    }

    /// Returns `None` unless `offset_secs` is strictly within one day.
    pub fn east(name: &'static str, offset_secs: i32) -> Option<Self> {
        if offset_secs <= -SECONDS_PER_DAY || offset_secs >= SECONDS_PER_DAY {
            return None;
        }
        Some(Self { name, offset_secs })
    }

    /// Abbreviation or zone name, e.g. "CEST".
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn local_minus_utc(&self) -> i32 {
        self.offset_secs
    }
}

impl fmt::Display for FixedTz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.offset_secs < 0 { '-' } else { '+' };
        let total_mins = self.offset_secs.abs() / 60;
        write!(f, "{}{:02}:{:02}", sign, total_mins / 60, total_mins % 60)
    }
}

impl Offset for FixedTz {
    fn fix(&self) -> FixedOffset {
        FixedOffset::east_opt(self.offset_secs).unwrap_or_else(|| Utc.fix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(FixedTz::utc().to_string(), "+00:00");
        assert_eq!(FixedTz::east("IST", 19800).unwrap().to_string(), "+05:30");
        assert_eq!(FixedTz::east("NST", -12600).unwrap().to_string(), "-03:30");
        assert_eq!(FixedTz::east("X", -1800).unwrap().to_string(), "-00:30");
    }

    #[test]
    fn test_range() {
        assert!(FixedTz::east("X", SECONDS_PER_DAY).is_none());
        assert!(FixedTz::east("X", -SECONDS_PER_DAY).is_none());
        assert!(FixedTz::east("X", SECONDS_PER_DAY - 1).is_some());
    }

    #[test]
    fn test_fix() {
        let tz = FixedTz::east("CEST", 7200).unwrap();
        assert_eq!(tz.fix().local_minus_utc(), 7200);
        assert_eq!(tz.name(), "CEST");
    }
}
