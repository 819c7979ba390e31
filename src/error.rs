// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Configuration problems are reported by [`ConfigurationError`] when tables are
//! installed. Queries fail with [`Error`], which wraps the two operational
//! failures: the platform clock could not be read, or the platform could not
//! convert an instant to local time. Nothing is retried internally.

use std::fmt;

/// Malformed or mismatched transition tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The boundary and index sequences differ in length.
    LengthMismatch { boundaries: usize, indexes: usize },
    /// A timezone index does not point into the descriptor table.
    IndexOutOfRange { index: usize, descriptors: usize },
    /// Boundaries must be strictly increasing; `position` is the first offender.
    Unsorted { position: usize },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::LengthMismatch {
                boundaries,
                indexes,
            } => write!(
                f,
                "Timestamps and indexes do not have the same size ({} vs {})",
                boundaries, indexes
            ),
            ConfigurationError::IndexOutOfRange { index, descriptors } => write!(
                f,
                "Timezone index {} is out of range for {} descriptors",
                index, descriptors
            ),
            ConfigurationError::Unsorted { position } => write!(
                f,
                "Transition boundaries are not strictly increasing at position {}",
                position
            ),
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// The platform clock is unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockReadError {
    reason: &'static str,
}

impl ClockReadError {
    pub fn new(reason: &'static str) -> Self {
        Self { reason }
    }

    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

impl fmt::Display for ClockReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unable to read the system clock: {}", self.reason)
    }
}

impl std::error::Error for ClockReadError {}

/// The platform cannot represent `timestamp` as a local calendar time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTimeConversionError {
    timestamp: i64,
}

impl LocalTimeConversionError {
    pub fn new(timestamp: i64) -> Self {
        Self { timestamp }
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

impl fmt::Display for LocalTimeConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Timestamp {} cannot be converted to local time",
            self.timestamp
        )
    }
}

impl std::error::Error for LocalTimeConversionError {}

/// A calendar field passed to the checked constructor is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueError {
    field: &'static str,
    value: i64,
}

impl ValueError {
    pub(crate) fn new(field: &'static str, value: i64) -> Self {
        Self { field, value }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} is out of range", self.field, self.value)
    }
}

impl std::error::Error for ValueError {}

/// Failure of a `now()` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    ClockRead(ClockReadError),
    LocalTimeConversion(LocalTimeConversionError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ClockRead(err) => err.fmt(f),
            Error::LocalTimeConversion(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ClockRead(err) => Some(err),
            Error::LocalTimeConversion(err) => Some(err),
        }
    }
}

impl From<ClockReadError> for Error {
    fn from(err: ClockReadError) -> Self {
        Error::ClockRead(err)
    }
}

impl From<LocalTimeConversionError> for Error {
    fn from(err: LocalTimeConversionError) -> Self {
        Error::LocalTimeConversion(err)
    }
}
