// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Fast local `now()` for LLRT.
//!
//! Reading the local wall-clock time with the correct timezone attached normally
//! means resolving the UTC offset from a transition table on every call. When
//! the clock is read for every log line that cost adds up. This crate keeps the
//! resolved interval around and only touches the table when time leaves it.
//!
//! # Architecture
//!
//! 1. **[`TransitionTable`]** - an already resolved, strictly increasing list of
//!    transition boundaries, each pointing at the timezone descriptor in effect
//!    before it. Building the table from a timezone database is left to the
//!    caller.
//!
//! 2. **[`TransitionCache`]** - the active window `[lower, upper)` and a cursor
//!    into the table. Queries inside the window are a pair of comparisons.
//!    When time moves past the window the scan resumes from the cursor, so a
//!    monotonic clock costs amortized O(1). A backward jump rescans from the
//!    start.
//!
//! 3. **[`FastNow`]** - reads the platform clock, updates the cache, converts the
//!    epoch seconds to local calendar fields with the platform's conversion and
//!    assembles the value directly through [`FromLocalFields`].
//!
//! # Behaviour worth knowing
//!
//! - Seconds are clamped to 59; platform leap seconds are not modelled.
//! - `fold` is always `0`; the repeated hour at a fall-back transition is not
//!   disambiguated.
//! - Past the final boundary the last resolved descriptor is kept forever.
//!
//! # Example
//!
//! ```
//! use llrt_fast_now::{FastNow, FixedTz, Timestamp, TransitionTable};
//!
//! let cet = FixedTz::east("CET", 3600);
//! let cest = FixedTz::east("CEST", 7200);
//! // 2024-03-31 01:00 UTC: CET -> CEST, 2024-10-27 01:00 UTC: CEST -> CET
//! let table = TransitionTable::new(
//!     vec![cet, cest],
//!     vec![1711846800, 1729990800],
//!     vec![0, 1],
//!     0,
//! )
//! .unwrap();
//!
//! let mut clock: FastNow<FixedTz> = FastNow::new(table);
//! let summer = clock.at(Timestamp::from_secs(1720000000)).unwrap();
//! assert_eq!(summer.tz().map(|tz| tz.name()), Some("CEST"));
//! ```

mod cache;
mod clock;
pub mod environment;
mod error;
mod offset;
mod platform;
mod table;
pub mod tracer;
mod value;

pub use cache::{TransitionCache, Window};
pub use clock::{FastNow, LocalClock};
pub use error::{ClockReadError, ConfigurationError, Error, LocalTimeConversionError, ValueError};
pub use offset::FixedTz;
pub use platform::{SystemTimeSource, TimeSource, Timestamp};
pub use table::TransitionTable;
pub use value::{FromLocalFields, LocalDateTime, LocalFields};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
