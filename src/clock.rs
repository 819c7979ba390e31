// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Local `now()` with a cached timezone lookup.

use std::marker::PhantomData;

use chrono::Local;
use tracing::{debug, warn};

use crate::{
    cache::TransitionCache,
    error::{ConfigurationError, Error, LocalTimeConversionError},
    offset::FixedTz,
    platform::{SystemTimeSource, TimeSource, Timestamp},
    table::TransitionTable,
    value::{FromLocalFields, LocalDateTime, LocalFields},
};

/// Produces the current local time as `V`, stamped with the descriptor from a
/// [`TransitionTable`].
///
/// `now` takes `&mut self` because every query may advance the cache. Share an
/// instance between threads only behind a lock.
///
/// ```
/// use llrt_fast_now::{FastNow, FixedTz, TransitionTable};
///
/// let table = TransitionTable::fixed(Some(FixedTz::utc()));
/// let mut clock: FastNow<FixedTz> = FastNow::new(table);
/// let now = clock.now().unwrap();
/// assert_eq!(now.tz(), Some(&FixedTz::utc()));
/// assert!(now.second() <= 59);
/// ```
#[derive(Debug)]
pub struct FastNow<Z, V = LocalDateTime<Z>, S = SystemTimeSource> {
    table: TransitionTable<Z>,
    cache: TransitionCache<Z>,
    source: S,
    value: PhantomData<fn() -> V>,
}

impl<Z, V> FastNow<Z, V, SystemTimeSource>
where
    Z: Clone,
    V: FromLocalFields<Z>,
{
    pub fn new(table: TransitionTable<Z>) -> Self {
        Self::with_source(table, SystemTimeSource)
    }
}

impl<Z, V, S> FastNow<Z, V, S>
where
    Z: Clone,
    V: FromLocalFields<Z>,
    S: TimeSource,
{
    pub fn with_source(table: TransitionTable<Z>, source: S) -> Self {
        let cache = TransitionCache::new(&table);
        Self {
            table,
            cache,
            source,
            value: PhantomData,
        }
    }

    /// Replaces every table. On error the current tables and window are kept.
    pub fn init(
        &mut self,
        descriptors: Vec<Option<Z>>,
        boundaries: Vec<i64>,
        indexes: Vec<usize>,
        default_index: usize,
    ) -> Result<(), ConfigurationError> {
        let table = TransitionTable::new(descriptors, boundaries, indexes, default_index)?;
        self.replace_table(table);
        Ok(())
    }

    pub fn replace_table(&mut self, table: TransitionTable<Z>) {
        debug!(
            transitions = table.len(),
            descriptors = table.descriptors().len(),
            default_index = table.default_index(),
            "Installed transition table"
        );
        self.cache.reset(&table);
        self.table = table;
    }

    /// Current local time.
    #[inline]
    pub fn now(&mut self) -> Result<V, Error> {
        let timestamp = self.source.now()?;
        self.at(timestamp)
    }

    /// Local time at `timestamp`, through the same cache as [`FastNow::now`].
    pub fn at(&mut self, timestamp: Timestamp) -> Result<V, Error> {
        let secs = timestamp.secs();
        self.cache.ensure_valid(secs, &self.table);
        let fields = self.source.local_fields(secs)?.with_clamped_second();
        Ok(V::from_local_fields(
            fields,
            timestamp.micros(),
            self.cache.timezone().cloned(),
        ))
    }

    pub fn table(&self) -> &TransitionTable<Z> {
        &self.table
    }

    pub fn cache(&self) -> &TransitionCache<Z> {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Either the cached clock or chrono's generic `Local::now()`.
#[derive(Debug)]
pub enum LocalClock<S = SystemTimeSource> {
    Cached(FastNow<FixedTz, LocalDateTime<FixedTz>, S>),
    Generic,
}

impl LocalClock<SystemTimeSource> {
    /// Falls back to [`LocalClock::Generic`] when the tables are rejected.
    pub fn from_tables(
        descriptors: Vec<Option<FixedTz>>,
        boundaries: Vec<i64>,
        indexes: Vec<usize>,
        default_index: usize,
    ) -> Self {
        match TransitionTable::new(descriptors, boundaries, indexes, default_index) {
            Ok(table) => LocalClock::Cached(FastNow::new(table)),
            Err(err) => {
                warn!(%err, "Invalid transition table, using the generic clock");
                LocalClock::Generic
            },
        }
    }
}

impl<S: TimeSource> LocalClock<S> {
    pub fn now(&mut self) -> Result<LocalDateTime<FixedTz>, Error> {
        match self {
            LocalClock::Cached(clock) => clock.now(),
            LocalClock::Generic => generic_now(),
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, LocalClock::Cached(_))
    }
}

fn generic_now() -> Result<LocalDateTime<FixedTz>, Error> {
    let now = Local::now();
    let tz = FixedTz::east("LOCAL", now.offset().local_minus_utc())
        .ok_or(LocalTimeConversionError::new(now.timestamp()))?;
    let fields = LocalFields::from_naive(&now.naive_local()).with_clamped_second();
    // chrono reports leap seconds as nanoseconds past one billion.
    let micros = now.timestamp_subsec_micros().min(999_999);
    Ok(LocalDateTime::from_local_fields(fields, micros, Some(tz)))
}
