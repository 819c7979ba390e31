// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Incrementally maintained transition window.
//!
//! The cache remembers the half-open interval `[lower, upper)` for which its
//! timezone descriptor is known to hold, plus the table position of `upper`.
//! Wall-clock time normally moves forward, so when a query falls past the
//! window the scan resumes from that position instead of from the start. A
//! query below the window restarts from the first entry.
//!
//! Past the final boundary the cache keeps whatever descriptor it last
//! resolved; the table is assumed to continue with that offset.

use tracing::trace;

use crate::table::TransitionTable;

/// The interval the cached descriptor is valid for.
///
/// `None` bounds stand for negative (lower) and positive (upper) infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Nothing resolved since the tables were installed.
    Unknown,
    Resolved {
        lower: Option<i64>,
        upper: Option<i64>,
        /// Position of the boundary at `upper`, or the table length once the
        /// table is exhausted.
        cursor: usize,
    },
}

impl Window {
    #[inline]
    pub fn contains(&self, secs: i64) -> bool {
        match *self {
            Window::Unknown => false,
            Window::Resolved { lower, upper, .. } => {
                lower.map_or(true, |lower| lower <= secs) && upper.map_or(true, |upper| secs < upper)
            },
        }
    }
}

/// Cached timezone lookup for one transition table.
///
/// Queries mutate the cache, so one instance must not be shared between
/// threads without external serialization.
#[derive(Debug, Clone)]
pub struct TransitionCache<Z> {
    window: Window,
    tz: Option<Z>,
}

impl<Z: Clone> TransitionCache<Z> {
    pub fn new(table: &TransitionTable<Z>) -> Self {
        Self {
            window: Window::Unknown,
            tz: table.default_descriptor().clone(),
        }
    }

    /// Forgets the current window so that the next query performs a full scan
    /// of `table`.
    pub fn reset(&mut self, table: &TransitionTable<Z>) {
        self.window = Window::Unknown;
        self.tz = table.default_descriptor().clone();
    }

    /// Makes the cached descriptor correct for `secs`.
    #[inline]
    pub fn ensure_valid(&mut self, secs: i64, table: &TransitionTable<Z>) {
        if self.window.contains(secs) {
            return;
        }
        self.rescan(secs, table);
    }

    #[cold]
    fn rescan(&mut self, secs: i64, table: &TransitionTable<Z>) {
        // Resume right after the known upper boundary when time moved forward,
        // otherwise start over from the first entry.
        let (start, start_bound) = match self.window {
            Window::Resolved {
                upper: Some(upper),
                cursor,
                ..
            } if secs >= upper => (cursor + 1, Some(upper)),
            _ => (0, None),
        };

        let boundaries = table.boundaries();
        let mut lower = start_bound;
        for (position, &boundary) in boundaries.iter().enumerate().skip(start) {
            if boundary > secs {
                self.window = Window::Resolved {
                    lower,
                    upper: Some(boundary),
                    cursor: position,
                };
                self.tz = table.descriptor_before(position).clone();
                trace!(
                    secs,
                    ?lower,
                    upper = boundary,
                    position,
                    resumed = start > 0,
                    "Transition window resolved"
                );
                return;
            }
            lower = Some(boundary);
        }

        self.window = Window::Resolved {
            lower: start_bound,
            upper: None,
            cursor: boundaries.len(),
        };
        trace!(secs, lower = ?start_bound, "Transition table exhausted");
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn timezone(&self) -> Option<&Z> {
        self.tz.as_ref()
    }
}
