// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! A minimal `tracing` subscriber printing events to stderr.
//!
//! Filters come from a comma separated list such as
//! `llrt_fast_now::cache=trace,warn`. A bare level enables that level and
//! everything less verbose for all targets, a bare target enables every level
//! for targets starting with it. Without any filter the tracer stays silent.

use std::{
    env,
    fmt::{self, Write},
    sync::atomic::{AtomicU64, Ordering},
};

use tracing::{field::Visit, Level, Subscriber};
use tracing_core::{
    span::{Attributes, Id, Record},
    Event, Field, Metadata,
};

use crate::environment;

pub struct StringVisitor<'a> {
    string: &'a mut String,
}

impl<'a> StringVisitor<'a> {
    pub(crate) fn new(string: &'a mut String) -> Self {
        StringVisitor { string }
    }
}

impl Visit for StringVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        // Writing into a String cannot fail.
        if field.name() == "message" {
            let _ = write!(self.string, "{value:?} ");
        } else {
            let _ = write!(self.string, "{} = {:?}; ", field.name(), value);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LogFilter {
    target: Option<String>,
    level: Option<Level>,
}

impl LogFilter {
    fn matches(&self, metadata: &Metadata<'_>) -> bool {
        if let Some(level) = &self.level {
            if metadata.level() > level {
                return false;
            }
        }
        if let Some(target) = &self.target {
            if !metadata.target().starts_with(target.as_str()) {
                return false;
            }
        }
        true
    }
}

fn string_to_level(string: &str) -> Option<Level> {
    match string.to_lowercase().as_str() {
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "warn" | "warning" => Some(Level::WARN),
        "trace" => Some(Level::TRACE),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

fn parse_filters(value: &str) -> Vec<LogFilter> {
    value
        .split(',')
        .map(str::trim)
        .filter(|filter| !filter.is_empty())
        .map(|filter| match filter.split_once('=') {
            Some((target, level)) => LogFilter {
                target: Some(target.to_string()),
                level: string_to_level(level),
            },
            None => match string_to_level(filter) {
                Some(level) => LogFilter {
                    target: None,
                    level: Some(level),
                },
                None => LogFilter {
                    target: Some(filter.to_string()),
                    level: None,
                },
            },
        })
        .collect()
}

pub struct MinimalTracer {
    filters: Option<Vec<LogFilter>>,
    next_id: AtomicU64,
}

impl MinimalTracer {
    pub fn from_filters(value: Option<&str>) -> Self {
        MinimalTracer {
            filters: value.map(parse_filters),
            next_id: AtomicU64::new(1),
        }
    }

    /// Installs the tracer as the global default, configured from
    /// `LLRT_LOG`.
    pub fn register() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
        let value = env::var(environment::ENV_LLRT_LOG).ok();
        tracing::subscriber::set_global_default(Self::from_filters(value.as_deref()))
    }
}

impl Subscriber for MinimalTracer {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        match &self.filters {
            None => false,
            Some(filters) if filters.is_empty() => true,
            Some(filters) => filters.iter().any(|filter| filter.matches(metadata)),
        }
    }

    fn new_span(&self, _span: &Attributes<'_>) -> Id {
        Id::from_u64(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        let metadata = event.metadata();

        let mut text = String::new();
        event.record(&mut StringVisitor::new(&mut text));

        eprintln!("{} {}: {}", metadata.level(), metadata.target(), text);
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filters() {
        let filters = parse_filters("llrt_fast_now::cache=trace, warn,llrt_fast_now");
        assert_eq!(
            filters,
            vec![
                LogFilter {
                    target: Some("llrt_fast_now::cache".to_string()),
                    level: Some(Level::TRACE),
                },
                LogFilter {
                    target: None,
                    level: Some(Level::WARN),
                },
                LogFilter {
                    target: Some("llrt_fast_now".to_string()),
                    level: None,
                },
            ]
        );
    }

    #[test]
    fn test_disabled_without_filters() {
        let tracer = MinimalTracer::from_filters(None);
        assert!(tracer.filters.is_none());

        let tracer = MinimalTracer::from_filters(Some(""));
        assert_eq!(tracer.filters, Some(Vec::new()));
    }

    #[test]
    fn test_unknown_level_keeps_target() {
        let filters = parse_filters("llrt_fast_now=loud");
        assert_eq!(
            filters,
            vec![LogFilter {
                target: Some("llrt_fast_now".to_string()),
                level: None,
            }]
        );
    }
}
