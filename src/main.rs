// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::{env, error::Error, process::exit, time::Instant};

use chrono::Local;
use llrt_fast_now::{environment, tracer::MinimalTracer, FixedTz, LocalClock, VERSION};
use tracing::{trace, warn};

const DEFAULT_ITERATIONS: u64 = 5;
const DESCRIPTOR_NAME: &str = "LOCAL";

fn print_version() {
    println!("fast_now (llrt) {}", VERSION);
}

fn usage() {
    print_version();
    println!(
        r#"

Usage:
  fast_now
  fast_now -v | --version
  fast_now -h | --help

Prints the local time repeatedly using the cached clock.

Environment:
  {iterations}   Number of queries (default {default})
  {offset}    UTC offset in seconds attached to the output
                              (default: the current local offset)
  {log}                    Log filters, e.g. "llrt_fast_now=trace"
"#,
        iterations = environment::ENV_LLRT_FAST_NOW_ITERATIONS,
        offset = environment::ENV_LLRT_FAST_NOW_OFFSET_SECS,
        log = environment::ENV_LLRT_LOG,
        default = DEFAULT_ITERATIONS,
    );
}

fn get_iterations() -> u64 {
    env::var(environment::ENV_LLRT_FAST_NOW_ITERATIONS)
        .map(|iterations| iterations.parse().unwrap_or(DEFAULT_ITERATIONS))
        .unwrap_or(DEFAULT_ITERATIONS)
}

fn local_descriptor() -> Option<FixedTz> {
    FixedTz::east(DESCRIPTOR_NAME, Local::now().offset().local_minus_utc())
}

/// Offsets must parse as seconds and stay within one day of UTC.
fn parse_descriptor(value: &str) -> Option<FixedTz> {
    value
        .trim()
        .parse()
        .ok()
        .and_then(|secs| FixedTz::east(DESCRIPTOR_NAME, secs))
}

fn get_descriptor() -> Option<FixedTz> {
    match env::var(environment::ENV_LLRT_FAST_NOW_OFFSET_SECS) {
        Ok(value) => parse_descriptor(&value).or_else(|| {
            warn!(
                r#""{}" is not a valid value for {}, using the local offset"#,
                value,
                environment::ENV_LLRT_FAST_NOW_OFFSET_SECS
            );
            local_descriptor()
        }),
        Err(_) => local_descriptor(),
    }
}

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    MinimalTracer::register()?;

    if let Some(arg) = env::args().nth(1) {
        match arg.as_str() {
            "-v" | "--version" => {
                print_version();
                return Ok(());
            },
            _ => {
                usage();
                return Ok(());
            },
        }
    }

    let iterations = get_iterations();
    let mut clock = LocalClock::from_tables(vec![get_descriptor()], Vec::new(), Vec::new(), 0);

    let started = Instant::now();
    for _ in 0..iterations {
        match clock.now() {
            Ok(now) => println!("{now}"),
            Err(err) => {
                eprintln!("{err}");
                exit(1);
            },
        }
    }
    trace!(
        iterations,
        cached = clock.is_cached(),
        "Finished in {}us",
        started.elapsed().as_micros()
    );

    Ok(())
}
