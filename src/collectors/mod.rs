//! Stateless readers, one per kernel source.
//!
//! Each reader performs exactly one read per call and returns either the
//! parsed value or a per-metric [`StatusError`](crate::error::StatusError).
//! Nothing here keeps state between ticks; deltas live in
//! [`RateEngine`](crate::rate::RateEngine).

pub mod battery;
pub mod cpu;
pub mod memory;
pub mod network;
pub mod sensors;
pub mod volume;

pub use battery::read_battery;
pub use cpu::{parse_cpu_line, read_cpu_buckets};
pub use memory::{parse_meminfo, read_meminfo};
pub use network::{counter_path, read_byte_counter};
pub use sensors::read_temperature;
pub use volume::{parse_volume, read_volume};

use crate::error::{read_source, Result, StatusError};
use std::path::Path;
use std::str::FromStr;

/// Reads a single-value sysfs file and parses its trimmed contents.
pub(crate) fn read_value<T: FromStr>(path: &Path, origin: &'static str) -> Result<T> {
    let content = read_source(path)?;
    let trimmed = content.trim();
    trimmed
        .parse()
        .map_err(|_| StatusError::parse(origin, format!("unexpected value '{trimmed}'")))
}
