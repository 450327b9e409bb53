//! CPU time buckets.
//!
//! Parses the per-core lines of `/proc/stat`. The first token of each line
//! is the label; the next four are user, nice, system and idle ticks.

use crate::error::{read_source, Result, StatusError};
use crate::types::CpuBucket;
use std::path::Path;

/// Parses one `cpuN` line into its four buckets.
pub fn parse_cpu_line(line: &str) -> Result<CpuBucket> {
    let mut fields = line.split_whitespace().skip(1).map(str::parse::<u64>);
    let mut next = |name: &str| match fields.next() {
        Some(Ok(value)) => Ok(value),
        Some(Err(e)) => Err(StatusError::parse("cpu", format!("bad {name} field: {e}"))),
        None => Err(StatusError::parse("cpu", format!("missing {name} field"))),
    };

    Ok(CpuBucket {
        user: next("user")?,
        user_low: next("nice")?,
        system: next("system")?,
        idle: next("idle")?,
    })
}

/// Returns true for per-core lines (`cpu0`, `cpu1`, ...), false for the aggregate `cpu` line.
fn is_core_line(line: &str) -> bool {
    line.strip_prefix("cpu").and_then(|rest| rest.chars().next()).is_some_and(|c| c.is_ascii_digit())
}

/// Reads the buckets of the first `cores` logical cores.
///
/// Fails if the file cannot be read or has fewer per-core lines than requested.
pub fn read_cpu_buckets(path: &Path, cores: usize) -> Result<Vec<CpuBucket>> {
    let content = read_source(path)?;

    let buckets = content
        .lines()
        .filter(|line| is_core_line(line))
        .take(cores)
        .map(parse_cpu_line)
        .collect::<Result<Vec<_>>>()?;

    if buckets.len() < cores {
        return Err(StatusError::parse(
            "cpu",
            format!("expected {cores} cores, found {}", buckets.len()),
        ));
    }

    Ok(buckets)
}
