//! Audio volume via an external mixer query.
//!
//! The command prints a line such as
//! `  Front Right: Playback 52428 [80%] [on]`; the first bracketed
//! percentage is the level.

use crate::error::{Result, StatusError};
use crate::subprocess::first_line;
use std::time::Duration;

/// Extracts the bracketed percentage from a mixer line.
pub fn parse_volume(line: &str) -> Result<u8> {
    line.split('[')
        .skip(1)
        .filter_map(|chunk| chunk.split_once(']').map(|(inner, _)| inner))
        .find_map(|inner| inner.strip_suffix('%'))
        .and_then(|digits| digits.trim().parse().ok())
        .ok_or_else(|| StatusError::parse("volume", format!("no level in '{line}'")))
}

/// Runs the mixer command and parses the level from its first line.
pub fn read_volume(command: &[String], timeout: Duration) -> Result<u8> {
    parse_volume(&first_line(command, timeout)?)
}
