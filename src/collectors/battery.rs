//! Battery charge from `/sys/class/power_supply/BAT0/capacity`.
//!
//! Machines without a battery are common; a missing file is an ordinary
//! unavailable result.

use super::read_value;
use crate::error::Result;
use std::path::Path;

/// Reads the charge in percent, clamped to 100.
pub fn read_battery(path: &Path) -> Result<u8> {
    let percent: u32 = read_value(path, "battery")?;
    Ok(percent.min(100) as u8)
}
