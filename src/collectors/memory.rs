//! Memory usage from `/proc/meminfo`.

use crate::error::{read_source, Result, StatusError};
use crate::types::MemInfo;
use std::path::Path;

/// Parses the `MemTotal`, `MemAvailable` and `Buffers` lines.
///
/// All three labels must be present and `MemTotal` must be nonzero.
pub fn parse_meminfo(content: &str) -> Result<MemInfo> {
    let mut total = None;
    let mut available = None;
    let mut buffers = None;

    for line in content.lines() {
        let mut parts = line.split_whitespace();
        let (Some(label), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        let slot = match label {
            "MemTotal:" => &mut total,
            "MemAvailable:" => &mut available,
            "Buffers:" => &mut buffers,
            _ => continue,
        };
        let parsed = value
            .parse::<u64>()
            .map_err(|e| StatusError::parse("meminfo", format!("{label} {value}: {e}")))?;
        *slot = Some(parsed);
    }

    let missing = |label: &str| StatusError::parse("meminfo", format!("{label} missing"));
    let info = MemInfo {
        total_kb: total.ok_or_else(|| missing("MemTotal"))?,
        available_kb: available.ok_or_else(|| missing("MemAvailable"))?,
        buffers_kb: buffers.ok_or_else(|| missing("Buffers"))?,
    };

    if info.total_kb == 0 {
        return Err(StatusError::parse("meminfo", "MemTotal is zero"));
    }

    Ok(info)
}

/// Reads and parses the memory statistics file.
pub fn read_meminfo(path: &Path) -> Result<MemInfo> {
    parse_meminfo(&read_source(path)?)
}

/// Formats a kB amount the way conky does: MiB upward, two decimals.
#[must_use]
pub fn format_amount(kb: u64) -> String {
    const UNITS: [&str; 4] = ["MiB", "GiB", "TiB", "PiB"];

    let mut value = kb as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1000.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }

    format!("{value:.2} {}", UNITS[unit])
}
