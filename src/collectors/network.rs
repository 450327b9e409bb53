//! Per-interface byte counters from `/sys/class/net/<iface>/statistics`.

use super::read_value;
use crate::error::Result;
use crate::types::Direction;
use std::path::{Path, PathBuf};

/// Path of one byte counter below `net_class`.
#[must_use]
pub fn counter_path(net_class: &Path, interface: &str, direction: Direction) -> PathBuf {
    net_class.join(interface).join("statistics").join(direction.file_name())
}

/// Reads one cumulative byte counter.
pub fn read_byte_counter(net_class: &Path, interface: &str, direction: Direction) -> Result<u64> {
    read_value(&counter_path(net_class, interface, direction), "network")
}
