//! Fixed tunables.
//!
//! Every source path, interface name and interval is a compile-time
//! constant. [`Config`] carries them into the loop so tests can point the
//! readers at a fake sysfs tree.

use std::path::PathBuf;
use std::time::Duration;

/// Interval between two ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Number of logical cores shown in the status line.
pub const CORE_COUNT: usize = 4;

/// Aggregate CPU statistics.
pub const PROC_STAT: &str = "/proc/stat";

/// Memory statistics.
pub const PROC_MEMINFO: &str = "/proc/meminfo";

/// Battery charge in percent.
pub const BATTERY_CAPACITY: &str = "/sys/class/power_supply/BAT0/capacity";

/// Thermal sensor in millidegrees Celsius.
pub const THERMAL_INPUT: &str = "/sys/class/hwmon/hwmon0/temp1_input";

/// Root of the per-interface statistics tree.
pub const NET_CLASS: &str = "/sys/class/net";

/// Wireless interface.
pub const WIRELESS_INTERFACE: &str = "wlan0";

/// Wired interface.
pub const WIRED_INTERFACE: &str = "eth0";

/// Mixer query; the last line of `amixer` carries the bracketed level.
pub const VOLUME_COMMAND: [&str; 3] = ["sh", "-c", "amixer get Master | tail -n1"];

/// Upper bound on any external command.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(2);

/// `strftime` pattern of the date slot.
pub const DATE_FORMAT: &str = "%D";

/// `strftime` pattern of the time slot.
pub const TIME_FORMAT: &str = "%k.%M";

/// Source locations and timing for one status loop.
#[derive(Debug, Clone)]
pub struct Config {
    /// Sleep between ticks.
    pub tick_interval: Duration,
    /// Path of the aggregate CPU statistics.
    pub proc_stat: PathBuf,
    /// Path of the memory statistics.
    pub meminfo: PathBuf,
    /// Path of the battery capacity file.
    pub battery_capacity: PathBuf,
    /// Path of the thermal sensor input.
    pub thermal_input: PathBuf,
    /// Root of `<iface>/statistics/{rx,tx}_bytes`.
    pub net_class: PathBuf,
    /// Wireless interface name.
    pub wireless_interface: String,
    /// Wired interface name.
    pub wired_interface: String,
    /// Program and arguments of the volume query.
    pub volume_command: Vec<String>,
    /// Timeout for external commands.
    pub command_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval: TICK_INTERVAL,
            proc_stat: PathBuf::from(PROC_STAT),
            meminfo: PathBuf::from(PROC_MEMINFO),
            battery_capacity: PathBuf::from(BATTERY_CAPACITY),
            thermal_input: PathBuf::from(THERMAL_INPUT),
            net_class: PathBuf::from(NET_CLASS),
            wireless_interface: WIRELESS_INTERFACE.to_string(),
            wired_interface: WIRED_INTERFACE.to_string(),
            volume_command: VOLUME_COMMAND.iter().map(ToString::to_string).collect(),
            command_timeout: COMMAND_TIMEOUT,
        }
    }
}

impl Config {
    /// Creates the configuration from the compile-time constants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
