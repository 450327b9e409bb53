//! Sample types shared by the readers and the rate engine.
//!
//! - [`Counter`]: a monotonically nondecreasing sample that can detect regressions
//! - [`CpuBucket`]: the four `/proc/stat` time buckets of one core
//! - [`NetCounter`]: which interface and direction a byte counter belongs to
//! - [`MemInfo`]: the labeled `/proc/meminfo` values the status line needs

/// A cumulative sample read from a kernel counter.
///
/// Absent external resets, a later sample is never smaller than an earlier
/// one. A smaller value means the counter wrapped or its source reset.
pub trait Counter: Copy {
    /// Returns true if any component of `self` is below the same component of `previous`.
    fn regressed_from(&self, previous: &Self) -> bool;
}

impl Counter for u64 {
    fn regressed_from(&self, previous: &Self) -> bool {
        self < previous
    }
}

/// Cumulative CPU time buckets of one logical core, in clock ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuBucket {
    /// Time spent in user mode.
    pub user: u64,
    /// Time spent in user mode with low priority (nice).
    pub user_low: u64,
    /// Time spent in kernel mode.
    pub system: u64,
    /// Time spent idle.
    pub idle: u64,
}

impl CpuBucket {
    /// Creates a bucket from its four counters.
    #[must_use]
    pub const fn new(user: u64, user_low: u64, system: u64, idle: u64) -> Self {
        Self { user, user_low, system, idle }
    }
}

impl Counter for CpuBucket {
    fn regressed_from(&self, previous: &Self) -> bool {
        self.user < previous.user
            || self.user_low < previous.user_low
            || self.system < previous.system
            || self.idle < previous.idle
    }
}

/// A network interface shown in the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Link {
    /// The wireless interface.
    Wireless,
    /// The wired interface.
    Wired,
}

/// Transfer direction of a byte counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Received bytes.
    Rx,
    /// Transmitted bytes.
    Tx,
}

impl Direction {
    /// File name of the counter under `statistics/`.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Rx => "rx_bytes",
            Self::Tx => "tx_bytes",
        }
    }
}

/// Identifies one network byte counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetCounter {
    /// Interface.
    pub link: Link,
    /// Direction.
    pub direction: Direction,
}

impl NetCounter {
    /// Number of tracked counters.
    pub const COUNT: usize = 4;

    /// All tracked counters, in the order the status line shows them.
    pub const ALL: [Self; Self::COUNT] = [
        Self::new(Link::Wireless, Direction::Rx),
        Self::new(Link::Wireless, Direction::Tx),
        Self::new(Link::Wired, Direction::Rx),
        Self::new(Link::Wired, Direction::Tx),
    ];

    /// Creates a counter id.
    #[must_use]
    pub const fn new(link: Link, direction: Direction) -> Self {
        Self { link, direction }
    }

    /// Position of this counter in [`NetCounter::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        let link = match self.link {
            Link::Wireless => 0,
            Link::Wired => 2,
        };
        let direction = match self.direction {
            Direction::Rx => 0,
            Direction::Tx => 1,
        };
        link + direction
    }
}

/// Memory figures in kB, as labeled in `/proc/meminfo`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemInfo {
    /// `MemTotal`.
    pub total_kb: u64,
    /// `MemAvailable`.
    pub available_kb: u64,
    /// `Buffers`.
    pub buffers_kb: u64,
}

impl MemInfo {
    /// Used memory: total minus available minus buffers.
    #[must_use]
    pub fn used_kb(&self) -> u64 {
        self.total_kb.saturating_sub(self.available_kb).saturating_sub(self.buffers_kb)
    }

    /// Used memory as a rounded percentage of the total.
    ///
    /// Returns `None` when the total is zero.
    #[must_use]
    pub fn used_percent(&self) -> Option<u8> {
        if self.total_kb == 0 {
            return None;
        }
        let percent = (100.0 * self.used_kb() as f64 / self.total_kb as f64).round();
        Some(percent.min(100.0) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u64_regression() {
        assert!(999u64.regressed_from(&1000));
        assert!(!1000u64.regressed_from(&1000));
        assert!(!1001u64.regressed_from(&1000));
    }

    #[test]
    fn test_cpu_bucket_regression_any_field() {
        let prev = CpuBucket::new(100, 10, 50, 850);

        assert!(!CpuBucket::new(100, 10, 50, 850).regressed_from(&prev));
        assert!(CpuBucket::new(99, 10, 50, 900).regressed_from(&prev));
        assert!(CpuBucket::new(200, 9, 50, 900).regressed_from(&prev));
        assert!(CpuBucket::new(200, 10, 49, 900).regressed_from(&prev));
        assert!(CpuBucket::new(200, 10, 60, 849).regressed_from(&prev));
    }

    #[test]
    fn test_net_counter_index_matches_all() {
        for (i, counter) in NetCounter::ALL.iter().enumerate() {
            assert_eq!(counter.index(), i);
        }
    }

    #[test]
    fn test_direction_file_name() {
        assert_eq!(Direction::Rx.file_name(), "rx_bytes");
        assert_eq!(Direction::Tx.file_name(), "tx_bytes");
    }

    #[test]
    fn test_meminfo_used() {
        let mem = MemInfo { total_kb: 1000, available_kb: 400, buffers_kb: 100 };

        assert_eq!(mem.used_kb(), 500);
        assert_eq!(mem.used_percent(), Some(50));
    }

    #[test]
    fn test_meminfo_percent_rounds() {
        // 100 * 2 / 3 = 66.67
        let mem = MemInfo { total_kb: 3, available_kb: 1, buffers_kb: 0 };
        assert_eq!(mem.used_percent(), Some(67));
    }

    #[test]
    fn test_meminfo_zero_total() {
        let mem = MemInfo::default();
        assert_eq!(mem.used_percent(), None);
    }

    #[test]
    fn test_meminfo_used_saturates() {
        let mem = MemInfo { total_kb: 100, available_kb: 90, buffers_kb: 50 };
        assert_eq!(mem.used_kb(), 0);
    }
}
