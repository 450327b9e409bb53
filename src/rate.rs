//! Delta/rate engine.
//!
//! Holds one [`RateWindow`] per tracked counter (four fields per core via
//! [`CpuBucket`], two directions per interface) and turns each new sample
//! into a percentage or a per-tick byte rate.
//!
//! A sample smaller than its predecessor is a regression: the counter
//! wrapped or the source reset. The engine reports
//! [`RateValue::Regressed`] for that tick and never attempts wraparound
//! correction. The stored sample is overwritten on every call, regressions
//! included, so the next tick compares against the latest observation.

use crate::config::CORE_COUNT;
use crate::types::{Counter, CpuBucket, NetCounter};
use tracing::warn;

/// Bytes per displayed kilobyte.
pub const BYTES_PER_KB: u64 = 1024;

/// Outcome of feeding one sample into a [`RateWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<S> {
    /// No earlier sample existed.
    First,
    /// The sample is below its predecessor in at least one component.
    Regressed,
    /// Both samples are usable.
    Advanced {
        /// Sample of the previous tick.
        previous: S,
        /// Sample of this tick.
        current: S,
    },
}

/// The most recent sample of one counter.
#[derive(Debug, Clone, Copy)]
pub struct RateWindow<S> {
    previous: Option<S>,
}

impl<S> Default for RateWindow<S> {
    fn default() -> Self {
        Self { previous: None }
    }
}

impl<S: Counter> RateWindow<S> {
    /// Creates an empty window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `current` and reports how it relates to the sample it replaced.
    pub fn advance(&mut self, current: S) -> Step<S> {
        match self.previous.replace(current) {
            None => Step::First,
            Some(previous) if current.regressed_from(&previous) => Step::Regressed,
            Some(previous) => Step::Advanced { previous, current },
        }
    }

    /// Forgets the stored sample so the next one primes the window again.
    pub fn clear(&mut self) {
        self.previous = None;
    }

    /// Returns the stored sample.
    #[must_use]
    pub fn previous(&self) -> Option<S> {
        self.previous
    }

    /// Returns true once a sample has been stored.
    #[must_use]
    pub fn is_primed(&self) -> bool {
        self.previous.is_some()
    }
}

/// A rate or percentage derived from two samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateValue<T> {
    /// The metric had no earlier sample.
    NotPrimed,
    /// The counter went backwards; this tick is skipped.
    Regressed,
    /// No time elapsed between the samples, or the deltas overflowed.
    Idle,
    /// A usable value.
    Value(T),
}

impl<T: Copy> RateValue<T> {
    /// Returns the value, or `None` for every sentinel.
    #[must_use]
    pub fn value(&self) -> Option<T> {
        match self {
            Self::Value(v) => Some(*v),
            _ => None,
        }
    }
}

/// Percentage of active time between two CPU samples.
///
/// Returns `None` when neither active nor idle time advanced, when any
/// field of `current` is below `previous`, or when the deltas do not fit
/// in a `u64`.
#[must_use]
pub fn cpu_percent(previous: &CpuBucket, current: &CpuBucket) -> Option<f64> {
    let user = current.user.checked_sub(previous.user)?;
    let user_low = current.user_low.checked_sub(previous.user_low)?;
    let system = current.system.checked_sub(previous.system)?;
    let idle = current.idle.checked_sub(previous.idle)?;

    let active = user.checked_add(user_low)?.checked_add(system)?;
    let total = active.checked_add(idle)?;

    if total == 0 {
        return None;
    }

    Some(100.0 * active as f64 / total as f64)
}

/// Kilobytes transferred during one tick.
#[must_use]
pub fn kb_per_tick(previous: u64, current: u64) -> u64 {
    current.saturating_sub(previous) / BYTES_PER_KB
}

/// Owner of all cross-tick counter state.
#[derive(Debug, Clone)]
pub struct RateEngine {
    cores: [RateWindow<CpuBucket>; CORE_COUNT],
    links: [RateWindow<u64>; NetCounter::COUNT],
}

impl Default for RateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RateEngine {
    /// Creates an engine with no recorded samples.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cores: [RateWindow::new(); CORE_COUNT],
            links: [RateWindow::new(); NetCounter::COUNT],
        }
    }

    /// Feeds one core's buckets and returns its busy percentage.
    ///
    /// Cores beyond [`CORE_COUNT`] are not tracked and report
    /// [`RateValue::NotPrimed`].
    pub fn cpu_percent(&mut self, core: usize, sample: CpuBucket) -> RateValue<f64> {
        let Some(window) = self.cores.get_mut(core) else {
            return RateValue::NotPrimed;
        };

        match window.advance(sample) {
            Step::First => RateValue::NotPrimed,
            Step::Regressed => {
                warn!(core, "cpu counters went backwards, skipping this tick");
                RateValue::Regressed
            }
            Step::Advanced { previous, current } => {
                cpu_percent(&previous, &current).map_or(RateValue::Idle, RateValue::Value)
            }
        }
    }

    /// Feeds one byte counter and returns the kilobytes moved since the last tick.
    pub fn net_rate(&mut self, counter: NetCounter, bytes: u64) -> RateValue<u64> {
        match self.links[counter.index()].advance(bytes) {
            Step::First => RateValue::NotPrimed,
            Step::Regressed => {
                warn!(?counter, "byte counter went backwards, skipping this tick");
                RateValue::Regressed
            }
            Step::Advanced { previous, current } => {
                RateValue::Value(kb_per_tick(previous, current))
            }
        }
    }

    /// Drops the stored sample of a core whose source was unavailable.
    pub fn forget_cpu(&mut self, core: usize) {
        if let Some(window) = self.cores.get_mut(core) {
            window.clear();
        }
    }

    /// Drops the stored sample of a byte counter whose source was unavailable.
    pub fn forget_net(&mut self, counter: NetCounter) {
        self.links[counter.index()].clear();
    }

    /// Returns true if a sample is stored for `core`.
    #[must_use]
    pub fn cpu_primed(&self, core: usize) -> bool {
        self.cores.get(core).is_some_and(RateWindow::is_primed)
    }

    /// Returns true if a sample is stored for `counter`.
    #[must_use]
    pub fn net_primed(&self, counter: NetCounter) -> bool {
        self.links[counter.index()].is_primed()
    }

    /// Returns the stored sample of `counter`.
    #[must_use]
    pub fn net_previous(&self, counter: NetCounter) -> Option<u64> {
        self.links[counter.index()].previous()
    }
}


// ============================================================================
// Property-based tests with proptest
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn bucket() -> impl Strategy<Value = CpuBucket> {
        (0u64..1 << 40, 0u64..1 << 40, 0u64..1 << 40, 0u64..1 << 40)
            .prop_map(|(u, n, s, i)| CpuBucket::new(u, n, s, i))
    }

    fn delta() -> impl Strategy<Value = CpuBucket> {
        (0u64..100_000, 0u64..100_000, 0u64..100_000, 0u64..100_000)
            .prop_map(|(u, n, s, i)| CpuBucket::new(u, n, s, i))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        /// Any nondecreasing pair with elapsed time yields a percentage in [0, 100].
        #[test]
        fn prop_cpu_percent_bounded(prev in bucket(), d in delta()) {
            let curr = CpuBucket::new(
                prev.user + d.user,
                prev.user_low + d.user_low,
                prev.system + d.system,
                prev.idle + d.idle,
            );
            let mut engine = RateEngine::new();
            engine.cpu_percent(0, prev);

            match engine.cpu_percent(0, curr) {
                RateValue::Value(p) => prop_assert!((0.0..=100.0).contains(&p), "{p}"),
                RateValue::Idle => prop_assert_eq!(d, CpuBucket::default()),
                other => prop_assert!(false, "unexpected {:?}", other),
            }
        }

        /// Any pair of buckets, in any order, yields a bounded percentage or nothing.
        #[test]
        fn prop_cpu_percent_total_on_full_range(
            prev in any::<(u64, u64, u64, u64)>(),
            curr in any::<(u64, u64, u64, u64)>(),
        ) {
            let prev = CpuBucket::new(prev.0, prev.1, prev.2, prev.3);
            let curr = CpuBucket::new(curr.0, curr.1, curr.2, curr.3);
            if let Some(p) = cpu_percent(&prev, &curr) {
                prop_assert!((0.0..=100.0).contains(&p), "{p}");
            }
        }

        /// A smaller byte counter is always reported as a regression, never a rate.
        #[test]
        fn prop_regression_never_yields_rate(prev in 1u64..u64::MAX, back in 1u64..1_000_000) {
            let curr = prev.saturating_sub(back);
            let counter = NetCounter::ALL[0];
            let mut engine = RateEngine::new();
            engine.net_rate(counter, prev);

            prop_assert_eq!(engine.net_rate(counter, curr), RateValue::Regressed);
            prop_assert_eq!(engine.net_previous(counter), Some(curr));
        }

        /// Byte rate equals the delta in whole kilobytes.
        #[test]
        fn prop_net_rate_is_kb_delta(prev in 0u64..1 << 50, d in 0u64..1 << 30) {
            let counter = NetCounter::ALL[3];
            let mut engine = RateEngine::new();
            engine.net_rate(counter, prev);

            prop_assert_eq!(engine.net_rate(counter, prev + d), RateValue::Value(d / 1024));
        }
    }
}
