//! Threshold classification.

/// Severity tier of a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// At or below the medium cutoff.
    Low,
    /// Above the medium cutoff, at or below the high cutoff.
    Medium,
    /// Above the high cutoff.
    High,
}

/// Cutoffs of one metric. Both comparisons are strictly greater-than.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Values above this are [`Severity::High`].
    pub high: f64,
    /// Values above this (and not high) are [`Severity::Medium`].
    pub medium: f64,
}

impl Thresholds {
    /// Creates cutoffs; `high` is checked first.
    #[must_use]
    pub const fn new(high: f64, medium: f64) -> Self {
        Self { high, medium }
    }
}

/// Per-core CPU busy percentage.
pub const CPU: Thresholds = Thresholds::new(70.0, 50.0);

/// Memory used percentage.
pub const MEMORY: Thresholds = Thresholds::new(70.0, 50.0);

/// Temperature in degrees Celsius.
pub const TEMPERATURE: Thresholds = Thresholds::new(55.0, 45.0);

/// Network rate in kilobytes per tick.
///
/// The status line prints rates without a marker; this cutoff is for callers
/// that want to tier them.
pub const NETWORK: Thresholds = Thresholds::new(70.0, 50.0);

/// Battery charge percentage.
pub const BATTERY: Thresholds = Thresholds::new(80.0, 50.0);

/// Maps `value` to a tier, checking the high cutoff first.
#[must_use]
pub fn classify(value: f64, thresholds: Thresholds) -> Severity {
    if value > thresholds.high {
        Severity::High
    } else if value > thresholds.medium {
        Severity::Medium
    } else {
        Severity::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_cpu_sixty_is_medium() {
        assert_eq!(classify(60.0, CPU), Severity::Medium);
    }

    #[test]
    fn test_classify_boundaries_are_strict() {
        assert_eq!(classify(70.0, CPU), Severity::Medium);
        assert_eq!(classify(70.1, CPU), Severity::High);
        assert_eq!(classify(50.0, CPU), Severity::Low);
        assert_eq!(classify(50.5, CPU), Severity::Medium);
    }

    #[test]
    fn test_classify_temperature() {
        assert_eq!(classify(56.0, TEMPERATURE), Severity::High);
        assert_eq!(classify(46.0, TEMPERATURE), Severity::Medium);
        assert_eq!(classify(45.0, TEMPERATURE), Severity::Low);
    }

    #[test]
    fn test_classify_battery() {
        assert_eq!(classify(81.0, BATTERY), Severity::High);
        assert_eq!(classify(80.0, BATTERY), Severity::Medium);
        assert_eq!(classify(12.0, BATTERY), Severity::Low);
    }

    #[test]
    fn test_classify_network() {
        assert_eq!(classify(1024.0, NETWORK), Severity::High);
        assert_eq!(classify(60.0, NETWORK), Severity::Medium);
        assert_eq!(classify(0.0, NETWORK), Severity::Low);
    }

    #[test]
    fn test_classify_negative_is_low() {
        assert_eq!(classify(-10.0, TEMPERATURE), Severity::Low);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
    }
}
