//! Status line rendering.
//!
//! The line follows dwm's status color convention: bytes `\x01`..`\x04`
//! switch the segment scheme, and each classified value is followed by a
//! [`Marker`] byte selecting the scheme of its severity. Every slot is
//! always filled; a value that could not be read renders as
//! [`UNAVAILABLE`] followed by [`Marker::Unavailable`].

use crate::collectors::memory::format_amount;
use crate::config::CORE_COUNT;
use crate::severity::{self, classify, Severity, Thresholds};
use crate::types::{MemInfo, NetCounter};
use std::fmt;

/// Text shown in place of a value that could not be read.
pub const UNAVAILABLE: &str = "--";

/// Number of positional slots in the template.
pub const SLOT_COUNT: usize = 14;

// The template below names exactly four core slots.
const _: () = assert!(CORE_COUNT == 4);

/// Severity marker embedded after a classified value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Normal scheme.
    Calm,
    /// Warning scheme.
    Elevated,
    /// Alert scheme.
    Critical,
    /// The value was unavailable.
    Unavailable,
}

impl Marker {
    /// The control byte written into the status line.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Calm => '\x05',
            Self::Elevated => '\x06',
            Self::Critical => '\x07',
            Self::Unavailable => '\x08',
        }
    }

    /// Marker of a severity under the metric's polarity.
    #[must_use]
    pub fn for_severity(severity: Severity, polarity: Polarity) -> Self {
        match (polarity, severity) {
            (Polarity::HigherIsWorse, Severity::Low) | (Polarity::HigherIsBetter, Severity::High) => {
                Self::Calm
            }
            (_, Severity::Medium) => Self::Elevated,
            (Polarity::HigherIsWorse, Severity::High) | (Polarity::HigherIsBetter, Severity::Low) => {
                Self::Critical
            }
        }
    }

    /// Classifies `value` and returns its marker.
    #[must_use]
    pub fn classify(value: f64, thresholds: Thresholds, polarity: Polarity) -> Self {
        Self::for_severity(classify(value, thresholds), polarity)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Whether a high reading is bad (load, heat) or good (charge).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// High values are critical.
    HigherIsWorse,
    /// High values are calm.
    HigherIsBetter,
}

/// Every value of one tick, ready to render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Battery charge in percent.
    pub battery: Option<u8>,
    /// Kilobytes per tick, indexed like [`NetCounter::ALL`].
    pub net: [Option<u64>; NetCounter::COUNT],
    /// Volume level in percent.
    pub volume: Option<u8>,
    /// Busy percentage per core.
    pub cores: [Option<f64>; CORE_COUNT],
    /// Temperature in whole degrees Celsius.
    pub temperature: Option<i64>,
    /// Memory figures.
    pub memory: Option<MemInfo>,
    /// Formatted date.
    pub date: String,
    /// Formatted time of day.
    pub time: String,
}

/// One rendered status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine(String);

impl StatusLine {
    /// Returns the line as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the line as raw bytes for the display server.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn unavailable() -> String {
    format!("{UNAVAILABLE}{}", Marker::Unavailable)
}

fn battery_slot(battery: Option<u8>) -> String {
    battery.map_or_else(unavailable, |percent| {
        let marker =
            Marker::classify(f64::from(percent), severity::BATTERY, Polarity::HigherIsBetter);
        format!("{percent}%{marker}")
    })
}

// Rates stay unmarked, even above `severity::NETWORK`: the segment is plain `NK`.
fn rate_slot(kb: Option<u64>) -> String {
    kb.map_or_else(|| UNAVAILABLE.to_string(), |kb| format!("{kb}K"))
}

fn volume_slot(volume: Option<u8>) -> String {
    volume.map_or_else(unavailable, |level| format!("{level}%"))
}

fn core_slot(percent: Option<f64>) -> String {
    percent.map_or_else(unavailable, |percent| {
        let marker = Marker::classify(percent, severity::CPU, Polarity::HigherIsWorse);
        format!("{}%{marker}", percent as u32)
    })
}

fn temperature_slot(celsius: Option<i64>) -> String {
    celsius.map_or_else(unavailable, |celsius| {
        let marker =
            Marker::classify(celsius as f64, severity::TEMPERATURE, Polarity::HigherIsWorse);
        format!("{celsius}c{marker}")
    })
}

fn memory_slot(memory: Option<MemInfo>) -> String {
    let Some((info, percent)) = memory.and_then(|m| m.used_percent().map(|p| (m, p))) else {
        return unavailable();
    };
    let marker = Marker::classify(f64::from(percent), severity::MEMORY, Polarity::HigherIsWorse);
    format!("{percent}% ({}){marker}", format_amount(info.used_kb()))
}

/// Renders each slot in template order.
#[must_use]
pub fn slots(snapshot: &Snapshot) -> [String; SLOT_COUNT] {
    let [wrx, wtx, rx, tx] = snapshot.net;
    let [c0, c1, c2, c3] = snapshot.cores;

    [
        battery_slot(snapshot.battery),
        rate_slot(wrx),
        rate_slot(wtx),
        rate_slot(rx),
        rate_slot(tx),
        volume_slot(snapshot.volume),
        core_slot(c0),
        core_slot(c1),
        core_slot(c2),
        core_slot(c3),
        temperature_slot(snapshot.temperature),
        memory_slot(snapshot.memory),
        snapshot.date.clone(),
        snapshot.time.clone(),
    ]
}

/// Renders the full status line.
#[must_use]
pub fn render(snapshot: &Snapshot) -> StatusLine {
    let [bat, wrx, wtx, rx, tx, vol, c0, c1, c2, c3, temp, mem, date, time] = slots(snapshot);

    StatusLine(format!(
        "[\x01 {bat} ][ \x01  {wrx}\x02 /\x01 {wtx}\x02 |  {rx}\x02 /\x01 {tx} \x02]\
         [\x01  {vol}\x04 ][\x01  {c0} /\x01 {c1} /\x01 {c2} /\x01 {c3} ]\
         [\x01  {temp} ][\x01  {mem}\x03 ][\x01  {date} | {time} ]\x01"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_snapshot() -> Snapshot {
        Snapshot {
            battery: Some(92),
            net: [Some(12), Some(3), Some(1024), Some(0)],
            volume: Some(63),
            cores: [Some(60.0), Some(12.5), Some(99.9), Some(0.0)],
            temperature: Some(48),
            memory: Some(MemInfo { total_kb: 16_000_000, available_kb: 11_000_000, buffers_kb: 0 }),
            date: "10/16/26".to_string(),
            time: "14.05".to_string(),
        }
    }

    #[test]
    fn test_marker_chars_are_distinct() {
        let chars = [
            Marker::Calm.as_char(),
            Marker::Elevated.as_char(),
            Marker::Critical.as_char(),
            Marker::Unavailable.as_char(),
        ];
        for (i, a) in chars.iter().enumerate() {
            for b in &chars[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_marker_polarity() {
        assert_eq!(Marker::for_severity(Severity::High, Polarity::HigherIsWorse), Marker::Critical);
        assert_eq!(Marker::for_severity(Severity::High, Polarity::HigherIsBetter), Marker::Calm);
        assert_eq!(Marker::for_severity(Severity::Low, Polarity::HigherIsBetter), Marker::Critical);
        assert_eq!(Marker::for_severity(Severity::Medium, Polarity::HigherIsBetter), Marker::Elevated);
    }

    #[test]
    fn test_render_full_line() {
        let line = render(&full_snapshot());
        let text = line.as_str();

        assert!(text.starts_with("[\x01 92%\x05 ]"), "{text:?}");
        assert!(text.contains("12K\x02 /\x01 3K"));
        assert!(text.contains("1024K\x02 /\x01 0K \x02]"));
        assert!(text.contains("63%\x04"));
        assert!(text.contains("60%\x06 /\x01 12%\x05 /\x01 99%\x07 /\x01 0%\x05"));
        assert!(text.contains("48c\x06"));
        // used = 5_000_000 kB = 31.25% -> 31%
        assert!(text.contains("31% (4.77 GiB)\x05\x03"));
        assert!(text.ends_with("10/16/26 | 14.05 ]\x01"));
    }

    #[test]
    fn test_render_missing_battery() {
        let mut snapshot = full_snapshot();
        snapshot.battery = None;
        let text = render(&snapshot).to_string();

        assert!(text.starts_with("[\x01 --\x08 ]"), "{text:?}");
        assert!(text.contains("63%\x04"));
        assert!(text.contains("48c\x06"));
    }

    #[test]
    fn test_render_everything_unavailable_is_well_formed() {
        let text = render(&Snapshot::default()).to_string();

        assert_eq!(text.matches('[').count(), 7);
        assert_eq!(text.matches(']').count(), 7);
        assert_eq!(text.matches(Marker::Unavailable.as_char()).count(), 8);
        assert!(text.ends_with("]\x01"));
    }

    #[test]
    fn test_slots_are_always_filled() {
        for snapshot in [full_snapshot(), Snapshot::default()] {
            let slots = slots(&snapshot);
            assert_eq!(slots.len(), SLOT_COUNT);
            // date and time are the only slots that may be empty text
            assert!(slots[..12].iter().all(|s| !s.is_empty()));
        }
    }

    #[test]
    fn test_battery_low_charge_is_critical() {
        assert_eq!(battery_slot(Some(20)), "20%\x07");
        assert_eq!(battery_slot(Some(60)), "60%\x06");
    }

    #[test]
    fn test_memory_zero_total_is_unavailable() {
        assert_eq!(memory_slot(Some(MemInfo::default())), unavailable());
    }

    #[test]
    fn test_rate_slot_high_rate_has_no_marker() {
        assert_eq!(classify(4096.0, severity::NETWORK), Severity::High);
        let slot = rate_slot(Some(4096));
        assert_eq!(slot, "4096K");
        assert!(!slot.contains(Marker::Critical.as_char()));
    }

    #[test]
    fn test_rate_slot_unavailable() {
        assert_eq!(rate_slot(None), UNAVAILABLE);
        assert_eq!(rate_slot(Some(1024)), "1024K");
    }
}
