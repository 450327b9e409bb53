//! # dwmstatus
//!
//! Periodic system metrics sampler for the dwm status bar.
//!
//! Once per tick the sampler reads CPU time buckets, memory figures, battery
//! charge, a thermal sensor, network byte counters and the mixer volume. It
//! turns the cumulative counters into rates, classifies each value into a
//! severity tier, renders a single status line and stores it as the name of
//! the X root window, where dwm picks it up.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dwmstatus::prelude::*;
//!
//! let publisher = RootWindowPublisher::connect()?;
//! App::new(Config::new(), publisher).run()?;
//! ```
//!
//! A source that cannot be read never stops the loop: its slot renders as
//! `--` with the unavailable marker and the other slots are unaffected.

#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Sampling
// ============================================================================

/// Fixed source locations and tick settings.
pub mod config;

/// Sample types shared by the readers and the rate engine.
pub mod types;

/// Stateless readers for each kernel source.
pub mod collectors;

/// External commands with a timeout.
pub mod subprocess;

/// Delta and rate computation over cumulative counters.
pub mod rate;

// ============================================================================
// Output
// ============================================================================

/// Severity tiers and per-metric cutoffs.
pub mod severity;

/// Status line rendering.
pub mod render;

/// Publishing to the display server.
pub mod publish;

/// The polling loop.
pub mod app;

/// Diagnostic logging setup.
pub mod logging;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for sampling and publishing.
pub mod error;

pub use error::{Result, StatusError};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use dwmstatus::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::App;
    pub use crate::config::Config;
    pub use crate::error::{Result, StatusError};
    pub use crate::publish::{MemoryPublisher, Publisher, RootWindowPublisher};
    pub use crate::rate::{RateEngine, RateValue};
    pub use crate::render::{render, Marker, Snapshot, StatusLine};
    pub use crate::severity::{classify, Severity, Thresholds};
    pub use crate::types::{CpuBucket, MemInfo, NetCounter};
}
