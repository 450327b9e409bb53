//! Diagnostic logging.
//!
//! Diagnostics go to stderr and never reach the status line. The level is
//! taken from `RUST_LOG` and defaults to warnings only.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(LevelFilter::WARN.to_string()))
}

/// Installs the global subscriber. Calling it again is a no-op.
pub fn init() {
    let console_layer = fmt::Layer::new()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_filter(env_filter());

    // Fails only when a subscriber is already installed.
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init();
        init();
        tracing::warn!("logging initialized");
    }
}
