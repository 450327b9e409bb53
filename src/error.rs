//! Error types for sampling and publishing.
//!
//! Per-metric failures ([`StatusError::SourceUnavailable`],
//! [`StatusError::ParseFailure`], [`StatusError::CommandFailed`]) never
//! leave the tick: they are turned into the unavailable sentinel by the
//! caller. Display and connection errors are fatal.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use x11rb::errors::{ConnectError, ConnectionError, ReplyError};

/// Error type for status line operations.
#[derive(Debug, Error)]
pub enum StatusError {
    /// A kernel or sysfs source could not be read.
    #[error("source {} is unavailable: {source}", path.display())]
    SourceUnavailable {
        /// The file that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A source was readable but its contents were malformed.
    #[error("failed to parse {origin}: {message}")]
    ParseFailure {
        /// Which source produced the malformed data.
        origin: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// An external command failed to spawn, timed out or printed nothing.
    #[error("command '{command}' failed: {reason}")]
    CommandFailed {
        /// The program that was run.
        command: String,
        /// Why no output was produced.
        reason: String,
    },

    /// The X display could not be opened.
    #[error("cannot open display: {0}")]
    DisplayUnavailable(#[from] ConnectError),

    /// The X connection broke while sending a request.
    #[error("display connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// The X server rejected a request.
    #[error("display request failed: {0}")]
    Reply(#[from] ReplyError),

    /// The preferred screen reported by the server does not exist.
    #[error("display has no screen {0}")]
    NoScreen(usize),
}

impl StatusError {
    /// Builds a [`StatusError::ParseFailure`].
    pub fn parse(origin: &'static str, message: impl Into<String>) -> Self {
        Self::ParseFailure { origin, message: message.into() }
    }

    /// Returns true for errors that only affect a single metric.
    #[must_use]
    pub fn is_per_metric(&self) -> bool {
        matches!(
            self,
            Self::SourceUnavailable { .. } | Self::ParseFailure { .. } | Self::CommandFailed { .. }
        )
    }
}

/// Result type alias for status line operations.
pub type Result<T> = std::result::Result<T, StatusError>;

/// Reads a whole source file, mapping I/O errors to [`StatusError::SourceUnavailable`].
pub(crate) fn read_source(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|source| StatusError::SourceUnavailable { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_unavailable_includes_path() {
        let err = StatusError::SourceUnavailable {
            path: PathBuf::from("/sys/class/power_supply/BAT0/capacity"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        let display = err.to_string();

        assert!(display.contains("BAT0/capacity"), "Error should include path: {display}");
        assert!(display.contains("No such file"), "Error should include cause: {display}");
    }

    #[test]
    fn test_parse_failure_includes_origin() {
        let err = StatusError::parse("meminfo", "MemTotal missing");
        let display = err.to_string();

        assert!(display.contains("meminfo"));
        assert!(display.contains("MemTotal missing"));
    }

    #[test]
    fn test_command_failed_includes_command() {
        let err = StatusError::CommandFailed {
            command: "amixer".to_string(),
            reason: "timed out".to_string(),
        };

        assert!(err.to_string().contains("amixer"));
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_per_metric_classification() {
        assert!(StatusError::parse("stat", "short line").is_per_metric());
        assert!(!StatusError::NoScreen(3).is_per_metric());
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(std::path::Path::new("/nonexistent/dwmstatus/source"))
            .expect_err("missing file must fail");

        assert!(matches!(err, StatusError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StatusError>();
    }
}
