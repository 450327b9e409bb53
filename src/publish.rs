//! Publishing the status line.
//!
//! dwm reads its status text from the `WM_NAME` property of the root
//! window. [`RootWindowPublisher`] opens the display once at startup and
//! keeps the connection for the life of the process.

use crate::error::{Result, StatusError};
use crate::render::StatusLine;
use tracing::info;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{AtomEnum, PropMode, Window};
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

/// Destination of rendered status lines.
pub trait Publisher {
    /// Replaces the displayed status with `line`.
    ///
    /// # Errors
    ///
    /// Returns an error if the display server cannot be reached.
    fn publish(&mut self, line: &StatusLine) -> Result<()>;
}

/// Sets the root window name of the default X display.
pub struct RootWindowPublisher {
    connection: RustConnection,
    root: Window,
}

impl RootWindowPublisher {
    /// Connects to the display named by the environment.
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::DisplayUnavailable`] if no display can be opened.
    pub fn connect() -> Result<Self> {
        let (connection, screen) = x11rb::connect(None)?;
        let root = connection
            .setup()
            .roots
            .get(screen)
            .map(|s| s.root)
            .ok_or(StatusError::NoScreen(screen))?;

        info!(screen, root, "connected to display");
        Ok(Self { connection, root })
    }
}

impl Publisher for RootWindowPublisher {
    fn publish(&mut self, line: &StatusLine) -> Result<()> {
        // Waiting on the cookie makes this a round trip, like XStoreName + XSync.
        self.connection
            .change_property8(
                PropMode::REPLACE,
                self.root,
                AtomEnum::WM_NAME,
                AtomEnum::STRING,
                line.as_bytes(),
            )?
            .check()?;
        Ok(())
    }
}

/// Keeps every published line in memory.
#[derive(Debug, Default)]
pub struct MemoryPublisher {
    lines: Vec<StatusLine>,
}

impl MemoryPublisher {
    /// Creates an empty publisher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines published so far, oldest first.
    #[must_use]
    pub fn lines(&self) -> &[StatusLine] {
        &self.lines
    }

    /// The most recent line.
    #[must_use]
    pub fn latest(&self) -> Option<&StatusLine> {
        self.lines.last()
    }
}

impl Publisher for MemoryPublisher {
    fn publish(&mut self, line: &StatusLine) -> Result<()> {
        self.lines.push(line.clone());
        Ok(())
    }
}
