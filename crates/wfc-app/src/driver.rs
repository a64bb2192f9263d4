//! I/O seams of the runtime.
//!
//! The [`LineSource`] and [`RenderSink`] traits decouple the orchestration
//! loop from where lines come from and where snapshots go. Each frontend
//! implements them for its own I/O while the generic [`crate::Runtime`]
//! handles all coordination. This keeps one canonical pipeline no matter
//! which backend draws the screen.
//!
//! # Implementations
//!
//! - **Log file**: [`crate::LogFollower`] tails a growing file
//! - **Terminal**: the TUI crate draws with ratatui
//! - **Simulation**: the harness crate scripts lines and records snapshots

use std::future::Future;

use wfc_core::Snapshot;

/// Ordered, unbounded stream of newly appended log lines.
pub trait LineSource: Send {
    /// Source-specific read error. Never fatal to the runtime.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next complete line.
    ///
    /// Returns `None` once the source is closed and will produce no more
    /// lines. Implementations MUST be cancel safe: the runtime drops this
    /// future whenever a tick or control message wins the race, and no line
    /// may be lost or duplicated when that happens.
    fn next_line(&mut self) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send;
}

/// Consumer of rendered snapshots.
pub trait RenderSink: Send {
    /// Sink-specific error. Fatal to the runtime.
    type Error: std::error::Error + Send + 'static;

    /// Draw a snapshot.
    ///
    /// A snapshot with `full == false` only carries changed rows; rows not
    /// present keep whatever the sink drew last.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    fn render(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error>;
}

/// Out-of-band instructions for the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Stop the pipeline.
    Quit,
    /// Redraw every node (e.g. after a terminal resize).
    Redraw,
}
