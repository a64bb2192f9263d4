//! Recording render sink.
//!
//! Captures every snapshot the runtime hands out, and folds them into a
//! [`Screen`] the way a real terminal would, so tests can assert both on
//! the redraw cadence and on what the operator ends up seeing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use wfc_app::RenderSink;
use wfc_core::{Screen, Snapshot};

/// Error injected when a sink is configured to fail.
#[derive(Debug, Clone, thiserror::Error)]
#[error("simulated render failure after {rendered} snapshots")]
pub struct SimSinkError {
    /// Snapshots rendered before the failure.
    pub rendered: usize,
}

#[derive(Debug, Default)]
struct Recorded {
    snapshots: Vec<Snapshot>,
    screen: Screen,
}

/// Sink that records snapshots for later inspection.
///
/// Clones share the recording: hand one to the runtime and keep one.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    recorded: Arc<Mutex<Recorded>>,
    fail_after: Option<usize>,
}

impl RecordingSink {
    /// Sink that never fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink that fails once `limit` snapshots have been rendered.
    pub fn failing_after(limit: usize) -> Self {
        Self { fail_after: Some(limit), ..Self::default() }
    }

    fn lock(&self) -> MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every snapshot rendered so far, oldest first.
    pub fn snapshots(&self) -> Vec<Snapshot> {
        self.lock().snapshots.clone()
    }

    /// Number of renders so far.
    pub fn render_count(&self) -> usize {
        self.lock().snapshots.len()
    }

    /// What the screen shows after every render so far.
    pub fn screen(&self) -> Screen {
        self.lock().screen.clone()
    }
}

impl RenderSink for RecordingSink {
    type Error = SimSinkError;

    fn render(&mut self, snapshot: &Snapshot) -> Result<(), SimSinkError> {
        let mut recorded = self.lock();
        if self.fail_after.is_some_and(|limit| recorded.snapshots.len() >= limit) {
            let rendered = recorded.snapshots.len();
            tracing::debug!(rendered, "injecting render failure");
            return Err(SimSinkError { rendered });
        }
        recorded.screen.apply(snapshot);
        recorded.snapshots.push(snapshot.clone());
        Ok(())
    }
}
