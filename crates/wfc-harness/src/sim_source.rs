//! Scripted line source for simulation.
//!
//! Each scripted item carries an offset from the moment the source was
//! created. Under a paused tokio clock the runtime auto-advances time, so
//! a script plays out instantly and deterministically while the redraw
//! interval still sees the offsets.

use std::{collections::VecDeque, time::Duration};

use tokio::time::Instant;
use wfc_app::LineSource;

/// Error injected by a script.
#[derive(Debug, Clone, thiserror::Error)]
#[error("simulated read failure: {0}")]
pub struct SimSourceError(pub String);

#[derive(Debug)]
enum Item {
    Line(String),
    Error(String),
}

/// Line source replaying a fixed script, then closing.
#[derive(Debug)]
pub struct SimSource {
    start: Instant,
    script: VecDeque<(Duration, Item)>,
}

impl SimSource {
    /// Empty script anchored at the current (tokio) instant.
    pub fn new() -> Self {
        Self { start: Instant::now(), script: VecDeque::new() }
    }

    /// Script whose lines are all available immediately.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lines.into_iter().fold(Self::new(), |source, line| source.line(Duration::ZERO, line))
    }

    /// Append a line delivered `at` after creation.
    ///
    /// Offsets must be non-decreasing; an earlier offset is delivered
    /// immediately after its predecessor.
    #[must_use]
    pub fn line(mut self, at: Duration, line: impl Into<String>) -> Self {
        self.script.push_back((at, Item::Line(line.into())));
        self
    }

    /// Append a read failure delivered `at` after creation.
    #[must_use]
    pub fn error(mut self, at: Duration, message: impl Into<String>) -> Self {
        self.script.push_back((at, Item::Error(message.into())));
        self
    }
}

impl Default for SimSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for SimSource {
    type Error = SimSourceError;

    // Cancel safe: the item is only popped after the sleep completes.
    async fn next_line(&mut self) -> Result<Option<String>, SimSourceError> {
        let Some((at, _)) = self.script.front() else {
            return Ok(None);
        };
        tokio::time::sleep_until(self.start + *at).await;

        match self.script.pop_front() {
            Some((_, Item::Line(line))) => {
                tracing::trace!(line = line.as_str(), "scripted line");
                Ok(Some(line))
            },
            Some((_, Item::Error(message))) => {
                tracing::debug!(message = message.as_str(), "injecting read failure");
                Err(SimSourceError(message))
            },
            None => Ok(None),
        }
    }
}
