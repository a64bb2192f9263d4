//! Startup read of the existing log.
//!
//! The whole file is read once to seed the daily call count and recover the
//! last logged-off user. The follower then starts where this read ended, so
//! no line is seen twice and none is skipped.

use std::{
    io,
    path::{Path, PathBuf},
    time::Duration,
};

use thiserror::Error;
use wfc_core::{Clock, Monitor, MonitorConfig};

use crate::{LogFollower, follower::decode_line};

/// Fatal errors before the pipeline starts.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The log file does not exist. There is nothing to tail.
    #[error("log file not found: {}", path.display())]
    LogMissing {
        /// Expected log path.
        path: PathBuf,
    },

    /// The log file exists but could not be read.
    #[error("failed to read log file {}: {source}", path.display())]
    LogUnreadable {
        /// Log path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

/// Log contents at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    /// Every complete line, oldest first.
    pub lines: Vec<String>,
    /// Byte offset just past the last complete line.
    ///
    /// A trailing line still being written is excluded from `lines` and
    /// left for the follower to pick up once it is finished.
    pub end_offset: u64,
}

impl History {
    /// Read the whole log.
    pub async fn load(path: &Path) -> Result<Self, StartupError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StartupError::LogMissing { path: path.to_path_buf() }
            } else {
                StartupError::LogUnreadable { path: path.to_path_buf(), source }
            }
        })?;
        Ok(Self::parse(&bytes))
    }

    /// Split raw log bytes into complete lines.
    pub fn parse(bytes: &[u8]) -> Self {
        let complete = bytes.iter().rposition(|b| *b == b'\n').map_or(0, |i| i + 1);
        let lines = bytes[..complete].split_inclusive(|b| *b == b'\n').map(decode_line).collect();
        Self { lines, end_offset: complete as u64 }
    }
}

/// Read the log, build and seed a [`Monitor`], and position a follower at
/// the end of what was read.
pub async fn bootstrap<C: Clock>(
    path: &Path,
    config: &MonitorConfig,
    clock: C,
    poll_interval: Duration,
) -> Result<(Monitor<C>, LogFollower), StartupError> {
    let history = History::load(path).await?;
    tracing::info!(
        path = %path.display(),
        lines = history.lines.len(),
        bytes = history.end_offset,
        "loaded log history"
    );

    let mut monitor = Monitor::new(config, clock);
    monitor.seed(&history.lines);
    let follower = LogFollower::new(path, history.end_offset, poll_interval);

    Ok((monitor, follower))
}
