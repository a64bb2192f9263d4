//! Poll-based log follower.
//!
//! [`LogFollower`] implements [`LineSource`] over a file that another
//! process appends to. It remembers the byte offset it has consumed, reads
//! whatever was appended since, and yields complete lines one at a time.
//!
//! Flow: wait for the next poll deadline, stat the file, restart from the
//! beginning if the file shrank (truncation), read the appended bytes, commit
//! them to the line buffer.
//!
//! State is only committed after a read completes, so dropping
//! [`LogFollower::next_line`] midway never loses or duplicates a line.

use std::{
    collections::VecDeque,
    io::{self, SeekFrom},
    path::PathBuf,
    time::Duration,
};

use thiserror::Error;
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncSeekExt},
    time::Instant,
};

use crate::LineSource;

/// Default delay between two polls of the log file.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Errors while following the log. Transient: the next call retries after
/// one poll interval.
#[derive(Debug, Error)]
pub enum FollowError {
    /// I/O error while reading the log.
    #[error("I/O error while following {}: {source}", path.display())]
    Io {
        /// File being followed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

/// Tails a growing log file.
#[derive(Debug)]
pub struct LogFollower {
    path: PathBuf,
    offset: u64,
    poll_interval: Duration,
    next_poll: Instant,
    pending: VecDeque<String>,
    partial: Vec<u8>,
}

impl LogFollower {
    /// Follow `path` starting at byte `offset`.
    pub fn new(path: impl Into<PathBuf>, offset: u64, poll_interval: Duration) -> Self {
        Self {
            path: path.into(),
            offset,
            poll_interval,
            next_poll: Instant::now(),
            pending: VecDeque::new(),
            partial: Vec::new(),
        }
    }

    /// Bytes consumed so far, including any buffered partial line.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read whatever was appended since the last poll.
    async fn poll(&mut self) -> Result<(), FollowError> {
        let io_err = |source| FollowError::Io { path: self.path.clone(), source };

        let len = tokio::fs::metadata(&self.path).await.map_err(io_err)?.len();
        let mut offset = self.offset;
        let truncated = len < offset;
        if truncated {
            tracing::info!(path = %self.path.display(), old = offset, new = len, "log shrank, restarting from the top");
            offset = 0;
        }
        if len == offset {
            if truncated {
                self.offset = 0;
                self.partial.clear();
            }
            return Ok(());
        }

        let mut file = File::open(&self.path).await.map_err(io_err)?;
        file.seek(SeekFrom::Start(offset)).await.map_err(io_err)?;
        let mut appended = Vec::with_capacity((len - offset) as usize);
        file.take(len - offset).read_to_end(&mut appended).await.map_err(io_err)?;

        if truncated {
            self.partial.clear();
        }
        self.offset = offset + appended.len() as u64;
        self.partial.extend_from_slice(&appended);
        self.split_lines();
        Ok(())
    }

    /// Move every complete line out of the partial buffer.
    fn split_lines(&mut self) {
        while let Some(end) = self.partial.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.partial.drain(..=end).collect();
            self.pending.push_back(decode_line(&raw));
        }
    }
}

/// Decode one raw line, dropping the terminator.
pub(crate) fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

impl LineSource for LogFollower {
    type Error = FollowError;

    async fn next_line(&mut self) -> Result<Option<String>, Self::Error> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Ok(Some(line));
            }

            tokio::time::sleep_until(self.next_poll).await;
            self.next_poll = Instant::now() + self.poll_interval;
            self.poll().await?;
        }
    }
}
