//! Configuration file.
//!
//! A small TOML document naming the log to follow, how many nodes to show
//! and the system name for the footer. Command-line flags override the
//! file; validation runs after overrides so a flag can fix a bad file.

use std::{
    collections::BTreeSet,
    io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;
use wfc_app::DEFAULT_POLL_INTERVAL;
use wfc_core::{DEFAULT_HISTORY_WINDOW, DEFAULT_REDRAW_INTERVAL_MS, MonitorConfig, NodeId};

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "wfc.toml";

/// Configuration errors. All fatal before the pipeline starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// Config file is not valid TOML or is missing a required field.
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },

    /// A field holds a value the monitor cannot run with.
    #[error("invalid config: {field} {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Console configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Activity log to follow.
    pub log_path: PathBuf,
    /// Number of node rows to display.
    pub max_nodes: NodeId,
    /// Shown in the footer.
    pub system_name: String,
    /// Users whose logins don't count as calls (typically the sysop).
    #[serde(default)]
    pub excluded_users: Vec<String>,
    /// Trailing lines scanned at startup for the last logged-off user.
    #[serde(default = "default_history_scan_window")]
    pub history_scan_window: usize,
    /// Redraw cadence.
    #[serde(default = "default_redraw_interval_ms")]
    pub redraw_interval_ms: u64,
    /// How often the log is checked for new data.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_history_scan_window() -> usize {
    DEFAULT_HISTORY_WINDOW
}

fn default_redraw_interval_ms() -> u64 {
    DEFAULT_REDRAW_INTERVAL_MS
}

fn default_poll_interval_ms() -> u64 {
    u64::try_from(DEFAULT_POLL_INTERVAL.as_millis()).unwrap_or(u64::MAX)
}

impl Config {
    /// Read and parse a config file. Does not validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::parse(&text, path)
    }

    /// Parse config text. `origin` is only used in errors.
    pub fn parse(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse { path: origin.to_path_buf(), source })
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, log_path: Option<PathBuf>, max_nodes: Option<NodeId>) -> Self {
        if let Some(path) = log_path {
            self.log_path = path;
        }
        if let Some(max_nodes) = max_nodes {
            self.max_nodes = max_nodes;
        }
        self
    }

    /// Reject values the monitor cannot run with.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });

        if self.max_nodes == 0 {
            return invalid("max_nodes", "must be at least 1");
        }
        if self.system_name.trim().is_empty() {
            return invalid("system_name", "must not be empty");
        }
        if self.log_path.as_os_str().is_empty() {
            return invalid("log_path", "must not be empty");
        }
        if self.redraw_interval_ms == 0 {
            return invalid("redraw_interval_ms", "must be positive");
        }
        if self.poll_interval_ms == 0 {
            return invalid("poll_interval_ms", "must be positive");
        }
        Ok(self)
    }

    /// Settings for the core monitor.
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            max_nodes: self.max_nodes,
            excluded_users: self.excluded_users.iter().cloned().collect::<BTreeSet<_>>(),
            history_window: self.history_scan_window,
        }
    }

    /// Redraw cadence as a duration.
    pub fn redraw_interval(&self) -> Duration {
        Duration::from_millis(self.redraw_interval_ms)
    }

    /// Log poll cadence as a duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
