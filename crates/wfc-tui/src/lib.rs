//! Terminal console for the WFC node monitor
//!
//! A thin shell over [`wfc_app::Runtime`]: the config file, a
//! [`wfc_app::RenderSink`] that draws with ratatui, and a key watcher that
//! produces quit and redraw requests. All orchestration lives in the
//! generic runtime.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod input;
pub mod terminal;
pub mod ui;

pub use config::{Config, ConfigError, DEFAULT_CONFIG_PATH};
pub use terminal::{TerminalError, TerminalSink};
pub use ui::ConsoleView;
