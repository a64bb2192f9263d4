//! Application layer for the WFC node monitor
//!
//! Async orchestration around the pure [`wfc_core::Monitor`]: following the
//! log file, the fixed-cadence redraw loop, and the seams frontends plug
//! into.
//!
//! # Components
//!
//! - [`LineSource`] / [`RenderSink`]: traits for platform-specific I/O
//! - [`LogFollower`]: tails the log file
//! - [`History`] / [`bootstrap`]: startup read and seeding
//! - [`Runtime`]: generic orchestration loop

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod driver;
mod follower;
mod history;
mod runtime;

pub use driver::{Control, LineSource, RenderSink};
pub use follower::{DEFAULT_POLL_INTERVAL, FollowError, LogFollower};
pub use history::{History, StartupError, bootstrap};
pub use runtime::Runtime;
