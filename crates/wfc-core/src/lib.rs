//! Core of the WFC node monitor
//!
//! Pure state machines that turn a BBS activity log into a live picture of
//! which nodes are occupied, by whom and where, plus two derived facts: the
//! last user to log off and today's call count. No I/O happens here; the
//! async runtime and the terminal live in other crates.
//!
//! # Components
//!
//! - [`Classifier`]: ordered rule list, raw line to optional [`Event`]
//! - [`format_location`]: raw location text to display label
//! - [`SessionStore`]: per-node session table and active user index
//! - [`StatsAggregator`]: daily call count and last logged-off user
//! - [`UpdateScheduler`]: dirty set drained once per redraw tick
//! - [`Monitor`]: single owner of all of the above

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod classifier;
mod clock;
mod event;
mod location;
mod monitor;
mod scheduler;
mod session;
mod snapshot;
mod stats;

pub use classifier::{Classifier, Rule, RuleKind, line_date};
pub use clock::{Clock, SystemClock};
pub use event::{Activity, Event, NodeId};
pub use location::{LOCATION_PREFIX, format_location};
pub use monitor::{Monitor, MonitorConfig};
pub use scheduler::{DEFAULT_REDRAW_INTERVAL_MS, Dirty, UpdateScheduler};
pub use session::{
    Applied, IDLE_LOCATION, IDLE_USER, LOGGING_IN, NEW_USER, SIGNING_UP, SessionStatus,
    SessionStore, UNKNOWN_USER,
};
pub use snapshot::{NodeRow, Screen, Snapshot, Summary};
pub use stats::{
    DEFAULT_HISTORY_WINDOW, DailyCallCounter, StatsAggregator, count_todays_calls,
    last_logged_off_in,
};
