//! Deterministic simulation harness for the WFC node monitor.
//!
//! Stand-ins for every seam of the runtime, so the whole pipeline can run
//! under a paused tokio clock with a scripted log and a calendar that moves
//! on command.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a naive reference monitor. Operations are
//! applied to the model directly and to the real monitor as log lines, and
//! their observable states are compared.
//!
//! # Invariant Testing
//!
//! The `invariants` module checks behavioral properties against monitor
//! snapshots. Use [`InvariantRegistry::standard()`] for the full set.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod model;
pub mod sim_clock;
pub mod sim_sink;
pub mod sim_source;

pub use invariants::{
    CallCountMonotonic, DisplayedNodesInRange, Invariant, InvariantKind, InvariantRegistry,
    InvariantResult, KeySetsMatch, LastUserNeverPlaceholder, MonitorSnapshot, Observer, Violation,
};
pub use model::{ModelMonitor, ObservableState, Operation};
pub use sim_clock::ManualClock;
pub use sim_sink::{RecordingSink, SimSinkError};
pub use sim_source::{SimSource, SimSourceError};
