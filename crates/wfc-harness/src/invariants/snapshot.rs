//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture what the monitor exposes at one point in time.
//! Invariants operate on snapshots rather than live state so a check never
//! observes a half-applied event.

use std::collections::BTreeSet;

use wfc_core::{Clock, DailyCallCounter, Monitor, NodeId};

/// Snapshot of one monitor.
#[derive(Debug, Clone, Default)]
pub struct MonitorSnapshot {
    /// Nodes present in the session table.
    pub occupied: BTreeSet<NodeId>,
    /// Nodes present in the active user index.
    pub indexed: BTreeSet<NodeId>,
    /// Nodes carried by a full snapshot, in order.
    pub displayed: Vec<NodeId>,
    /// Configured node count.
    pub max_nodes: NodeId,
    /// Last logged-off user.
    pub last_logged_off: Option<String>,
    /// Every counter observed so far, oldest first, ending with the current one.
    pub call_history: Vec<DailyCallCounter>,
}

impl MonitorSnapshot {
    /// Snapshot with nothing in it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Capture the current state of `monitor`, without history.
    pub fn from_monitor<C: Clock>(monitor: &Monitor<C>) -> Self {
        let sessions = monitor.sessions();
        Self {
            occupied: sessions.occupied().map(|(node, _)| node).collect(),
            indexed: sessions.indexed_nodes().collect(),
            displayed: monitor.full_snapshot().rows.iter().map(|row| row.node).collect(),
            max_nodes: monitor.max_nodes(),
            last_logged_off: monitor.stats().last_logged_off().map(str::to_string),
            call_history: vec![monitor.stats().calls()],
        }
    }
}

/// Accumulates counter history across successive observations.
#[derive(Debug, Clone, Default)]
pub struct Observer {
    call_history: Vec<DailyCallCounter>,
}

impl Observer {
    /// Observer with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `monitor` and append its counter to the history.
    pub fn observe<C: Clock>(&mut self, monitor: &Monitor<C>) -> MonitorSnapshot {
        self.call_history.push(monitor.stats().calls());
        MonitorSnapshot { call_history: self.call_history.clone(), ..MonitorSnapshot::from_monitor(monitor) }
    }
}
