//! Read-only views handed to the render sink.
//!
//! Snapshots are detached copies: a sink never sees live state, so rendering
//! needs no access to the [`crate::Monitor`].

use std::collections::BTreeMap;

use crate::{NodeId, SessionStatus};

/// Summary lines below the node table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Most recent user to complete a session. `None` before any.
    pub last_logged_off: Option<String>,
    /// Qualifying logins today.
    pub todays_calls: u64,
}

/// One displayed node row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRow {
    /// Node number, always within `1..=max_nodes`.
    pub node: NodeId,
    /// Current occupant. `None` means idle.
    pub status: Option<SessionStatus>,
}

impl NodeRow {
    /// Status to draw, substituting the idle sentinel.
    pub fn display(&self) -> SessionStatus {
        self.status.clone().unwrap_or_else(SessionStatus::idle)
    }
}

/// Everything the render sink needs for one redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Rows in ascending node order.
    ///
    /// A full snapshot carries every node in `1..=max_nodes`; a tick snapshot
    /// carries only the nodes that changed since the previous tick.
    pub rows: Vec<NodeRow>,
    /// Whether `rows` covers every displayed node.
    pub full: bool,
    /// Derived statistics at the time of the snapshot.
    pub summary: Summary,
}

impl Snapshot {
    /// Row for `node`, if present in this snapshot.
    pub fn row(&self, node: NodeId) -> Option<&NodeRow> {
        self.rows.iter().find(|row| row.node == node)
    }
}

/// What a sink shows after applying a sequence of snapshots.
///
/// Full snapshots replace everything; partial ones overwrite only the rows
/// they carry. Sinks that redraw the whole screen keep one of these.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    rows: BTreeMap<NodeId, SessionStatus>,
    summary: Summary,
}

impl Screen {
    /// Blank screen: no rows, empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a snapshot into the screen.
    pub fn apply(&mut self, snapshot: &Snapshot) {
        if snapshot.full {
            self.rows.clear();
        }
        for row in &snapshot.rows {
            self.rows.insert(row.node, row.display());
        }
        self.summary = snapshot.summary.clone();
    }

    /// Displayed rows, ascending by node.
    pub fn rows(&self) -> impl Iterator<Item = (NodeId, &SessionStatus)> {
        self.rows.iter().map(|(node, status)| (*node, status))
    }

    /// Displayed status of `node`, if it has been drawn.
    pub fn row(&self, node: NodeId) -> Option<&SessionStatus> {
        self.rows.get(&node)
    }

    /// Displayed summary.
    pub fn summary(&self) -> &Summary {
        &self.summary
    }
}
