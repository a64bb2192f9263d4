//! Redraw throttling.
//!
//! [`UpdateScheduler`] decouples the rate of log line arrival from the rate
//! of redraws. Applying an event marks its node dirty; a periodic tick drains
//! the dirty set into at most one snapshot. Because the set holds node ids
//! and the snapshot reads current state, several changes to the same node
//! between two ticks coalesce into its latest state.

use std::collections::BTreeSet;

use crate::NodeId;

/// Default redraw cadence in milliseconds.
pub const DEFAULT_REDRAW_INTERVAL_MS: u64 = 500;

/// Pending changes taken from the scheduler at a tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dirty {
    /// Nodes changed since the last drain, ascending.
    pub nodes: BTreeSet<NodeId>,
    /// Summary changed without any node changing (day rollover).
    pub summary: bool,
}

impl Dirty {
    /// Whether anything changed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && !self.summary
    }
}

/// Dirty-set bookkeeping between ticks.
#[derive(Debug, Clone, Default)]
pub struct UpdateScheduler {
    pending: Dirty,
}

impl UpdateScheduler {
    /// Scheduler with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `node` as changed. Call after the mutation.
    pub fn mark(&mut self, node: NodeId) {
        self.pending.nodes.insert(node);
    }

    /// Mark the summary lines as changed.
    pub fn mark_summary(&mut self) {
        self.pending.summary = true;
    }

    /// Whether a tick would emit.
    pub fn is_dirty(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Take everything pending, leaving the scheduler clean.
    pub fn drain(&mut self) -> Dirty {
        std::mem::take(&mut self.pending)
    }
}
