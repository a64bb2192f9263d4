//! Unified monitor state machine.
//!
//! [`Monitor`] owns the session store, the statistics and the redraw
//! scheduler behind one `&mut self` boundary. Everything that mutates state
//! (ingesting a line, a tick draining the dirty set) goes through it, so the
//! owner serializes both the ingestion and the timer roles simply by owning
//! the value.
//!
//! This is a pure state machine: no I/O, no async. Lines go in, snapshots
//! come out.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::{
    Classifier, Clock, DEFAULT_HISTORY_WINDOW, Event, NodeId, NodeRow, SessionStore, Snapshot,
    StatsAggregator, UpdateScheduler, line_date,
};

/// Settings the monitor needs from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Highest node number displayed. Nodes above are tracked, not drawn.
    pub max_nodes: NodeId,
    /// Usernames excluded from the daily call count.
    pub excluded_users: BTreeSet<String>,
    /// Trailing lines scanned at startup for the last logged-off user.
    pub history_window: usize,
}

impl MonitorConfig {
    /// Config with defaults for everything but the node count.
    pub fn new(max_nodes: NodeId) -> Self {
        Self { max_nodes, excluded_users: BTreeSet::new(), history_window: DEFAULT_HISTORY_WINDOW }
    }
}

/// Node monitor state machine.
#[derive(Debug)]
pub struct Monitor<C: Clock> {
    classifier: Classifier,
    sessions: SessionStore,
    stats: StatsAggregator,
    scheduler: UpdateScheduler,
    max_nodes: NodeId,
    history_window: usize,
    clock: C,
}

impl<C: Clock> Monitor<C> {
    /// Create a monitor with every node idle and empty statistics.
    pub fn new(config: &MonitorConfig, clock: C) -> Self {
        let stats = StatsAggregator::new(clock.today(), config.excluded_users.clone());
        Self {
            classifier: Classifier::new(),
            sessions: SessionStore::new(),
            stats,
            scheduler: UpdateScheduler::new(),
            max_nodes: config.max_nodes,
            history_window: config.history_window,
            clock,
        }
    }

    /// Seed statistics from the existing log contents.
    ///
    /// Session state is not reconstructed; all nodes start idle.
    pub fn seed<S: AsRef<str>>(&mut self, history: &[S]) {
        let today = self.clock.today();
        self.stats.seed(history, self.history_window, &self.classifier, today);
        self.scheduler.mark_summary();
    }

    /// Classify and apply one log line.
    ///
    /// Returns the affected node, or `None` when the line is not an event.
    pub fn ingest(&mut self, line: &str) -> Option<NodeId> {
        let event = self.classifier.classify(line)?;
        Some(self.apply(&event, line_date(line)))
    }

    /// Apply a classified event. `date` is the line's date prefix, used only
    /// for the daily call count.
    pub fn apply(&mut self, event: &Event, date: Option<NaiveDate>) -> NodeId {
        let today = self.clock.today();
        if self.stats.roll_over(today) {
            self.scheduler.mark_summary();
        }

        let applied = self.sessions.apply(event);

        if let Event::Login { user, .. } = event
            && self.stats.record_login(date, user, today)
        {
            tracing::debug!(
                node = applied.node,
                user = user.as_str(),
                calls = self.stats.calls().count,
                "call counted"
            );
        }
        if let Some(user) = applied.logged_off {
            tracing::debug!(node = applied.node, user = user.as_str(), "session completed");
            self.stats.record_logoff(user);
        }

        if !self.in_range(applied.node) {
            tracing::debug!(
                node = applied.node,
                max_nodes = self.max_nodes,
                "event for undisplayed node"
            );
        }

        self.scheduler.mark(applied.node);
        applied.node
    }

    /// Periodic tick: drain the dirty set into at most one snapshot.
    ///
    /// Returns `None` when nothing changed since the previous tick.
    pub fn tick(&mut self) -> Option<Snapshot> {
        if self.stats.roll_over(self.clock.today()) {
            self.scheduler.mark_summary();
        }
        if !self.scheduler.is_dirty() {
            return None;
        }

        let dirty = self.scheduler.drain();
        let rows = dirty
            .nodes
            .into_iter()
            .filter(|node| self.in_range(*node))
            .map(|node| NodeRow { node, status: self.sessions.status(node).cloned() })
            .collect();

        Some(Snapshot { rows, full: false, summary: self.stats.summary() })
    }

    /// Snapshot of every displayed node, regardless of the dirty set.
    pub fn full_snapshot(&self) -> Snapshot {
        let rows = (1..=self.max_nodes)
            .map(|node| NodeRow { node, status: self.sessions.status(node).cloned() })
            .collect();
        Snapshot { rows, full: true, summary: self.stats.summary() }
    }

    /// Full snapshot that also clears the dirty set, since it already
    /// reflects every pending change.
    pub fn redraw(&mut self) -> Snapshot {
        self.scheduler.drain();
        self.full_snapshot()
    }

    fn in_range(&self, node: NodeId) -> bool {
        (1..=self.max_nodes).contains(&node)
    }

    /// Session table and active user index.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Derived statistics.
    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }

    /// Whether the next tick would emit.
    pub fn is_dirty(&self) -> bool {
        self.scheduler.is_dirty()
    }

    /// Highest displayed node.
    pub fn max_nodes(&self) -> NodeId {
        self.max_nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SessionStatus, SystemClock};

    fn monitor(max_nodes: NodeId) -> Monitor<SystemClock> {
        Monitor::new(&MonitorConfig::new(max_nodes), SystemClock)
    }

    #[test]
    fn tick_without_changes_emits_nothing() {
        let mut monitor = monitor(4);
        assert_eq!(monitor.tick(), None);
    }

    #[test]
    fn rapid_changes_coalesce_into_latest_state() {
        let mut monitor = monitor(4);
        monitor.ingest("INFO: Connection From: 1.2.3.4 on Node 3");
        monitor.ingest("INFO: bob logged in on node 3");

        let snapshot = monitor.tick();
        let rows = snapshot.map(|s| s.rows).unwrap_or_default();
        assert_eq!(
            rows,
            vec![NodeRow { node: 3, status: Some(SessionStatus::new("bob", "logging in...")) }]
        );
        assert_eq!(monitor.tick(), None);
    }

    #[test]
    fn out_of_range_node_is_tracked_but_not_shown() {
        let mut monitor = monitor(4);
        assert_eq!(monitor.ingest("INFO: eve logged in on node 9"), Some(9));
        assert_eq!(monitor.sessions().active_user(9), Some("eve"));

        let snapshot = monitor.tick();
        assert!(snapshot.is_some_and(|s| s.rows.is_empty()));
        assert!(monitor.full_snapshot().row(9).is_none());
    }

    #[test]
    fn full_snapshot_covers_every_node() {
        let mut monitor = monitor(3);
        monitor.ingest("INFO: Node 2 logged off");
        let snapshot = monitor.full_snapshot();

        assert!(snapshot.full);
        assert_eq!(snapshot.rows.iter().map(|r| r.node).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(snapshot.rows.iter().all(|r| r.status.is_none()));
    }

    #[test]
    fn unclassified_line_changes_nothing() {
        let mut monitor = monitor(3);
        assert_eq!(monitor.ingest("DEBUG: heartbeat"), None);
        assert!(!monitor.is_dirty());
    }
}
