//! Per-node session state.
//!
//! [`SessionStore`] owns the session table (what each occupied node displays)
//! and the active user index (who is logged in on it). Both maps always have
//! the same key set: a node is either occupied in both or absent from both.
//! Nodes that are occupied but have no recorded identity yet (connected, or
//! a new user signing up) carry `None` in the index.

use std::collections::BTreeMap;

use crate::{Event, NodeId, format_location};

/// User shown for a node that connected but has not logged in.
pub const UNKNOWN_USER: &str = "Unknown User";
/// Placeholder identity for a caller going through signup.
pub const NEW_USER: &str = "New User";
/// Location shown right after a login.
pub const LOGGING_IN: &str = "logging in...";
/// Location shown during signup.
pub const SIGNING_UP: &str = "Signing up...";
/// User column for an idle node.
pub const IDLE_USER: &str = "waiting for caller";
/// Location column for an idle node.
pub const IDLE_LOCATION: &str = "-";

/// What a node currently displays.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionStatus {
    /// Occupant name as displayed.
    pub user: String,
    /// Formatted location or remote address.
    pub location: String,
}

impl SessionStatus {
    /// Build a status from display strings.
    pub fn new(user: impl Into<String>, location: impl Into<String>) -> Self {
        Self { user: user.into(), location: location.into() }
    }

    /// Sentinel status for an idle node.
    pub fn idle() -> Self {
        Self::new(IDLE_USER, IDLE_LOCATION)
    }

    /// Whether this is the idle sentinel.
    pub fn is_idle(&self) -> bool {
        self.user == IDLE_USER && self.location == IDLE_LOCATION
    }
}

/// Outcome of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// Node the event touched.
    pub node: NodeId,
    /// Identity that completed a session on a disconnect.
    ///
    /// `None` unless the event was a disconnect of a node whose active
    /// identity was recorded and is not [`NEW_USER`].
    pub logged_off: Option<String>,
}

/// Session table plus active user index.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: BTreeMap<NodeId, SessionStatus>,
    identities: BTreeMap<NodeId, Option<String>>,
}

impl SessionStore {
    /// Create an empty store (every node idle).
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event. Total: every event yields a new state.
    pub fn apply(&mut self, event: &Event) -> Applied {
        let node = event.node();
        let mut logged_off = None;

        match event {
            Event::Connect { remote_addr, .. } => {
                self.occupy(node, SessionStatus::new(UNKNOWN_USER, remote_addr.clone()));
            },
            Event::Login { user, .. } => {
                self.sessions.insert(node, SessionStatus::new(user.clone(), LOGGING_IN));
                self.identities.insert(node, Some(user.clone()));
            },
            Event::NewUserSignup { .. } => {
                self.occupy(node, SessionStatus::new(NEW_USER, SIGNING_UP));
            },
            Event::MenuChange { user, menu, .. } => {
                self.occupy(node, SessionStatus::new(user.clone(), format_location(menu)));
            },
            Event::GenericActivity { user, label, .. } => {
                self.occupy(node, SessionStatus::new(user.clone(), format_location(label)));
            },
            Event::Disconnect { .. } => {
                self.sessions.remove(&node);
                logged_off = self.identities.remove(&node).flatten().filter(|u| u != NEW_USER);
            },
        }

        tracing::trace!(node, ?logged_off, occupied = self.sessions.len(), "applied event");
        Applied { node, logged_off }
    }

    /// Replace the displayed status, keeping any recorded identity.
    fn occupy(&mut self, node: NodeId, status: SessionStatus) {
        self.sessions.insert(node, status);
        self.identities.entry(node).or_insert(None);
    }

    /// Current status of `node`. `None` means idle.
    pub fn status(&self, node: NodeId) -> Option<&SessionStatus> {
        self.sessions.get(&node)
    }

    /// Logged-in identity on `node`, if one was recorded.
    pub fn active_user(&self, node: NodeId) -> Option<&str> {
        self.identities.get(&node).and_then(|u| u.as_deref())
    }

    /// Occupied nodes in ascending order.
    pub fn occupied(&self) -> impl Iterator<Item = (NodeId, &SessionStatus)> {
        self.sessions.iter().map(|(node, status)| (*node, status))
    }

    /// Nodes present in the active user index, ascending.
    pub fn indexed_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.identities.keys().copied()
    }

    /// Number of occupied nodes.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether every node is idle.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
