//! Reference model for model-based testing.
//!
//! [`ModelMonitor`] is a deliberately naive re-statement of the monitor's
//! observable behavior. It consumes [`Operation`]s directly, without any
//! pattern matching, while the real [`Monitor`] consumes the log line each
//! operation renders to. Agreement between the two checks the classifier,
//! the location formatter, the session store and the statistics together.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use wfc_core::{Activity, Clock, Monitor, NodeId, SessionStatus};

/// Menus the model knows how to format.
pub const MODEL_MENUS: [&str; 3] = ["main", "files", "messages"];
/// Activity labels the model knows how to format.
pub const MODEL_LABELS: [&str; 3] = ["games", "bulletins", "general"];
/// Usernames used by generated operations. Includes the signup placeholder.
pub const MODEL_USERS: [&str; 5] = ["alice", "bob", "carol", "sysop", "New User"];

/// One thing that can happen on the BBS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Caller connects from `addr`.
    Connect {
        /// Node.
        node: NodeId,
        /// Remote address.
        addr: String,
    },
    /// User logs in.
    Login {
        /// Node.
        node: NodeId,
        /// Username.
        user: String,
    },
    /// New user starts signup.
    NewUser {
        /// Node.
        node: NodeId,
    },
    /// User loads a menu from [`MODEL_MENUS`].
    Menu {
        /// Node.
        node: NodeId,
        /// Username.
        user: String,
        /// Bare menu name.
        menu: &'static str,
    },
    /// User does something with a label from [`MODEL_LABELS`].
    Activity {
        /// Node.
        node: NodeId,
        /// Username.
        user: String,
        /// Verb.
        activity: Activity,
        /// Bare label.
        label: &'static str,
    },
    /// Node disconnects.
    Logoff {
        /// Node.
        node: NodeId,
    },
    /// Line that is not an event.
    Noise,
    /// Calendar moves to the next day. Produces no line.
    NextDay,
}

impl Operation {
    /// Log line for this operation, stamped with `day`.
    ///
    /// `None` for operations that are not log lines.
    pub fn to_line(&self, day: NaiveDate) -> Option<String> {
        let body = match self {
            Operation::Connect { node, addr } => {
                format!("INFO: Connection From: {addr} on Node {node}")
            },
            Operation::Login { node, user } => format!("INFO: {user} logged in on node {node}"),
            Operation::NewUser { node } => format!("INFO: New user signing up on node {node}"),
            Operation::Menu { node, user, menu } => {
                format!("INFO: {user} loading menu menus/{menu}.toml on node {node}")
            },
            Operation::Activity { node, user, activity, label } => {
                format!("INFO: {user} {activity} {label} on node {node}")
            },
            Operation::Logoff { node } => format!("INFO: Node {node} logged off"),
            Operation::Noise => "DEBUG: keepalive sent".to_string(),
            Operation::NextDay => return None,
        };
        Some(format!("{} 12:00:00 {body}", day.format("%Y-%m-%d")))
    }
}

fn title(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone)]
struct ModelNode {
    status: SessionStatus,
    identity: Option<String>,
}

/// State both the model and the real monitor expose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableState {
    /// Occupied nodes, including undisplayed ones.
    pub occupied: BTreeMap<NodeId, SessionStatus>,
    /// Identity per occupied node.
    pub identities: BTreeMap<NodeId, Option<String>>,
    /// Last user to complete a session.
    pub last_logged_off: Option<String>,
    /// Today's qualifying logins.
    pub todays_calls: u64,
}

impl ObservableState {
    /// Extract observable state from the real monitor.
    pub fn from_monitor<C: Clock>(monitor: &Monitor<C>) -> Self {
        let sessions = monitor.sessions();
        Self {
            occupied: sessions.occupied().map(|(n, s)| (n, s.clone())).collect(),
            identities: sessions
                .indexed_nodes()
                .map(|n| (n, sessions.active_user(n).map(str::to_string)))
                .collect(),
            last_logged_off: monitor.stats().last_logged_off().map(str::to_string),
            todays_calls: monitor.stats().calls().count,
        }
    }
}

/// Naive reference monitor.
#[derive(Debug, Clone)]
pub struct ModelMonitor {
    nodes: BTreeMap<NodeId, ModelNode>,
    excluded: BTreeSet<String>,
    last_logged_off: Option<String>,
    day: NaiveDate,
    calls: u64,
}

impl ModelMonitor {
    /// Model with every node idle on `day`.
    pub fn new(day: NaiveDate, excluded: BTreeSet<String>) -> Self {
        Self { nodes: BTreeMap::new(), excluded, last_logged_off: None, day, calls: 0 }
    }

    /// Current model day.
    pub fn day(&self) -> NaiveDate {
        self.day
    }

    fn occupy(&mut self, node: NodeId, user: &str, location: String) {
        let status = SessionStatus::new(user, location);
        self.nodes
            .entry(node)
            .and_modify(|n| n.status = status.clone())
            .or_insert(ModelNode { status, identity: None });
    }

    /// Apply one operation.
    pub fn apply(&mut self, op: &Operation) {
        match op {
            Operation::Connect { node, addr } => self.occupy(*node, "Unknown User", addr.clone()),
            Operation::Login { node, user } => {
                self.nodes.insert(
                    *node,
                    ModelNode {
                        status: SessionStatus::new(user.as_str(), "logging in..."),
                        identity: Some(user.clone()),
                    },
                );
                if !self.excluded.contains(user) {
                    self.calls += 1;
                }
            },
            Operation::NewUser { node } => self.occupy(*node, "New User", "Signing up...".into()),
            Operation::Menu { node, user, menu } => {
                self.occupy(*node, user, format!("At {}", title(menu)));
            },
            Operation::Activity { node, user, label, .. } => {
                self.occupy(*node, user, format!("At {}", title(label)));
            },
            Operation::Logoff { node } => {
                if let Some(identity) = self.nodes.remove(node).and_then(|n| n.identity)
                    && identity != "New User"
                {
                    self.last_logged_off = Some(identity);
                }
            },
            Operation::Noise => {},
            Operation::NextDay => {
                self.day = self.day.succ_opt().unwrap_or(self.day);
                self.calls = 0;
            },
        }
    }

    /// Observable state.
    pub fn observable(&self) -> ObservableState {
        ObservableState {
            occupied: self.nodes.iter().map(|(n, m)| (*n, m.status.clone())).collect(),
            identities: self.nodes.iter().map(|(n, m)| (*n, m.identity.clone())).collect(),
            last_logged_off: self.last_logged_off.clone(),
            todays_calls: self.calls,
        }
    }
}
