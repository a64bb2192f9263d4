//! Typed activity events.
//!
//! This module defines [`Event`], the unit of change that drives the
//! [`crate::SessionStore`]. Each event is produced from exactly one log line
//! by the [`crate::Classifier`] and is applied in log order.

use std::fmt;

/// Identifier of a session slot ("node").
///
/// Nominally in `1..=max_nodes`, but the log may reference any id.
pub type NodeId = u32;

/// Closed set of activity verbs recognised in generic activity lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activity {
    /// `running door`
    RunningDoor,
    /// `running script`
    RunningScript,
    /// `listing messages`
    ListingMessages,
    /// `posting a message`
    PostingMessage,
    /// `listing fileareas`
    ListingFileAreas,
    /// `listing file conferences`
    ListingFileConferences,
}

impl Activity {
    /// Every activity, in the order used to build the classifier pattern.
    pub const ALL: [Activity; 6] = [
        Activity::RunningDoor,
        Activity::RunningScript,
        Activity::ListingMessages,
        Activity::PostingMessage,
        Activity::ListingFileAreas,
        Activity::ListingFileConferences,
    ];

    /// The verb phrase as it appears in the log.
    pub fn phrase(self) -> &'static str {
        match self {
            Activity::RunningDoor => "running door",
            Activity::RunningScript => "running script",
            Activity::ListingMessages => "listing messages",
            Activity::PostingMessage => "posting a message",
            Activity::ListingFileAreas => "listing fileareas",
            Activity::ListingFileConferences => "listing file conferences",
        }
    }

    /// Look up an activity by its exact verb phrase.
    pub fn from_phrase(phrase: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|activity| activity.phrase() == phrase)
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phrase())
    }
}

/// Activity event classified from a single log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A caller connected to a node.
    Connect {
        /// Node the caller landed on.
        node: NodeId,
        /// Remote address as logged.
        remote_addr: String,
    },

    /// A user logged in.
    Login {
        /// Node the user is on.
        node: NodeId,
        /// Username.
        user: String,
    },

    /// A new user started the signup flow.
    NewUserSignup {
        /// Node the signup runs on.
        node: NodeId,
    },

    /// A user loaded a menu.
    MenuChange {
        /// Node the user is on.
        node: NodeId,
        /// Username.
        user: String,
        /// Raw menu path, e.g. `menus/main.toml`.
        menu: String,
    },

    /// A user is doing something from the closed [`Activity`] set.
    GenericActivity {
        /// Node the user is on.
        node: NodeId,
        /// Username.
        user: String,
        /// What the user is doing.
        activity: Activity,
        /// Object of the activity (door name, script, area).
        label: String,
    },

    /// A node went idle.
    Disconnect {
        /// Node that logged off.
        node: NodeId,
    },
}

impl Event {
    /// Node this event affects.
    pub fn node(&self) -> NodeId {
        match self {
            Event::Connect { node, .. }
            | Event::Login { node, .. }
            | Event::NewUserSignup { node }
            | Event::MenuChange { node, .. }
            | Event::GenericActivity { node, .. }
            | Event::Disconnect { node } => *node,
        }
    }
}
