//! Log line classification.
//!
//! The [`Classifier`] owns an explicit, ordered list of [`Rule`]s. Patterns
//! overlap (a login line is a syntactic subset of a generic activity line),
//! so evaluation stops at the first rule whose pattern matches. The order is:
//!
//! 1. [`RuleKind::Connect`]
//! 2. [`RuleKind::NewUserSignup`]
//! 3. [`RuleKind::Login`]
//! 4. [`RuleKind::MenuChange`]
//! 5. [`RuleKind::GenericActivity`]
//! 6. [`RuleKind::Disconnect`]
//!
//! A line that matches nothing yields `None`. That is the common case for a
//! busy log and is not an error. Classification is total: it never panics on
//! malformed input.

use chrono::NaiveDate;
use regex::{Captures, Regex};

use crate::{Activity, Event, NodeId};

/// Length of the `YYYY-MM-DD` prefix every dated log line starts with.
const DATE_PREFIX_LEN: usize = 10;

/// Which event a [`Rule`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// `INFO: Connection From: <addr> on Node <n>`
    Connect,
    /// `INFO: New user signing up on node <n>`
    NewUserSignup,
    /// `INFO: <user> logged in on node <n>`
    Login,
    /// `INFO: <user> loading menu <path> on node <n>`
    MenuChange,
    /// `INFO: <user> <activity> <object> on node <n>`
    GenericActivity,
    /// `INFO: Node <n> logged off`
    Disconnect,
}

impl RuleKind {
    /// Rule kinds in evaluation order.
    pub const PRIORITY: [RuleKind; 6] = [
        RuleKind::Connect,
        RuleKind::NewUserSignup,
        RuleKind::Login,
        RuleKind::MenuChange,
        RuleKind::GenericActivity,
        RuleKind::Disconnect,
    ];

    fn pattern(self) -> String {
        match self {
            RuleKind::Connect => {
                r"INFO: Connection From: (?P<addr>.+?) on Node (?P<node>\d+)".to_string()
            },
            RuleKind::NewUserSignup => r"INFO: New user signing up on node (?P<node>\d+)".to_string(),
            RuleKind::Login => r"INFO: (?P<user>.+?) logged in on node (?P<node>\d+)".to_string(),
            RuleKind::MenuChange => {
                r"INFO: (?P<user>.+?) loading menu (?P<menu>.+?) on node (?P<node>\d+)".to_string()
            },
            RuleKind::GenericActivity => {
                let verbs: Vec<String> =
                    Activity::ALL.iter().map(|a| regex::escape(a.phrase())).collect();
                format!(
                    r"INFO: (?P<user>.+?) (?P<verb>{}) (?P<label>.+?) on node (?P<node>\d+)",
                    verbs.join("|")
                )
            },
            RuleKind::Disconnect => r"INFO: Node (?P<node>\d+) logged off".to_string(),
        }
    }
}

/// A single classification rule: a pattern and the event it builds.
#[derive(Debug, Clone)]
pub struct Rule {
    kind: RuleKind,
    pattern: Regex,
}

impl Rule {
    #[allow(clippy::expect_used)]
    fn new(kind: RuleKind) -> Self {
        let pattern =
            Regex::new(&kind.pattern()).expect("invariant: built-in log patterns are valid");
        Self { kind, pattern }
    }

    /// Event kind this rule produces.
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Whether the pattern matches anywhere in `line`.
    pub fn is_match(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }

    /// Build the event from a match. `None` when a capture doesn't convert
    /// (node number out of `NodeId` range).
    fn build(&self, caps: &Captures<'_>) -> Option<Event> {
        let node = node_from(caps)?;
        let text = |name: &str| caps.name(name).map(|m| m.as_str().to_string());

        let event = match self.kind {
            RuleKind::Connect => Event::Connect { node, remote_addr: text("addr")? },
            RuleKind::NewUserSignup => Event::NewUserSignup { node },
            RuleKind::Login => Event::Login { node, user: text("user")? },
            RuleKind::MenuChange => Event::MenuChange { node, user: text("user")?, menu: text("menu")? },
            RuleKind::GenericActivity => Event::GenericActivity {
                node,
                user: text("user")?,
                activity: caps.name("verb").and_then(|m| Activity::from_phrase(m.as_str()))?,
                label: text("label")?,
            },
            RuleKind::Disconnect => Event::Disconnect { node },
        };
        Some(event)
    }
}

fn node_from(caps: &Captures<'_>) -> Option<NodeId> {
    caps.name("node")?.as_str().parse().ok()
}

/// Ordered rule list turning raw log lines into [`Event`]s.
///
/// Cheap to clone; compiled patterns are shared internally by `regex`.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    /// Compile the built-in rules in priority order.
    pub fn new() -> Self {
        Self { rules: RuleKind::PRIORITY.into_iter().map(Rule::new).collect() }
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Classify a line. Evaluation stops at the first matching rule.
    ///
    /// Returns `None` for unrecognised lines, and for a matching line whose
    /// node number does not fit a [`NodeId`].
    pub fn classify(&self, line: &str) -> Option<Event> {
        let (rule, caps) =
            self.rules.iter().find_map(|rule| rule.pattern.captures(line).map(|c| (rule, c)))?;
        rule.build(&caps)
    }

    /// Kind of the first rule matching `line`, without building the event.
    pub fn first_match(&self, line: &str) -> Option<RuleKind> {
        self.rules.iter().find(|rule| rule.is_match(line)).map(Rule::kind)
    }
}

/// Calendar date from the `YYYY-MM-DD` prefix of a log line.
pub fn line_date(line: &str) -> Option<NaiveDate> {
    let prefix = line.get(..DATE_PREFIX_LEN)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}
