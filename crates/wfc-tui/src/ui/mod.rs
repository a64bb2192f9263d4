//! UI rendering
//!
//! Rendering functions that turn a [`ConsoleView`] into terminal output
//! using ratatui widgets. All functions are pure (no I/O); the terminal
//! sink owns the view and calls [`render`] once per snapshot.

mod footer;
mod header;
mod nodes;
mod summary;

use std::collections::BTreeSet;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};
use wfc_core::{NodeId, Screen, SessionStatus, Snapshot, Summary};

/// Everything drawn on the console.
#[derive(Debug, Clone)]
pub struct ConsoleView {
    system_name: String,
    excluded_users: Vec<String>,
    max_nodes: NodeId,
    screen: Screen,
}

impl ConsoleView {
    /// View with every node idle.
    ///
    /// Excluded users are shown sorted and deduplicated.
    pub fn new(
        system_name: impl Into<String>,
        max_nodes: NodeId,
        excluded_users: impl IntoIterator<Item = String>,
    ) -> Self {
        let excluded_users = excluded_users.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        Self { system_name: system_name.into(), excluded_users, max_nodes, screen: Screen::new() }
    }

    /// Merge a snapshot into what is displayed.
    pub fn apply(&mut self, snapshot: &Snapshot) {
        self.screen.apply(snapshot);
    }

    /// Rows to draw, `1..=max_nodes`. Nodes not drawn yet show as idle.
    pub fn rows(&self) -> impl Iterator<Item = (NodeId, SessionStatus)> + '_ {
        (1..=self.max_nodes)
            .map(|node| (node, self.screen.row(node).cloned().unwrap_or_else(SessionStatus::idle)))
    }

    /// Summary lines.
    pub fn summary(&self) -> &Summary {
        self.screen.summary()
    }

    /// Users excluded from the call count, sorted.
    pub fn excluded_users(&self) -> &[String] {
        &self.excluded_users
    }

    /// Footer system name.
    pub fn system_name(&self) -> &str {
        &self.system_name
    }
}

/// Render the entire console.
pub fn render(frame: &mut Frame, view: &ConsoleView) {
    const HEADER_HEIGHT: u16 = 2;
    const TABLE_MIN_HEIGHT: u16 = 2;
    const SUMMARY_HEIGHT: u16 = 3;
    const FOOTER_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(TABLE_MIN_HEIGHT),
            Constraint::Length(SUMMARY_HEIGHT),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(frame.area());

    let [header_area, table_area, summary_area, footer_area] = chunks.as_ref() else {
        return;
    };

    header::render(frame, *header_area);
    nodes::render(frame, view, *table_area);
    summary::render(frame, view, *summary_area);
    footer::render(frame, view, *footer_area);
}
