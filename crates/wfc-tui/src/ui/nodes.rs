//! Node table
//!
//! One row per displayed node. Idle nodes stand out in green so the
//! operator sees free lines at a glance.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Cell, Row, Table},
};

use super::ConsoleView;

const NODE_WIDTH: u16 = 6;
const USER_WIDTH: u16 = 24;
const LOCATION_MIN_WIDTH: u16 = 10;

/// Render the node table.
pub fn render(frame: &mut Frame, view: &ConsoleView, area: Rect) {
    let header = Row::new(["Node", "User", "Location"])
        .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED));

    let rows = view.rows().map(|(node, status)| {
        let style = if status.is_idle() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::White)
        };
        Row::new([
            Cell::from(node.to_string()),
            Cell::from(status.user),
            Cell::from(status.location),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(NODE_WIDTH),
        Constraint::Length(USER_WIDTH),
        Constraint::Min(LOCATION_MIN_WIDTH),
    ];
    frame.render_widget(Table::new(rows, widths).header(header), area);
}
