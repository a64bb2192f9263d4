//! Last user and today's call count.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::ConsoleView;

/// Render the two summary lines below the table.
pub fn render(frame: &mut Frame, view: &ConsoleView, area: Rect) {
    let summary = view.summary();
    let label = Style::default().fg(Color::Yellow);

    let last_user = summary.last_logged_off.as_deref().unwrap_or("None");
    let mut calls = summary.todays_calls.to_string();
    if !view.excluded_users().is_empty() {
        calls.push_str(&format!(" (excluding {})", view.excluded_users().join(", ")));
    }

    let text = vec![
        Line::default(),
        Line::from(vec![Span::styled("Last User: ", label), Span::raw(last_user)]),
        Line::from(vec![Span::styled("Today's Calls: ", label), Span::raw(calls)]),
    ];
    frame.render_widget(Paragraph::new(text), area);
}
