//! Footer bar
//!
//! System name on the left, the quit hint on the right.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
};

use super::ConsoleView;

const QUIT_HINT: &str = "Q/ESC to Quit ";

/// Render the footer bar.
pub fn render(frame: &mut Frame, view: &ConsoleView, area: Rect) {
    let style = Style::default().bg(Color::Blue).fg(Color::White);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(QUIT_HINT.len() as u16)])
        .split(area);

    let [name_area, hint_area] = chunks.as_ref() else {
        return;
    };

    let name = Paragraph::new(format!(" System Name: {}", view.system_name())).style(style);
    frame.render_widget(name, *name_area);
    frame.render_widget(Paragraph::new(QUIT_HINT).alignment(Alignment::Right).style(style), *hint_area);
}
