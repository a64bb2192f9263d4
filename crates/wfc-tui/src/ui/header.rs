//! Title bar.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::Paragraph,
};

const TITLE: &str = "Waiting For Caller";

/// Render the title.
pub fn render(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(TITLE)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(title, area);
}
