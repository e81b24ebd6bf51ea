//! Details panel for the selected member.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::output::member_details;
use crate::tui::app::App;

/// Render the selected member's details, or a hint when nothing is selected.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let selected = app.session.selected();

    let border_color = selected
        .map(|member| super::accent_color(member.gender.accent()))
        .unwrap_or(Color::DarkGray);

    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));

    let text = selected
        .and_then(|member| member_details(app.session.store(), &member.id))
        .unwrap_or_else(|| "Click a member or press Enter to select one.".to_string());

    let style = if selected.is_some() {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let paragraph = Paragraph::new(text)
        .style(style)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
