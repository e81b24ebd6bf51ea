//! Input line for naming a new relative or editing a field.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::tui::app::{App, InputMode};

/// Render the input field.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let active = app.input_mode != InputMode::Normal;
    let border_style = if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = match (app.input_mode, app.session.selected()) {
        (InputMode::Adding(relative), Some(member)) => format!(
            " New {} {} of {} ",
            app.new_gender.display_name().to_lowercase(),
            relative.label(),
            member.name
        ),
        (InputMode::Editing(field), Some(member)) if field.hint().is_empty() => {
            format!(" {} of {} ", field.label(), member.name)
        }
        (InputMode::Editing(field), Some(member)) => {
            format!(" {} of {} ({}) ", field.label(), member.name, field.hint())
        }
        _ => " Input ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);

    let inner_area = block.inner(area);

    // Build input text with cursor
    let (input_text, text_style) = if active {
        (
            format!("{}_", app.input_buffer),
            Style::default().fg(Color::White),
        )
    } else {
        (
            "Select a member, then 'a' adds a child, 's' a spouse, 'e' edits".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    };

    let input = Paragraph::new(input_text).style(text_style).block(block);

    frame.render_widget(input, area);

    if active {
        let cursor_x = inner_area.x + app.input_buffer.chars().count() as u16;
        let cursor_y = inner_area.y;
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}
