//! UI rendering for the TUI.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::app::{App, InputMode};
use super::components::{details, input, tree_canvas};

/// Terminal regions of the main screen.
struct Areas {
    tree: Rect,
    details: Rect,
    input: Rect,
    status: Rect,
}

fn split(area: Rect) -> Areas {
    // Main layout: content, input, status
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Tree + details
            Constraint::Length(3), // Input
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(70), // Tree
            Constraint::Percentage(30), // Details
        ])
        .split(rows[0]);

    Areas {
        tree: columns[0],
        details: columns[1],
        input: rows[1],
        status: rows[2],
    }
}

/// Drawable inside of the tree panel for a terminal of the given size.
///
/// Pointer input is mapped against this, so it has to match what
/// [`render`] draws.
pub fn canvas_area(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(split(area).tree)
}

/// Render the entire UI.
pub fn render(app: &App, frame: &mut Frame) {
    let areas = split(frame.area());

    tree_canvas::render(app, frame, areas.tree);
    details::render(app, frame, areas.details);
    input::render(app, frame, areas.input);
    render_status_bar(app, frame, areas.status);
}

/// Render the status bar.
fn render_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let mode_str = match app.input_mode {
        InputMode::Normal => {
            "[drag/arrows] Pan  [+/-/0] Zoom  [Tab/Enter] Select  [r] Root  [a/s] Add child/spouse  [e] Edit  [x] Delete  [q] Quit"
        }
        InputMode::Adding(_) => "[Enter] Add  [Tab] Gender  [Esc] Cancel",
        InputMode::Editing(_) => "[Enter] Save  [Tab] Next field  [Esc] Cancel",
    };

    let viewport = app.session.viewport();
    let view_info = format!(
        "{:.0}%  {}",
        viewport.scale() * 100.0,
        app.session.preset().display_name()
    );

    let status = match &app.status_message {
        Some(message) => format!("{}  |  {}  |  {}", mode_str, view_info, message),
        None => format!("{}  |  {}", mode_str, view_info),
    };

    let status_bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status_bar, area);
}
