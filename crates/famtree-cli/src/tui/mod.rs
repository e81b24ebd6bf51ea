//! Interactive tree view for famtree.
//!
//! Provides a full-screen terminal UI with:
//! - A pannable, zoomable tree canvas (mouse drag, scroll, arrow keys)
//! - A details panel for the selected member
//! - An input line for adding children

mod app;
mod components;
mod event;
mod ui;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::stdout;

use app::App;
use famtree_core::FamilySession;

/// Run the TUI application.
pub async fn run(session: FamilySession) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let size = terminal.size()?;
    let mut app = App::new(session, Rect::new(0, 0, size.width, size.height));

    // Run the main loop
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
