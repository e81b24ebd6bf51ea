//! Application state and main event loop.

use std::io::Stdout;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use famtree_core::{DisplayPreset, FamilySession, Gender, MemberId, Point, RawPointer};
use ratatui::prelude::*;
use tracing::info;

use crate::edit::EditField;

use super::components::tree_canvas::{screen_point, CELL_HEIGHT, CELL_WIDTH};
use super::event::{Event, EventHandler};
use super::ui;

/// Columns moved per arrow key press.
const PAN_COLUMNS: f64 = 4.0;
/// Rows moved per arrow key press.
const PAN_ROWS: f64 = 2.0;
/// Ticks a status message stays visible.
const STATUS_TICKS: u8 = 16;

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing the name of a new relative of the selected member
    Adding(Relative),
    /// Editing one field of the selected member
    Editing(EditField),
}

/// Kind of relative added from the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relative {
    Child,
    Spouse,
}

impl Relative {
    pub fn label(self) -> &'static str {
        match self {
            Relative::Child => "child",
            Relative::Spouse => "spouse",
        }
    }
}

/// Left button press on the canvas.
#[derive(Debug, Clone, Copy)]
struct Press {
    column: u16,
    row: u16,
    /// Set once any drag event arrives before the release
    dragged: bool,
}

/// Main application state.
pub struct App {
    /// Family data and derived view state
    pub session: FamilySession,
    /// Current input mode
    pub input_mode: InputMode,
    /// Name of a new relative, or the value of the field being edited
    pub input_buffer: String,
    /// Gender of the relative being added
    pub new_gender: Gender,
    /// Member highlighted for keyboard selection
    pub focus: Option<MemberId>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
    status_ticks: u8,
    /// Whole terminal area
    screen: Rect,
    /// Where the left button went down, for telling clicks from drags
    press: Option<Press>,
}

impl App {
    /// Create a new app instance with the view reset to the canvas.
    pub fn new(mut session: FamilySession, screen: Rect) -> Self {
        session.set_select_handler(|id| info!(%id, "member selected"));

        let focus = session.tree().map(|tree| tree.id().clone());
        let mut app = Self {
            session,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            new_gender: Gender::default(),
            focus,
            should_quit: false,
            status_message: None,
            status_ticks: 0,
            screen,
            press: None,
        };
        app.reset_view();
        app
    }

    /// Run the main event loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut events = EventHandler::new();

        loop {
            // Draw UI
            terminal.draw(|frame| ui::render(self, frame))?;

            // Handle events
            if let Some(event) = events.next().await {
                match event {
                    Event::Key(key) => self.handle_key_event(key),
                    Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                    Event::Resize(cols, rows) => self.screen = Rect::new(0, 0, cols, rows),
                    Event::Tick => self.tick(),
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn canvas(&self) -> Rect {
        ui::canvas_area(self.screen)
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_ticks = STATUS_TICKS;
    }

    fn tick(&mut self) {
        if self.status_ticks > 0 {
            self.status_ticks -= 1;
            if self.status_ticks == 0 {
                self.status_message = None;
            }
        }
    }

    fn reset_view(&mut self) {
        let width = f64::from(self.canvas().width) * CELL_WIDTH;
        self.session.on_reset_view(width);
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode_key(key),
            InputMode::Adding(relative) => self.handle_adding_mode_key(key, relative),
            InputMode::Editing(field) => self.handle_editing_mode_key(key, field),
        }
    }

    /// Handle key in normal mode.
    fn handle_normal_mode_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let scale = self.session.on_zoom_in();
                self.set_status(format!("Zoom {:.0}%", scale * 100.0));
            }
            KeyCode::Char('-') => {
                let scale = self.session.on_zoom_out();
                self.set_status(format!("Zoom {:.0}%", scale * 100.0));
            }
            KeyCode::Char('0') => {
                self.reset_view();
                self.set_status("View reset");
            }
            KeyCode::Left => self.session.pan_by(Point::new(PAN_COLUMNS * CELL_WIDTH, 0.0)),
            KeyCode::Right => self.session.pan_by(Point::new(-PAN_COLUMNS * CELL_WIDTH, 0.0)),
            KeyCode::Up => self.session.pan_by(Point::new(0.0, PAN_ROWS * CELL_HEIGHT)),
            KeyCode::Down => self.session.pan_by(Point::new(0.0, -PAN_ROWS * CELL_HEIGHT)),
            KeyCode::Tab => self.move_focus(1),
            KeyCode::BackTab => self.move_focus(-1),
            KeyCode::Enter => {
                if let Some(id) = self.focus.clone() {
                    self.session.on_select_member(&id);
                }
            }
            KeyCode::Esc => self.session.clear_selection(),
            KeyCode::Char('r') => self.reroot_at_selection(),
            KeyCode::Char('x') => self.delete_selection(),
            KeyCode::Char('a') => self.start_adding(Relative::Child),
            KeyCode::Char('s') => self.start_adding(Relative::Spouse),
            KeyCode::Char('e') => self.start_editing(EditField::Name),
            KeyCode::Char('p') => {
                let preset = match self.session.preset() {
                    DisplayPreset::Desktop => DisplayPreset::Touch,
                    DisplayPreset::Touch => DisplayPreset::Desktop,
                };
                self.session.set_preset(preset);
                self.reset_view();
                self.set_status(format!("Preset: {}", preset.display_name()));
            }
            _ => {}
        }
    }

    fn start_adding(&mut self, relative: Relative) {
        let Some(member) = self.session.selected() else {
            self.set_status("Select a member first");
            return;
        };
        if relative == Relative::Spouse {
            self.new_gender = member.gender.toggled();
        }
        self.input_buffer.clear();
        self.input_mode = InputMode::Adding(relative);
    }

    /// Opens `field` of the selected member with its current value.
    fn start_editing(&mut self, field: EditField) {
        let Some(member) = self.session.selected() else {
            self.set_status("Select a member first");
            self.input_mode = InputMode::Normal;
            return;
        };
        self.input_buffer = field.current(member);
        self.input_mode = InputMode::Editing(field);
    }

    fn leave_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
    }

    /// Handle key while naming a new relative.
    fn handle_adding_mode_key(&mut self, key: KeyEvent, relative: Relative) {
        match key.code {
            KeyCode::Esc => self.leave_input(),
            KeyCode::Enter => self.submit_new_relative(relative),
            KeyCode::Tab => self.new_gender = self.new_gender.toggled(),
            KeyCode::Char(c) => self.input_buffer.push(c),
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            _ => {}
        }
    }

    /// Handle key while editing a field. Tab discards the typed value and
    /// moves on to the next field.
    fn handle_editing_mode_key(&mut self, key: KeyEvent, field: EditField) {
        match key.code {
            KeyCode::Esc => self.leave_input(),
            KeyCode::Enter => self.submit_edit(field),
            KeyCode::Tab => self.start_editing(field.next()),
            KeyCode::Char(c) => self.input_buffer.push(c),
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            _ => {}
        }
    }

    fn submit_new_relative(&mut self, relative: Relative) {
        let name = self.input_buffer.trim().to_string();
        if name.is_empty() {
            self.set_status("Name cannot be empty");
            return;
        }
        let Some(member) = self.session.selected().map(|m| m.id.clone()) else {
            self.leave_input();
            return;
        };

        let added = match relative {
            Relative::Child => self.session.add_child(&member, name.as_str(), self.new_gender),
            Relative::Spouse => self.session.add_spouse(&member, name.as_str(), self.new_gender),
        };
        match added {
            Some(id) => {
                self.focus = Some(id);
                self.set_status(format!("Added {}", name));
            }
            None => self.set_status(format!("Could not add {}", relative.label())),
        }
        self.leave_input();
    }

    /// Applies the typed value; a refused value keeps the field open.
    fn submit_edit(&mut self, field: EditField) {
        let Some(id) = self.session.selected().map(|m| m.id.clone()) else {
            self.leave_input();
            return;
        };

        let result = crate::edit::build_patch(
            self.session.store(),
            &id,
            &[(field, self.input_buffer.as_str())],
        );
        match result {
            Ok(patch) => {
                self.session.update(&id, patch);
                self.set_status(format!("Updated {}", field.label().to_lowercase()));
                self.leave_input();
            }
            Err(err) => self.set_status(err.to_string()),
        }
    }

    fn reroot_at_selection(&mut self) {
        let Some(member) = self.session.selected() else {
            self.set_status("Select a member first");
            return;
        };
        let (id, name) = (member.id.clone(), member.name.clone());
        if self.session.set_root(&id) {
            self.focus = Some(id);
            self.reset_view();
            self.set_status(format!("Showing the family of {}", name));
        }
    }

    fn delete_selection(&mut self) {
        let Some(id) = self.session.selected().map(|m| m.id.clone()) else {
            self.set_status("Select a member first");
            return;
        };
        if let Some(removed) = self.session.delete(&id) {
            if self.focus.as_ref() == Some(&id) {
                self.focus = self.session.tree().map(|tree| tree.id().clone());
            }
            self.set_status(format!("Deleted {}", removed.name));
        }
    }

    /// Moves keyboard focus through the drawn members in drawing order.
    fn move_focus(&mut self, step: isize) {
        let ids: Vec<&MemberId> = self
            .session
            .positions()
            .iter()
            .map(|(id, _)| id)
            .collect();
        if ids.is_empty() {
            return;
        }
        let current = self
            .focus
            .as_ref()
            .and_then(|focus| ids.iter().position(|id| *id == focus));
        let next = match current {
            Some(i) => (i as isize + step).rem_euclid(ids.len() as isize) as usize,
            None => 0,
        };
        self.focus = Some(ids[next].clone());
    }

    /// Handle a mouse event: drag pans, click selects, scroll zooms.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let canvas = self.canvas();
        let point = screen_point(canvas, mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(point) = point {
                    self.press = Some(Press {
                        column: mouse.column,
                        row: mouse.row,
                        dragged: false,
                    });
                    self.session.pointer(&RawPointer::MouseDown(point));
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => match point {
                Some(point) => {
                    if let Some(press) = self.press.as_mut() {
                        press.dragged = true;
                    }
                    self.session.pointer(&RawPointer::MouseMove(point));
                }
                None => {
                    self.session.pointer(&RawPointer::MouseLeave);
                    self.press = None;
                }
            },
            MouseEventKind::Up(MouseButton::Left) => {
                self.session.pointer(&RawPointer::MouseUp);
                let clicked = self.press.take().is_some_and(|press| {
                    !press.dragged && (press.column, press.row) == (mouse.column, mouse.row)
                });
                if let Some(point) = point.filter(|_| clicked) {
                    self.click(point);
                }
            }
            MouseEventKind::ScrollUp if point.is_some() => {
                self.session.on_zoom_in();
            }
            MouseEventKind::ScrollDown if point.is_some() => {
                self.session.on_zoom_out();
            }
            _ => {}
        }
    }

    fn click(&mut self, point: Point) {
        match self.session.member_at(point).cloned() {
            Some(id) => {
                self.session.on_select_member(&id);
                self.focus = Some(id);
            }
            None => self.session.clear_selection(),
        }
    }
}
