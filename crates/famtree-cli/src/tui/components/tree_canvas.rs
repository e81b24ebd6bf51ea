//! Tree canvas: connectors and member boxes drawn straight into the buffer.
//!
//! The canvas works in the same screen units as the viewport. One terminal
//! cell covers `CELL_WIDTH` x `CELL_HEIGHT` of them, so node boxes keep
//! roughly their proportions.

use famtree_core::{Connector, Member, Point};
use ratatui::{
    buffer::Buffer,
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::accent_color;
use crate::tui::app::App;

/// Screen units per terminal column.
pub const CELL_WIDTH: f64 = 8.0;
/// Screen units per terminal row.
pub const CELL_HEIGHT: f64 = 16.0;

/// Screen point at the centre of a terminal cell, if the cell is on the
/// canvas.
pub fn screen_point(canvas: Rect, column: u16, row: u16) -> Option<Point> {
    canvas.contains(Position::new(column, row)).then(|| {
        Point::new(
            f64::from(column - canvas.x) * CELL_WIDTH + CELL_WIDTH / 2.0,
            f64::from(row - canvas.y) * CELL_HEIGHT + CELL_HEIGHT / 2.0,
        )
    })
}

/// Render the tree panel.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let session = &app.session;
    let title = match session.tree() {
        Some(tree) => format!(" Family of {} ", tree.member.name),
        None => " Family Tree ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    let canvas = block.inner(area);
    frame.render_widget(block, area);

    let empty_message = match (session.tree_error(), session.tree()) {
        (Some(err), _) => Some(format!("Cannot draw this tree: {}", err)),
        (None, None) => Some("No family members to show.".to_string()),
        (None, Some(_)) => None,
    };
    if let Some(message) = empty_message {
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, canvas);
        return;
    }

    frame.render_widget(TreeCanvas { app }, canvas);
}

struct TreeCanvas<'a> {
    app: &'a App,
}

impl Widget for TreeCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.app.session;
        let viewport = session.viewport();
        let metrics = session.metrics();
        let mut painter = Painter { area, buf };

        for connector in session.screen_connectors() {
            painter.connector(&connector);
        }

        let width = (viewport.scale_length(metrics.node_width) / CELL_WIDTH).round() as i32;
        let height = (viewport.scale_length(metrics.node_height) / CELL_HEIGHT).round() as i32;
        let selected = session.selected().map(|m| &m.id);

        for (id, world) in session.positions().iter() {
            let Some(member) = session.store().get_by_id(id) else {
                continue;
            };
            let screen = viewport.to_screen(world);
            let half_width = viewport.scale_length(metrics.node_width) / 2.0;
            let top_left = Point::new(screen.x - half_width, screen.y);

            let mut border = Style::default().fg(accent_color(member.gender.accent()));
            if Some(id) == selected {
                border = border.fg(Color::Yellow).add_modifier(Modifier::BOLD);
            } else if Some(id) == self.app.focus.as_ref() {
                border = border.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }

            painter.node(member, top_left, width.max(5), height.max(3), border);
        }
    }
}

/// Clipped drawing onto the canvas area.
struct Painter<'b> {
    area: Rect,
    buf: &'b mut Buffer,
}

impl Painter<'_> {
    fn cell(&self, p: Point) -> (i32, i32) {
        (
            i32::from(self.area.x) + (p.x / CELL_WIDTH).floor() as i32,
            i32::from(self.area.y) + (p.y / CELL_HEIGHT).floor() as i32,
        )
    }

    fn put(&mut self, col: i32, row: i32, symbol: &str, style: Style) {
        let inside = col >= i32::from(self.area.left())
            && col < i32::from(self.area.right())
            && row >= i32::from(self.area.top())
            && row < i32::from(self.area.bottom());
        if !inside {
            return;
        }
        if let Some(cell) = self.buf.cell_mut((col as u16, row as u16)) {
            cell.set_symbol(symbol).set_style(style);
        }
    }

    fn text(&mut self, col: i32, row: i32, text: &str, max: usize, style: Style) {
        let mut utf8 = [0u8; 4];
        for (i, ch) in text.chars().take(max).enumerate() {
            self.put(col + i as i32, row, ch.encode_utf8(&mut utf8), style);
        }
    }

    fn connector(&mut self, connector: &Connector) {
        let style = Style::default().fg(accent_color(connector.gender.accent()));
        let (c0, r0) = self.cell(connector.from);
        let (c1, r1) = self.cell(connector.to);
        if connector.is_vertical() {
            for row in r0.min(r1)..=r0.max(r1) {
                self.put(c0, row, "│", style);
            }
        } else {
            for col in c0.min(c1)..=c0.max(c1) {
                self.put(col, r0, "─", style);
            }
        }
    }

    fn node(&mut self, member: &Member, top_left: Point, width: i32, height: i32, border: Style) {
        let (left, top) = self.cell(top_left);
        let right = left + width - 1;
        let bottom = top + height - 1;
        let text_style = Style::default().fg(Color::White);

        for row in top..=bottom {
            for col in left..=right {
                let symbol = match (col == left, col == right, row == top, row == bottom) {
                    (true, _, true, _) => "╭",
                    (_, true, true, _) => "╮",
                    (true, _, _, true) => "╰",
                    (_, true, _, true) => "╯",
                    (_, _, true, _) | (_, _, _, true) => "─",
                    (true, _, _, _) | (_, true, _, _) => "│",
                    _ => " ",
                };
                let style = if symbol == " " { text_style } else { border };
                self.put(col, row, symbol, style);
            }
        }

        let inner = (width - 2).max(0) as usize;
        let lines = [
            member.initials(),
            member.name.clone(),
            member
                .birth_date
                .map(|birth| format!("b. {}", birth.format("%Y")))
                .unwrap_or_default(),
        ];
        for (offset, line) in lines.iter().enumerate() {
            let row = top + 1 + offset as i32;
            if row >= bottom {
                break;
            }
            let len = line.chars().count().min(inner);
            let col = left + 1 + ((inner - len) / 2) as i32;
            let style = if offset == 0 {
                border.remove_modifier(Modifier::REVERSED)
            } else {
                text_style
            };
            self.text(col, row, line, inner, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_point_inside_canvas_only() {
        let canvas = Rect::new(1, 1, 40, 20);
        assert_eq!(screen_point(canvas, 1, 1), Some(Point::new(4.0, 8.0)));
        assert_eq!(screen_point(canvas, 11, 3), Some(Point::new(84.0, 40.0)));
        assert_eq!(screen_point(canvas, 0, 5), None);
        assert_eq!(screen_point(canvas, 41, 5), None);
    }
}
