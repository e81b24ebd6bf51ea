pub mod details;
pub mod input;
pub mod tree_canvas;

use famtree_core::Accent;
use ratatui::style::Color;

/// Terminal colour for a gender accent.
pub fn accent_color(accent: Accent) -> Color {
    match accent {
        Accent::Blue => Color::Blue,
        Accent::Purple => Color::Magenta,
    }
}
