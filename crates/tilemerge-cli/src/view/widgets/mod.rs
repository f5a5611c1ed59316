use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{board_display::*, key_binding_display::*, popup::*, stats_display::*};

mod board_display;
mod key_binding_display;
mod popup;
mod stats_display;

mod color {
    use ratatui::style::Color;

    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const GREEN: Color = Color::Rgb(0, 200, 0);
}

pub mod style {
    use ratatui::style::{Color, Modifier, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const FRAME: Style = fg_bg(color::GRAY, color::BLACK);
    pub const WARNING: Style = fg_bg(color::YELLOW, color::BLACK);
    pub const WIN: Style = fg_bg(color::BLACK, color::GREEN);
    pub const GAME_OVER: Style = fg_bg(color::WHITE, color::RED);

    /// Tile colors from 2 up to 2048; larger tiles reuse the last entry.
    const TILE_COLORS: [Color; 11] = [
        Color::Rgb(238, 228, 218),
        Color::Rgb(237, 224, 200),
        Color::Rgb(242, 177, 121),
        Color::Rgb(245, 149, 99),
        Color::Rgb(246, 124, 95),
        Color::Rgb(246, 94, 59),
        Color::Rgb(237, 207, 114),
        Color::Rgb(237, 204, 97),
        Color::Rgb(237, 200, 80),
        Color::Rgb(237, 197, 63),
        Color::Rgb(237, 194, 46),
    ];

    pub fn tile(value: u32) -> Style {
        if value == 0 {
            return DEFAULT;
        }
        let index = usize::try_from(value.trailing_zeros().saturating_sub(1)).unwrap_or(usize::MAX);
        let color = TILE_COLORS[index.min(TILE_COLORS.len() - 1)];
        Style::new()
            .fg(color)
            .bg(color::BLACK)
            .add_modifier(Modifier::BOLD)
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
