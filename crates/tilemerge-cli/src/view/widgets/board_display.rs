use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tilemerge_engine::Board;

use super::style;

/// Grid of tiles framed with double-line box-drawing characters.
///
/// Every cell is as wide as the largest tile on the board (at least four
/// digits) plus one space on each side.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        let size = self.board.size();
        let chars = size * (cell_width(self.board) + 1) + 1;
        u16::try_from(chars).unwrap_or(u16::MAX)
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(self.board.size() * 2 + 1).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

fn digits(value: u32) -> usize {
    value.checked_ilog10().map_or(1, |d| d as usize + 1)
}

fn cell_width(board: &Board) -> usize {
    digits(board.max_tile()).max(4) + 2
}

fn border(left: &str, join: &str, right: &str, size: usize, width: usize) -> Line<'static> {
    let segments = vec!["═".repeat(width); size].join(join);
    Line::styled(format!("{left}{segments}{right}"), style::FRAME)
}

fn tile_row(row: &[u32], width: usize) -> Line<'static> {
    let mut spans = vec![Span::styled("║", style::FRAME)];
    for &value in row {
        let label = if value == 0 {
            String::new()
        } else {
            value.to_string()
        };
        spans.push(Span::styled(format!("{label:^width$}"), style::tile(value)));
        spans.push(Span::styled("║", style::FRAME));
    }
    Line::from(spans)
}

/// Lays out the board as text, top border first.
pub fn board_lines(board: &Board) -> Vec<Line<'static>> {
    let size = board.size();
    let width = cell_width(board);

    let mut lines = vec![border("╔", "╦", "╗", size, width)];
    for (i, row) in board.rows().enumerate() {
        if i > 0 {
            lines.push(border("╠", "╬", "╣", size, width));
        }
        lines.push(tile_row(row, width));
    }
    lines.push(border("╚", "╩", "╝", size, width));
    lines
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let text = Text::from(board_lines(self.board)).style(style::DEFAULT);
        text.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use std::iter;

    use tilemerge_engine::{Randomizer, Seed};

    use super::*;

    fn board<R: AsRef<[u32]>>(rows: &[R]) -> Board {
        let mut board = Board::empty(rows.len(), Randomizer::new(Seed::new("DRAWING1").unwrap())).unwrap();
        board.set_cells(rows).unwrap();
        board
    }

    fn rendered(board: &Board) -> Vec<String> {
        board_lines(board).iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_small_board_layout() {
        let lines = rendered(&board(&[[2, 0], [0, 64]]));
        assert_eq!(
            lines,
            [
                "╔══════╦══════╗",
                "║  2   ║      ║",
                "╠══════╬══════╣",
                "║      ║  64  ║",
                "╚══════╩══════╝",
            ]
        );
    }

    #[test]
    fn test_cells_widen_with_large_tiles() {
        let board = board(&[[131_072]]);
        let lines = rendered(&board);
        assert_eq!(lines[1], "║ 131072 ║");
        assert!(iter::zip(&lines, &lines[1..]).all(|(a, b)| a.chars().count() == b.chars().count()));

        let display = BoardDisplay::new(&board);
        assert_eq!(display.width(), 10);
        assert_eq!(display.height(), 3);
    }

    #[test]
    fn test_block_adds_margin() {
        let board = board(&[[0; 4]; 4]);
        let display = BoardDisplay::new(&board).block(BlockWidget::bordered());
        assert_eq!(display.width(), 4 * 7 + 1 + 2);
        assert_eq!(display.height(), 9 + 2);
    }
}
