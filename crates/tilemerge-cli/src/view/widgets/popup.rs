use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::Style,
    text::Text,
    widgets::{Block, Clear, Widget},
};

/// One-line banner drawn over the middle of its area.
#[derive(Debug)]
pub struct Popup<'a> {
    text: &'a str,
    style: Style,
    width: u16,
}

impl<'a> Popup<'a> {
    pub fn new(text: &'a str, style: Style) -> Self {
        Self {
            text,
            style,
            width: 0,
        }
    }

    /// Stretches the banner to `width` columns (never narrower than the text).
    pub fn width(self, width: u16) -> Self {
        Self { width, ..self }
    }
}

impl Widget for Popup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text_width = u16::try_from(self.text.chars().count()).unwrap_or(u16::MAX);
        let width = self.width.max(text_width.saturating_add(4));

        let block = Block::new().style(self.style);
        let area = area.centered(Constraint::Length(width), Constraint::Length(3));
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        Text::styled(self.text, self.style)
            .centered()
            .render(inner.centered_vertically(Constraint::Length(1)), buf);
    }
}
