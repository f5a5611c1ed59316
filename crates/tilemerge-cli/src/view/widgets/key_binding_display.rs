use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

/// Keys (shown joined by `/`) and what they do.
pub type KeyBinding = (Vec<String>, &'static str);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arrangement {
    /// Every binding on one centered line.
    Inline,
    /// One binding per line, keys right-aligned in a column.
    List,
}

#[derive(Debug)]
pub struct KeyBindingDisplay<'a> {
    bindings: &'a [KeyBinding],
    arrangement: Arrangement,
    block: Option<BlockWidget<'a>>,
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(bindings: &'a [KeyBinding]) -> Self {
        Self {
            bindings,
            arrangement: Arrangement::Inline,
            block: None,
        }
    }

    /// Lays the bindings out as a table, one per line.
    pub fn list(self) -> Self {
        Self {
            arrangement: Arrangement::List,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        let text_width = self.lines().iter().map(Line::width).max().unwrap_or(0);
        u16::try_from(text_width).unwrap_or(u16::MAX)
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(self.lines().len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }

    fn lines(&self) -> Vec<Line<'a>> {
        match self.arrangement {
            Arrangement::Inline => {
                let mut spans = vec![];
                for (i, binding) in self.bindings.iter().enumerate() {
                    if i > 0 {
                        spans.push(Span::styled(" | ", SEPARATOR_STYLE));
                    }
                    spans.extend(key_spans(&binding.0));
                    spans.push(Span::raw(" "));
                    spans.push(Span::styled(binding.1, DESCRIPTION_STYLE));
                }
                vec![Line::from(spans).centered()]
            }
            Arrangement::List => {
                let column = self
                    .bindings
                    .iter()
                    .map(|(keys, _)| keys_width(keys))
                    .max()
                    .unwrap_or(0);
                self.bindings
                    .iter()
                    .map(|(keys, desc)| {
                        let mut spans = vec![Span::raw(" ".repeat(column - keys_width(keys)))];
                        spans.extend(key_spans(keys));
                        spans.push(Span::raw("  "));
                        spans.push(Span::styled(*desc, DESCRIPTION_STYLE));
                        Line::from(spans)
                    })
                    .collect()
            }
        }
    }
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);
const DESCRIPTION_STYLE: Style = Style::new().fg(Color::White);

fn keys_width(keys: &[String]) -> usize {
    keys.iter().map(|key| key.chars().count()).sum::<usize>() + keys.len().saturating_sub(1)
}

fn key_spans(keys: &[String]) -> Vec<Span<'_>> {
    let mut spans = vec![];
    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("/", SEPARATOR_STYLE));
        }
        spans.push(Span::styled(key.as_str(), KEY_STYLE));
    }
    spans
}

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        Text::from(self.lines()).render(area, buf);
    }
}
