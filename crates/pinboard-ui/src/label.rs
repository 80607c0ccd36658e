use pinboard_core::{AttrMask, Cell, Color, Grid, Point, Range, Style};

use crate::StyledText;

/// Horizontal alignment of text lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    #[default]
    Center,
    Left,
    Right,
}

/// How text that does not fit the label's width is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineBreak {
    /// Wrap at word boundaries, breaking words that are too long.
    #[default]
    WordWrap,
    /// Keep explicit lines only and cut them at the label's edge.
    Clip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontWeight {
    #[default]
    Regular,
    Medium,
    Bold,
}

/// A typeface request. Grid backends only honour the weight and slant, as
/// cell attributes; family and size are kept for hosts that render glyphs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Font {
    pub family: String,
    pub weight: FontWeight,
    pub italic: bool,
    pub size: f32,
}

impl Font {
    pub fn new(family: &str, size: f32) -> Self {
        Self {
            family: family.to_string(),
            weight: FontWeight::Regular,
            italic: false,
            size,
        }
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Cell attributes used to approximate this font on a grid.
    pub fn attrs(&self) -> AttrMask {
        let mut attrs = AttrMask::NONE;
        if self.weight == FontWeight::Bold {
            attrs = attrs | AttrMask::BOLD;
        }
        if self.italic {
            attrs = attrs | AttrMask::ITALIC;
        }
        attrs
    }
}

/// A multi-line text widget with a transparent background.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    content: StyledText,
    pub font: Font,
    pub alignment: Alignment,
    /// Maximum number of lines shown; 0 means unlimited.
    pub max_lines: usize,
    pub line_break: LineBreak,
}

impl Label {
    /// Create a left-aligned, word-wrapping label in the given font.
    pub fn new(text: &str, font: Font) -> Self {
        Self {
            content: StyledText::text(text),
            font,
            alignment: Alignment::Left,
            max_lines: 0,
            line_break: LineBreak::WordWrap,
        }
    }

    pub fn text(&self) -> &str {
        self.content.content()
    }

    /// Set the text content (preserves other settings).
    pub fn set_text(&mut self, text: &str) {
        self.content = self.content.clone().with_text(text);
    }

    pub fn text_color(&self) -> Color {
        self.content.style().fg
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.content = self.content.clone().with_style(self.content.style().with_fg(color));
    }

    fn laid_out(&self, width: i32) -> Vec<StyledText> {
        let style = Style::default()
            .with_fg(self.text_color())
            .with_attrs(self.font.attrs());
        let text = self.content.clone().with_style(style);
        let mut lines = match self.line_break {
            LineBreak::WordWrap => text.format(width.max(0) as usize).lines(),
            LineBreak::Clip => text.lines(),
        };
        if self.max_lines > 0 {
            lines.truncate(self.max_lines);
        }
        lines
    }

    /// Number of rows the label needs at the given width.
    pub fn measure(&self, width: i32) -> i32 {
        self.laid_out(width).len() as i32
    }

    /// Draw the label into the grid, keeping the background already there.
    /// Returns the range of rows used.
    pub fn draw(&self, grid: &Grid) -> Range {
        let w = grid.width();
        let lines = self.laid_out(w);
        for (y, line) in lines.iter().enumerate() {
            let y = y as i32;
            if y >= grid.height() {
                break;
            }
            let tw = line.size().x;
            let offset = match self.alignment {
                Alignment::Left => 0,
                Alignment::Right => (w - tw).max(0),
                Alignment::Center => ((w - tw) / 2).max(0),
            };
            line.iter(|p, cell| {
                let p = Point::new(p.x + offset, y);
                if grid.contains(p) {
                    let bg = grid.at(p).style.bg;
                    grid.set(
                        p,
                        Cell {
                            ch: cell.ch,
                            style: cell.style.with_bg(bg),
                        },
                    );
                }
            });
        }
        Range::new(0, 0, w, (lines.len() as i32).min(grid.height()))
    }
}
