use pinboard_core::{Cell, Color, Grid, Range};

use crate::{CellMetrics, Insets, Label};

/// A filled background holding one inset [`Label`].
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub background: Color,
    pub hidden: bool,
    /// Distance between the panel edges and the label.
    pub insets: Insets,
    pub label: Label,
}

impl Panel {
    /// A visible panel with the default background.
    pub fn new(label: Label) -> Self {
        Self {
            background: Color::DEFAULT,
            hidden: false,
            insets: Insets::ZERO,
            label,
        }
    }

    /// Rows needed to show the whole label at the given outer width.
    pub fn measure(&self, width: i32, metrics: &CellMetrics) -> i32 {
        let inner = width - metrics.cols(self.insets.left) - metrics.cols(self.insets.right);
        self.label.measure(inner.max(1))
            + metrics.rows(self.insets.top)
            + metrics.rows(self.insets.bottom)
    }

    /// Fill the grid with the background and draw the label inside the
    /// insets. Hidden panels draw nothing and return an empty range.
    pub fn draw(&self, grid: &Grid, metrics: &CellMetrics) -> Range {
        if self.hidden {
            return Range::default();
        }
        grid.fill(Cell::filled(self.background));
        let inner = metrics.inset(grid.range(), self.insets);
        if !inner.is_empty() {
            self.label.draw(&grid.slice(inner));
        }
        grid.range()
    }
}

#[cfg(test)]
mod tests {
    use pinboard_core::Point;

    use super::*;
    use crate::Font;

    fn panel(text: &str) -> Panel {
        let mut p = Panel::new(Label::new(text, Font::new("x", 14.0)));
        p.insets = Insets::uniform(4.0);
        p.background = Color::BLACK;
        p
    }

    #[test]
    fn measure_adds_inset_rows() {
        let m = CellMetrics::default();
        // inner width 8: "hello world" wraps into two lines
        assert_eq!(panel("hello world").measure(10, &m), 4);
        assert_eq!(panel("hi").measure(10, &m), 3);
    }

    #[test]
    fn draws_label_inside_insets() {
        let m = CellMetrics::default();
        let g = Grid::new(6, 3);
        let drawn = panel("ab").draw(&g, &m);
        assert_eq!(drawn, Range::new(0, 0, 6, 3));
        assert_eq!(g.at(Point::new(1, 1)).ch, 'a');
        assert_eq!(g.at(Point::new(0, 0)).style.bg, Color::BLACK);
        assert_eq!(g.at(Point::new(1, 1)).style.bg, Color::BLACK);
    }

    #[test]
    fn hidden_panel_draws_nothing() {
        let mut p = panel("ab");
        p.hidden = true;
        let g = Grid::new(6, 3);
        assert!(p.draw(&g, &CellMetrics::default()).is_empty());
        assert!(g.iter().all(|(_, c)| c == Cell::default()));
    }
}
