//! Unit-based layout: insets, cell metrics, the vertical [`Stack`] and
//! rounded-corner clipping.
//!
//! Widgets describe lengths in layout *units*; [`CellMetrics`] converts them
//! to grid cells when a tile is drawn.

use pinboard_core::{Cell, Grid, Range};

/// Edge insets in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Insets {
    pub const ZERO: Self = Self::uniform(0.0);

    /// The same inset on all four edges.
    pub const fn uniform(v: f32) -> Self {
        Self {
            top: v,
            left: v,
            bottom: v,
            right: v,
        }
    }
}

/// Size of one grid cell in layout units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellMetrics {
    pub width: f32,
    pub height: f32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width: 4.0,
            height: 8.0,
        }
    }
}

impl CellMetrics {
    /// Number of columns covering `units` horizontally (rounded up).
    pub fn cols(&self, units: f32) -> i32 {
        to_cells(units, self.width)
    }

    /// Number of rows covering `units` vertically (rounded up).
    pub fn rows(&self, units: f32) -> i32 {
        to_cells(units, self.height)
    }

    /// Shrink `r` by `insets`. Returns an empty range if nothing is left.
    pub fn inset(&self, r: Range, insets: Insets) -> Range {
        r.shift(
            self.cols(insets.left),
            self.rows(insets.top),
            -self.cols(insets.right),
            -self.rows(insets.bottom),
        )
    }
}

fn to_cells(units: f32, cell: f32) -> i32 {
    if units <= 0.0 {
        return 0;
    }
    (units / cell.max(f32::EPSILON)).ceil() as i32
}

/// Stacking direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    Horizontal,
    #[default]
    Vertical,
}

/// Ranges produced by [`Stack::arrange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackLayout {
    /// Area of the primary arranged element (the whole inset stack).
    pub content: Range,
    /// Area of the trailing element, overlapping the end of `content` and
    /// spanning the full cross axis.
    pub overlay: Range,
}

/// A two-slot stack: a primary element filling the stack, and a trailing
/// element laid over its end.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stack {
    pub axis: Axis,
    /// Distance between the stack and its container's edges.
    pub insets: Insets,
}

impl Stack {
    pub fn vertical() -> Self {
        Self {
            axis: Axis::Vertical,
            insets: Insets::ZERO,
        }
    }

    /// Split `bounds` into the content area and a trailing overlay that is
    /// `extent` cells long along the stack axis (clamped to the content).
    pub fn arrange(&self, bounds: Range, extent: i32, metrics: &CellMetrics) -> StackLayout {
        let content = metrics.inset(bounds, self.insets);
        let overlay = match self.axis {
            Axis::Vertical => {
                let h = content.height();
                content.lines(h - extent.clamp(0, h), h)
            }
            Axis::Horizontal => {
                let w = content.width();
                let e = extent.clamp(0, w);
                Range::new(content.max.x - e, content.min.y, content.max.x, content.max.y)
            }
        };
        StackLayout { content, overlay }
    }
}

/// Reset every cell of `grid` whose centre lies outside (or on) the rounded
/// rectangle of the given corner radius.
pub fn clip_rounded(grid: &Grid, radius: f32, metrics: &CellMetrics) {
    let w = grid.width() as f32 * metrics.width;
    let h = grid.height() as f32 * metrics.height;
    let r = radius.min(w / 2.0).min(h / 2.0);
    if r <= 0.0 {
        return;
    }
    grid.map_cells(|p, cell| {
        let cx = (p.x as f32 + 0.5) * metrics.width;
        let cy = (p.y as f32 + 0.5) * metrics.height;
        let ox = if cx < r {
            r
        } else if cx > w - r {
            w - r
        } else {
            return cell;
        };
        let oy = if cy < r {
            r
        } else if cy > h - r {
            h - r
        } else {
            return cell;
        };
        let (dx, dy) = (cx - ox, cy - oy);
        if dx * dx + dy * dy >= r * r {
            Cell::default()
        } else {
            cell
        }
    });
}
