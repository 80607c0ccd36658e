//! The [`Grid`] type — a 2D grid of [`Cell`]s with slice semantics.
//!
//! A `Grid` is a *view* into a shared backing buffer. Cloning a `Grid` yields
//! another view of the **same** storage. Use [`slice`](Grid::slice) to obtain
//! sub-grid views. All coordinates taken by a view are relative to its own
//! top-left corner, so widgets can draw from `(0, 0)` into whatever slice
//! they are handed.

use std::cell::RefCell;
use std::rc::Rc;

use crate::cell::Cell;
use crate::geom::{Point, Range};

// ---------------------------------------------------------------------------
// Internal shared buffer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct GridBuffer {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl GridBuffer {
    fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![Cell::default(); width * height],
            width,
            height,
        }
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height {
            Some((p.y as usize) * self.width + (p.x as usize))
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A 2D grid of [`Cell`]s backed by shared storage.
///
/// Cloning produces another view into the same buffer (slice semantics).
#[derive(Debug, Clone)]
pub struct Grid {
    buffer: Rc<RefCell<GridBuffer>>,
    /// Absolute bounds of this view inside the buffer.
    bounds: Range,
}

impl Grid {
    /// Create a new grid of the given dimensions, filled with default cells.
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0);
        let h = height.max(0);
        Self {
            buffer: Rc::new(RefCell::new(GridBuffer::new(w as usize, h as usize))),
            bounds: Range::new(0, 0, w, h),
        }
    }

    /// Absolute bounds of this view inside the backing buffer.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// The view's own range, `[(0, 0), size)`.
    #[inline]
    pub fn range(&self) -> Range {
        Range::new(0, 0, self.width(), self.height())
    }

    /// Size of the grid as a `Point`.
    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether the relative point `p` is inside this view.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.range().contains(p)
    }

    /// Get a sub-grid view for the relative range `r`. The returned `Grid`
    /// shares the same backing buffer, clipped to the current view.
    pub fn slice(&self, r: Range) -> Grid {
        Grid {
            buffer: Rc::clone(&self.buffer),
            bounds: self.bounds.intersect(r.translate(self.bounds.min)),
        }
    }

    /// Read the cell at relative `p`. Returns `Cell::default()` outside the
    /// view.
    pub fn at(&self, p: Point) -> Cell {
        if !self.contains(p) {
            return Cell::default();
        }
        let buf = self.buffer.borrow();
        buf.index(self.bounds.min + p)
            .map(|i| buf.cells[i])
            .unwrap_or_default()
    }

    /// Set the cell at relative `p`. No-op outside the view.
    pub fn set(&self, p: Point, cell: Cell) {
        if !self.contains(p) {
            return;
        }
        let mut buf = self.buffer.borrow_mut();
        if let Some(i) = buf.index(self.bounds.min + p) {
            buf.cells[i] = cell;
        }
    }

    /// Fill every cell in the view with `cell`.
    pub fn fill(&self, cell: Cell) {
        let mut buf = self.buffer.borrow_mut();
        for p in self.bounds.iter() {
            if let Some(i) = buf.index(p) {
                buf.cells[i] = cell;
            }
        }
    }

    /// Apply `f` to every cell in the view, replacing each with the return
    /// value. Points passed to `f` are relative.
    pub fn map_cells<F: Fn(Point, Cell) -> Cell>(&self, f: F) {
        let origin = self.bounds.min;
        let mut buf = self.buffer.borrow_mut();
        for p in self.bounds.iter() {
            if let Some(i) = buf.index(p) {
                buf.cells[i] = f(p - origin, buf.cells[i]);
            }
        }
    }

    /// Row-major iterator over relative `(Point, Cell)` pairs.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            grid: self,
            inner: self.range().iter(),
        }
    }
}

// ---------------------------------------------------------------------------
// GridIter
// ---------------------------------------------------------------------------

/// Iterator over `(Point, Cell)` pairs in a [`Grid`].
pub struct GridIter<'a> {
    grid: &'a Grid,
    inner: crate::geom::RangeIter,
}

impl<'a> Iterator for GridIter<'a> {
    type Item = (Point, Cell);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let p = self.inner.next()?;
        Some((p, self.grid.at(p)))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
