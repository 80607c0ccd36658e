//! A minimal host for photo tiles: a reuse pool and a fixed-column wall.
//!
//! The wall binds items row by row, keeping one row of tiles live at a time
//! and returning them to the pool at the end of the row, the way a scrolling
//! grid recycles tiles that leave the screen.

use std::path::PathBuf;

use pinboard_core::{Grid, Range};
use pinboard_ui::{PhotoTile, Reusable, TileViewModel};

/// Pool of reusable widgets of one type.
#[derive(Debug)]
pub struct TilePool<T: Reusable> {
    free: Vec<T>,
    created: usize,
}

impl<T: Reusable> TilePool<T> {
    pub fn new() -> Self {
        Self {
            free: Vec::new(),
            created: 0,
        }
    }

    /// The identifier this pool groups instances by.
    pub fn identifier(&self) -> &'static str {
        T::REUSE_IDENTIFIER
    }

    /// Take a pooled instance, or build a new one with `make`.
    pub fn dequeue(&mut self, make: impl FnOnce() -> T) -> T {
        match self.free.pop() {
            Some(item) => item,
            None => {
                self.created += 1;
                make()
            }
        }
    }

    /// Reset `item` and return it to the pool.
    pub fn recycle(&mut self, mut item: T) {
        item.prepare_for_reuse();
        self.free.push(item);
    }

    /// Number of instances built so far.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Number of instances waiting in the pool.
    pub fn available(&self) -> usize {
        self.free.len()
    }
}

impl<T: Reusable> Default for TilePool<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Geometry of a photo wall, in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallConfig {
    pub columns: i32,
    pub tile_width: i32,
    pub tile_height: i32,
    pub gap: i32,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            columns: 4,
            tile_width: 20,
            tile_height: 10,
            gap: 1,
        }
    }
}

impl WallConfig {
    /// Grid range of the `i`-th tile.
    pub fn tile_range(&self, i: usize) -> Range {
        let cols = self.columns.max(1);
        let (col, row) = (i as i32 % cols, i as i32 / cols);
        let x = col * (self.tile_width + self.gap);
        let y = row * (self.tile_height + self.gap);
        Range::new(x, y, x + self.tile_width, y + self.tile_height)
    }

    /// Size of a grid holding `n` tiles.
    pub fn grid_size(&self, n: usize) -> (i32, i32) {
        if n == 0 {
            return (0, 0);
        }
        let cols = self.columns.max(1);
        let rows = (n as i32 + cols - 1) / cols;
        let used_cols = cols.min(n as i32);
        (
            used_cols * self.tile_width + (used_cols - 1) * self.gap,
            rows * self.tile_height + (rows - 1) * self.gap,
        )
    }
}

/// Render `items` into a new grid, drawing tiles taken from `pool`.
pub fn render_wall(
    items: &[TileViewModel],
    config: &WallConfig,
    pool: &mut TilePool<PhotoTile>,
) -> Grid {
    let (w, h) = config.grid_size(items.len());
    let grid = Grid::new(w, h);
    let cols = config.columns.max(1) as usize;
    for (row, chunk) in items.chunks(cols).enumerate() {
        let mut live = Vec::with_capacity(chunk.len());
        for (col, item) in chunk.iter().enumerate() {
            let mut tile = pool.dequeue(PhotoTile::new);
            tile.update(item);
            tile.draw(&grid.slice(config.tile_range(row * cols + col)));
            live.push(tile);
        }
        for tile in live {
            pool.recycle(tile);
        }
    }
    grid
}

/// Split a `PATH[=CAPTION]` argument.
pub fn parse_item(arg: &str) -> (PathBuf, Option<String>) {
    match arg.split_once('=') {
        Some((path, caption)) => (PathBuf::from(path), Some(caption.to_string())),
        None => (PathBuf::from(arg), None),
    }
}

#[cfg(test)]
mod tests {
    use pinboard_core::{Bitmap, Color, Point};

    use super::*;

    #[derive(Default)]
    struct Probe {
        resets: usize,
    }

    impl Reusable for Probe {
        const REUSE_IDENTIFIER: &'static str = "Probe";

        fn prepare_for_reuse(&mut self) {
            self.resets += 1;
        }
    }

    #[test]
    fn pool_reuses_recycled_items() {
        let mut pool: TilePool<Probe> = TilePool::new();
        assert_eq!(pool.identifier(), "Probe");
        let a = pool.dequeue(Probe::default);
        pool.recycle(a);
        assert_eq!(pool.available(), 1);
        let b = pool.dequeue(Probe::default);
        assert_eq!(b.resets, 1);
        assert_eq!(pool.created(), 1);
    }

    #[test]
    fn wall_pools_one_row_of_tiles() {
        let items: Vec<TileViewModel> = (0..6u8)
            .map(|i| TileViewModel::new(Bitmap::solid(4, 4, [i * 40, 0, 0, 255])).with_caption("x"))
            .collect();
        let config = WallConfig {
            columns: 3,
            tile_width: 8,
            tile_height: 6,
            gap: 1,
        };
        let mut pool = TilePool::new();
        let grid = render_wall(&items, &config, &mut pool);
        assert_eq!(grid.size(), Point::new(26, 13));
        assert_eq!(pool.created(), 3);
        assert_eq!(pool.available(), 3);
        assert_eq!(pool.identifier(), "PhotoTile");
        // Each tile paints its own item.
        assert_eq!(grid.at(Point::new(4, 0)).style.bg, Color::BLACK);
        assert_eq!(
            grid.at(config.tile_range(4).min + Point::new(4, 0)).style.bg,
            Color::from_rgb(160, 0, 0)
        );
        // Gap column stays untouched.
        assert_eq!(grid.at(Point::new(8, 0)), pinboard_core::Cell::default());
    }

    #[test]
    fn tile_ranges_and_grid_size() {
        let c = WallConfig::default();
        assert_eq!(c.tile_range(0), Range::new(0, 0, 20, 10));
        assert_eq!(c.tile_range(5), Range::new(21, 11, 41, 21));
        assert_eq!(c.grid_size(0), (0, 0));
        assert_eq!(c.grid_size(2), (41, 10));
    }

    #[test]
    fn parses_captions() {
        assert_eq!(parse_item("a.png"), (PathBuf::from("a.png"), None));
        assert_eq!(
            parse_item("a.png=Sunset = nice"),
            (PathBuf::from("a.png"), Some("Sunset = nice".to_string()))
        );
        assert_eq!(parse_item("b.jpg="), (PathBuf::from("b.jpg"), Some(String::new())));
    }
}
