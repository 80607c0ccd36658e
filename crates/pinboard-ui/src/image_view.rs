use pinboard_core::{Bitmap, Cell, Grid, Range};

/// Displays a bitmap scaled to fill its grid area.
///
/// Each cell is painted with the average colour of the block of pixels it
/// covers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageView {
    image: Option<Bitmap>,
}

impl ImageView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<&Bitmap> {
        self.image.as_ref()
    }

    pub fn set_image(&mut self, image: Option<Bitmap>) {
        self.image = image;
    }

    /// Drop the displayed image.
    pub fn clear(&mut self) {
        self.image = None;
    }

    /// Paint the image into the grid. Nothing is drawn (and an empty range
    /// returned) when there is no image or it cannot be read.
    pub fn draw(&self, grid: &Grid) -> Range {
        let Some(img) = self.image.as_ref().filter(|img| img.validate().is_ok()) else {
            return Range::default();
        };
        let (w, h) = (grid.width().max(0) as u64, grid.height().max(0) as u64);
        if w == 0 || h == 0 {
            return Range::default();
        }
        let (iw, ih) = (u64::from(img.width()), u64::from(img.height()));
        for p in grid.range() {
            let (x, y) = (p.x as u64, p.y as u64);
            let x0 = x * iw / w;
            let x1 = ((x + 1) * iw / w).max(x0 + 1);
            let y0 = y * ih / h;
            let y1 = ((y + 1) * ih / h).max(y0 + 1);
            if let Some(color) = img.average_region(x0 as u32, y0 as u32, x1 as u32, y1 as u32) {
                grid.set(p, Cell::filled(color));
            }
        }
        grid.range()
    }
}
