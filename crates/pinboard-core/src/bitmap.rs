//! Decoded RGBA bitmaps and their average colour.
//!
//! The average colour is computed by stride sampling: along each axis at most
//! [`SAMPLE_LIMIT`] pixels are visited, `stride = ceil(len / SAMPLE_LIMIT)`,
//! starting at the first pixel. Images up to 64×64 are therefore scanned in
//! full. Channel means are rounded to nearest. Alpha is read but not folded
//! into the result.

use std::fmt;
use std::sync::Arc;

use crate::style::Color;

/// Maximum number of sampled pixels per axis.
pub const SAMPLE_LIMIT: u32 = 64;

const CHANNELS: usize = 4;

/// Error raised when a bitmap cannot be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidImageError {
    /// Zero width/height or no pixel data.
    Empty,
    /// The pixel buffer does not hold `width * height` RGBA pixels.
    SizeMismatch { expected: usize, actual: usize },
    /// Encoded data could not be decoded.
    Decode(String),
    /// Encoded data could not be read from its source.
    Unreadable(String),
}

impl fmt::Display for InvalidImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidImageError::Empty => write!(f, "image is empty"),
            InvalidImageError::SizeMismatch { expected, actual } => {
                write!(f, "pixel buffer holds {actual} bytes, expected {expected}")
            }
            InvalidImageError::Decode(msg) => write!(f, "cannot decode image: {msg}"),
            InvalidImageError::Unreadable(msg) => write!(f, "cannot read image: {msg}"),
        }
    }
}

impl std::error::Error for InvalidImageError {}

/// A decoded image: tightly packed RGBA8 pixels in row-major order.
///
/// Pixel data is shared, so cloning a bitmap (for instance when binding it to
/// a tile) never copies pixels. Construction does not validate the buffer;
/// call [`validate`](Bitmap::validate) or any reading operation to find out
/// whether it is usable.
#[derive(Clone)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl Bitmap {
    /// Wrap raw RGBA8 data.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels: pixels.into(),
        }
    }

    /// A bitmap filled with a single RGBA value.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let n = width as usize * height as usize;
        Self::from_rgba(width, height, rgba.repeat(n))
    }

    /// A zero-sized bitmap.
    pub fn empty() -> Self {
        Self::from_rgba(0, 0, Vec::new())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 data.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Whether the bitmap has no area or no data.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Check that the bitmap holds exactly `width * height` RGBA pixels.
    pub fn validate(&self) -> Result<(), InvalidImageError> {
        if self.is_empty() {
            return Err(InvalidImageError::Empty);
        }
        let expected = self.width as usize * self.height as usize * CHANNELS;
        if self.pixels.len() != expected {
            return Err(InvalidImageError::SizeMismatch {
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// Mean colour over the whole image (see the module docs for the
    /// sampling policy).
    pub fn average_color(&self) -> Result<Color, InvalidImageError> {
        self.validate()?;
        Ok(self.mean(0, 0, self.width, self.height))
    }

    /// Mean colour over the pixel rectangle `[x0, x1) × [y0, y1)`, clamped to
    /// the image. `None` if the bitmap is invalid or the rectangle is empty.
    pub fn average_region(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> Option<Color> {
        self.validate().ok()?;
        let (x1, y1) = (x1.min(self.width), y1.min(self.height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(self.mean(x0, y0, x1, y1))
    }

    fn mean(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> Color {
        let sx = stride(x1 - x0);
        let sy = stride(y1 - y0);
        let row = self.width as usize * CHANNELS;

        let mut sums = [0u64; 3];
        let mut n = 0u64;
        for y in (y0..y1).step_by(sy) {
            let line = &self.pixels[y as usize * row..(y as usize + 1) * row];
            for x in (x0..x1).step_by(sx) {
                let i = x as usize * CHANNELS;
                sums[0] += u64::from(line[i]);
                sums[1] += u64::from(line[i + 1]);
                sums[2] += u64::from(line[i + 2]);
                n += 1;
            }
        }

        let avg = |s: u64| ((s + n / 2) / n) as u8;
        Color::from_rgb(avg(sums[0]), avg(sums[1]), avg(sums[2]))
    }
}

fn stride(len: u32) -> usize {
    len.div_ceil(SAMPLE_LIMIT).max(1) as usize
}

impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && (Arc::ptr_eq(&self.pixels, &other.pixels) || self.pixels == other.pixels)
    }
}

impl Eq for Bitmap {}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_black_and_white() {
        let black = Bitmap::solid(10, 10, [0, 0, 0, 255]);
        assert_eq!(black.average_color(), Ok(Color::BLACK));
        let white = Bitmap::solid(10, 10, [255, 255, 255, 255]);
        assert_eq!(white.average_color(), Ok(Color::WHITE));
    }

    #[test]
    fn mean_rounds_to_nearest() {
        // Two pixels: red 0 and 255 -> 127.5 -> 128
        let bmp = Bitmap::from_rgba(2, 1, vec![0, 10, 0, 255, 255, 11, 0, 255]);
        assert_eq!(bmp.average_color(), Ok(Color::from_rgb(128, 11, 0)));
    }

    #[test]
    fn alpha_is_ignored() {
        let a = Bitmap::solid(3, 3, [40, 80, 120, 0]);
        let b = Bitmap::solid(3, 3, [40, 80, 120, 255]);
        assert_eq!(a.average_color(), b.average_color());
    }

    #[test]
    fn large_images_are_stride_sampled() {
        // 128 columns: stride 2, so only even columns are sampled.
        let mut data = Vec::with_capacity(128 * 4);
        for x in 0..128u32 {
            let v = if x % 2 == 0 { 200 } else { 0 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
        let bmp = Bitmap::from_rgba(128, 1, data);
        assert_eq!(bmp.average_color(), Ok(Color::from_rgb(200, 200, 200)));
    }

    #[test]
    fn average_is_deterministic() {
        let data: Vec<u8> = (0..(97 * 53 * 4)).map(|i| (i * 31 % 251) as u8).collect();
        let a = Bitmap::from_rgba(97, 53, data.clone());
        let b = Bitmap::from_rgba(97, 53, data);
        assert_eq!(a.average_color(), b.average_color());
        assert_eq!(a, b);
    }

    #[test]
    fn empty_and_mismatched_buffers_are_invalid() {
        assert_eq!(Bitmap::empty().average_color(), Err(InvalidImageError::Empty));
        assert_eq!(
            Bitmap::from_rgba(4, 0, Vec::new()).validate(),
            Err(InvalidImageError::Empty)
        );
        assert_eq!(
            Bitmap::from_rgba(2, 2, vec![0; 7]).average_color(),
            Err(InvalidImageError::SizeMismatch {
                expected: 16,
                actual: 7
            })
        );
    }

    #[test]
    fn region_average_is_clamped() {
        let mut data = Vec::new();
        for x in 0..4u8 {
            data.extend_from_slice(&[x * 10, 0, 0, 255]);
        }
        let bmp = Bitmap::from_rgba(4, 1, data);
        assert_eq!(bmp.average_region(2, 0, 9, 9), Some(Color::from_rgb(25, 0, 0)));
        assert_eq!(bmp.average_region(4, 0, 9, 1), None);
        assert_eq!(Bitmap::empty().average_region(0, 0, 1, 1), None);
    }

    #[test]
    fn clones_share_pixels() {
        let a = Bitmap::solid(8, 8, [1, 2, 3, 255]);
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.pixels, &b.pixels));
        assert_ne!(a, Bitmap::solid(8, 8, [1, 2, 4, 255]));
    }
}
