//! **pinboard-core** — core types for rendering photo tiles.
//!
//! This crate provides the foundational types used across the *pinboard*
//! workspace: geometry primitives, colors and their luma classification,
//! styled cells, a shared-buffer cell grid, and decoded bitmaps with their
//! average color.

pub mod bitmap;
pub mod cell;
pub mod geom;
pub mod grid;
pub mod style;

pub use bitmap::{Bitmap, InvalidImageError, SAMPLE_LIMIT};
pub use cell::Cell;
pub use geom::{Point, Range};
pub use grid::Grid;
pub use style::{AttrMask, Color, DARK_LUMA_THRESHOLD, Style};
