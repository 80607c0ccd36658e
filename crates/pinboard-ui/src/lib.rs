//! UI widgets for pinboard: text, label, panel, image view, stack layout and
//! the photo tile built from them.

mod image_view;
mod label;
mod layout;
mod panel;
mod photo_tile;
mod reuse;
mod styled_text;

pub use image_view::ImageView;
pub use label::{Alignment, Font, FontWeight, Label, LineBreak};
pub use layout::{Axis, CellMetrics, Insets, Stack, StackLayout, clip_rounded};
pub use panel::Panel;
pub use photo_tile::{
    CaptionColors, PhotoTile, PhotoTileStyle, TileRenderState, TileViewModel, caption_colors,
};
pub use reuse::Reusable;
pub use styled_text::StyledText;
