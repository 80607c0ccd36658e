//! The photo tile: an image with an optional caption overlay whose colours
//! follow the image.
//!
//! The widget tree is built once in [`PhotoTile::with_style`] and only its
//! content and attributes change afterwards:
//!
//! ```text
//! container (rounded corners, clipped)
//! └── stack (vertical, zero insets)
//!     ├── image view
//!     └── caption panel (full width, over the bottom of the image)
//!         └── caption label (inset on all sides)
//! ```

use pinboard_core::{Bitmap, Cell, Color, Grid, InvalidImageError, Range};

use crate::{
    Alignment, CellMetrics, Font, FontWeight, ImageView, Insets, Label, LineBreak, Panel,
    Reusable, Stack, clip_rounded,
};

/// Content bound to a tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileViewModel {
    pub image: Bitmap,
    /// Caption text. `None` hides the caption; an empty string still shows it.
    pub caption: Option<String>,
}

impl TileViewModel {
    pub fn new(image: Bitmap) -> Self {
        Self {
            image,
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// Caption colours derived from an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptionColors {
    pub background: Color,
    /// Always [`Color::WHITE`] or [`Color::BLACK`].
    pub text: Color,
}

impl CaptionColors {
    /// Readable text colour over the given background.
    pub fn for_background(background: Color) -> Self {
        Self {
            background,
            text: background.contrasting_text(),
        }
    }
}

/// Derive the caption background (the image's average colour) and a
/// contrasting text colour.
pub fn caption_colors(image: &Bitmap) -> Result<CaptionColors, InvalidImageError> {
    image.average_color().map(CaptionColors::for_background)
}

/// Appearance settings of a [`PhotoTile`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PhotoTileStyle {
    pub corner_radius: f32,
    /// Whether drawing is clipped to the rounded corners.
    pub clips_to_bounds: bool,
    pub stack_insets: Insets,
    pub caption_insets: Insets,
    pub caption_font: Font,
    /// Caption text colour before any content is bound.
    pub caption_text_color: Color,
    /// Caption background before any content is bound.
    pub placeholder_panel_color: Color,
    /// Caption background used when the bound image cannot be read.
    pub fallback_panel_color: Color,
    pub metrics: CellMetrics,
}

impl Default for PhotoTileStyle {
    fn default() -> Self {
        Self {
            corner_radius: 10.0,
            clips_to_bounds: true,
            stack_insets: Insets::ZERO,
            caption_insets: Insets::uniform(4.0),
            caption_font: Font::new("AvenirNext", 14.0)
                .with_weight(FontWeight::Medium)
                .italic(),
            caption_text_color: Color::WHITE,
            placeholder_panel_color: Color::RED,
            fallback_panel_color: Color::NEUTRAL,
            metrics: CellMetrics::default(),
        }
    }
}

/// Snapshot of the transient state of a [`PhotoTile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRenderState {
    pub displayed_image: Option<Bitmap>,
    /// Colour derived at the last bind, `None` before the first one.
    pub caption_panel_color: Option<Color>,
    pub caption_visible: bool,
}

/// A pooled grid tile showing one photo and its optional caption.
#[derive(Debug, Clone)]
pub struct PhotoTile {
    style: PhotoTileStyle,
    stack: Stack,
    image_view: ImageView,
    caption_panel: Panel,
    derived_color: Option<Color>,
    image_error: Option<InvalidImageError>,
}

impl PhotoTile {
    pub fn new() -> Self {
        Self::with_style(PhotoTileStyle::default())
    }

    /// Build the tile's widget tree from `style`.
    pub fn with_style(style: PhotoTileStyle) -> Self {
        let mut label = Label::new("", style.caption_font.clone());
        label.alignment = Alignment::Center;
        label.max_lines = 0;
        label.line_break = LineBreak::WordWrap;
        label.set_text_color(style.caption_text_color);

        let mut caption_panel = Panel::new(label);
        caption_panel.insets = style.caption_insets;
        caption_panel.background = style.placeholder_panel_color;
        caption_panel.hidden = true;

        Self {
            stack: Stack {
                insets: style.stack_insets,
                ..Stack::vertical()
            },
            image_view: ImageView::new(),
            caption_panel,
            derived_color: None,
            image_error: None,
            style,
        }
    }

    /// Bind new content.
    ///
    /// The caption background is set from the image even when no caption is
    /// shown. If the image cannot be read the tile still binds, using the
    /// style's fallback colour, and the error is kept in
    /// [`image_error`](Self::image_error).
    pub fn update(&mut self, view_model: &TileViewModel) {
        let colors = match caption_colors(&view_model.image) {
            Ok(colors) => {
                self.image_error = None;
                colors
            }
            Err(e) => {
                log::warn!("photo tile bound to an unreadable image: {e}");
                self.image_error = Some(e);
                CaptionColors::for_background(self.style.fallback_panel_color)
            }
        };
        self.derived_color = Some(colors.background);
        self.caption_panel.background = colors.background;
        self.image_view.set_image(Some(view_model.image.clone()));

        match view_model.caption.as_deref() {
            Some(caption) => {
                self.caption_panel.hidden = false;
                self.caption_panel.label.set_text(caption);
                self.caption_panel.label.set_text_color(colors.text);
            }
            None => self.caption_panel.hidden = true,
        }
        log::trace!(
            "photo tile bound: {}x{} image, caption {}",
            view_model.image.width(),
            view_model.image.height(),
            if self.caption_panel.hidden { "hidden" } else { "shown" }
        );
    }

    /// Drop the displayed image before the tile is rebound. Caption state is
    /// left for the next [`update`](Self::update) to overwrite.
    pub fn prepare_for_reuse(&mut self) {
        self.image_view.clear();
        self.image_error = None;
        log::trace!("photo tile reset for reuse");
    }

    pub fn render_state(&self) -> TileRenderState {
        TileRenderState {
            displayed_image: self.image_view.image().cloned(),
            caption_panel_color: self.derived_color,
            caption_visible: !self.caption_panel.hidden,
        }
    }

    pub fn displayed_image(&self) -> Option<&Bitmap> {
        self.image_view.image()
    }

    pub fn is_caption_visible(&self) -> bool {
        !self.caption_panel.hidden
    }

    pub fn caption_panel_color(&self) -> Color {
        self.caption_panel.background
    }

    pub fn caption_text(&self) -> &str {
        self.caption_panel.label.text()
    }

    pub fn caption_text_color(&self) -> Color {
        self.caption_panel.label.text_color()
    }

    /// Why the last bound image could not be read, if it could not.
    pub fn image_error(&self) -> Option<&InvalidImageError> {
        self.image_error.as_ref()
    }

    pub fn style(&self) -> &PhotoTileStyle {
        &self.style
    }

    pub fn corner_radius(&self) -> f32 {
        self.style.corner_radius
    }

    pub fn clips_to_bounds(&self) -> bool {
        self.style.clips_to_bounds
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn image_view(&self) -> &ImageView {
        &self.image_view
    }

    pub fn caption_panel(&self) -> &Panel {
        &self.caption_panel
    }

    /// Render the tile into `grid`, replacing everything in it.
    ///
    /// A tile reset for reuse and not rebound yet draws nothing: the caption
    /// still holds the previous item's text and colour.
    pub fn draw(&self, grid: &Grid) -> Range {
        let metrics = &self.style.metrics;
        grid.fill(Cell::default());

        let bound = self.image_view.image().is_some();
        let caption_rows = if !bound || self.caption_panel.hidden {
            0
        } else {
            let content = metrics.inset(grid.range(), self.stack.insets);
            self.caption_panel.measure(content.width(), metrics)
        };
        let layout = self.stack.arrange(grid.range(), caption_rows, metrics);

        self.image_view.draw(&grid.slice(layout.content));
        if !layout.overlay.is_empty() {
            self.caption_panel.draw(&grid.slice(layout.overlay), metrics);
        }
        if self.style.clips_to_bounds {
            clip_rounded(grid, self.style.corner_radius, metrics);
        }
        grid.range()
    }
}

impl Default for PhotoTile {
    fn default() -> Self {
        Self::new()
    }
}

impl Reusable for PhotoTile {
    const REUSE_IDENTIFIER: &'static str = "PhotoTile";

    fn prepare_for_reuse(&mut self) {
        PhotoTile::prepare_for_reuse(self);
    }
}

#[cfg(test)]
mod tests {
    use pinboard_core::{AttrMask, Point};

    use super::*;
    use crate::Axis;

    const BLACK_PX: [u8; 4] = [0, 0, 0, 255];
    const WHITE_PX: [u8; 4] = [255, 255, 255, 255];

    fn solid(px: [u8; 4]) -> Bitmap {
        Bitmap::solid(10, 10, px)
    }

    #[test]
    fn fresh_tile_has_static_layout() {
        let tile = PhotoTile::new();
        assert_eq!(tile.corner_radius(), 10.0);
        assert!(tile.clips_to_bounds());
        assert_eq!(tile.stack().axis, Axis::Vertical);
        assert_eq!(tile.stack().insets, Insets::ZERO);

        let panel = tile.caption_panel();
        assert!(panel.hidden);
        assert_eq!(panel.background, Color::RED);
        assert_eq!(panel.insets, Insets::uniform(4.0));

        let label = &panel.label;
        assert_eq!(label.alignment, Alignment::Center);
        assert_eq!(label.max_lines, 0);
        assert_eq!(label.line_break, LineBreak::WordWrap);
        assert_eq!(label.text_color(), Color::WHITE);
        assert_eq!(label.font.family, "AvenirNext");
        assert_eq!(label.font.weight, FontWeight::Medium);
        assert!(label.font.italic);
        assert_eq!(label.font.size, 14.0);

        assert_eq!(
            tile.render_state(),
            TileRenderState {
                displayed_image: None,
                caption_panel_color: None,
                caption_visible: false,
            }
        );
    }

    #[test]
    fn black_image_gets_white_caption() {
        let mut tile = PhotoTile::new();
        let img = solid(BLACK_PX);
        tile.update(&TileViewModel::new(img.clone()).with_caption("Hi"));
        assert_eq!(tile.caption_panel_color(), Color::BLACK);
        assert_eq!(tile.caption_text_color(), Color::WHITE);
        assert_eq!(tile.caption_text(), "Hi");
        assert!(tile.is_caption_visible());
        assert_eq!(tile.displayed_image(), Some(&img));
    }

    #[test]
    fn white_image_gets_black_caption() {
        let mut tile = PhotoTile::new();
        tile.update(&TileViewModel::new(solid(WHITE_PX)).with_caption("Hi"));
        assert_eq!(tile.caption_panel_color(), Color::WHITE);
        assert_eq!(tile.caption_text_color(), Color::BLACK);
        assert!(tile.is_caption_visible());
    }

    #[test]
    fn missing_caption_hides_panel_but_sets_color() {
        let mut tile = PhotoTile::new();
        let px = [30, 60, 90, 255];
        tile.update(&TileViewModel::new(solid(px)));
        assert!(!tile.is_caption_visible());
        assert_eq!(tile.caption_panel_color(), Color::from_rgb(30, 60, 90));
        assert_eq!(
            tile.render_state().caption_panel_color,
            Some(Color::from_rgb(30, 60, 90))
        );
    }

    #[test]
    fn empty_caption_is_still_shown() {
        let mut tile = PhotoTile::new();
        tile.update(&TileViewModel::new(solid(WHITE_PX)).with_caption(""));
        assert!(tile.is_caption_visible());
        assert_eq!(tile.caption_text(), "");
    }

    #[test]
    fn caption_visibility_follows_last_bind() {
        let mut tile = PhotoTile::new();
        tile.update(&TileViewModel::new(solid(WHITE_PX)).with_caption("A"));
        assert!(tile.render_state().caption_visible);
        tile.update(&TileViewModel::new(solid(WHITE_PX)));
        assert!(!tile.render_state().caption_visible);
        tile.update(&TileViewModel::new(solid(BLACK_PX)).with_caption("B"));
        assert!(tile.render_state().caption_visible);
        assert_eq!(tile.caption_text_color(), Color::WHITE);
    }

    #[test]
    fn update_is_idempotent() {
        let vm = TileViewModel::new(solid([200, 10, 10, 255])).with_caption("twice");
        let mut once = PhotoTile::new();
        once.update(&vm);
        let mut twice = PhotoTile::new();
        twice.update(&vm);
        twice.update(&vm);
        assert_eq!(once.render_state(), twice.render_state());
        assert_eq!(once.caption_panel(), twice.caption_panel());

        let (a, b) = (Grid::new(12, 8), Grid::new(12, 8));
        once.draw(&a);
        twice.draw(&b);
        assert!(a.iter().zip(b.iter()).all(|(x, y)| x == y));
    }

    #[test]
    fn reuse_clears_image_only() {
        let mut tile = PhotoTile::new();
        let a = solid(BLACK_PX);
        tile.update(&TileViewModel::new(a).with_caption("A"));
        tile.prepare_for_reuse();

        let state = tile.render_state();
        assert_eq!(state.displayed_image, None);
        assert!(tile.image_view().image().is_none());
        // Caption attributes are left for the next bind.
        assert!(state.caption_visible);
        assert_eq!(tile.caption_text(), "A");
        assert_eq!(tile.caption_panel_color(), Color::BLACK);
    }

    #[test]
    fn rebinding_after_reuse_shows_new_image() {
        let mut tile = PhotoTile::new();
        let a = solid(BLACK_PX);
        let b = solid(WHITE_PX);
        tile.update(&TileViewModel::new(a.clone()).with_caption("A"));
        <PhotoTile as Reusable>::prepare_for_reuse(&mut tile);
        tile.update(&TileViewModel::new(b.clone()));
        assert_eq!(tile.displayed_image(), Some(&b));
        assert_ne!(tile.displayed_image(), Some(&a));
        assert!(!tile.is_caption_visible());
        assert_eq!(tile.caption_panel_color(), Color::WHITE);
    }

    #[test]
    fn unreadable_image_falls_back_to_neutral() {
        let mut tile = PhotoTile::new();
        tile.update(&TileViewModel::new(Bitmap::empty()).with_caption("broken"));
        assert_eq!(tile.caption_panel_color(), Color::NEUTRAL);
        assert_eq!(tile.caption_text_color(), Color::BLACK);
        assert!(tile.is_caption_visible());
        assert_eq!(tile.image_error(), Some(&InvalidImageError::Empty));

        let g = Grid::new(8, 6);
        tile.draw(&g);
        assert_eq!(g.at(Point::new(4, 5)).style.bg, Color::NEUTRAL);

        tile.update(&TileViewModel::new(solid(WHITE_PX)));
        assert_eq!(tile.image_error(), None);
    }

    #[test]
    fn mismatched_buffer_is_reported() {
        let mut tile = PhotoTile::new();
        tile.update(&TileViewModel::new(Bitmap::from_rgba(4, 4, vec![0; 3])));
        assert!(matches!(
            tile.image_error(),
            Some(InvalidImageError::SizeMismatch { .. })
        ));
        tile.prepare_for_reuse();
        assert_eq!(tile.image_error(), None);
    }

    #[test]
    fn text_color_is_white_iff_background_is_dark() {
        let mut tile = PhotoTile::new();
        for v in (0..=255u32).step_by(15) {
            let px = [v as u8, (v * 3 % 256) as u8, (255 - v) as u8, 255];
            tile.update(&TileViewModel::new(Bitmap::solid(4, 4, px)).with_caption("c"));
            let text = tile.caption_text_color();
            assert!(text == Color::WHITE || text == Color::BLACK);
            assert_eq!(text == Color::WHITE, tile.caption_panel_color().is_dark());
        }
    }

    #[test]
    fn caption_colors_is_pure() {
        assert_eq!(
            caption_colors(&solid(BLACK_PX)),
            Ok(CaptionColors {
                background: Color::BLACK,
                text: Color::WHITE,
            })
        );
        assert_eq!(caption_colors(&Bitmap::empty()), Err(InvalidImageError::Empty));
    }

    #[test]
    fn draw_overlays_caption_on_image() {
        let mut tile = PhotoTile::new();
        tile.update(&TileViewModel::new(solid(WHITE_PX)).with_caption("Hi"));
        let g = Grid::new(12, 8);
        assert_eq!(tile.draw(&g), Range::new(0, 0, 12, 8));

        // Image above the caption.
        assert_eq!(g.at(Point::new(5, 0)).style.bg, Color::WHITE);
        // Caption panel: 1 text row plus one inset row on each side.
        for y in 5..8 {
            assert_eq!(g.at(Point::new(5, y)).style.bg, Color::WHITE);
        }
        let h = g.at(Point::new(5, 6));
        let i = g.at(Point::new(6, 6));
        assert_eq!((h.ch, i.ch), ('H', 'i'));
        assert_eq!(h.style.fg, Color::BLACK);
        assert!(h.style.attrs.contains(AttrMask::ITALIC));
        // Rounded corners are clipped.
        assert_eq!(g.at(Point::new(0, 0)), Cell::default());
        assert_eq!(g.at(Point::new(11, 7)), Cell::default());
    }

    #[test]
    fn draw_without_caption_shows_only_image() {
        let mut tile = PhotoTile::new();
        let px = [10, 200, 30, 255];
        tile.update(&TileViewModel::new(solid(px)).with_caption("x"));
        tile.update(&TileViewModel::new(solid(px)));
        let g = Grid::new(12, 8);
        tile.draw(&g);
        assert!(g.iter().all(|(_, c)| c.ch == ' '));
        assert_eq!(g.at(Point::new(5, 7)).style.bg, Color::from_rgb(10, 200, 30));
    }

    #[test]
    fn draw_after_reuse_shows_nothing_of_previous_item() {
        let mut tile = PhotoTile::new();
        tile.update(&TileViewModel::new(solid([10, 200, 30, 255])).with_caption("A"));
        let g = Grid::new(12, 8);
        tile.draw(&g);
        assert_eq!(g.at(Point::new(5, 6)).ch, 'A');

        tile.prepare_for_reuse();
        tile.draw(&g);
        let stale: Vec<_> = g.iter().filter(|(_, c)| *c != Cell::default()).collect();
        assert!(stale.is_empty(), "cells left after reset: {stale:?}");
        // Caption state itself is untouched until the next bind.
        assert!(tile.is_caption_visible());

        tile.update(&TileViewModel::new(solid(WHITE_PX)).with_caption("B"));
        tile.draw(&g);
        assert_eq!(g.at(Point::new(5, 6)).ch, 'B');
        assert_eq!(g.at(Point::new(5, 6)).style.bg, Color::WHITE);
    }

    #[test]
    fn clipping_follows_style() {
        let style = PhotoTileStyle {
            clips_to_bounds: false,
            ..PhotoTileStyle::default()
        };
        let mut tile = PhotoTile::with_style(style);
        assert!(!tile.clips_to_bounds());
        tile.update(&TileViewModel::new(solid(WHITE_PX)));
        let g = Grid::new(12, 8);
        tile.draw(&g);
        assert_eq!(g.at(Point::new(0, 0)).style.bg, Color::WHITE);
        assert_eq!(g.at(Point::new(11, 7)).style.bg, Color::WHITE);
    }

    #[test]
    fn long_captions_wrap_and_grow_the_panel() {
        let mut tile = PhotoTile::new();
        tile.update(&TileViewModel::new(solid(BLACK_PX)).with_caption("a quiet lake at dawn"));
        let g = Grid::new(12, 10);
        tile.draw(&g);
        // inner width 10: "a quiet", "lake at", "dawn" -> panel rows 5..10
        let row = |y: i32| -> String { (1..11).map(|x| g.at(Point::new(x, y)).ch).collect() };
        assert_eq!(row(6).trim(), "a quiet");
        assert_eq!(row(7).trim(), "lake at");
        assert_eq!(row(8).trim(), "dawn");
        assert_eq!(g.at(Point::new(5, 5)).style.bg, Color::BLACK);
    }

    #[test]
    fn reuse_identifier_is_stable() {
        assert_eq!(<PhotoTile as Reusable>::REUSE_IDENTIFIER, "PhotoTile");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn style_from_partial_json() {
        let style: PhotoTileStyle = serde_json::from_str(r#"{"corner_radius": 0.0}"#).unwrap();
        assert_eq!(style.corner_radius, 0.0);
        assert_eq!(style.caption_font, PhotoTileStyle::default().caption_font);
        assert!(!PhotoTile::with_style(style).draw(&Grid::new(4, 4)).is_empty());
    }
}
