//! Visual styling: [`Color`], [`AttrMask`], and [`Style`].

use std::ops::{BitAnd, BitOr};

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// Bit marking a color as explicitly set, so that black is not the default.
const SET_BIT: u32 = 0xFF00_0000;

/// Luma threshold on the `0..=255_000` scale returned by [`Color::luma`].
pub const DARK_LUMA_THRESHOLD: u32 = 127_500;

/// An RGB colour packed into a `u32` (0xFFRRGGBB when set).
///
/// [`Color::DEFAULT`] is the only value without the high byte set; backends
/// render it with their own default colour.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    /// The default / unset colour.
    pub const DEFAULT: Self = Self(0);
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
    pub const RED: Self = Self::from_rgb(255, 0, 0);
    /// Mid gray, used where no color could be derived.
    pub const NEUTRAL: Self = Self::from_rgb(128, 128, 128);

    /// Construct from individual RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(SET_BIT | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Whether this is [`Color::DEFAULT`].
    #[inline]
    pub const fn is_default(self) -> bool {
        self.0 & SET_BIT == 0
    }

    /// Red component.
    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Green component.
    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Blue component.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Rec. 601 luma scaled by 1000: `299*R + 587*G + 114*B`.
    ///
    /// The result lies in `0..=255_000`; dividing by 1000 gives the usual
    /// `0.299*R + 0.587*G + 0.114*B` on the 0–255 scale.
    #[inline]
    pub const fn luma(self) -> u32 {
        299 * self.r() as u32 + 587 * self.g() as u32 + 114 * self.b() as u32
    }

    /// Whether the colour's luma falls below the midpoint of the scale.
    #[inline]
    pub const fn is_dark(self) -> bool {
        self.luma() < DARK_LUMA_THRESHOLD
    }

    /// White on dark colours, black on light ones.
    #[inline]
    pub const fn contrasting_text(self) -> Self {
        if self.is_dark() { Self::WHITE } else { Self::BLACK }
    }
}

// ---------------------------------------------------------------------------
// AttrMask
// ---------------------------------------------------------------------------

/// Bitmask of text attributes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttrMask(pub u32);

impl AttrMask {
    pub const NONE: Self = Self(0);
    pub const BOLD: Self = Self(1 << 0);
    pub const ITALIC: Self = Self(1 << 1);
    pub const UNDERLINE: Self = Self(1 << 2);
    pub const DIM: Self = Self(1 << 3);

    /// Whether this mask contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether the mask is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for AttrMask {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for AttrMask {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Complete visual style for a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub attrs: AttrMask,
}

impl Style {
    /// Set the foreground colour (builder).
    #[inline]
    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background colour (builder).
    #[inline]
    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }

    /// Set the attribute mask (builder).
    #[inline]
    pub const fn with_attrs(mut self, attrs: AttrMask) -> Self {
        self.attrs = attrs;
        self
    }
}
