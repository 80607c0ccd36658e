//! Crossterm terminal output for pinboard.
//!
//! Prints a rendered [`Grid`] inline (no alternate screen, no raw mode) using
//! true-colour escape sequences, one terminal line per grid row.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{
        self, Attribute, Color as CtColor, Print, ResetColor, SetBackgroundColor,
        SetForegroundColor,
    },
};

use pinboard_core::{
    Grid, Point,
    style::{AttrMask, Color},
};

/// Maps a [`pinboard_core::Color`] to a [`crossterm::style::Color`].
pub fn to_ct_color(c: Color) -> CtColor {
    if c.is_default() {
        CtColor::Reset
    } else {
        CtColor::Rgb {
            r: c.r(),
            g: c.g(),
            b: c.b(),
        }
    }
}

/// Write every row of `grid` to `out`, resetting colours at the end of each
/// line.
pub fn print_grid<W: Write>(out: &mut W, grid: &Grid) -> io::Result<()> {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let cell = grid.at(Point::new(x, y));
            queue!(
                out,
                SetForegroundColor(to_ct_color(cell.style.fg)),
                SetBackgroundColor(to_ct_color(cell.style.bg))
            )?;

            let attrs = cell.style.attrs;
            if attrs.contains(AttrMask::BOLD) {
                queue!(out, style::SetAttribute(Attribute::Bold))?;
            }
            if attrs.contains(AttrMask::ITALIC) {
                queue!(out, style::SetAttribute(Attribute::Italic))?;
            }
            if attrs.contains(AttrMask::UNDERLINE) {
                queue!(out, style::SetAttribute(Attribute::Underlined))?;
            }
            if attrs.contains(AttrMask::DIM) {
                queue!(out, style::SetAttribute(Attribute::Dim))?;
            }

            queue!(out, Print(cell.ch))?;

            if !attrs.is_empty() {
                queue!(out, style::SetAttribute(Attribute::Reset))?;
            }
        }
        queue!(out, ResetColor, Print("\r\n"))?;
    }
    out.flush()
}
