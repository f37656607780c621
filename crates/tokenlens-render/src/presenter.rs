#![forbid(unsafe_code)]

//! Full-frame ANSI presenter.
//!
//! Emits CUP/SGR escape sequences for every row of a [`Buffer`] to any
//! `io::Write`. This application repaints only on interaction events and
//! its frames are small, so there is no damage diffing; every present is a
//! full repaint with redundant-SGR suppression within a row.
//!
//! Alpha flattening happens here: terminals have no alpha channel, so any
//! translucent foreground or background is composited over the configured
//! terminal background before the color is emitted.

use std::io::{self, Write};

use crate::buffer::Buffer;
use crate::cell::{Cell, PackedRgba, StyleFlags};

/// Writes buffers to a terminal as ANSI escape sequences.
#[derive(Debug, Clone)]
pub struct Presenter {
    background: PackedRgba,
}

impl Presenter {
    /// Create a presenter that flattens alpha against `background`.
    #[must_use]
    pub const fn new(background: PackedRgba) -> Self {
        Self { background }
    }

    /// The background used for alpha flattening.
    #[must_use]
    pub const fn background(&self) -> PackedRgba {
        self.background
    }

    /// Resolve a cell's displayable colors: translucency composited over
    /// the terminal background, reverse video applied.
    fn resolve(&self, cell: &Cell) -> (PackedRgba, PackedRgba) {
        let bg = if cell.bg.is_opaque() {
            cell.bg
        } else {
            cell.bg.over(self.background)
        };
        let fg = if cell.fg.is_opaque() {
            cell.fg
        } else {
            cell.fg.over(bg)
        };
        if cell.attrs.contains(StyleFlags::REVERSE) {
            (bg, fg)
        } else {
            (fg, bg)
        }
    }

    /// Write the whole buffer, starting at the terminal origin.
    ///
    /// The cursor is expected to be hidden by the terminal session; the
    /// presenter does not manage cursor visibility.
    pub fn present<W: Write>(&self, buffer: &Buffer, out: &mut W) -> io::Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!(
            "present",
            width = buffer.width(),
            height = buffer.height()
        )
        .entered();

        for y in 0..buffer.height() {
            // CUP to the start of the row (1-indexed coordinates).
            write!(out, "\x1b[{};1H", y + 1)?;
            let mut last: Option<(PackedRgba, PackedRgba, StyleFlags)> = None;
            for cell in buffer.row(y) {
                if cell.is_continuation() {
                    continue;
                }
                let (fg, bg) = self.resolve(cell);
                let key = (fg, bg, cell.attrs);
                if last != Some(key) {
                    write_sgr(out, fg, bg, cell.attrs)?;
                    last = Some(key);
                }
                write!(out, "{}", cell.ch)?;
            }
            write!(out, "\x1b[0m")?;
        }
        out.flush()
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new(PackedRgba::BLACK)
    }
}

fn write_sgr<W: Write>(
    out: &mut W,
    fg: PackedRgba,
    bg: PackedRgba,
    attrs: StyleFlags,
) -> io::Result<()> {
    write!(out, "\x1b[0")?;
    if attrs.contains(StyleFlags::BOLD) {
        write!(out, ";1")?;
    }
    if attrs.contains(StyleFlags::DIM) {
        write!(out, ";2")?;
    }
    if attrs.contains(StyleFlags::ITALIC) {
        write!(out, ";3")?;
    }
    if attrs.contains(StyleFlags::UNDERLINE) {
        write!(out, ";4")?;
    }
    write!(out, ";38;2;{};{};{}", fg.r(), fg.g(), fg.b())?;
    if bg == PackedRgba::TRANSPARENT {
        // Keep the terminal's default background.
        write!(out, ";49")?;
    } else {
        write!(out, ";48;2;{};{};{}", bg.r(), bg.g(), bg.b())?;
    }
    write!(out, "m")
}
