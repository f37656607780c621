#![forbid(unsafe_code)]

//! Styles: optional overrides applied on top of a cell's current state.
//!
//! A `Style` only touches the fields it sets, so widgets can layer an
//! emphasis style over a base style without clobbering unrelated fields.

use crate::cell::{Cell, PackedRgba, StyleFlags};

/// A set of optional cell overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground override.
    pub fg: Option<PackedRgba>,
    /// Background override.
    pub bg: Option<PackedRgba>,
    /// Style flag override.
    pub attrs: Option<StyleFlags>,
}

impl Style {
    /// An empty style that changes nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, fg: PackedRgba) -> Self {
        self.fg = Some(fg);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, bg: PackedRgba) -> Self {
        self.bg = Some(bg);
        self
    }

    /// Set the style flags.
    #[must_use]
    pub const fn attrs(mut self, attrs: StyleFlags) -> Self {
        self.attrs = Some(attrs);
        self
    }

    /// Whether the style changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_none()
    }

    /// Apply this style's overrides to a cell.
    pub fn apply(&self, cell: &mut Cell) {
        if let Some(fg) = self.fg {
            cell.fg = fg;
        }
        if let Some(bg) = self.bg {
            cell.bg = bg;
        }
        if let Some(attrs) = self.attrs {
            cell.attrs = attrs;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_style_is_noop() {
        let mut cell = Cell::from_char('Z');
        let before = cell;
        Style::new().apply(&mut cell);
        assert_eq!(cell, before);
        assert!(Style::new().is_empty());
    }

    #[test]
    fn fg_override_preserves_content() {
        let mut cell = Cell::from_char('Z');
        Style::new().fg(PackedRgba::BLUE).apply(&mut cell);
        assert_eq!(cell.fg, PackedRgba::BLUE);
        assert_eq!(cell.ch, 'Z');
        assert_eq!(cell.bg, PackedRgba::TRANSPARENT);
    }

    #[test]
    fn attrs_override() {
        let mut cell = Cell::default();
        Style::new().attrs(StyleFlags::BOLD | StyleFlags::UNDERLINE).apply(&mut cell);
        assert!(cell.attrs.contains(StyleFlags::BOLD));
        assert!(cell.attrs.contains(StyleFlags::UNDERLINE));
    }
}
