#![forbid(unsafe_code)]

//! The token strip: one row of token labels with hover/selection emphasis.
//!
//! Layout is the geometry source of truth for the whole visualization:
//! [`TokenRow::layout`] produces one slot per token, and those slots feed
//! both mouse hit-testing and the position resolution that drives the edge
//! overlay.

use crate::{Widget, draw_text_span};
use tokenlens_core::geometry::Rect;
use tokenlens_render::{Buffer, Style};
use unicode_width::UnicodeWidthStr;

/// Blank columns between adjacent tokens.
pub const TOKEN_GAP: u16 = 2;

/// A single-row strip of token labels.
#[derive(Debug, Clone)]
pub struct TokenRow<'a> {
    tokens: &'a [String],
    style: Style,
    hover_style: Style,
    selected_style: Style,
    hovered: Option<usize>,
    selected: Option<usize>,
}

impl<'a> TokenRow<'a> {
    /// Create a token row over a token slice.
    pub fn new(tokens: &'a [String]) -> Self {
        Self {
            tokens,
            style: Style::default(),
            hover_style: Style::default(),
            selected_style: Style::default(),
            hovered: None,
            selected: None,
        }
    }

    /// Base style for all labels.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Style layered over the hovered label.
    pub fn hover_style(mut self, style: Style) -> Self {
        self.hover_style = style;
        self
    }

    /// Style layered over the clicked label.
    pub fn selected_style(mut self, style: Style) -> Self {
        self.selected_style = style;
        self
    }

    /// Mark a label as hovered.
    pub fn hovered(mut self, index: Option<usize>) -> Self {
        self.hovered = index;
        self
    }

    /// Mark a label as clicked.
    pub fn selected(mut self, index: Option<usize>) -> Self {
        self.selected = index;
        self
    }

    /// Display width of one token label in columns (at least 1).
    fn label_width(token: &str) -> u16 {
        (UnicodeWidthStr::width(token) as u16).max(1)
    }

    /// Compute one slot per token on the strip's row.
    ///
    /// The strip is centered in `area` when it fits and left-aligned when
    /// it does not. A token whose slot would cross the right edge gets
    /// `None` — it has no backing slot, and position resolution falls back
    /// to the origin for it.
    pub fn layout(&self, area: Rect) -> Vec<Option<Rect>> {
        if area.is_empty() {
            return vec![None; self.tokens.len()];
        }

        let widths: Vec<u16> = self.tokens.iter().map(|t| Self::label_width(t)).collect();
        let gaps = (self.tokens.len().saturating_sub(1)) as u16;
        let total: u16 = widths
            .iter()
            .fold(0u16, |acc, w| acc.saturating_add(*w))
            .saturating_add(gaps.saturating_mul(TOKEN_GAP));

        let mut x = area.x + area.width.saturating_sub(total) / 2;
        let mut slots = Vec::with_capacity(self.tokens.len());
        for &w in &widths {
            if x.saturating_add(w) > area.right() {
                slots.push(None);
                continue;
            }
            slots.push(Some(Rect::new(x, area.y, w, 1)));
            x = x.saturating_add(w).saturating_add(TOKEN_GAP);
        }
        slots
    }

    /// Index of the token whose slot contains the given cell position.
    pub fn hit(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        self.layout(area)
            .iter()
            .position(|slot| slot.is_some_and(|r| r.contains(x, y)))
    }
}

impl Widget for TokenRow<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() || self.tokens.is_empty() {
            return;
        }
        for (index, slot) in self.layout(area).into_iter().enumerate() {
            let Some(slot) = slot else { continue };
            let mut style = self.style;
            if self.selected == Some(index) {
                style = merge(style, self.selected_style);
            }
            if self.hovered == Some(index) {
                style = merge(style, self.hover_style);
            }
            draw_text_span(buf, slot.x, slot.y, &self.tokens[index], style, slot.right());
        }
    }
}

/// Layer `over` on top of `base`: fields set in `over` win.
fn merge(base: Style, over: Style) -> Style {
    Style {
        fg: over.fg.or(base.fg),
        bg: over.bg.or(base.bg),
        attrs: over.attrs.or(base.attrs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenlens_render::{PackedRgba, StyleFlags};

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn layout_one_slot_per_token() {
        let toks = tokens(&["The", "cat", "sat"]);
        let row = TokenRow::new(&toks);
        let slots = row.layout(Rect::new(0, 5, 40, 1));
        assert_eq!(slots.len(), 3);
        assert!(slots.iter().all(Option::is_some));
    }

    #[test]
    fn layout_is_centered_with_gaps() {
        let toks = tokens(&["ab", "cd"]);
        let row = TokenRow::new(&toks);
        let slots = row.layout(Rect::new(0, 0, 10, 1));
        // Total width 2+2+gap(2) = 6, centered in 10 -> starts at 2.
        assert_eq!(slots[0], Some(Rect::new(2, 0, 2, 1)));
        assert_eq!(slots[1], Some(Rect::new(6, 0, 2, 1)));
    }

    #[test]
    fn layout_empty_tokens() {
        let toks: Vec<String> = vec![];
        let row = TokenRow::new(&toks);
        assert!(row.layout(Rect::new(0, 0, 10, 1)).is_empty());
    }

    #[test]
    fn overflowing_tokens_get_no_slot() {
        let toks = tokens(&["aaaa", "bbbb", "cccc"]);
        let row = TokenRow::new(&toks);
        let slots = row.layout(Rect::new(0, 0, 9, 1));
        // 4+2+4+2+4 = 16 > 9: the tail cannot fit.
        assert!(slots[0].is_some());
        assert!(slots[2].is_none());
        assert_eq!(slots.len(), 3);
    }

    #[test]
    fn hit_finds_token_under_cursor() {
        let toks = tokens(&["ab", "cd"]);
        let row = TokenRow::new(&toks);
        let area = Rect::new(0, 3, 10, 1);
        assert_eq!(row.hit(area, 2, 3), Some(0));
        assert_eq!(row.hit(area, 7, 3), Some(1));
        // Gap between tokens hits nothing.
        assert_eq!(row.hit(area, 4, 3), None);
        // Wrong row hits nothing.
        assert_eq!(row.hit(area, 2, 4), None);
    }

    #[test]
    fn render_draws_labels() {
        let toks = tokens(&["hi"]);
        let row = TokenRow::new(&toks);
        let mut buf = Buffer::new(6, 1);
        row.render(Rect::new(0, 0, 6, 1), &mut buf);
        // Width 2 centered in 6 -> starts at 2.
        assert_eq!(buf.get(2, 0).unwrap().ch, 'h');
        assert_eq!(buf.get(3, 0).unwrap().ch, 'i');
    }

    #[test]
    fn hover_style_layers_over_base() {
        let toks = tokens(&["a", "b"]);
        let row = TokenRow::new(&toks)
            .style(Style::new().fg(PackedRgba::WHITE))
            .hover_style(Style::new().attrs(StyleFlags::REVERSE))
            .hovered(Some(0));
        let mut buf = Buffer::new(4, 1);
        let area = Rect::new(0, 0, 4, 1);
        row.render(area, &mut buf);
        let slots = row.layout(area);
        let a = slots[0].unwrap();
        let b = slots[1].unwrap();
        let hovered = buf.get(a.x, 0).unwrap();
        let plain = buf.get(b.x, 0).unwrap();
        assert!(hovered.attrs.contains(StyleFlags::REVERSE));
        assert_eq!(hovered.fg, PackedRgba::WHITE);
        assert!(!plain.attrs.contains(StyleFlags::REVERSE));
    }

    #[test]
    fn render_into_empty_area_is_noop() {
        let toks = tokens(&["a"]);
        let row = TokenRow::new(&toks);
        let mut buf = Buffer::new(4, 1);
        row.render(Rect::new(0, 0, 0, 0), &mut buf);
        assert!(buf.get(0, 0).unwrap().is_blank());
    }
}
