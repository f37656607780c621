#![forbid(unsafe_code)]

//! Widgets for the attention visualization.
//!
//! The composite [`AttentionView`](attention_view::AttentionView) is the
//! public surface; the other modules are its parts, each independently
//! renderable and testable:
//!
//! - [`token_row`] lays out and draws the token strip,
//! - [`painter`] is the Braille sub-pixel drawing surface,
//! - [`overlay`] turns attention weights into curved edges,
//! - [`detail`] is the clicked token's score table,
//! - [`typeset`] produces the LaTeX form for an external math renderer.

pub mod attention_view;
pub mod detail;
pub mod overlay;
pub mod painter;
pub mod token_row;
pub mod typeset;

use tokenlens_core::geometry::Rect;
use tokenlens_render::{Buffer, Cell, Style};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A `Widget` renders itself into a buffer within a given area.
pub trait Widget {
    /// Render the widget into the buffer at the given area.
    fn render(&self, area: Rect, buf: &mut Buffer);
}

/// A widget that renders based on mutable state.
pub trait StatefulWidget {
    type State;

    /// Render the widget into the buffer with mutable state.
    fn render(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State);
}

/// Draw a text span at (x, y), stopping at `max_x` (exclusive).
///
/// Returns the x position after the last drawn character. Graphemes whose
/// width would cross `max_x` are not drawn. Low-level helper shared by the
/// widgets and the app shell's chrome.
pub fn draw_text_span(
    buf: &mut Buffer,
    mut x: u16,
    y: u16,
    content: &str,
    style: Style,
    max_x: u16,
) -> u16 {
    for grapheme in content.graphemes(true) {
        if x >= max_x {
            break;
        }
        let w = UnicodeWidthStr::width(grapheme);
        if w == 0 {
            continue;
        }
        if x + w as u16 > max_x {
            break;
        }
        if let Some(c) = grapheme.chars().next() {
            let mut cell = Cell::from_char(c);
            style.apply(&mut cell);
            buf.set(x, y, cell);
        }
        x = x.saturating_add(w as u16);
    }
    x
}
