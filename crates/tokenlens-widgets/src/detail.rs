#![forbid(unsafe_code)]

//! The detail panel: one clicked token's full attention distribution.
//!
//! Shows a header naming the clicked token, then one row per token in
//! original order with the score to two decimal places. The same data can
//! be exported as a typeset expression via [`DetailPanel::to_latex`].

use crate::{Widget, draw_text_span, typeset};
use tokenlens_core::geometry::Rect;
use tokenlens_render::{Buffer, Style};
use unicode_width::UnicodeWidthStr;

/// Two-column score table for the clicked token.
#[derive(Debug, Clone)]
pub struct DetailPanel<'a> {
    tokens: &'a [String],
    scores: &'a [f64],
    selected: usize,
    header_style: Style,
    label_style: Style,
    score_style: Style,
}

impl<'a> DetailPanel<'a> {
    /// Create a panel for the clicked token's attention row.
    ///
    /// `scores` is that token's full outgoing row; its length equals the
    /// token count by matrix construction.
    pub fn new(tokens: &'a [String], scores: &'a [f64], selected: usize) -> Self {
        Self {
            tokens,
            scores,
            selected,
            header_style: Style::default(),
            label_style: Style::default(),
            score_style: Style::default(),
        }
    }

    /// Style for the header line.
    pub fn header_style(mut self, style: Style) -> Self {
        self.header_style = style;
        self
    }

    /// Style for the token column.
    pub fn label_style(mut self, style: Style) -> Self {
        self.label_style = style;
        self
    }

    /// Style for the score column.
    pub fn score_style(mut self, style: Style) -> Self {
        self.score_style = style;
        self
    }

    /// The typeset form for the external math renderer.
    #[must_use]
    pub fn to_latex(&self) -> String {
        typeset::display_math(&typeset::attention_array(self.tokens, self.scores))
    }

    /// Width of the token column: the widest label.
    fn label_column_width(&self) -> u16 {
        self.tokens
            .iter()
            .map(|t| UnicodeWidthStr::width(t.as_str()) as u16)
            .max()
            .unwrap_or(0)
    }
}

impl Widget for DetailPanel<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() || self.selected >= self.tokens.len() {
            return;
        }

        let header = format!("Attention for \"{}\":", self.tokens[self.selected]);
        draw_text_span(buf, area.x, area.y, &header, self.header_style, area.right());

        let label_width = self.label_column_width();
        for (index, (token, score)) in self.tokens.iter().zip(self.scores).enumerate() {
            let y = area.y + 1 + index as u16;
            if y >= area.bottom() {
                break;
            }
            let end = draw_text_span(buf, area.x, y, token, self.label_style, area.right());
            // Scores align one gap column after the widest label.
            let score_x = (area.x + label_width + 2).max(end + 1);
            draw_text_span(
                buf,
                score_x,
                y,
                &format!("{score:.2}"),
                self.score_style,
                area.right(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        buf.row(y)
            .iter()
            .filter(|c| !c.is_continuation())
            .map(|c| c.ch)
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn header_names_the_clicked_token() {
        let toks = tokens(&["The", "cat", "sat"]);
        let scores = [0.3, 0.3, 0.4];
        let panel = DetailPanel::new(&toks, &scores, 2);
        let mut buf = Buffer::new(30, 6);
        panel.render(Rect::new(0, 0, 30, 6), &mut buf);
        assert_eq!(row_text(&buf, 0), "Attention for \"sat\":");
    }

    #[test]
    fn rows_in_original_order_with_two_decimals() {
        let toks = tokens(&["The", "cat", "sat"]);
        let scores = [0.3, 0.3, 0.4];
        let panel = DetailPanel::new(&toks, &scores, 2);
        let mut buf = Buffer::new(30, 6);
        panel.render(Rect::new(0, 0, 30, 6), &mut buf);
        assert_eq!(row_text(&buf, 1), "The  0.30");
        assert_eq!(row_text(&buf, 2), "cat  0.30");
        assert_eq!(row_text(&buf, 3), "sat  0.40");
    }

    #[test]
    fn rows_clip_at_panel_bottom() {
        let toks = tokens(&["a", "b", "c", "d"]);
        let scores = [0.25, 0.25, 0.25, 0.25];
        let panel = DetailPanel::new(&toks, &scores, 0);
        let mut buf = Buffer::new(20, 3);
        panel.render(Rect::new(0, 0, 20, 3), &mut buf);
        // Header + two rows fit; rows for "c" and "d" are clipped.
        assert_eq!(row_text(&buf, 1), "a  0.25");
        assert_eq!(row_text(&buf, 2), "b  0.25");
    }

    #[test]
    fn out_of_range_selection_renders_nothing() {
        let toks = tokens(&["a"]);
        let scores = [1.0];
        let panel = DetailPanel::new(&toks, &scores, 5);
        let mut buf = Buffer::new(20, 3);
        panel.render(Rect::new(0, 0, 20, 3), &mut buf);
        assert_eq!(row_text(&buf, 0), "");
    }

    #[test]
    fn latex_export_matches_typeset_module() {
        let toks = tokens(&["x_1", "y"]);
        let scores = [0.5, 0.5];
        let panel = DetailPanel::new(&toks, &scores, 0);
        let latex = panel.to_latex();
        assert!(latex.starts_with("\\[\\begin{array}{l l}"));
        assert!(latex.contains("x\\_1 & 0.50 \\\\"));
        assert!(latex.ends_with("\\end{array}\\]"));
    }
}
