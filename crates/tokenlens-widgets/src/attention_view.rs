#![forbid(unsafe_code)]

//! The composite attention visualization.
//!
//! [`AttentionView`] owns no data: it borrows the token sequence and the
//! attention matrix and renders through an [`AttentionViewState`] holding
//! the transient selection and the resolved token positions.
//!
//! # Layout
//!
//! The view's area splits into three bands:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │   arc headroom (Braille)     │  edges bow upward into this band
//! │ The   cat   sat              │  token strip (one row)
//! │ Attention for "sat":         │  detail panel (when clicked)
//! │ ...                          │
//! └──────────────────────────────┘
//! ```
//!
//! The token strip sits at a fixed offset from the top so that opening the
//! detail panel never moves the tokens. Edges are painted before the labels
//! and the painter only writes lit cells, so labels always overdraw edges
//! and mouse targets are unaffected by edge geometry.
//!
//! # Geometry resolution
//!
//! Token center positions are resolved from the strip layout once per
//! (token sequence, area) change — never per hover or click, since the
//! positions are stable across those. A token without a laid-out slot
//! resolves to the origin.

use crate::detail::DetailPanel;
use crate::overlay::EdgeOverlay;
use crate::painter::{SUB_COLS, SUB_ROWS};
use crate::token_row::TokenRow;
use crate::{StatefulWidget, Widget};
use tokenlens_core::attention::AttentionMatrix;
use tokenlens_core::event::{Event, MouseButton, MouseEventKind};
use tokenlens_core::geometry::{Point, Rect};
use tokenlens_render::{Buffer, PackedRgba, Style, StyleFlags};

/// Rows of arc headroom above the token strip.
///
/// Bows taller than this clip at the top of the view; the strip placement
/// must not depend on hover state, so the headroom is fixed.
pub const ARC_HEADROOM: u16 = 8;

/// The visualization widget over borrowed data.
#[derive(Debug, Clone)]
pub struct AttentionView<'a> {
    tokens: &'a [String],
    attention: &'a AttentionMatrix,
    edge_hue: PackedRgba,
    token_style: Style,
    hover_style: Style,
    selected_style: Style,
    panel_header_style: Style,
}

impl<'a> AttentionView<'a> {
    /// Create a view over a token sequence and its attention matrix.
    pub fn new(tokens: &'a [String], attention: &'a AttentionMatrix) -> Self {
        Self {
            tokens,
            attention,
            edge_hue: PackedRgba::BLUE,
            token_style: Style::default(),
            hover_style: Style::new().attrs(StyleFlags::REVERSE),
            selected_style: Style::new().attrs(StyleFlags::UNDERLINE),
            panel_header_style: Style::new().attrs(StyleFlags::BOLD),
        }
    }

    /// Set the edge hue.
    pub fn edge_hue(mut self, hue: PackedRgba) -> Self {
        self.edge_hue = hue;
        self
    }

    /// Set the base token label style.
    pub fn token_style(mut self, style: Style) -> Self {
        self.token_style = style;
        self
    }

    /// Set the hovered label style.
    pub fn hover_style(mut self, style: Style) -> Self {
        self.hover_style = style;
        self
    }

    /// Set the clicked label style.
    pub fn selected_style(mut self, style: Style) -> Self {
        self.selected_style = style;
        self
    }

    /// The single-row strip the tokens occupy within `area`.
    pub fn strip(&self, area: Rect) -> Rect {
        let offset = ARC_HEADROOM.min(area.height.saturating_sub(1));
        Rect::new(area.x, area.y + offset, area.width, 1.min(area.height))
    }

    /// The band covering the arc headroom plus the strip row, which is the
    /// painter's coordinate space.
    fn overlay_band(&self, area: Rect) -> Rect {
        let strip = self.strip(area);
        Rect::new(
            area.x,
            area.y,
            area.width,
            strip.bottom().saturating_sub(area.y),
        )
    }

    /// The band below the strip available to the detail panel.
    fn panel_band(&self, area: Rect) -> Rect {
        let strip = self.strip(area);
        let top = strip.bottom().saturating_add(1);
        Rect::new(
            area.x,
            top,
            area.width,
            area.bottom().saturating_sub(top),
        )
    }

    fn token_row(&self, state: &AttentionViewState) -> TokenRow<'a> {
        TokenRow::new(self.tokens)
            .style(self.token_style)
            .hover_style(self.hover_style)
            .selected_style(self.selected_style)
            .hovered(state.hovered)
            .selected(state.selected)
    }

    /// Resolve token centers into view-local sub-pixel coordinates.
    ///
    /// Runs only when the resolved area or the token count is stale;
    /// hover and click churn never re-measures.
    fn resolve_positions(&self, area: Rect, state: &mut AttentionViewState) {
        if state.measured == Some(area) && state.positions.len() == self.tokens.len() {
            return;
        }
        let strip = self.strip(area);
        let slots = self.token_row(state).layout(strip);
        state.positions = slots
            .iter()
            .map(|slot| match slot {
                Some(rect) => Point::new(
                    (rect.x - area.x) as i32 * SUB_COLS as i32 + rect.width as i32,
                    (rect.y - area.y) as i32 * SUB_ROWS as i32 + SUB_ROWS as i32 / 2,
                ),
                None => Point::ORIGIN,
            })
            .collect();
        state.measured = Some(area);
        #[cfg(feature = "tracing")]
        tracing::debug!(tokens = self.tokens.len(), ?area, "resolved token positions");
    }

    /// Route an input event. Returns `true` when the visual state changed.
    pub fn handle_event(
        &self,
        state: &mut AttentionViewState,
        event: &Event,
        area: Rect,
    ) -> bool {
        let Event::Mouse(mouse) = event else {
            return false;
        };
        let strip = self.strip(area);
        let row = self.token_row(state);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let hit = row.hit(strip, mouse.x, mouse.y);
                if hit != state.hovered {
                    state.hovered = hit;
                    return true;
                }
                false
            }
            MouseEventKind::Down(MouseButton::Left) => {
                // Clicking empty space keeps the current selection; clicking
                // the selected token again keeps it selected.
                if let Some(hit) = row.hit(strip, mouse.x, mouse.y)
                    && state.selected != Some(hit)
                {
                    state.selected = Some(hit);
                    return true;
                }
                false
            }
            _ => false,
        }
    }
}

impl StatefulWidget for AttentionView<'_> {
    type State = AttentionViewState;

    fn render(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "AttentionView",
            tokens = self.tokens.len(),
        )
        .entered();

        if area.is_empty() || self.tokens.is_empty() {
            return;
        }

        self.resolve_positions(area, state);

        // Edges first so labels overdraw them.
        if let Some(hovered) = state.hovered
            && state.positions.len() == self.tokens.len()
            && self.attention.n() == self.tokens.len()
        {
            EdgeOverlay::new(&state.positions, self.attention, hovered)
                .hue(self.edge_hue)
                .render(self.overlay_band(area), buf);
        }

        self.token_row(state).render(self.strip(area), buf);

        if let Some(selected) = state.selected
            && selected < self.tokens.len()
            && self.attention.n() == self.tokens.len()
        {
            let panel = self.panel_band(area);
            if !panel.is_empty() {
                DetailPanel::new(self.tokens, self.attention.row(selected), selected)
                    .header_style(self.panel_header_style)
                    .render(panel, buf);
            }
        }
    }
}

/// Transient interaction and measurement state for [`AttentionView`].
#[derive(Debug, Clone, Default)]
pub struct AttentionViewState {
    /// Token under the pointer, if any.
    pub hovered: Option<usize>,
    /// Clicked token, if any. Persists until another token is clicked or
    /// the state is reset.
    pub selected: Option<usize>,
    positions: Vec<Point>,
    measured: Option<Rect>,
}

impl AttentionViewState {
    /// Fresh state with no selection and no resolved positions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all selection and measurement state.
    ///
    /// Call when the visualization closes or the token sequence is
    /// replaced; the next render re-measures.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The resolved token center positions (empty before the first render).
    #[must_use]
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenlens_core::event::MouseEvent;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    fn scenario() -> (Vec<String>, AttentionMatrix) {
        (
            tokens(&["The", "cat", "sat"]),
            AttentionMatrix::new(vec![
                vec![0.0, 0.2, 0.8],
                vec![0.1, 0.0, 0.9],
                vec![0.3, 0.3, 0.4],
            ])
            .unwrap(),
        )
    }

    fn area() -> Rect {
        Rect::new(0, 0, 40, 20)
    }

    fn render(view: &AttentionView<'_>, state: &mut AttentionViewState) -> Buffer {
        let mut buf = Buffer::new(40, 20);
        view.render(area(), &mut buf, state);
        buf
    }

    #[test]
    fn positions_resolve_to_token_count() {
        let (toks, m) = scenario();
        let view = AttentionView::new(&toks, &m);
        let mut state = AttentionViewState::new();
        assert!(state.positions().is_empty());
        render(&view, &mut state);
        assert_eq!(state.positions().len(), toks.len());
    }

    #[test]
    fn positions_survive_hover_changes() {
        let (toks, m) = scenario();
        let view = AttentionView::new(&toks, &m);
        let mut state = AttentionViewState::new();
        render(&view, &mut state);
        let before = state.positions().to_vec();
        state.hovered = Some(1);
        render(&view, &mut state);
        assert_eq!(state.positions(), before.as_slice());
    }

    #[test]
    fn positions_remeasure_on_area_change() {
        let (toks, m) = scenario();
        let view = AttentionView::new(&toks, &m);
        let mut state = AttentionViewState::new();
        render(&view, &mut state);
        let narrow = state.positions().to_vec();
        let mut buf = Buffer::new(60, 20);
        view.render(Rect::new(0, 0, 60, 20), &mut buf, &mut state);
        assert_ne!(state.positions(), narrow.as_slice());
    }

    #[test]
    fn overflowed_token_falls_back_to_origin() {
        let toks = tokens(&["aaaaaaaa", "bbbbbbbb", "cccccccc"]);
        let m = AttentionMatrix::new(vec![vec![0.3; 3]; 3]).unwrap();
        let view = AttentionView::new(&toks, &m);
        let mut state = AttentionViewState::new();
        let mut buf = Buffer::new(12, 12);
        view.render(Rect::new(0, 0, 12, 12), &mut buf, &mut state);
        assert_eq!(state.positions().len(), 3);
        assert_eq!(state.positions()[2], Point::ORIGIN);
    }

    #[test]
    fn hover_enter_and_leave() {
        let (toks, m) = scenario();
        let view = AttentionView::new(&toks, &m);
        let mut state = AttentionViewState::new();
        let strip = view.strip(area());
        let slots = TokenRow::new(&toks).layout(strip);
        let first = slots[0].unwrap();

        let enter = Event::Mouse(MouseEvent::new(MouseEventKind::Moved, first.x, first.y));
        assert!(view.handle_event(&mut state, &enter, area()));
        assert_eq!(state.hovered, Some(0));

        // Moving within the same token is not a change.
        assert!(!view.handle_event(&mut state, &enter, area()));

        let leave = Event::Mouse(MouseEvent::new(MouseEventKind::Moved, 0, 0));
        assert!(view.handle_event(&mut state, &leave, area()));
        assert_eq!(state.hovered, None);
    }

    #[test]
    fn click_selects_and_persists() {
        let (toks, m) = scenario();
        let view = AttentionView::new(&toks, &m);
        let mut state = AttentionViewState::new();
        let strip = view.strip(area());
        let slots = TokenRow::new(&toks).layout(strip);
        let second = slots[1].unwrap();

        let click = Event::Mouse(MouseEvent::new(
            MouseEventKind::Down(MouseButton::Left),
            second.x,
            second.y,
        ));
        assert!(view.handle_event(&mut state, &click, area()));
        assert_eq!(state.selected, Some(1));

        // Clicking empty space does not clear the selection.
        let miss = Event::Mouse(MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 0, 0));
        assert!(!view.handle_event(&mut state, &miss, area()));
        assert_eq!(state.selected, Some(1));

        // Clicking the same token again keeps it selected.
        assert!(!view.handle_event(&mut state, &click, area()));
        assert_eq!(state.selected, Some(1));
    }

    #[test]
    fn hover_and_click_coexist() {
        let (toks, m) = scenario();
        let view = AttentionView::new(&toks, &m);
        let mut state = AttentionViewState::new();
        let strip = view.strip(area());
        let slots = TokenRow::new(&toks).layout(strip);
        let a = slots[0].unwrap();
        let b = slots[2].unwrap();

        let click = Event::Mouse(MouseEvent::new(MouseEventKind::Down(MouseButton::Left), a.x, a.y));
        let hover = Event::Mouse(MouseEvent::new(MouseEventKind::Moved, b.x, b.y));
        view.handle_event(&mut state, &click, area());
        view.handle_event(&mut state, &hover, area());
        assert_eq!(state.selected, Some(0));
        assert_eq!(state.hovered, Some(2));
    }

    #[test]
    fn hover_draws_edges_beneath_labels() {
        let (toks, m) = scenario();
        let view = AttentionView::new(&toks, &m);
        let mut state = AttentionViewState::new();
        state.hovered = Some(0);
        let buf = render(&view, &mut state);

        let braille = buf
            .row(ARC_HEADROOM - 1)
            .iter()
            .any(|c| ('\u{2800}'..='\u{28FF}').contains(&c.ch));
        assert!(braille, "arc band should contain braille strokes");

        // The strip row still shows the token labels, not braille.
        let strip_text: String = buf.row(ARC_HEADROOM).iter().map(|c| c.ch).collect();
        assert!(strip_text.contains("The"));
        assert!(strip_text.contains("sat"));
    }

    #[test]
    fn no_hover_means_no_overlay() {
        let (toks, m) = scenario();
        let view = AttentionView::new(&toks, &m);
        let mut state = AttentionViewState::new();
        let buf = render(&view, &mut state);
        for y in 0..ARC_HEADROOM {
            for cell in buf.row(y) {
                assert!(!('\u{2800}'..='\u{28FF}').contains(&cell.ch));
            }
        }
    }

    #[test]
    fn click_opens_detail_panel_below_strip() {
        let (toks, m) = scenario();
        let view = AttentionView::new(&toks, &m);
        let mut state = AttentionViewState::new();
        state.selected = Some(2);
        let buf = render(&view, &mut state);
        // Panel starts one blank row below the strip.
        let panel_text: String = buf.row(ARC_HEADROOM + 2).iter().map(|c| c.ch).collect();
        assert!(panel_text.contains("Attention for \"sat\":"));
    }

    #[test]
    fn empty_token_list_renders_nothing() {
        let toks: Vec<String> = vec![];
        let m = AttentionMatrix::empty();
        let view = AttentionView::new(&toks, &m);
        let mut state = AttentionViewState::new();
        let buf = render(&view, &mut state);
        for y in 0..buf.height() {
            assert!(buf.row(y).iter().all(|c| c.is_blank()));
        }
        assert!(state.positions().is_empty());
    }

    #[test]
    fn mismatched_matrix_suppresses_overlay_and_panel() {
        // Token count 3, matrix 2×2: the view renders labels only.
        let toks = tokens(&["a", "b", "c"]);
        let m = AttentionMatrix::new(vec![vec![0.5, 0.5], vec![0.5, 0.5]]).unwrap();
        let view = AttentionView::new(&toks, &m);
        let mut state = AttentionViewState::new();
        state.hovered = Some(0);
        state.selected = Some(0);
        let buf = render(&view, &mut state);
        for y in 0..ARC_HEADROOM {
            for cell in buf.row(y) {
                assert!(!('\u{2800}'..='\u{28FF}').contains(&cell.ch));
            }
        }
    }

    #[test]
    fn reset_clears_selection_and_measurement() {
        let (toks, m) = scenario();
        let view = AttentionView::new(&toks, &m);
        let mut state = AttentionViewState::new();
        state.hovered = Some(1);
        state.selected = Some(2);
        render(&view, &mut state);
        state.reset();
        assert_eq!(state.hovered, None);
        assert_eq!(state.selected, None);
        assert!(state.positions().is_empty());
    }
}
