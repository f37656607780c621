#![forbid(unsafe_code)]

//! The attention edge overlay.
//!
//! While a token is hovered, every positive outgoing weight becomes one
//! curved edge from the hovered token to its target. Edge geometry and
//! styling are pure functions of (positions, attention, hovered index):
//!
//! - control point: horizontally midway, lifted above the source by an
//!   amount proportional to the index distance — a de-cluttering bow with
//!   no semantic meaning;
//! - stroke thickness: weight × [`STROKE_SCALE`] sub-pixel rows;
//! - color: a fixed hue whose alpha equals the weight, so weight 1.0 is
//!   fully opaque and near-zero weights are barely visible.
//!
//! Self-loops and non-positive weights produce no edge.

use crate::Widget;
use crate::painter::{Painter, SUB_ROWS};
use tokenlens_core::attention::AttentionMatrix;
use tokenlens_core::geometry::{Point, Rect};
use tokenlens_render::{Buffer, PackedRgba};

/// Stroke thickness per unit weight, in sub-pixel rows.
pub const STROKE_SCALE: f64 = 5.0;

/// Vertical control-point lift per index of separation, in sub-pixels.
///
/// One and a half cell rows per index step: adjacent tokens get a shallow
/// arc, distant tokens bow higher so overlapping edges stay readable.
pub const BOW_PER_INDEX: i32 = (SUB_ROWS as i32 / 2) * 3;

/// One attention edge, resolved to drawable geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Target token index.
    pub target: usize,
    /// Attention weight from the hovered token to the target.
    pub weight: f64,
    /// Hovered token center.
    pub from: Point,
    /// Bézier control point.
    pub control: Point,
    /// Target token center.
    pub to: Point,
}

impl Edge {
    /// Stroke thickness in sub-pixel rows (at least one).
    #[must_use]
    pub fn thickness(&self) -> u16 {
        ((self.weight * STROKE_SCALE).round() as u16).max(1)
    }
}

/// Renders the hovered token's outgoing edges.
#[derive(Debug, Clone)]
pub struct EdgeOverlay<'a> {
    positions: &'a [Point],
    attention: &'a AttentionMatrix,
    hovered: usize,
    hue: PackedRgba,
}

impl<'a> EdgeOverlay<'a> {
    /// Create an overlay for one hovered token.
    pub fn new(positions: &'a [Point], attention: &'a AttentionMatrix, hovered: usize) -> Self {
        Self {
            positions,
            attention,
            hovered,
            hue: PackedRgba::BLUE,
        }
    }

    /// Set the edge hue (alpha is derived per edge from the weight).
    pub fn hue(mut self, hue: PackedRgba) -> Self {
        self.hue = hue;
        self
    }

    /// The stroke color for a given weight: the hue at `weight` opacity.
    #[must_use]
    pub fn edge_color(&self, weight: f64) -> PackedRgba {
        self.hue.with_opacity(weight as f32)
    }

    /// Resolve the edges to draw.
    ///
    /// Empty when the position list does not cover the token count (the
    /// resolver has not run for this sequence yet) or the hovered index is
    /// out of range.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge> {
        let n = self.attention.n();
        if self.positions.len() != n || self.hovered >= n {
            return Vec::new();
        }

        let from = self.positions[self.hovered];
        let mut edges = Vec::new();
        for target in 0..n {
            if target == self.hovered {
                continue;
            }
            let weight = self.attention.weight(self.hovered, target);
            if weight <= 0.0 {
                continue;
            }
            let to = self.positions[target];
            let distance = self.hovered.abs_diff(target) as i32;
            let control = Point::new(
                from.midpoint(to).x,
                from.y - distance * BOW_PER_INDEX,
            );
            edges.push(Edge {
                target,
                weight,
                from,
                control,
                to,
            });
        }
        edges
    }
}

impl Widget for EdgeOverlay<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let edges = self.edges();
        if edges.is_empty() {
            return;
        }
        let mut painter = Painter::for_area(area);
        for edge in &edges {
            painter.quad_bezier(
                edge.from,
                edge.control,
                edge.to,
                self.edge_color(edge.weight),
                edge.thickness(),
            );
        }
        painter.render(area, buf);
    }
}
