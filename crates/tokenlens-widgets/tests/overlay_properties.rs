//! Property-based tests for the overlay and typeset modules.
//!
//! Invariants checked for arbitrary inputs:
//!
//! 1. No edge ever targets the hovered token, and no edge carries a
//!    non-positive weight.
//! 2. The edge count equals the number of positive off-diagonal weights in
//!    the hovered row.
//! 3. Edge opacity equals the weight and stroke thickness is monotone in
//!    the weight.
//! 4. Position resolution always yields exactly one position per token.
//! 5. Escaping adds exactly one backslash per special character and leaves
//!    everything else untouched.

use proptest::prelude::*;
use tokenlens_core::attention::AttentionMatrix;
use tokenlens_core::geometry::{Point, Rect};
use tokenlens_render::Buffer;
use tokenlens_widgets::StatefulWidget;
use tokenlens_widgets::attention_view::{AttentionView, AttentionViewState};
use tokenlens_widgets::overlay::{Edge, EdgeOverlay, STROKE_SCALE};
use tokenlens_widgets::typeset::escape_math;

const SPECIAL: [char; 10] = ['#', '%', '&', '~', '_', '^', '\\', '{', '}', '$'];

fn weights_strategy(n: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(prop::collection::vec(-0.2f64..1.0, n), n)
}

fn positions(n: usize) -> Vec<Point> {
    (0..n).map(|i| Point::new(i as i32 * 8 + 4, 30)).collect()
}

proptest! {
    #[test]
    fn edges_skip_self_and_nonpositive(
        n in 1usize..10,
        hovered_seed in 0usize..10,
        rows_seed in weights_strategy(10),
    ) {
        let hovered = hovered_seed % n;
        let rows: Vec<Vec<f64>> = rows_seed[..n].iter().map(|r| r[..n].to_vec()).collect();
        let m = AttentionMatrix::new(rows.clone()).unwrap();
        let pos = positions(n);
        let edges = EdgeOverlay::new(&pos, &m, hovered).edges();

        for edge in &edges {
            prop_assert_ne!(edge.target, hovered);
            prop_assert!(edge.weight > 0.0);
        }

        let expected = (0..n)
            .filter(|&t| t != hovered && rows[hovered][t] > 0.0)
            .count();
        prop_assert_eq!(edges.len(), expected);
    }

    #[test]
    fn opacity_equals_weight_and_thickness_is_monotone(
        w1 in 0.001f64..1.0,
        w2 in 0.001f64..1.0,
    ) {
        let (lo, hi) = if w1 <= w2 { (w1, w2) } else { (w2, w1) };
        let m = AttentionMatrix::new(vec![vec![0.0, lo, hi], vec![0.0; 3], vec![0.0; 3]]).unwrap();
        let pos = positions(3);
        let overlay = EdgeOverlay::new(&pos, &m, 0);
        let edges = overlay.edges();
        let lo_edge = edges.iter().find(|e| e.target == 1).unwrap();
        let hi_edge = edges.iter().find(|e| e.target == 2).unwrap();

        prop_assert_eq!(
            overlay.edge_color(lo).a(),
            (lo as f32 * 255.0).round() as u8
        );
        prop_assert!(lo_edge.thickness() <= hi_edge.thickness());
        prop_assert!(overlay.edge_color(lo_edge.weight).a() <= overlay.edge_color(hi_edge.weight).a());
    }

    #[test]
    fn thickness_is_scaled_weight(w in 0.001f64..1.0) {
        let edge = Edge {
            target: 1,
            weight: w,
            from: Point::ORIGIN,
            control: Point::ORIGIN,
            to: Point::new(10, 0),
        };
        let expected = ((w * STROKE_SCALE).round() as u16).max(1);
        prop_assert_eq!(edge.thickness(), expected);
    }

    #[test]
    fn one_position_per_token(
        words in prop::collection::vec("[a-zA-Z]{1,8}", 0..20),
        width in 4u16..80,
        height in 2u16..30,
    ) {
        let n = words.len();
        let m = AttentionMatrix::new(vec![vec![0.5; n]; n]).unwrap();
        let view = AttentionView::new(&words, &m);
        let mut state = AttentionViewState::new();
        let mut buf = Buffer::new(width, height);
        view.render(Rect::new(0, 0, width, height), &mut buf, &mut state);
        if n == 0 {
            prop_assert!(state.positions().is_empty());
        } else {
            prop_assert_eq!(state.positions().len(), n);
        }
    }

    #[test]
    fn escaping_prefixes_specials_only(s in ".{0,60}") {
        let escaped = escape_math(&s);
        let specials = s.chars().filter(|c| SPECIAL.contains(c)).count();
        prop_assert_eq!(escaped.chars().count(), s.chars().count() + specials);

        // Dropping one backslash before each special reconstructs the input.
        let mut reconstructed = String::new();
        let mut chars = escaped.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\\'
                && let Some(&next) = chars.peek()
                && SPECIAL.contains(&next)
            {
                reconstructed.push(chars.next().unwrap());
                continue;
            }
            reconstructed.push(c);
        }
        prop_assert_eq!(reconstructed, s);
    }
}
