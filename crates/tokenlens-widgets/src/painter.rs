#![forbid(unsafe_code)]

//! Braille sub-pixel painter.
//!
//! Each terminal cell maps to a 2×4 grid of sub-pixels rendered with
//! Unicode Braille patterns (U+2800..U+28FF), giving the edge overlay an
//! 8× resolution boost over the cell grid. The painter accumulates pixels
//! on a virtual grid; [`Painter::render`] converts them to glyphs.
//!
//! Coordinates are signed: curve geometry may bow outside the grid and is
//! clipped per pixel.

use tokenlens_core::geometry::{Point, Rect};
use tokenlens_render::{Buffer, Cell, PackedRgba};

/// Sub-pixel columns per terminal cell.
pub const SUB_COLS: u16 = 2;
/// Sub-pixel rows per terminal cell.
pub const SUB_ROWS: u16 = 4;

/// Braille dot bit for each (column, row) of the 2×4 sub-grid.
///
/// Dot numbering: dots 1,2,3,7 run down the left column (bits 0,1,2,6)
/// and dots 4,5,6,8 down the right (bits 3,4,5,7).
const DOT_BITS: [[u8; 4]; 2] = [[0, 1, 2, 6], [3, 4, 5, 7]];

/// A pixel-accumulating drawing surface in Braille sub-pixel resolution.
#[derive(Debug, Clone)]
pub struct Painter {
    /// Width in sub-pixels.
    width: u16,
    /// Height in sub-pixels.
    height: u16,
    /// Row-major pixel buffer (`true` = lit).
    pixels: Vec<bool>,
    /// Per-pixel color; `None` falls back to the render style.
    colors: Vec<Option<PackedRgba>>,
}

impl Painter {
    /// Create a painter with the given sub-pixel dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![false; len],
            colors: vec![None; len],
        }
    }

    /// Create a painter covering a terminal area at full Braille resolution.
    pub fn for_area(area: Rect) -> Self {
        Self::new(area.width * SUB_COLS, area.height * SUB_ROWS)
    }

    /// Sub-pixel dimensions.
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Clear all pixels.
    pub fn clear(&mut self) {
        self.pixels.fill(false);
        self.colors.fill(None);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Check if a pixel is lit.
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map(|i| self.pixels[i]).unwrap_or(false)
    }

    /// The stored color of a pixel, if lit with an explicit color.
    pub fn color_at(&self, x: i32, y: i32) -> Option<PackedRgba> {
        self.index(x, y).and_then(|i| self.colors[i])
    }

    /// Light a single pixel.
    pub fn point(&mut self, x: i32, y: i32, color: Option<PackedRgba>) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = true;
            if color.is_some() {
                self.colors[i] = color;
            }
        }
    }

    /// Draw a line between two sub-pixel positions (Bresenham).
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Option<PackedRgba>) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx: i32 = if x0 < x1 { 1 } else { -1 };
        let sy: i32 = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut cx = x0;
        let mut cy = y0;

        loop {
            self.point(cx, cy, color);
            if cx == x1 && cy == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                if cx == x1 {
                    break;
                }
                err += dy;
                cx += sx;
            }
            if e2 <= dx {
                if cy == y1 {
                    break;
                }
                err += dx;
                cy += sy;
            }
        }
    }

    /// Stroke a quadratic Bézier from `from` to `to` with the given control
    /// point, color and stroke thickness in sub-pixel rows.
    ///
    /// The curve is flattened into line segments; the segment count scales
    /// with the chord length so short edges stay cheap and long edges stay
    /// smooth. Thickness is applied as vertically stacked strokes centered
    /// on the curve.
    pub fn quad_bezier(
        &mut self,
        from: Point,
        control: Point,
        to: Point,
        color: PackedRgba,
        thickness: u16,
    ) {
        let chord = ((to.x - from.x).abs() + (to.y - from.y).abs()).max(1);
        let segments = (chord / 3).clamp(8, 64) as usize;
        let thickness = thickness.max(1) as i32;

        for layer in 0..thickness {
            // Center the stacked strokes on the curve.
            let offset = layer - thickness / 2;
            let mut prev: Option<(i32, i32)> = None;
            for step in 0..=segments {
                let t = step as f64 / segments as f64;
                let (x, y) = eval_quad(from, control, to, t);
                let y = y + offset;
                if let Some((px, py)) = prev {
                    self.line(px, py, x, y, Some(color));
                } else {
                    self.point(x, y, Some(color));
                }
                prev = Some((x, y));
            }
        }
    }

    /// Convert the pixel grid to Braille glyphs in `buf`.
    ///
    /// Only cells with at least one lit pixel are written, so previously
    /// rendered content outside the strokes is left untouched.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let cell_cols = area.width.min(self.width.div_ceil(SUB_COLS));
        let cell_rows = area.height.min(self.height.div_ceil(SUB_ROWS));

        for cy in 0..cell_rows {
            for cx in 0..cell_cols {
                let (bits, color) =
                    self.braille_cell((cx * SUB_COLS) as i32, (cy * SUB_ROWS) as i32);
                if bits == 0 {
                    continue;
                }
                let Some(ch) = char::from_u32(0x2800 + bits as u32) else {
                    continue;
                };
                let mut cell = Cell::from_char(ch);
                if let Some(c) = color {
                    cell.fg = c;
                }
                buf.set(area.x.saturating_add(cx), area.y.saturating_add(cy), cell);
            }
        }
    }

    /// Dot bits and representative color for the 2×4 block at (px, py).
    fn braille_cell(&self, px: i32, py: i32) -> (u8, Option<PackedRgba>) {
        let mut bits: u8 = 0;
        let mut color: Option<PackedRgba> = None;

        for col in 0..2i32 {
            for row in 0..4i32 {
                if self.get(px + col, py + row) {
                    bits |= 1 << DOT_BITS[col as usize][row as usize];
                    if color.is_none() {
                        color = self.color_at(px + col, py + row);
                    }
                }
            }
        }
        (bits, color)
    }
}

fn eval_quad(from: Point, control: Point, to: Point, t: f64) -> (i32, i32) {
    let u = 1.0 - t;
    let x = u * u * from.x as f64 + 2.0 * u * t * control.x as f64 + t * t * to.x as f64;
    let y = u * u * from.y as f64 + 2.0 * u * t * control.y as f64 + t * t * to.y as f64;
    (x.round() as i32, y.round() as i32)
}
