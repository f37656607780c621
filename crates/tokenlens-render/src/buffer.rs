#![forbid(unsafe_code)]

//! The render buffer: a row-major grid of cells.

use crate::cell::Cell;
use tokenlens_core::geometry::Rect;
use unicode_width::UnicodeWidthChar;

/// A rectangular grid of [`Cell`]s that widgets render into.
///
/// Out-of-bounds writes are ignored, so widgets may draw geometry that
/// partially leaves the grid without pre-clipping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a buffer filled with blank cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    /// Width in columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The full grid as a rectangle at the origin.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Read a cell, `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Mutable access to a cell, `None` when out of bounds.
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Write a cell.
    ///
    /// A character of display width 2 also claims the following cell with a
    /// continuation marker (when it fits; a wide character on the last
    /// column is dropped rather than half-drawn). Out-of-bounds writes are
    /// ignored.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        let width = cell.ch.width().unwrap_or(0);
        if width == 2 {
            // Needs both columns to land.
            let Some(second) = self.index(x.saturating_add(1), y) else {
                return;
            };
            let Some(first) = self.index(x, y) else {
                return;
            };
            self.cells[first] = cell;
            self.cells[second] = Cell::CONTINUATION;
            return;
        }
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Fill a rectangle with copies of one cell, clipped to the grid.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let rect = rect.intersection(&self.bounds());
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                if let Some(i) = self.index(x, y) {
                    self.cells[i] = cell;
                }
            }
        }
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// One row of cells.
    ///
    /// # Panics
    ///
    /// Panics if `y` is out of range.
    pub fn row(&self, y: u16) -> &[Cell] {
        assert!(y < self.height, "row out of range");
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::PackedRgba;

    #[test]
    fn new_buffer_is_blank() {
        let buf = Buffer::new(4, 3);
        assert_eq!(buf.width(), 4);
        assert_eq!(buf.height(), 3);
        assert!(buf.get(0, 0).unwrap().is_blank());
        assert!(buf.get(3, 2).unwrap().is_blank());
    }

    #[test]
    fn get_out_of_bounds_is_none() {
        let buf = Buffer::new(4, 3);
        assert!(buf.get(4, 0).is_none());
        assert!(buf.get(0, 3).is_none());
    }

    #[test]
    fn set_and_get() {
        let mut buf = Buffer::new(4, 3);
        buf.set(2, 1, Cell::from_char('x'));
        assert_eq!(buf.get(2, 1).unwrap().ch, 'x');
    }

    #[test]
    fn set_out_of_bounds_is_ignored() {
        let mut buf = Buffer::new(2, 2);
        buf.set(9, 9, Cell::from_char('x'));
        // No panic, nothing changed.
        assert!(buf.get(0, 0).unwrap().is_blank());
    }

    #[test]
    fn wide_char_claims_continuation() {
        let mut buf = Buffer::new(4, 1);
        buf.set(1, 0, Cell::from_char('世'));
        assert_eq!(buf.get(1, 0).unwrap().ch, '世');
        assert!(buf.get(2, 0).unwrap().is_continuation());
    }

    #[test]
    fn wide_char_on_last_column_is_dropped() {
        let mut buf = Buffer::new(2, 1);
        buf.set(1, 0, Cell::from_char('世'));
        assert!(buf.get(1, 0).unwrap().is_blank());
    }

    #[test]
    fn fill_clips_to_bounds() {
        let mut buf = Buffer::new(3, 3);
        let cell = Cell::from_char('#').with_bg(PackedRgba::BLUE);
        buf.fill(Rect::new(2, 2, 10, 10), cell);
        assert_eq!(buf.get(2, 2).unwrap().ch, '#');
        assert_eq!(buf.get(1, 1).unwrap().ch, ' ');
    }

    #[test]
    fn clear_resets() {
        let mut buf = Buffer::new(2, 2);
        buf.set(0, 0, Cell::from_char('x'));
        buf.clear();
        assert!(buf.get(0, 0).unwrap().is_blank());
    }

    #[test]
    fn row_slices_line() {
        let mut buf = Buffer::new(3, 2);
        buf.set(0, 1, Cell::from_char('a'));
        buf.set(2, 1, Cell::from_char('b'));
        let row: Vec<char> = buf.row(1).iter().map(|c| c.ch).collect();
        assert_eq!(row, vec!['a', ' ', 'b']);
    }
}
