//! Grid geometry for the wrapped sequence display.
//!
//! A sequence of length L shown at row width W occupies ceil(L / W) grid
//! rows. This module converts between the two coordinate spaces:
//! - a flat 0-based position into the raw sequence, and
//! - a 1-based (row, column) cell in the wrapped grid.
//!
//! Two cell-to-position mappings exist side by side:
//! - [`GridLayout::offset`] is the strict inverse of [`GridLayout::coordinate`]
//!   (`offset(coordinate(p)) == p` for every position in `[0, length]`);
//! - [`GridLayout::position`] keeps the historical viewer formula, which lands
//!   one past the base in the cell (an exclusive end anchor, kept for
//!   compatibility with exported spans).

use std::ops::Range;

/// A cell in the wrapped display grid. Both fields are 1-based; `col` may be
/// one past the last populated column of the final row (the line end).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCoord {
    pub row: usize,
    pub col: usize,
}

impl GridCoord {
    /// Creates a cell coordinate.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Stateless conversions between flat positions and grid cells,
/// parameterized by the row width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    row_width: usize,
}

impl GridLayout {
    /// Creates a layout wrapping at `row_width` columns.
    ///
    /// # Panics
    ///
    /// Panics if `row_width` is zero.
    pub fn new(row_width: usize) -> Self {
        assert!(row_width > 0, "row width must be positive");
        Self { row_width }
    }

    /// Returns the row width.
    pub fn row_width(&self) -> usize {
        self.row_width
    }

    /// Number of grid rows needed to display `len` bases.
    pub fn row_count(&self, len: usize) -> usize {
        len.div_ceil(self.row_width)
    }

    /// The cell at which the base at `pos` is displayed.
    ///
    /// Valid for any `pos` in `[0, length]`; at `pos == length` the result
    /// denotes the vacant cell just past the last base.
    pub fn coordinate(&self, pos: usize) -> GridCoord {
        GridCoord {
            row: 1 + pos / self.row_width,
            col: 1 + pos % self.row_width,
        }
    }

    /// Historical cell-to-position mapping: `(row - 1) * width + col`.
    ///
    /// Applied to the cell of base `p` this yields `p + 1`, so it addresses
    /// the position just past that base: the exclusive end of a span that
    /// includes it. Counterpart of [`GridLayout::offset`], which recovers
    /// the base itself.
    pub fn position(&self, coord: GridCoord) -> usize {
        (coord.row - 1) * self.row_width + coord.col
    }

    /// Strict inverse of [`GridLayout::coordinate`]:
    /// `offset(coordinate(p)) == p` for every valid position.
    pub fn offset(&self, coord: GridCoord) -> usize {
        (coord.row - 1) * self.row_width + (coord.col - 1)
    }

    /// Resolves a drag between two cells into a `[start, end)` position
    /// span. Endpoints are normalized, so dragging from A to B and from B
    /// to A produce the same span; a single-cell drag spans one base.
    pub fn selection_span(&self, a: GridCoord, b: GridCoord) -> (usize, usize) {
        let (first, last) = if self.offset(a) <= self.offset(b) {
            (a, b)
        } else {
            (b, a)
        };
        (self.offset(first), self.position(last))
    }

    /// Position range covered by grid row `row` (1-based) of a sequence of
    /// `len` bases. Rows past the end yield an empty range.
    pub fn row_bounds(&self, row: usize, len: usize) -> Range<usize> {
        let start = ((row - 1) * self.row_width).min(len);
        let end = ((row - 1) * self.row_width + self.row_width).min(len);
        start..end
    }

    /// 1-based sequence position of the first cell on grid row `row`,
    /// shown in the position gutter.
    pub fn row_label(&self, row: usize) -> usize {
        (row - 1) * self.row_width + 1
    }

    /// The two-line column ruler for this layout's width.
    pub fn ruler(&self) -> (String, String) {
        ruler_lines(self.row_width)
    }
}

/// Builds the two ruler lines displayed above the grid.
///
/// The first line carries a tens digit at every multiple-of-ten column and
/// blanks elsewhere; the second cycles `1..9,0`. The tens digit is reduced
/// modulo ten so both lines are exactly `width` characters for any width.
pub fn ruler_lines(width: usize) -> (String, String) {
    let mut tens = String::with_capacity(width);
    let mut ones = String::with_capacity(width);
    for col in 1..=width {
        if col % 10 == 0 {
            tens.push(char::from(b'0' + ((col / 10) % 10) as u8));
        } else {
            tens.push(' ');
        }
        ones.push(char::from(b'0' + (col % 10) as u8));
    }
    (tens, ones)
}
