use std::ops::RangeInclusive;

/// Minimal axis-aligned rectangle enclosing a set of cells, inclusive bounds.
///
/// Starts inverted (`min_row = rows`, `max_row = -1`, and likewise for
/// columns) and is only meaningful once `max_row >= min_row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BoundingBox {
    pub min_row: isize,
    pub max_row: isize,
    pub min_col: isize,
    pub max_col: isize,
}

impl BoundingBox {
    /// The inverted box for a `rows x cols` grid.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            min_row: rows as isize,
            max_row: -1,
            min_col: cols as isize,
            max_col: -1,
        }
    }

    /// Box covering the whole `rows x cols` grid.
    pub fn full(rows: usize, cols: usize) -> Self {
        Self {
            min_row: 0,
            max_row: rows as isize - 1,
            min_col: 0,
            max_col: cols as isize - 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.max_row < self.min_row || self.max_col < self.min_col
    }

    /// Grow the box to include (row, col).
    #[inline]
    pub fn include(&mut self, row: usize, col: usize) {
        let (r, c) = (row as isize, col as isize);
        self.min_row = self.min_row.min(r);
        self.max_row = self.max_row.max(r);
        self.min_col = self.min_col.min(c);
        self.max_col = self.max_col.max(c);
    }

    /// Number of rows covered, 0 when empty.
    pub fn height(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.max_row - self.min_row + 1) as usize
        }
    }

    /// Number of columns covered, 0 when empty.
    pub fn width(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.max_col - self.min_col + 1) as usize
        }
    }

    /// Row and column ranges covered by a non-empty box.
    pub fn ranges(&self) -> Option<(RangeInclusive<usize>, RangeInclusive<usize>)> {
        if self.is_empty() {
            return None;
        }
        Some((
            self.min_row as usize..=self.max_row as usize,
            self.min_col as usize..=self.max_col as usize,
        ))
    }
}

/// Scan all cells once and return the box of those matching `predicate`.
///
/// Returns [`BoundingBox::empty`] unchanged when nothing matches.
pub fn bounding_box<F>(rows: usize, cols: usize, predicate: F) -> BoundingBox
where
    F: Fn(usize, usize) -> bool,
{
    let mut bbox = BoundingBox::empty(rows, cols);
    for r in 0..rows {
        for c in 0..cols {
            if predicate(r, c) {
                bbox.include(r, c);
            }
        }
    }
    bbox
}

/// Character column of grid column `col` in single-char-delimited text.
#[inline]
pub fn text_column(col: isize) -> isize {
    2 * col
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_match_returns_inverted_box() {
        let bbox = bounding_box(3, 4, |_, _| false);
        assert!(bbox.is_empty());
        assert_eq!(bbox, BoundingBox::empty(3, 4));
        assert_eq!(bbox.min_row, 3);
        assert_eq!(bbox.max_row, -1);
        assert_eq!(bbox.min_col, 4);
        assert_eq!(bbox.max_col, -1);
        assert_eq!(bbox.height(), 0);
        assert!(bbox.ranges().is_none());
    }

    #[test]
    fn single_cell_box() {
        let bbox = bounding_box(5, 5, |r, c| r == 2 && c == 3);
        assert_eq!(
            bbox,
            BoundingBox {
                min_row: 2,
                max_row: 2,
                min_col: 3,
                max_col: 3
            }
        );
        assert_eq!(bbox.height(), 1);
        assert_eq!(bbox.width(), 1);
    }

    #[test]
    fn box_encloses_scattered_cells() {
        let cells = [(1, 4), (3, 1), (2, 2)];
        let bbox = bounding_box(5, 6, |r, c| cells.contains(&(r, c)));
        assert_eq!((bbox.min_row, bbox.max_row), (1, 3));
        assert_eq!((bbox.min_col, bbox.max_col), (1, 4));
        assert_eq!(bbox.height(), 3);
        assert_eq!(bbox.width(), 4);
        let (rows, cols) = bbox.ranges().unwrap();
        assert_eq!(rows, 1..=3);
        assert_eq!(cols, 1..=4);
    }

    #[test]
    fn full_box_covers_grid() {
        assert_eq!(bounding_box(2, 3, |_, _| true), BoundingBox::full(2, 3));
    }

    #[test]
    fn text_column_doubles() {
        assert_eq!(text_column(0), 0);
        assert_eq!(text_column(3), 6);
    }
}
