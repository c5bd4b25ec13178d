use crate::error::GridError;

/// Rectangular grid of color codes with row-major cell data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<i32>,
}

impl Grid {
    /// Build a grid from nested rows, rejecting empty or ragged input.
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, GridError> {
        let first = rows.first().ok_or(GridError::Empty)?;
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(GridError::EmptyRow(0));
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(GridError::RaggedRow {
                    row: r,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Create a grid from existing row-major cell data.
    ///
    /// `cells.len()` must equal `rows * cols`, and both dimensions must be positive.
    pub fn from_buf(rows: usize, cols: usize, cells: Vec<i32>) -> Result<Self, GridError> {
        if rows == 0 {
            return Err(GridError::Empty);
        }
        if cols == 0 {
            return Err(GridError::EmptyRow(0));
        }
        if cells.len() != rows * cols {
            return Err(GridError::LengthMismatch {
                expected: rows * cols,
                found: cells.len(),
            });
        }
        Ok(Self { rows, cols, cells })
    }

    /// Create a grid filled with a single color code.
    pub fn filled(rows: usize, cols: usize, value: i32) -> Result<Self, GridError> {
        Self::from_buf(rows, cols, vec![value; rows * cols])
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells (`rows * cols`).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a constructed grid; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major cell index of (row, col).
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Inverse of [`Grid::index`].
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Get the color code at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.cells[row * self.cols + col]
    }

    /// Get the color code at a row-major index.
    #[inline]
    pub fn at(&self, index: usize) -> i32 {
        self.cells[index]
    }

    /// Iterate over rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[i32]> {
        self.cells.chunks_exact(self.cols)
    }

    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    /// Min/max color code over the whole grid.
    pub fn value_stats(&self) -> ValueStats {
        let mut stats = ValueStats::default();
        for &v in &self.cells {
            stats.update(v);
        }
        stats
    }
}

/// Running min/max of color codes seen during a scan.
///
/// Each finder owns its own accumulator and returns it with its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValueStats {
    pub min: i32,
    pub max: i32,
}

impl Default for ValueStats {
    fn default() -> Self {
        Self {
            min: i32::MAX,
            max: i32::MIN,
        }
    }
}

impl ValueStats {
    #[inline]
    pub fn update(&mut self, value: i32) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// True until at least one value has been recorded.
    pub fn is_empty(&self) -> bool {
        self.max < self.min
    }
}
