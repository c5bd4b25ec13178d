/// King-move neighbor offsets as (row, col) deltas.
///
/// Order only affects the order in which cells are reached, never the result.
pub const OFFSETS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, -1),
    (-1, -1),
    (-1, 1),
    (1, 1),
];

/// True iff (row, col) lies within `[0, rows) x [0, cols)`.
#[inline]
pub fn is_valid(row: isize, col: isize, rows: usize, cols: usize) -> bool {
    row >= 0 && col >= 0 && (row as usize) < rows && (col as usize) < cols
}

/// In-bounds 8-neighbors of (row, col).
pub fn neighbors(
    row: usize,
    col: usize,
    rows: usize,
    cols: usize,
) -> impl Iterator<Item = (usize, usize)> {
    OFFSETS.iter().filter_map(move |&(dr, dc)| {
        let nr = row as isize + dr;
        let nc = col as isize + dc;
        is_valid(nr, nc, rows, cols).then(|| (nr as usize, nc as usize))
    })
}
