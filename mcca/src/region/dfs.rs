use crate::grid::{Grid, ValueStats};

use super::adjacency::neighbors;
use super::{MaxRegion, RegionFinder};

/// Largest region found by exhaustive flood fill.
#[derive(Debug, Clone)]
pub struct DfsRegion {
    pub max_size: usize,
    pub max_color: i32,
    /// Cells of the winning region in discovery order, as (row, col).
    pub cells: Vec<(usize, usize)>,
    pub stats: ValueStats,
    members: Vec<bool>,
    cols: usize,
}

impl MaxRegion for DfsRegion {
    fn max_size(&self) -> usize {
        self.max_size
    }

    fn max_color(&self) -> i32 {
        self.max_color
    }

    fn stats(&self) -> ValueStats {
        self.stats
    }

    fn contains(&self, row: usize, col: usize) -> bool {
        self.members[row * self.cols + col]
    }
}

/// Depth-first flood fill finder.
#[derive(Debug, Clone, Copy, Default)]
pub struct DfsFinder;

impl RegionFinder for DfsFinder {
    type Output = DfsRegion;

    fn label(&self) -> &'static str {
        "DFS"
    }

    fn find_max_region(&self, grid: &Grid) -> DfsRegion {
        find_max_region(grid)
    }
}

/// Scan cells in row-major order and flood-fill each unvisited one.
///
/// Only a strictly larger region replaces the current best, so among
/// regions of equal size the first one discovered wins.
pub fn find_max_region(grid: &Grid) -> DfsRegion {
    let mut visited = vec![false; grid.len()];
    let mut stack = Vec::new();
    let mut stats = ValueStats::default();

    let mut best: Vec<usize> = Vec::new();
    let mut best_size = 0usize;
    let mut best_color = grid.at(0);

    let mut current = Vec::new();
    for idx in 0..grid.len() {
        let value = grid.at(idx);
        stats.update(value);
        if visited[idx] {
            continue;
        }

        current.clear();
        let size = flood_fill(grid, idx, &mut visited, &mut stack, &mut current);
        if size > best_size {
            best_size = size;
            best_color = value;
            std::mem::swap(&mut best, &mut current);
        }
    }

    let mut members = vec![false; grid.len()];
    for &idx in &best {
        members[idx] = true;
    }

    log::debug!("dfs: max region size {best_size}, color {best_color}");

    DfsRegion {
        max_size: best_size,
        max_color: best_color,
        cells: best.iter().map(|&idx| grid.coords(idx)).collect(),
        stats,
        members,
        cols: grid.cols(),
    }
}

/// Visit the region containing `seed`, appending its cells to `out`.
///
/// Returns the region size. Cells are marked visited when pushed so each
/// one enters the stack exactly once.
fn flood_fill(
    grid: &Grid,
    seed: usize,
    visited: &mut [bool],
    stack: &mut Vec<usize>,
    out: &mut Vec<usize>,
) -> usize {
    let color = grid.at(seed);

    visited[seed] = true;
    stack.push(seed);

    while let Some(idx) = stack.pop() {
        out.push(idx);
        let (r, c) = grid.coords(idx);

        for (nr, nc) in neighbors(r, c, grid.rows(), grid.cols()) {
            let nidx = grid.index(nr, nc);
            if visited[nidx] || grid.at(nidx) != color {
                continue;
            }
            visited[nidx] = true;
            stack.push(nidx);
        }
    }

    out.len()
}
