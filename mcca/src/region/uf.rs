use std::collections::{BTreeMap, BTreeSet};

use crate::grid::{Grid, ValueStats};

use super::adjacency::neighbors;
use super::unionfind::UnionFind;
use super::{MaxRegion, RegionFinder};

/// Result of the union-find pass.
///
/// `color_roots` holds every (color, root) pair whose region reached the
/// maximum size. Colors iterate in ascending order, and `max_color` is the
/// smallest of them.
#[derive(Debug, Clone)]
pub struct UfRegions {
    pub max_size: usize,
    pub max_color: i32,
    pub color_roots: BTreeMap<i32, BTreeSet<u32>>,
    pub stats: ValueStats,
    /// Root of every cell, row-major.
    roots: Vec<u32>,
    /// Component size of every cell, row-major.
    sizes: Vec<u32>,
    cols: usize,
}

impl UfRegions {
    /// Color codes tied at the maximum size, ascending.
    pub fn max_colors(&self) -> impl Iterator<Item = i32> + '_ {
        self.color_roots.keys().copied()
    }

    /// True when more than one color reaches the maximum size.
    pub fn has_color_ties(&self) -> bool {
        self.color_roots.len() > 1
    }

    /// Root of the cell at (row, col).
    pub fn root(&self, row: usize, col: usize) -> u32 {
        self.roots[row * self.cols + col]
    }

    /// Component size of the cell at (row, col).
    pub fn component_size(&self, row: usize, col: usize) -> usize {
        self.sizes[row * self.cols + col] as usize
    }

    /// True iff (row, col) belongs to the region rooted at `root`.
    pub fn in_root(&self, row: usize, col: usize, root: u32) -> bool {
        self.root(row, col) == root
    }

    /// Root of every cell, row-major.
    pub fn roots(&self) -> &[u32] {
        &self.roots
    }

    /// The tied color whose regions include `root`, if any.
    pub fn color_of_root(&self, root: u32) -> Option<i32> {
        self.color_roots
            .iter()
            .find(|(_, roots)| roots.contains(&root))
            .map(|(&color, _)| color)
    }

    /// Iterate every tied (color, root) pair in ascending order.
    pub fn tied_regions(&self) -> impl Iterator<Item = (i32, u32)> + '_ {
        self.color_roots
            .iter()
            .flat_map(|(&color, roots)| roots.iter().map(move |&root| (color, root)))
    }
}

impl MaxRegion for UfRegions {
    fn max_size(&self) -> usize {
        self.max_size
    }

    fn max_color(&self) -> i32 {
        self.max_color
    }

    fn stats(&self) -> ValueStats {
        self.stats
    }

    /// Any cell whose component has the maximum size, across all tied regions.
    fn contains(&self, row: usize, col: usize) -> bool {
        self.component_size(row, col) == self.max_size
    }
}

/// Weighted union-find finder.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnionFindFinder;

impl RegionFinder for UnionFindFinder {
    type Output = UfRegions;

    fn label(&self) -> &'static str {
        "UF"
    }

    fn find_max_region(&self, grid: &Grid) -> UfRegions {
        find_max_region(grid)
    }
}

/// Running maximum with the colors and roots tied at it.
#[derive(Debug, Default)]
struct MaxTracker {
    size: u32,
    color_roots: BTreeMap<i32, BTreeSet<u32>>,
}

impl MaxTracker {
    /// A strictly larger size resets the tracked ties; an equal size joins them.
    fn observe(&mut self, size: u32, color: i32, root: u32) {
        if size > self.size {
            self.size = size;
            self.color_roots.clear();
            self.color_roots.entry(color).or_default().insert(root);
        } else if size == self.size {
            self.color_roots.entry(color).or_default().insert(root);
        }
    }
}

/// Single row-major pass uniting each cell with its same-colored neighbors.
///
/// Each unordered neighbor pair is united once, from whichever cell comes
/// first in scan order. The size read after a cell's unions only counts
/// cells merged so far, but the last visited cell of every region reports
/// its final size, so the tracker ends with the true maximum and all of
/// its (color, root) pairs.
pub fn find_max_region(grid: &Grid) -> UfRegions {
    let mut uf = UnionFind::new(grid.len());
    let mut stats = ValueStats::default();
    let mut tracker = MaxTracker::default();

    for idx in 0..grid.len() {
        let value = grid.at(idx);
        stats.update(value);

        let (r, c) = grid.coords(idx);
        for (nr, nc) in neighbors(r, c, grid.rows(), grid.cols()) {
            let nidx = grid.index(nr, nc);
            // pair already united when the neighbor was visited
            if nidx < idx {
                continue;
            }
            if grid.at(nidx) == value {
                uf.unite(idx as u32, nidx as u32);
            }
        }

        let root = uf.find(idx as u32);
        tracker.observe(uf.set_size(root), value, root);
    }

    let roots = uf.flatten();
    let sizes = roots.iter().map(|&r| uf.set_size(r)).collect();

    let max_color = tracker
        .color_roots
        .keys()
        .next()
        .copied()
        .unwrap_or_else(|| grid.at(0));

    log::debug!(
        "uf: max region size {}, colors {:?}",
        tracker.size,
        tracker.color_roots.keys().collect::<Vec<_>>()
    );

    UfRegions {
        max_size: tracker.size as usize,
        max_color,
        color_roots: tracker.color_roots,
        stats,
        roots,
        sizes,
        cols: grid.cols(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[i32]]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn mixed_grid_picks_largest_region() {
        #[rustfmt::skip]
        let g = grid(&[
            &[1, 1, 2],
            &[1, 2, 2],
            &[3, 3, 2],
        ]);
        let regions = find_max_region(&g);
        assert_eq!(regions.max_size, 4);
        assert_eq!(regions.max_color, 2);
        assert!(!regions.has_color_ties());
        assert_eq!(regions.color_roots[&2].len(), 1);
        for (r, c) in [(0, 2), (1, 1), (1, 2), (2, 2)] {
            assert!(regions.contains(r, c));
        }
        assert!(!regions.contains(0, 0));
        assert_eq!(regions.component_size(0, 0), 3);
        assert_eq!(regions.component_size(2, 0), 2);
    }

    #[test]
    fn tie_across_colors_tracks_both() {
        let g = grid(&[&[1, 1, 2, 2]]);
        let regions = find_max_region(&g);
        assert_eq!(regions.max_size, 2);
        assert!(regions.has_color_ties());
        assert_eq!(regions.max_colors().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(regions.max_color, 1);

        let r1 = regions.root(0, 0);
        let r2 = regions.root(0, 2);
        assert_ne!(r1, r2);
        assert!(regions.color_roots[&1].contains(&r1));
        assert!(regions.color_roots[&2].contains(&r2));
        assert_eq!(regions.color_roots[&1].len(), 1);
        assert_eq!(regions.color_roots[&2].len(), 1);
    }

    #[test]
    fn tie_within_one_color_tracks_each_root() {
        #[rustfmt::skip]
        let g = grid(&[
            &[1, 1, 2, 1, 1],
            &[2, 2, 2, 2, 2],
        ]);
        let regions = find_max_region(&g);
        assert_eq!(regions.max_size, 6);
        assert_eq!(regions.max_color, 2);

        let g = grid(&[&[1, 1, 2, 1, 1]]);
        let regions = find_max_region(&g);
        assert_eq!(regions.max_size, 2);
        assert_eq!(regions.max_colors().collect::<Vec<_>>(), vec![1]);
        assert_eq!(regions.color_roots[&1].len(), 2);
        assert_eq!(regions.tied_regions().count(), 2);
    }

    #[test]
    fn larger_region_resets_ties() {
        // 3 and 4 tie at size 1 early on, then 1 grows past them
        #[rustfmt::skip]
        let g = grid(&[
            &[3, 4, 1],
            &[1, 1, 1],
        ]);
        let regions = find_max_region(&g);
        assert_eq!(regions.max_size, 4);
        assert_eq!(regions.max_colors().collect::<Vec<_>>(), vec![1]);
        assert!(!regions.contains(0, 0));
        assert!(regions.contains(0, 2));
    }

    #[test]
    fn uniform_grid_is_one_region() {
        let g = Grid::filled(3, 4, 5).unwrap();
        let regions = find_max_region(&g);
        assert_eq!(regions.max_size, 12);
        let root = regions.root(0, 0);
        for r in 0..3 {
            for c in 0..4 {
                assert!(regions.contains(r, c));
                assert!(regions.in_root(r, c, root));
            }
        }
    }

    #[test]
    fn isolated_cells_tie_everywhere() {
        #[rustfmt::skip]
        let g = grid(&[
            &[1, 2, 1, 2],
            &[3, 4, 3, 4],
        ]);
        let regions = find_max_region(&g);
        assert_eq!(regions.max_size, 1);
        assert_eq!(regions.max_colors().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(regions.tied_regions().count(), 8);
    }

    #[test]
    fn color_of_root_finds_owner() {
        let g = grid(&[&[7, 7, 9, 9]]);
        let regions = find_max_region(&g);
        assert_eq!(regions.color_of_root(regions.root(0, 0)), Some(7));
        assert_eq!(regions.color_of_root(regions.root(0, 3)), Some(9));
        assert_eq!(regions.color_of_root(u32::MAX), None);
    }

    #[test]
    fn roots_are_flattened() {
        #[rustfmt::skip]
        let g = grid(&[
            &[1, 1, 1],
            &[1, 2, 1],
            &[1, 1, 1],
        ]);
        let regions = find_max_region(&g);
        for (i, &root) in regions.roots().iter().enumerate() {
            assert_eq!(regions.roots()[root as usize], root, "cell {i}");
        }
        assert_eq!(regions.roots().len(), 9);
    }

    #[test]
    fn tracks_value_stats() {
        let g = grid(&[&[6, 2], &[8, 6]]);
        let regions = find_max_region(&g);
        assert_eq!(regions.stats, ValueStats { min: 2, max: 8 });
    }

    #[test]
    fn tracker_reset_and_accumulate() {
        let mut t = MaxTracker::default();
        t.observe(2, 5, 10);
        t.observe(2, 6, 11);
        t.observe(2, 5, 10);
        t.observe(1, 7, 12);
        assert_eq!(t.size, 2);
        assert_eq!(t.color_roots.len(), 2);
        assert_eq!(t.color_roots[&5].len(), 1);
        t.observe(3, 7, 12);
        assert_eq!(t.size, 3);
        assert_eq!(t.color_roots.keys().collect::<Vec<_>>(), vec![&7]);
    }

    #[test]
    fn rerun_is_identical() {
        #[rustfmt::skip]
        let g = grid(&[
            &[1, 1, 2, 2],
            &[3, 1, 2, 4],
        ]);
        let a = find_max_region(&g);
        let b = find_max_region(&g);
        assert_eq!(a.max_size, b.max_size);
        assert_eq!(a.max_color, b.max_color);
        assert_eq!(a.color_roots, b.color_roots);
        assert_eq!(a.max_colors().collect::<Vec<_>>(), vec![1, 2]);
        for r in 0..g.rows() {
            for c in 0..g.cols() {
                assert_eq!(a.contains(r, c), b.contains(r, c), "cell ({r}, {c})");
            }
        }
    }
}
