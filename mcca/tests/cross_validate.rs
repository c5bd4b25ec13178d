//! DFS and union-find must agree on every grid: same maximum size, and the
//! DFS winner's color must be one of the union-find tied colors.

use mcca::region::{dfs, uf, Algorithm};
use mcca::{analyze, Grid, MaxRegion};

fn random_grid(rows: usize, cols: usize, colors: u32, mut seed: u64) -> Grid {
    let cells = (0..rows * cols)
        .map(|_| {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            (seed % colors as u64) as i32 + 1
        })
        .collect();
    Grid::from_buf(rows, cols, cells).unwrap()
}

/// Brute force: label components with a BFS over an explicit queue.
fn reference_max(grid: &Grid) -> usize {
    let mut seen = vec![false; grid.len()];
    let mut best = 0;
    for start in 0..grid.len() {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        let color = grid.at(start);
        let mut queue = std::collections::VecDeque::from([start]);
        let mut size = 0;
        while let Some(idx) = queue.pop_front() {
            size += 1;
            let (r, c) = grid.coords(idx);
            for nr in r.saturating_sub(1)..=(r + 1).min(grid.rows() - 1) {
                for nc in c.saturating_sub(1)..=(c + 1).min(grid.cols() - 1) {
                    let n = grid.index(nr, nc);
                    if !seen[n] && grid.at(n) == color {
                        seen[n] = true;
                        queue.push_back(n);
                    }
                }
            }
        }
        best = best.max(size);
    }
    best
}

#[test]
fn finders_agree_on_random_grids() {
    let shapes = [(1, 1), (1, 17), (17, 1), (5, 5), (13, 29), (40, 40), (64, 33)];
    for (i, &(rows, cols)) in shapes.iter().enumerate() {
        for colors in [1, 2, 3, 5, 9] {
            let seed = 0x2545_f491_4f6c_dd1d ^ ((i as u64) << 8 | colors as u64);
            let grid = random_grid(rows, cols, colors, seed);

            let d = dfs::find_max_region(&grid);
            let u = uf::find_max_region(&grid);
            let expected = reference_max(&grid);

            assert_eq!(d.max_size, expected, "dfs {rows}x{cols} colors={colors}");
            assert_eq!(u.max_size, expected, "uf {rows}x{cols} colors={colors}");
            assert!(u.max_colors().any(|c| c == d.max_color));
            assert_eq!(d.cells.len(), d.max_size);
            assert!(d.cells.iter().all(|&(r, c)| grid.get(r, c) == d.max_color));
        }
    }
}

#[test]
fn uf_tied_roots_have_max_size() {
    let grid = random_grid(30, 30, 4, 7);
    let u = uf::find_max_region(&grid);
    for (color, root) in u.tied_regions() {
        let members: Vec<usize> = (0..grid.len())
            .filter(|&i| u.roots()[i] == root)
            .collect();
        assert_eq!(members.len(), u.max_size);
        assert!(members.iter().all(|&i| grid.at(i) == color));
    }
}

#[test]
fn dfs_region_matches_contains() {
    let grid = random_grid(25, 25, 3, 99);
    let d = dfs::find_max_region(&grid);
    let marked = (0..grid.rows())
        .flat_map(|r| (0..grid.cols()).map(move |c| (r, c)))
        .filter(|&(r, c)| d.contains(r, c))
        .count();
    assert_eq!(marked, d.max_size);
}

#[test]
fn analyze_both_reports_agreement() {
    let grid = random_grid(50, 20, 2, 12345);
    let analysis = analyze(&grid, Algorithm::Both);
    assert!(analysis.sizes_agree());
    let (_, dfs_summary) = analysis.dfs.unwrap();
    let (_, uf_summary) = analysis.union_find.unwrap();
    assert_eq!(dfs_summary.max_size, uf_summary.max_size);
    assert_eq!(dfs_summary.stats, uf_summary.stats);
}
