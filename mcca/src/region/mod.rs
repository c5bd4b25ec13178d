pub mod adjacency;
pub mod dfs;
pub mod uf;
pub mod unionfind;

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::grid::{Grid, ValueStats};

pub use dfs::{DfsFinder, DfsRegion};
pub use uf::{UfRegions, UnionFindFinder};

/// The largest region a finder produced, as seen by the rendering adapter.
pub trait MaxRegion {
    fn max_size(&self) -> usize;

    /// Representative color code of the maximum region.
    fn max_color(&self) -> i32;

    /// Min/max color code seen during the scan.
    fn stats(&self) -> ValueStats;

    /// Membership test for the cell at (row, col).
    fn contains(&self, row: usize, col: usize) -> bool;
}

/// An algorithm that finds the largest 8-connected same-color region.
pub trait RegionFinder {
    type Output: MaxRegion;

    /// Short tag used in logs and output file names.
    fn label(&self) -> &'static str;

    fn find_max_region(&self, grid: &Grid) -> Self::Output;
}

/// Which finder(s) to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    Dfs,
    #[cfg_attr(feature = "serde", serde(rename = "uf"))]
    UnionFind,
    #[default]
    Both,
}

impl Algorithm {
    pub fn runs_dfs(self) -> bool {
        matches!(self, Algorithm::Dfs | Algorithm::Both)
    }

    pub fn runs_union_find(self) -> bool {
        matches!(self, Algorithm::UnionFind | Algorithm::Both)
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dfs" => Ok(Algorithm::Dfs),
            "uf" | "unionfind" | "union-find" => Ok(Algorithm::UnionFind),
            "both" => Ok(Algorithm::Both),
            other => Err(format!("unknown algorithm '{other}', expected dfs, uf or both")),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Dfs => write!(f, "DFS"),
            Algorithm::UnionFind => write!(f, "UF"),
            Algorithm::Both => write!(f, "BOTH"),
        }
    }
}

/// Summary of one finder run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary {
    pub algorithm: &'static str,
    pub max_size: usize,
    pub max_color: i32,
    pub stats: ValueStats,
    /// Every color tied at the maximum (a single entry for DFS).
    pub max_colors: Vec<i32>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub elapsed: Duration,
}

impl Summary {
    fn from_region(
        label: &'static str,
        region: &impl MaxRegion,
        max_colors: Vec<i32>,
        elapsed: Duration,
    ) -> Self {
        Self {
            algorithm: label,
            max_size: region.max_size(),
            max_color: region.max_color(),
            stats: region.stats(),
            max_colors,
            elapsed,
        }
    }
}

/// Run the DFS finder and time it.
pub fn run_dfs(grid: &Grid) -> (DfsRegion, Summary) {
    let start = Instant::now();
    let region = DfsFinder.find_max_region(grid);
    let summary = Summary::from_region(
        DfsFinder.label(),
        &region,
        vec![region.max_color],
        start.elapsed(),
    );
    log::debug!("{} finished in {:?}", summary.algorithm, summary.elapsed);
    (region, summary)
}

/// Run the union-find finder and time it.
pub fn run_union_find(grid: &Grid) -> (UfRegions, Summary) {
    let start = Instant::now();
    let regions = UnionFindFinder.find_max_region(grid);
    let colors = regions.max_colors().collect();
    let summary = Summary::from_region(UnionFindFinder.label(), &regions, colors, start.elapsed());
    log::debug!("{} finished in {:?}", summary.algorithm, summary.elapsed);
    (regions, summary)
}

/// Both finders' results over the same grid.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub dfs: Option<(DfsRegion, Summary)>,
    pub union_find: Option<(UfRegions, Summary)>,
}

impl Analysis {
    /// False when both finders ran and disagree on the maximum size.
    pub fn sizes_agree(&self) -> bool {
        match (&self.dfs, &self.union_find) {
            (Some((d, _)), Some((u, _))) => d.max_size == u.max_size,
            _ => true,
        }
    }
}

/// Run the selected finder(s). With the `parallel` feature, DFS and
/// union-find run concurrently on the shared read-only grid.
pub fn analyze(grid: &Grid, algorithm: Algorithm) -> Analysis {
    let analysis = if algorithm.runs_dfs() && algorithm.runs_union_find() {
        let (dfs, union_find) = run_both(grid);
        Analysis {
            dfs: Some(dfs),
            union_find: Some(union_find),
        }
    } else {
        Analysis {
            dfs: algorithm.runs_dfs().then(|| run_dfs(grid)),
            union_find: algorithm.runs_union_find().then(|| run_union_find(grid)),
        }
    };

    if !analysis.sizes_agree() {
        log::warn!("DFS and UF disagree on the maximum region size");
    }
    analysis
}

#[cfg(feature = "parallel")]
fn run_both(grid: &Grid) -> ((DfsRegion, Summary), (UfRegions, Summary)) {
    rayon::join(|| run_dfs(grid), || run_union_find(grid))
}

#[cfg(not(feature = "parallel"))]
fn run_both(grid: &Grid) -> ((DfsRegion, Summary), (UfRegions, Summary)) {
    (run_dfs(grid), run_union_find(grid))
}
