//! Graphviz DOT rendering of the union-find forest.

use crate::grid::Grid;
use crate::palette::graphviz_color;
use crate::region::UfRegions;

/// Largest side length drawn; bigger forests are unreadable.
pub const VISUALIZER_LIMIT: usize = 15;

/// True when the grid is small enough to draw.
pub fn fits(grid: &Grid) -> bool {
    grid.rows().max(grid.cols()) <= VISUALIZER_LIMIT
}

/// DOT document with one node per cell and an edge from every non-root
/// cell to its root. Roots of tied regions are filled with their color.
pub fn to_dot(regions: &UfRegions) -> String {
    let roots = regions.roots();
    let mut dot = String::from("digraph UnionFindTree {\n");
    dot.push_str("    node [shape=circle];\n");

    for (i, &root) in roots.iter().enumerate() {
        let fill = regions
            .color_of_root(root)
            .map_or("white", graphviz_color);
        let font = if fill == "blue" { "white" } else { "black" };
        dot.push_str(&format!(
            "    {i} [style=filled, fillcolor={fill}, fontcolor={font}];\n"
        ));
    }
    for (i, &root) in roots.iter().enumerate() {
        if root as usize != i {
            dot.push_str(&format!("    {i} -> {root};\n"));
        }
    }

    dot.push_str("}\n");
    dot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::uf;

    #[test]
    fn small_grid_fits() {
        assert!(fits(&Grid::filled(15, 3, 1).unwrap()));
        assert!(!fits(&Grid::filled(2, 16, 1).unwrap()));
    }

    #[test]
    fn dot_links_cells_to_roots() {
        let grid = Grid::from_rows(&[[1, 1, 2]]).unwrap();
        let regions = uf::find_max_region(&grid);
        let dot = to_dot(&regions);

        assert!(dot.starts_with("digraph UnionFindTree {\n"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("    0 [style=filled, fillcolor=blue, fontcolor=white];"));
        assert!(dot.contains("    1 [style=filled, fillcolor=blue, fontcolor=white];"));
        assert!(dot.contains("    2 [style=filled, fillcolor=white, fontcolor=black];"));
        assert!(dot.contains("    1 -> 0;"));
        assert!(!dot.contains("2 ->"));
    }

    #[test]
    fn tied_colors_get_their_own_fill() {
        let grid = Grid::from_rows(&[[2, 5]]).unwrap();
        let dot = to_dot(&uf::find_max_region(&grid));
        assert!(dot.contains("0 [style=filled, fillcolor=green, fontcolor=black];"));
        assert!(dot.contains("1 [style=filled, fillcolor=red, fontcolor=black];"));
        assert!(!dot.contains("->"));
    }
}
