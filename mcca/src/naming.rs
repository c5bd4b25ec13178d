//! Output file names derived from the analyzed matrix's path.

use std::path::{Path, PathBuf};

use crate::geometry::{text_column, BoundingBox};
use crate::matfile::OutputFormat;

/// `<source without extension><suffix>.<ext>`
pub fn with_suffix(source: &Path, suffix: &str, ext: &str) -> PathBuf {
    let mut name = source.with_extension("").into_os_string();
    name.push(suffix);
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Whole-grid result: `<stem>_out_max<size>_c<color>_<ALGO>.<ext>`.
pub fn whole_output(
    source: &Path,
    max_size: usize,
    color: i32,
    algo: &str,
    format: OutputFormat,
) -> PathBuf {
    with_suffix(
        source,
        &format!("_out_max{max_size}_c{color}_{algo}"),
        format.extension(),
    )
}

/// Cropped result named after its bounding box; columns are text columns.
pub fn cropped_output(
    source: &Path,
    color: i32,
    bbox: &BoundingBox,
    algo: &str,
    format: OutputFormat,
) -> PathBuf {
    let suffix = format!(
        "_out_cropped_{algo}_color{color}_TL({},{})_BR({},{})",
        bbox.min_row,
        text_column(bbox.min_col),
        bbox.max_row,
        text_column(bbox.max_col),
    );
    with_suffix(source, &suffix, format.extension())
}

/// Tie report: `<stem>_out_max<size>_<ALGO>_extra_info.<ext>`.
pub fn extra_info(source: &Path, max_size: usize, algo: &str, format: OutputFormat) -> PathBuf {
    with_suffix(
        source,
        &format!("_out_max{max_size}_{algo}_extra_info"),
        format.extension(),
    )
}

/// Union-find forest drawing: `<stem>_out_max<size>_c<color>_UFtree.<ext>`.
pub fn uf_tree(source: &Path, max_size: usize, color: i32, ext: &str) -> PathBuf {
    with_suffix(source, &format!("_out_max{max_size}_c{color}_UFtree"), ext)
}

/// Name for the `idx`-th matrix given on the command line.
pub fn parsed_matrix(
    root: &Path,
    idx: usize,
    dims: (usize, usize),
    values: (i32, i32),
    format: OutputFormat,
) -> PathBuf {
    root.join(format!(
        "mat{idx}_{}_{}_{}_{}.{}",
        dims.0,
        dims.1,
        values.0,
        values.1,
        format.extension()
    ))
}

/// Name for a generated random matrix file.
pub fn generated_matrix(
    root: &Path,
    dims: (usize, usize),
    values: (i32, i32),
    format: OutputFormat,
) -> PathBuf {
    root.join(format!(
        "mat_{}_{}_{}_{}.{}",
        dims.0,
        dims.1,
        values.0,
        values.1,
        format.extension()
    ))
}
