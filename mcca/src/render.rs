//! Turns a region (membership predicate + value function) into console
//! paint, whole-grid files, or cropped files.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::RenderError;
use crate::geometry::{bounding_box, BoundingBox};
use crate::grid::Grid;
use crate::matfile::{cell_char, OutputFormat};
use crate::naming;
use crate::palette;
use crate::region::{DfsRegion, MaxRegion, UfRegions};

/// Where a region's result goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OutputMode {
    /// Print the full grid to the console with region cells highlighted.
    Paint,
    /// Write the full grid to a file, blanking non-region cells.
    #[default]
    Whole,
    /// Write only the bounding box of each maximum region.
    Cropped,
}

/// How painted region cells are marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PaintStyle {
    #[default]
    Colors,
    Symbols,
}

/// Destination for rendered buffers.
pub trait OutputSink {
    /// Write `contents` to `path`. Returns false when the write was skipped.
    fn write_output(&mut self, path: &Path, contents: &[u8]) -> io::Result<bool>;
}

/// Writes buffers to the filesystem.
#[derive(Debug, Clone, Copy)]
pub struct FileSink {
    /// Replace existing files instead of skipping them.
    pub overwrite: bool,
}

impl OutputSink for FileSink {
    fn write_output(&mut self, path: &Path, contents: &[u8]) -> io::Result<bool> {
        if contents.is_empty() {
            return Ok(false);
        }
        if !self.overwrite && path.exists() {
            log::warn!("{} already exists, skipping", path.display());
            return Ok(false);
        }
        std::fs::write(path, contents)?;
        log::info!("wrote {}", path.display());
        Ok(true)
    }
}

/// Collects buffers in memory, keyed by path.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: Vec<(PathBuf, Vec<u8>)>,
}

impl MemorySink {
    pub fn get(&self, path: &Path) -> Option<&[u8]> {
        self.files
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, c)| c.as_slice())
    }
}

impl OutputSink for MemorySink {
    fn write_output(&mut self, path: &Path, contents: &[u8]) -> io::Result<bool> {
        if contents.is_empty() {
            return Ok(false);
        }
        self.files.push((path.to_path_buf(), contents.to_vec()));
        Ok(true)
    }
}

/// Encode the cells inside `bbox` row by row.
///
/// Cells matching `cond` are written as `value(r, c)`, the rest as the
/// delimiter. Cells are separated by the delimiter and rows end in CRLF.
pub fn fill_buffer<C, V>(bbox: BoundingBox, delimiter: u8, cond: C, value: V) -> Vec<u8>
where
    C: Fn(usize, usize) -> bool,
    V: Fn(usize, usize) -> char,
{
    let Some((rows, cols)) = bbox.ranges() else {
        return Vec::new();
    };
    let mut buf = Vec::with_capacity(bbox.height() * (2 * bbox.width() + 1));
    let last_col = *cols.end();

    for r in rows {
        for c in cols.clone() {
            if cond(r, c) {
                let mut tmp = [0u8; 4];
                buf.extend_from_slice(value(r, c).encode_utf8(&mut tmp).as_bytes());
            } else {
                buf.push(delimiter);
            }
            if c < last_col {
                buf.push(delimiter);
            }
        }
        buf.extend_from_slice(b"\r\n");
    }
    buf
}

/// Print the whole grid, marking cells that satisfy `cond`.
pub fn paint<W, C>(grid: &Grid, style: PaintStyle, cond: C, out: &mut W) -> io::Result<()>
where
    W: Write,
    C: Fn(usize, usize) -> bool,
{
    for (r, row) in grid.iter_rows().enumerate() {
        let mut line = String::new();
        for (c, &v) in row.iter().enumerate() {
            if cond(r, c) {
                match style {
                    PaintStyle::Colors => line.push_str(&palette::colorize(&v.to_string(), v)),
                    PaintStyle::Symbols => line.push(palette::symbol(v)),
                }
            } else {
                line.push_str(&v.to_string());
            }
            line.push(' ');
        }
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Text listing every color tied at the maximum size.
pub fn tie_report(regions: &UfRegions) -> String {
    let mut report = format!("Color codes with max size of {}:\n", regions.max_size);
    for (color, roots) in &regions.color_roots {
        let suffix = if roots.len() > 1 {
            " (multiple regions)"
        } else {
            ""
        };
        report.push_str(&format!("Color code {color}{suffix}\n"));
    }
    report
}

/// Renders finder results for one source matrix into a sink.
pub struct Renderer<'a, S: OutputSink> {
    sink: &'a mut S,
    source: &'a Path,
    format: OutputFormat,
}

impl<'a, S: OutputSink> Renderer<'a, S> {
    /// `source` is the analyzed matrix's path; output names derive from it.
    pub fn new(sink: &'a mut S, source: &'a Path, format: OutputFormat) -> Self {
        Self {
            sink,
            source,
            format,
        }
    }

    /// Write the full grid with only `cond` cells filled in.
    pub fn write_whole<C, V>(
        &mut self,
        grid: &Grid,
        path: &Path,
        cond: C,
        value: V,
    ) -> Result<Option<PathBuf>, RenderError>
    where
        C: Fn(usize, usize) -> bool,
        V: Fn(usize, usize) -> char,
    {
        let buf = fill_buffer(
            BoundingBox::full(grid.rows(), grid.cols()),
            self.format.delimiter(),
            cond,
            value,
        );
        self.emit(path, &buf)
    }

    /// Write the bounding box of the `cond` cells, named after the box.
    pub fn write_cropped<C, V>(
        &mut self,
        grid: &Grid,
        algo: &str,
        color: i32,
        cond: C,
        value: V,
    ) -> Result<Option<PathBuf>, RenderError>
    where
        C: Fn(usize, usize) -> bool,
        V: Fn(usize, usize) -> char,
    {
        let bbox = bounding_box(grid.rows(), grid.cols(), &cond);
        if bbox.is_empty() {
            return Err(RenderError::EmptyRegion);
        }
        log::info!(
            "{algo} cropped region color {color}: top-left ({}, {}), bottom-right ({}, {})",
            bbox.min_row,
            bbox.min_col,
            bbox.max_row,
            bbox.max_col
        );
        let path = naming::cropped_output(self.source, color, &bbox, algo, self.format);
        let buf = fill_buffer(bbox, self.format.delimiter(), cond, value);
        self.emit(&path, &buf)
    }

    /// Render the single best DFS region.
    pub fn render_dfs<W: Write>(
        &mut self,
        grid: &Grid,
        region: &DfsRegion,
        mode: OutputMode,
        style: PaintStyle,
        console: &mut W,
    ) -> Result<Vec<PathBuf>, RenderError> {
        let algo = "DFS";
        let cond = |r, c| region.contains(r, c);
        let value = |_, _| cell_char(region.max_color);

        let written = match mode {
            OutputMode::Paint => {
                paint(grid, style, cond, console)?;
                None
            }
            OutputMode::Whole => {
                let path = naming::whole_output(
                    self.source,
                    region.max_size,
                    region.max_color,
                    algo,
                    self.format,
                );
                self.write_whole(grid, &path, cond, value)?
            }
            OutputMode::Cropped => self.write_cropped(grid, algo, region.max_color, cond, value)?,
        };
        Ok(written.into_iter().collect())
    }

    /// Render every union-find region tied at the maximum size.
    ///
    /// Cropped mode writes one file per tied (color, root) pair. In file
    /// modes a tie report is also written when several colors tie.
    pub fn render_union_find<W: Write>(
        &mut self,
        grid: &Grid,
        regions: &UfRegions,
        mode: OutputMode,
        style: PaintStyle,
        console: &mut W,
    ) -> Result<Vec<PathBuf>, RenderError> {
        let algo = "UF";
        let cond = |r, c| regions.contains(r, c);
        let value = |r, c| cell_char(grid.get(r, c));
        let mut written = Vec::new();

        match mode {
            OutputMode::Paint => paint(grid, style, cond, console)?,
            OutputMode::Whole => {
                let path = naming::whole_output(
                    self.source,
                    regions.max_size,
                    regions.max_color,
                    algo,
                    self.format,
                );
                written.extend(self.write_whole(grid, &path, cond, value)?);
            }
            OutputMode::Cropped => {
                for (color, root) in regions.tied_regions() {
                    let in_region = |r, c| {
                        regions.in_root(r, c, root) && cond(r, c) && grid.get(r, c) == color
                    };
                    written.extend(self.write_cropped(grid, algo, color, in_region, value)?);
                }
            }
        }

        if regions.has_color_ties() {
            let report = tie_report(regions);
            log::info!("{}", report.trim_end());
            if mode != OutputMode::Paint {
                let path = naming::extra_info(self.source, regions.max_size, algo, self.format);
                written.extend(self.emit(&path, report.as_bytes())?);
            }
        }
        Ok(written)
    }

    fn emit(&mut self, path: &Path, buf: &[u8]) -> Result<Option<PathBuf>, RenderError> {
        let wrote = self.sink.write_output(path, buf)?;
        Ok(wrote.then(|| path.to_path_buf()))
    }
}
