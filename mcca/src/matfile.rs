use std::path::{Path, PathBuf};

use crate::error::MatrixError;
use crate::geometry::BoundingBox;
use crate::grid::Grid;
use crate::render::fill_buffer;

/// Smallest color code accepted in matrix files.
pub const MIN_VALUE: i32 = 1;
/// Largest color code accepted in matrix files.
pub const MAX_VALUE: i32 = 9;

/// Columns a tab advances to when reporting error positions.
const TAB_WIDTH: usize = 4;

/// Text layout of matrix files and result files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OutputFormat {
    /// Space separated, `.txt`.
    #[default]
    Txt,
    /// Comma separated, `.csv`.
    Csv,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Csv => "csv",
        }
    }

    pub fn delimiter(self) -> u8 {
        match self {
            OutputFormat::Txt => b' ',
            OutputFormat::Csv => b',',
        }
    }
}

/// Parse matrix text: one row per line, one digit per cell.
///
/// Cells are separated by spaces, commas, semicolons or tabs. Blank lines
/// are skipped. Every cell must be a single digit in `1..=9` and all rows
/// must have the same length.
pub fn parse_matrix_text(text: &[u8]) -> Result<Grid, MatrixError> {
    let mut rows: Vec<Vec<i32>> = Vec::new();
    let mut row: Vec<i32> = Vec::new();
    let mut line = 0usize;
    let mut col = 0usize;
    let mut in_number = false;

    for (idx, &b) in text.iter().enumerate() {
        match b {
            b'0'..=b'9' => {
                if in_number {
                    return Err(MatrixError::MultiDigit {
                        row: line,
                        col: col - 1,
                        value: number_at(text, idx - 1),
                    });
                }
                let value = (b - b'0') as i32;
                if value < MIN_VALUE {
                    return Err(MatrixError::OutOfRange {
                        value: value as i64,
                        min: MIN_VALUE,
                        max: MAX_VALUE,
                    });
                }
                row.push(value);
                in_number = true;
                col += 1;
            }
            b' ' | b',' | b';' => {
                in_number = false;
                col += 1;
            }
            b'\t' => {
                in_number = false;
                col += TAB_WIDTH - (col % TAB_WIDTH);
            }
            b'\r' => {
                in_number = false;
            }
            b'\n' => {
                flush_row(&mut row, &mut rows);
                in_number = false;
                line += 1;
                col = 0;
            }
            other => {
                return Err(MatrixError::InvalidChar {
                    ch: other as char,
                    row: line,
                    col,
                });
            }
        }
    }
    flush_row(&mut row, &mut rows);

    Ok(Grid::from_rows(&rows)?)
}

fn flush_row(row: &mut Vec<i32>, rows: &mut Vec<Vec<i32>>) {
    if !row.is_empty() {
        rows.push(std::mem::take(row));
    }
}

/// The full run of digits containing position `idx`.
fn number_at(text: &[u8], idx: usize) -> i64 {
    let start = text[..=idx]
        .iter()
        .rposition(|b| !b.is_ascii_digit())
        .map_or(0, |p| p + 1);
    let end = text[idx..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map_or(text.len(), |p| idx + p);
    text[start..end]
        .iter()
        .fold(0i64, |acc, &d| acc.saturating_mul(10).saturating_add((d - b'0') as i64))
}

/// Load and parse a matrix file.
pub fn load_matrix(path: &Path) -> Result<Grid, MatrixError> {
    let bytes = std::fs::read(path)?;
    parse_matrix_text(&bytes)
}

/// Parse a brace-delimited matrix list such as
/// `{{1, 2, 1}, {2, 3, 2}}, {{1, 2}, {3, 4}}`.
///
/// Whitespace is ignored. Every value must fall within `min..=max`.
pub fn parse_matrices(input: &str, min: i32, max: i32) -> Result<Vec<Grid>, MatrixError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(MatrixError::EmptyString);
    }

    let mut grids = Vec::new();
    let mut rows: Vec<Vec<i32>> = Vec::new();
    let mut row: Vec<i32> = Vec::new();
    let mut token = String::new();
    let mut depth = 0usize;
    // set after a closing brace, cleared by the comma that must follow
    let mut need_comma = false;

    for ch in compact.chars() {
        match (depth, ch) {
            (_, '{') if depth < 2 && !need_comma => depth += 1,
            (2, '0'..='9' | '-') => token.push(ch),
            (2, ',') => push_value(&mut token, &mut row, min, max)?,
            (2, '}') => {
                push_value(&mut token, &mut row, min, max)?;
                rows.push(std::mem::take(&mut row));
                depth = 1;
                need_comma = true;
            }
            (1, '}') => {
                grids.push(Grid::from_rows(&rows)?);
                rows.clear();
                depth = 0;
                need_comma = true;
            }
            (0 | 1, ',') if need_comma => need_comma = false,
            _ => return Err(MatrixError::InvalidToken(format!("unexpected '{ch}'"))),
        }
    }

    if depth != 0 || !need_comma {
        return Err(MatrixError::InvalidToken("unterminated matrix".to_string()));
    }
    Ok(grids)
}

fn push_value(
    token: &mut String,
    row: &mut Vec<i32>,
    min: i32,
    max: i32,
) -> Result<(), MatrixError> {
    if token.is_empty() {
        return Err(MatrixError::InvalidToken("empty value".to_string()));
    }
    let value: i64 = token
        .parse()
        .map_err(|_| MatrixError::InvalidToken(token.clone()))?;
    if value < min as i64 || value > max as i64 {
        return Err(MatrixError::OutOfRange { value, min, max });
    }
    row.push(value as i32);
    token.clear();
    Ok(())
}

/// True for `.txt`/`.csv` files that are not previous result files.
pub fn is_matrix_file(path: &Path) -> bool {
    let ext_ok = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("txt") | Some("csv")
    );
    let name_ok = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| !n.contains("out"));
    ext_ok && name_ok
}

/// Matrix files directly under `dir`, sorted by path.
pub fn scan_dir(dir: &Path) -> Result<Vec<PathBuf>, MatrixError> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_matrix_file(&path) {
            paths.push(path);
        }
    }
    if paths.is_empty() {
        return Err(MatrixError::EmptyDir(dir.display().to_string()));
    }
    paths.sort();
    Ok(paths)
}

/// Load every matrix file under `dir`. Files that fail to parse are
/// logged and skipped.
pub fn load_dir(dir: &Path) -> Result<Vec<(PathBuf, Grid)>, MatrixError> {
    let paths = scan_dir(dir)?;
    log::info!("loading {} matrix files from {}", paths.len(), dir.display());

    let mut loaded = Vec::with_capacity(paths.len());
    for path in paths {
        match load_matrix(&path) {
            Ok(grid) => {
                log::debug!("loaded {} ({}x{})", path.display(), grid.rows(), grid.cols());
                loaded.push((path, grid));
            }
            Err(e) => log::warn!("skipping {}: {e}", path.display()),
        }
    }
    Ok(loaded)
}

/// Character written for a color code; codes outside 0..=9 become '#'.
pub fn cell_char(value: i32) -> char {
    u32::try_from(value)
        .ok()
        .and_then(|v| char::from_digit(v, 10))
        .unwrap_or('#')
}

/// Serialize a grid in the given format, CRLF line endings.
pub fn to_text(grid: &Grid, format: OutputFormat) -> Vec<u8> {
    fill_buffer(
        BoundingBox::full(grid.rows(), grid.cols()),
        format.delimiter(),
        |_, _| true,
        |r, c| cell_char(grid.get(r, c)),
    )
}

/// Bytes written for one `rows x cols` matrix file.
pub fn estimate_file_bytes(rows: usize, cols: usize) -> u64 {
    rows as u64 * (2 * cols as u64 + 1)
}
