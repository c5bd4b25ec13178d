use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use clap::Args;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use mcca::matfile::{self, OutputFormat};
use mcca::naming;

const MAX_SIDE: usize = 15_000;
const MAX_INC: usize = MAX_SIDE - 1;
/// Total output above this needs `--confirm`.
const CONFIRM_BYTES: u64 = 500 * 1024 * 1024;

/// Random matrix file generation settings.
#[derive(Args, Debug, Clone)]
pub struct FilegenConfig {
    /// Directory the matrix files are written to
    #[arg(long, default_value = ".")]
    pub root_dir: PathBuf,
    #[arg(long, default_value_t = 10)]
    pub min_rows: usize,
    #[arg(long, default_value_t = 10)]
    pub max_rows: usize,
    #[arg(long, default_value_t = 1)]
    pub row_inc: usize,
    #[arg(long, default_value_t = 10)]
    pub min_cols: usize,
    #[arg(long, default_value_t = 10)]
    pub max_cols: usize,
    #[arg(long, default_value_t = 1)]
    pub col_inc: usize,
    /// Smallest color code
    #[arg(long, default_value_t = 1)]
    pub min_v: i32,
    /// Largest color code
    #[arg(long, default_value_t = 9)]
    pub max_v: i32,
    /// Square matrices only: cols follow rows
    #[arg(long)]
    pub sqmat: bool,
    /// Comma separated output instead of space separated
    #[arg(long)]
    pub csv: bool,
    /// Overwrite existing files
    #[arg(long)]
    pub ovr: bool,
    /// Allow output larger than 500 MB
    #[arg(long)]
    pub confirm: bool,
    /// RNG seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

impl FilegenConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, min, max) in [
            ("rows", self.min_rows, self.max_rows),
            ("cols", self.min_cols, self.max_cols),
        ] {
            ensure!(
                (1..=MAX_SIDE).contains(&min) && (1..=MAX_SIDE).contains(&max),
                "{name} must be in 1..={MAX_SIDE}, got {min}..={max}"
            );
            ensure!(min <= max, "min {name} {min} exceeds max {name} {max}");
        }
        ensure!(
            (1..=MAX_INC).contains(&self.row_inc) && (1..=MAX_INC).contains(&self.col_inc),
            "increments must be in 1..={MAX_INC}"
        );
        ensure!(
            (matfile::MIN_VALUE..=matfile::MAX_VALUE).contains(&self.min_v)
                && (matfile::MIN_VALUE..=matfile::MAX_VALUE).contains(&self.max_v),
            "values must be in {}..={}",
            matfile::MIN_VALUE,
            matfile::MAX_VALUE
        );
        ensure!(
            self.min_v <= self.max_v,
            "min value {} exceeds max value {}",
            self.min_v,
            self.max_v
        );
        Ok(())
    }

    pub fn format(&self) -> OutputFormat {
        if self.csv {
            OutputFormat::Csv
        } else {
            OutputFormat::Txt
        }
    }

    /// Every (rows, cols) shape to generate, in order.
    pub fn shapes(&self) -> Vec<(usize, usize)> {
        let mut shapes = Vec::new();
        for rows in (self.min_rows..=self.max_rows).step_by(self.row_inc) {
            if self.sqmat {
                shapes.push((rows, rows));
                continue;
            }
            for cols in (self.min_cols..=self.max_cols).step_by(self.col_inc) {
                shapes.push((rows, cols));
            }
        }
        shapes
    }
}

/// Generate all configured files. Returns the paths written.
pub fn run(config: &FilegenConfig) -> Result<Vec<PathBuf>> {
    config.validate()?;
    let shapes = config.shapes();
    let total: u64 = shapes
        .iter()
        .map(|&(r, c)| matfile::estimate_file_bytes(r, c))
        .sum();
    log::info!(
        "{} files, estimated {:.1} MB",
        shapes.len(),
        total as f64 / (1024.0 * 1024.0)
    );
    ensure!(
        total <= CONFIRM_BYTES || config.confirm,
        "estimated output of {total} bytes exceeds 500 MB, pass --confirm to proceed"
    );

    std::fs::create_dir_all(&config.root_dir)
        .with_context(|| format!("failed to create {}", config.root_dir.display()))?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let format = config.format();
    let values = (config.min_v, config.max_v);
    let mut written = Vec::new();
    for (rows, cols) in shapes {
        let path = naming::generated_matrix(&config.root_dir, (rows, cols), values, format);
        if !config.ovr && path.exists() {
            log::warn!("{} already exists, skipping", path.display());
            continue;
        }
        write_random(&path, rows, cols, values, format, &mut rng)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Stream one random matrix to `path` row by row.
fn write_random<R: Rng>(
    path: &Path,
    rows: usize,
    cols: usize,
    (min_v, max_v): (i32, i32),
    format: OutputFormat,
    rng: &mut R,
) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    let delim = format.delimiter();
    let mut line = Vec::with_capacity(2 * cols + 1);
    for _ in 0..rows {
        line.clear();
        for c in 0..cols {
            if c > 0 {
                line.push(delim);
            }
            line.push(matfile::cell_char(rng.random_range(min_v..=max_v)) as u8);
        }
        line.extend_from_slice(b"\r\n");
        out.write_all(&line)?;
    }
    out.flush()
}
