use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{ensure, Context, Result};
use clap::Args;
use serde::Serialize;

use mcca::matfile::{self, OutputFormat};
use mcca::region::{Algorithm, Summary, UfRegions};
use mcca::render::{FileSink, OutputMode, OutputSink, PaintStyle, Renderer};
use mcca::{graphviz, naming, AnalysisConfig, Grid};

/// Options for the `analyze` subcommand. Flags override `--config`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Directory scanned for matrix files, and where results are written
    #[arg(long, default_value = ".")]
    pub root_dir: PathBuf,

    /// Finder to run: dfs, uf or both
    #[arg(long)]
    pub algo: Option<Algorithm>,

    /// Print grids to the console instead of writing result files
    #[arg(long, conflicts_with = "crop")]
    pub paint: bool,

    /// Paint with symbols instead of ANSI colors
    #[arg(long)]
    pub no_color: bool,

    /// Write only the bounding box of each maximum region
    #[arg(long)]
    pub crop: bool,

    /// Write a Graphviz drawing of the union-find forest (grids up to 15x15)
    #[arg(long)]
    pub visualizer: bool,

    /// Also render the drawing to PNG with the `dot` command
    #[arg(long, requires = "visualizer")]
    pub render_dot: bool,

    /// Analyze matrices given inline, e.g. "{{1,2},{2,2}}, {{3}}"
    #[arg(long)]
    pub matrix: Option<String>,

    /// Comma separated result files
    #[arg(long)]
    pub csv: bool,

    /// Keep existing result files
    #[arg(long)]
    pub no_overwrite: bool,

    /// TOML file with analysis settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print a JSON summary of every analyzed matrix to stdout
    #[arg(long)]
    pub json: bool,
}

impl AnalyzeArgs {
    /// Load the config file (if any) and apply command-line overrides.
    pub fn resolve_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => AnalysisConfig::default(),
        };
        if let Some(algo) = self.algo {
            config.algorithm = algo;
        }
        if self.paint {
            config.output = OutputMode::Paint;
        } else if self.crop {
            config.output = OutputMode::Cropped;
        }
        if self.no_color {
            config.paint_style = PaintStyle::Symbols;
        }
        if self.csv {
            config.format = OutputFormat::Csv;
        }
        if self.visualizer {
            config.visualize = true;
        }
        if self.no_overwrite {
            config.overwrite = false;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Serialize)]
struct MatrixReport {
    file: PathBuf,
    rows: usize,
    cols: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    dfs: Option<Summary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    union_find: Option<Summary>,
}

pub fn run(args: &AnalyzeArgs) -> Result<()> {
    let config = args.resolve_config()?;
    let inputs = match &args.matrix {
        Some(text) => write_inline_matrices(text, &args.root_dir, &config)?,
        None => matfile::load_dir(&args.root_dir)
            .with_context(|| format!("failed to scan {}", args.root_dir.display()))?,
    };

    let mut sink = FileSink {
        overwrite: config.overwrite,
    };
    let mut reports = Vec::with_capacity(inputs.len());
    for (path, grid) in &inputs {
        reports.push(analyze_file(path, grid, &config, args.render_dot, &mut sink)?);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}

/// Parse `--matrix` input, save each matrix under `root`, and return them.
fn write_inline_matrices(
    text: &str,
    root: &Path,
    config: &AnalysisConfig,
) -> Result<Vec<(PathBuf, Grid)>> {
    let grids = matfile::parse_matrices(text, config.min_value, config.max_value)
        .context("invalid --matrix argument")?;
    std::fs::create_dir_all(root)
        .with_context(|| format!("failed to create {}", root.display()))?;

    let mut sink = FileSink {
        overwrite: config.overwrite,
    };
    let mut inputs = Vec::with_capacity(grids.len());
    for (idx, grid) in grids.into_iter().enumerate() {
        let stats = grid.value_stats();
        let path = naming::parsed_matrix(
            root,
            idx + 1,
            (grid.rows(), grid.cols()),
            (stats.min, stats.max),
            config.format,
        );
        sink.write_output(&path, &matfile::to_text(&grid, config.format))
            .with_context(|| format!("failed to write {}", path.display()))?;
        inputs.push((path, grid));
    }
    Ok(inputs)
}

fn analyze_file(
    path: &Path,
    grid: &Grid,
    config: &AnalysisConfig,
    render_dot: bool,
    sink: &mut FileSink,
) -> Result<MatrixReport> {
    log::info!("analyzing {} ({}x{})", path.display(), grid.rows(), grid.cols());
    let analysis = mcca::analyze(grid, config.algorithm);
    let stdout = io::stdout();
    let mut console = stdout.lock();
    let mut renderer = Renderer::new(sink, path, config.format);

    if let Some((region, summary)) = &analysis.dfs {
        log_summary(summary);
        if config.output == OutputMode::Paint {
            writeln!(console, "{}:", summary.algorithm)?;
        }
        renderer
            .render_dfs(grid, region, config.output, config.paint_style, &mut console)
            .with_context(|| format!("failed to render DFS result for {}", path.display()))?;
    }

    if let Some((regions, summary)) = &analysis.union_find {
        log_summary(summary);
        if config.output == OutputMode::Paint {
            writeln!(console, "{}:", summary.algorithm)?;
        }
        renderer
            .render_union_find(grid, regions, config.output, config.paint_style, &mut console)
            .with_context(|| format!("failed to render UF result for {}", path.display()))?;
        if config.visualize {
            visualize(path, grid, regions, render_dot, sink)?;
        }
    }

    Ok(MatrixReport {
        file: path.to_path_buf(),
        rows: grid.rows(),
        cols: grid.cols(),
        dfs: analysis.dfs.map(|(_, s)| s),
        union_find: analysis.union_find.map(|(_, s)| s),
    })
}

fn log_summary(summary: &Summary) {
    log::info!(
        "{}: max region size {}, color {} (values {}..={}) in {:?}",
        summary.algorithm,
        summary.max_size,
        summary.max_color,
        summary.stats.min,
        summary.stats.max,
        summary.elapsed
    );
}

fn visualize(
    path: &Path,
    grid: &Grid,
    regions: &UfRegions,
    render_dot: bool,
    sink: &mut FileSink,
) -> Result<()> {
    if !graphviz::fits(grid) {
        log::warn!(
            "{} is larger than {}x{}, skipping visualization",
            path.display(),
            graphviz::VISUALIZER_LIMIT,
            graphviz::VISUALIZER_LIMIT
        );
        return Ok(());
    }
    let dot_path = naming::uf_tree(path, regions.max_size, regions.max_color, "dot");
    let wrote = sink
        .write_output(&dot_path, graphviz::to_dot(regions).as_bytes())
        .with_context(|| format!("failed to write {}", dot_path.display()))?;
    if wrote && render_dot {
        let png = run_dot(&dot_path)?;
        log::info!("rendered {}", png.display());
    }
    Ok(())
}

/// Render a DOT file to PNG next to it with the Graphviz `dot` command.
fn run_dot(dot_path: &Path) -> Result<PathBuf> {
    let png = dot_path.with_extension("png");
    let status = Command::new("dot")
        .arg("-Tpng")
        .arg(dot_path)
        .arg("-o")
        .arg(&png)
        .status()
        .context("failed to run `dot`, is Graphviz installed?")?;
    ensure!(status.success(), "`dot` exited with {status}");
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: AnalyzeArgs,
    }

    fn parse(argv: &[&str]) -> AnalyzeArgs {
        TestCli::try_parse_from(std::iter::once("mcca").chain(argv.iter().copied()))
            .unwrap()
            .args
    }

    #[test]
    fn flags_override_defaults() {
        let args = parse(&["--algo", "dfs", "--crop", "--csv", "--no-overwrite"]);
        let config = args.resolve_config().unwrap();
        assert_eq!(config.algorithm, Algorithm::Dfs);
        assert_eq!(config.output, OutputMode::Cropped);
        assert_eq!(config.format, OutputFormat::Csv);
        assert!(!config.overwrite);
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("mcca.toml");
        std::fs::write(&cfg, "algorithm = \"uf\"\noutput = \"cropped\"\n").unwrap();
        let cfg_arg = cfg.to_str().unwrap();

        let config = parse(&["--config", cfg_arg]).resolve_config().unwrap();
        assert_eq!(config.algorithm, Algorithm::UnionFind);
        assert_eq!(config.output, OutputMode::Cropped);

        let config = parse(&["--config", cfg_arg, "--paint", "--no-color"])
            .resolve_config()
            .unwrap();
        assert_eq!(config.output, OutputMode::Paint);
        assert_eq!(config.paint_style, PaintStyle::Symbols);
    }

    #[test]
    fn paint_and_crop_conflict() {
        assert!(TestCli::try_parse_from(["mcca", "--paint", "--crop"]).is_err());
        assert!(TestCli::try_parse_from(["mcca", "--render-dot"]).is_err());
        assert!(TestCli::try_parse_from(["mcca", "--algo", "bfs"]).is_err());
    }

    #[test]
    fn inline_matrices_written_and_analyzed() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let args = parse(&[
            "--root-dir",
            root,
            "--matrix",
            "{{1,1,2},{1,2,2},{3,3,2}}, {{5,5},{5,4}}",
            "--visualizer",
        ]);
        run(&args).unwrap();

        let first = dir.path().join("mat1_3_3_1_3.txt");
        assert_eq!(
            matfile::load_matrix(&first).unwrap(),
            Grid::from_rows(&[[1, 1, 2], [1, 2, 2], [3, 3, 2]]).unwrap()
        );
        for name in [
            "mat1_3_3_1_3_out_max4_c2_DFS.txt",
            "mat1_3_3_1_3_out_max4_c2_UF.txt",
            "mat1_3_3_1_3_out_max4_c2_UFtree.dot",
            "mat2_2_2_4_5.txt",
            "mat2_2_2_4_5_out_max3_c5_DFS.txt",
        ] {
            assert!(dir.path().join(name).is_file(), "missing {name}");
        }
    }

    #[test]
    fn directory_scan_ignores_results() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.csv"), "1,2\r\n2,1\r\n").unwrap();
        let root = dir.path().to_str().unwrap();

        run(&parse(&["--root-dir", root, "--csv", "--crop", "--algo", "uf"])).unwrap();
        let cropped = dir.path().join("a_out_cropped_UF_color1_TL(0,0)_BR(1,2).csv");
        assert_eq!(std::fs::read(&cropped).unwrap(), b"1,,\r\n,,1\r\n");
        // the second scan sees only the original input
        run(&parse(&["--root-dir", root, "--csv", "--crop", "--algo", "uf"])).unwrap();
        assert_eq!(matfile::scan_dir(dir.path()).unwrap().len(), 1);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        assert!(run(&parse(&["--root-dir", root])).is_err());
    }
}
