use anyhow::Result;
use clap::{Parser, Subcommand};
use flexi_logger::{Logger, LoggerHandle};

mod analyze;
mod filegen;

/// Max connected colors analyzer: find the largest 8-connected same-color
/// region in color-code matrices
#[derive(Parser)]
#[command(name = "mcca", version)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find the largest region in each matrix file (or --matrix input)
    Analyze(analyze::AnalyzeArgs),
    /// Generate random matrix files
    Filegen(filegen::FilegenConfig),
}

/// Log to stderr so painted grids and JSON on stdout stay clean.
/// `RUST_LOG` takes precedence over the flag-derived level.
fn setup_logging(verbose: u8, quiet: bool) -> Result<LoggerHandle> {
    let level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let handle = Logger::try_with_env_or_str(level)?
        .log_to_stderr()
        .start()?;
    Ok(handle)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = setup_logging(cli.verbose, cli.quiet)?;

    match &cli.command {
        Command::Analyze(args) => analyze::run(args)?,
        Command::Filegen(config) => {
            let written = filegen::run(config)?;
            log::info!("generated {} matrix files", written.len());
        }
    }
    Ok(())
}
