use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "SPAM++ CLI - Water-site free-energy statistics from molecular-dynamics trajectories using the Solvent Partitioning Analysis Method.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate free-energy statistics for every water site and write the report.
    Stats(StatsArgs),
    /// Inspect a peak file and optionally prune sites before trajectory reordering.
    Peaks(PeaksArgs),
    /// Verify that the external trajectory and energy programs are available.
    Check(CheckArgs),
}

/// Arguments for the `stats` subcommand.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Path to the frame-inclusion report (spam.info) from trajectory reordering.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub info: PathBuf,

    /// Prefix of the per-site energy logs; site N is read from <PREFIX>.<N>.out.
    #[arg(short, long, required = true, value_name = "PREFIX")]
    pub energy_prefix: PathBuf,

    /// Path for the aggregated site-statistics report.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Optional TOML settings file (sampling sizes, bulk-water references).
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the number of points per bootstrap subsample (0 = full series).
    #[arg(long, value_name = "INT")]
    pub sample_size: Option<usize>,

    /// Override the number of bootstrap subsamples (1 = deterministic point estimate).
    #[arg(long, value_name = "INT")]
    pub subsamples: Option<usize>,

    /// Write the report as CSV instead of the fixed-width text table.
    #[arg(long)]
    pub csv: bool,

    /// Allow overwriting an existing report file.
    #[arg(short = 'O', long)]
    pub overwrite: bool,
}

/// Arguments for the `peaks` subcommand.
#[derive(Args, Debug)]
pub struct PeaksArgs {
    /// Input peak file in the XYZ-with-density format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Output peak file; required when removing peaks.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Zero-based indices of peaks to remove for the output file.
    #[arg(value_name = "PEAK")]
    pub remove: Vec<usize>,

    /// Allow overwriting an existing output file.
    #[arg(short = 'O', long)]
    pub overwrite: bool,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Name (or path) of the trajectory-processing executable.
    #[arg(long, value_name = "EXE", default_value = "cpptraj")]
    pub cpptraj: String,

    /// Name (or path) of the energy-engine executable.
    #[arg(long, value_name = "EXE", default_value = "namd2")]
    pub namd: String,

    /// Only check the trajectory processor.
    #[arg(long, conflicts_with = "energy_only")]
    pub traj_only: bool,

    /// Only check the energy engine.
    #[arg(long)]
    pub energy_only: bool,
}
