use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Seasonal precipitation scaling and hourly BEPS forcing preparation.
#[derive(Parser)]
#[command(
    name = "pluvia",
    version,
    about = "Scale wet-season precipitation to climatology and write hourly BEPS forcing"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Run the full pipeline and write daily BEPS files.
    Run(RunArgs),
    /// Detect the dry season and report the boundary as JSON.
    Seasons(SeasonsArgs),
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "pluvia.toml")]
    pub config: PathBuf,

    /// Write the experiment without scaling precipitation.
    #[arg(long)]
    pub no_scale: bool,

    /// Override the target year from config.
    #[arg(short, long)]
    pub target_year: Option<i32>,

    /// Override the output directory from config.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Overwrite existing daily files.
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `seasons` subcommand.
#[derive(clap::Args)]
pub struct SeasonsArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "pluvia.toml")]
    pub config: PathBuf,

    /// Path for the JSON report (default: `<output_dir>/summary.json`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
