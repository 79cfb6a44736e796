use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use baseline_rebase::application::dto::OutputFormat;
use baseline_rebase::baseline::domain::{OverlayId, PackId};

/// Compare STIG content pack releases and rebase overlays onto new releases
#[derive(Parser, Debug)]
#[command(name = "baseline-rebase")]
#[command(version)]
#[command(about = "Compare compliance baseline releases and rebase overlays", long_about = None)]
pub struct Args {
    /// Directory holding packs/ and overlays/ (defaults to config, then current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file path (defaults to baseline-rebase.config.yml in the data directory)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress progress output; errors and the report itself are still written
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare two content packs control by control
    Diff(DiffArgs),
    /// Compute (and optionally apply) the rebase of an overlay onto a new pack
    Rebase(RebaseArgs),
}

#[derive(ClapArgs, Debug)]
pub struct DiffArgs {
    /// Baseline (older) pack id
    #[arg(long, value_name = "PACK")]
    pub baseline: PackId,

    /// Target (newer) pack id
    #[arg(long, value_name = "PACK")]
    pub target: PackId,

    /// Output format: json, csv or table
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct RebaseArgs {
    /// Overlay to rebase
    #[arg(long, value_name = "ID")]
    pub overlay: OverlayId,

    /// Pack the overlay was authored against
    #[arg(long, value_name = "PACK")]
    pub baseline: PackId,

    /// Pack to move the overlay onto
    #[arg(long, value_name = "PACK")]
    pub target: PackId,

    /// Output format: json or table
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Save the rebased overlay when no blocking conflicts remain
    #[arg(long)]
    pub apply: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
