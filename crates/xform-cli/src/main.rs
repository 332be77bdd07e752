//! xform - scene transform hierarchy tool
//!
//! Evaluates YAML scene files and converts between matrices and
//! position/rotation/scale.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod scene_file;

#[derive(Parser)]
#[command(name = "xform")]
#[command(author, version, about = "Scene transform hierarchy tool")]
#[command(long_about = "
Evaluates transform hierarchies and converts between matrices and TRS.

Examples:
  xform eval scene.yaml                        # Local and world matrices
  xform eval scene.yaml --json --world-only
  xform compose -p 1,2,3 -e 0,90,0,YXZ --degrees -s 2,2,2
  xform decompose 1 0 0 0  0 1 0 0  0 0 1 0  5 6 7 1
  RUST_LOG=xform_scene=trace xform eval scene.yaml
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging, extra fields)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a YAML scene and print node matrices
    #[command(visible_alias = "e")]
    Eval(EvalArgs),

    /// Build a matrix from position, Euler rotation and scale
    #[command(visible_alias = "c")]
    Compose(ComposeArgs),

    /// Split a matrix into position, rotation and scale
    #[command(visible_alias = "d")]
    Decompose(DecomposeArgs),
}

#[derive(Args)]
struct EvalArgs {
    /// Scene file (YAML)
    input: PathBuf,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,

    /// Only print world matrices
    #[arg(long)]
    world_only: bool,
}

#[derive(Args)]
struct ComposeArgs {
    /// Translation as x,y,z
    #[arg(short, long, default_value = "0,0,0", allow_hyphen_values = true)]
    position: String,

    /// Rotation as x,y,z or x,y,z,ORDER
    #[arg(short, long, default_value = "0,0,0", allow_hyphen_values = true)]
    euler: String,

    /// Scale as x,y,z
    #[arg(short, long, default_value = "1,1,1", allow_hyphen_values = true)]
    scale: String,

    /// Euler angles are in degrees
    #[arg(long)]
    degrees: bool,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct DecomposeArgs {
    /// 16 matrix elements, column-major unless --row-major
    #[arg(num_args = 16, required = true, allow_negative_numbers = true)]
    elements: Vec<f64>,

    /// Elements are given row by row
    #[arg(long)]
    row_major: bool,

    /// Rotation order of the reported Euler angles
    #[arg(short, long, default_value = "XYZ")]
    order: String,

    /// Report Euler angles in degrees
    #[arg(long)]
    degrees: bool,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

/// Installs the fmt subscriber on stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Eval(args) => commands::eval::run(args, cli.verbose),
        Commands::Compose(args) => commands::compose::run(args, cli.verbose),
        Commands::Decompose(args) => commands::decompose::run(args, cli.verbose),
    }
}
