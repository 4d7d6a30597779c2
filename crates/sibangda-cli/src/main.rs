//! # sibangda CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sibangda_cli::report::{
    run_categories, run_dashboard, run_districts, run_drill_down, run_rollup, CategoriesArgs,
    DashboardArgs, DrillDownArgs, RollupArgs,
};
use sibangda_cli::seed::{run_seed, SeedArgs};
use sibangda_cli::view::{run_view, ViewArgs};
use sibangda_cli::{load_snapshot, OutputFormat};

/// SIBANGDA CLI
///
/// Reports over the regional security monitoring snapshot: district lists,
/// dashboard statistics, map rollups, drill-down and view routing.
#[derive(Parser, Debug)]
#[command(name = "sibangda", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Snapshot file (JSON or YAML). Defaults to the built-in seed.
    #[arg(long, global = true, value_name = "FILE")]
    snapshot: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the ten districts in canonical order.
    Districts,

    /// Dashboard stat cards and chart series.
    Dashboard(DashboardArgs),

    /// One map marker per district (worst level or status).
    Rollup(RollupArgs),

    /// Organization count per category.
    Categories(CategoriesArgs),

    /// Per-location counts within one district.
    DrillDown(DrillDownArgs),

    /// State slice for one dashboard view.
    View(ViewArgs),

    /// Export the built-in seed snapshot.
    Seed(SeedArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("sibangda CLI starting");

    let result = run(&cli);

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// Dispatch a parsed command. Only report commands read a snapshot.
fn run(cli: &Cli) -> anyhow::Result<u8> {
    let snapshot = || load_snapshot(cli.snapshot.as_deref());
    match &cli.command {
        Commands::Districts => run_districts(cli.format),
        Commands::Seed(args) => run_seed(args, cli.format),
        Commands::Dashboard(args) => run_dashboard(args, &snapshot()?, cli.format),
        Commands::Rollup(args) => run_rollup(args, &snapshot()?, cli.format),
        Commands::Categories(args) => run_categories(args, &snapshot()?, cli.format),
        Commands::DrillDown(args) => run_drill_down(args, &snapshot()?, cli.format),
        Commands::View(args) => run_view(args, &snapshot()?, cli.format),
    }
}
