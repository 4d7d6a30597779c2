//! # Seed Subcommand
//!
//! Exports the built-in seed snapshot, e.g. as a starting point for a
//! hand-edited `--snapshot` file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use sibangda_core::Snapshot;

use crate::OutputFormat;

/// Arguments for `sibangda seed`.
#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Write to this file instead of stdout.
    #[arg(long, short, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// Execute the seed subcommand.
pub fn run_seed(args: &SeedArgs, format: OutputFormat) -> Result<u8> {
    let rendered = format.render(&Snapshot::seeded())?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write seed: {}", path.display()))?;
            println!("OK: wrote seed snapshot to {}", path.display());
        }
        None => println!("{}", rendered.trim_end()),
    }
    Ok(0)
}
