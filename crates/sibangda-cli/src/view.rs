//! # View Subcommand
//!
//! Prints the state slice a dashboard view renders. Unknown view names
//! fall back to the dashboard overview.

use anyhow::Result;
use clap::Args;

use sibangda_core::{route, Snapshot, View};

use crate::{emit, parse_filter, OutputFormat};

/// Arguments for `sibangda view`.
#[derive(Args, Debug)]
pub struct ViewArgs {
    /// View name: dashboard, map, handling, ormas, wasnas or input.
    #[arg(default_value = "dashboard")]
    pub name: String,

    /// District display name; omit for all. Ignored by the input view.
    #[arg(long)]
    pub district: Option<String>,
}

/// Execute the view subcommand.
pub fn run_view(args: &ViewArgs, snapshot: &Snapshot, format: OutputFormat) -> Result<u8> {
    let filter = parse_filter(args.district.as_deref())?;
    let view = View::from_name(&args.name);
    if view.as_str() != args.name {
        tracing::warn!(requested = %args.name, "unknown view, showing {view}");
    }
    emit(&route(snapshot, view, filter), format)?;
    Ok(0)
}
