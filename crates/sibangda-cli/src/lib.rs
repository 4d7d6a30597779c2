//! # sibangda-cli: CLI Tool for the SIBANGDA Dashboard
//!
//! Provides the `sibangda` command-line interface over a dashboard
//! snapshot. Without `--snapshot` the built-in seed is used; with it, a
//! JSON or YAML file is read (either a bare snapshot or the `/v1/snapshot`
//! export of the API).
//!
//! ## Subcommands
//!
//! - `sibangda districts`: The ten districts in canonical order.
//! - `sibangda dashboard`: Stat cards and chart series.
//! - `sibangda rollup`: Per-district map markers.
//! - `sibangda categories`: Organization count per category.
//! - `sibangda drill-down`: Per-location counts within a district.
//! - `sibangda view`: State slice for one dashboard view.
//! - `sibangda seed`: Export the built-in seed snapshot.
//!
//! ```bash
//! sibangda dashboard --district Bima
//! sibangda rollup handling --format yaml
//! sibangda --snapshot export.json drill-down conflict "Lombok Tengah"
//! ```

pub mod report;
pub mod seed;
pub mod view;

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use sibangda_core::{DistrictFilter, Snapshot};

/// Output encoding for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    /// Render a value as pretty JSON or YAML.
    pub fn render<T: Serialize>(self, value: &T) -> Result<String> {
        match self {
            Self::Json => serde_json::to_string_pretty(value).context("failed to encode JSON"),
            Self::Yaml => serde_yaml::to_string(value).context("failed to encode YAML"),
        }
    }
}

/// Render and print a value to stdout.
pub fn emit<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    let rendered = format.render(value)?;
    println!("{}", rendered.trim_end());
    Ok(())
}

/// Snapshot file contents: either the API export or a bare snapshot.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Export { snapshot: Snapshot },
    Bare(Snapshot),
}

impl From<SnapshotFile> for Snapshot {
    fn from(file: SnapshotFile) -> Self {
        match file {
            SnapshotFile::Export { snapshot } | SnapshotFile::Bare(snapshot) => snapshot,
        }
    }
}

/// Load the snapshot to report on.
///
/// `None` yields the built-in seed. Files ending in `.yaml`/`.yml` are read
/// as YAML, everything else as JSON. A loaded file must pass
/// [`Snapshot::validate`].
pub fn load_snapshot(path: Option<&Path>) -> Result<Snapshot> {
    let Some(path) = path else {
        tracing::debug!("using built-in seed snapshot");
        return Ok(Snapshot::seeded());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot: {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    let file: SnapshotFile = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML snapshot: {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON snapshot: {}", path.display()))?
    };
    let snapshot = Snapshot::from(file);
    snapshot
        .validate()
        .with_context(|| format!("invalid snapshot: {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        conflicts = snapshot.conflicts.len(),
        handling = snapshot.handling.len(),
        foreigners = snapshot.foreigners.len(),
        ormas = snapshot.ormas.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

/// Resolve an optional `--district` value into a filter.
pub fn parse_filter(district: Option<&str>) -> Result<DistrictFilter> {
    DistrictFilter::from_query(district).context("invalid --district")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_path_uses_seed() {
        let snapshot = load_snapshot(None).unwrap();
        assert_eq!(snapshot, Snapshot::seeded());
    }

    #[test]
    fn loads_bare_json_snapshot() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let mut snapshot = Snapshot::seeded();
        snapshot.ormas.truncate(2);
        write!(file, "{}", serde_json::to_string(&snapshot).unwrap()).unwrap();
        let loaded = load_snapshot(Some(file.path())).unwrap();
        assert_eq!(loaded.ormas.len(), 2);
    }

    #[test]
    fn loads_api_export() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let export = serde_json::json!({
            "revision": 3,
            "updatedAt": "2024-02-20T08:00:00Z",
            "snapshot": Snapshot::seeded(),
        });
        write!(file, "{export}").unwrap();
        let loaded = load_snapshot(Some(file.path())).unwrap();
        assert_eq!(loaded.conflicts.len(), 10);
    }

    #[test]
    fn loads_yaml_snapshot() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(file, "{}", serde_yaml::to_string(&Snapshot::seeded()).unwrap()).unwrap();
        let loaded = load_snapshot(Some(file.path())).unwrap();
        assert_eq!(loaded.foreigners.len(), 10);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let mut snapshot = Snapshot::seeded();
        let copy = snapshot.ormas[0].clone();
        snapshot.ormas.push(copy);
        write!(file, "{}", serde_json::to_string(&snapshot).unwrap()).unwrap();
        let err = load_snapshot(Some(file.path())).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("invalid snapshot"), "{msg}");
        assert!(msg.contains("duplicate ormas id"), "{msg}");
    }

    #[test]
    fn blank_record_fields_are_rejected() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let mut snapshot = Snapshot::seeded();
        snapshot.ormas[1].name = String::new();
        write!(file, "{}", serde_yaml::to_string(&snapshot).unwrap()).unwrap();
        let err = load_snapshot(Some(file.path())).unwrap_err();
        assert!(format!("{err:#}").contains("name must not be empty"));
    }

    #[test]
    fn malformed_snapshot_reports_path() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{\"conflicts\": 7}}").unwrap();
        let err = load_snapshot(Some(file.path())).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse JSON snapshot"));
    }

    #[test]
    fn unknown_district_is_rejected() {
        assert!(parse_filter(Some("Jakarta")).is_err());
        assert_eq!(parse_filter(None).unwrap(), DistrictFilter::All);
    }
}
