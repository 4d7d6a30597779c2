//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers via
//! the `State` extractor.
//!
//! The dashboard state is one immutable [`Snapshot`] behind a
//! `parking_lot::RwLock`. Readers clone the inner `Arc` and release the lock
//! at once. Writers compute the next snapshot from the current one while
//! holding the write lock, then swap it in, so updates are applied one at a
//! time and each completes before the next starts. The lock is never held
//! across an `.await`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use sibangda_core::{Snapshot, DEFAULT_MAX_IMAGE_BYTES};
use thiserror::Error;
use utoipa::ToSchema;

// -- Snapshot Store -----------------------------------------------------------

#[derive(Debug)]
struct Versioned {
    snapshot: Arc<Snapshot>,
    revision: u64,
    updated_at: DateTime<Utc>,
}

/// Thread-safe, cloneable holder of the current [`Snapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    inner: Arc<RwLock<Versioned>>,
}

/// Revision metadata of the current snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    /// Number of applied updates since start.
    pub revision: u64,
    /// Time of the last applied update (or of startup).
    pub updated_at: DateTime<Utc>,
}

impl SnapshotStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Versioned {
                snapshot: Arc::new(snapshot),
                revision: 0,
                updated_at: Utc::now(),
            })),
        }
    }

    /// Current snapshot. Cheap: clones an `Arc`.
    pub fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.inner.read().snapshot)
    }

    pub fn revision(&self) -> Revision {
        self.current_with_revision().1
    }

    /// Current snapshot and its revision, read under one guard.
    pub fn current_with_revision(&self) -> (Arc<Snapshot>, Revision) {
        let guard = self.inner.read();
        (
            Arc::clone(&guard.snapshot),
            Revision {
                revision: guard.revision,
                updated_at: guard.updated_at,
            },
        )
    }

    /// Apply an update under the write lock.
    ///
    /// `f` receives the current snapshot and returns the next one plus a
    /// result for the caller. On `Err` the current snapshot is kept.
    pub fn update<R, E>(
        &self,
        f: impl FnOnce(&Snapshot) -> Result<(Snapshot, R), E>,
    ) -> Result<R, E> {
        let mut guard = self.inner.write();
        let (next, result) = f(&guard.snapshot)?;
        guard.snapshot = Arc::new(next);
        guard.revision += 1;
        guard.updated_at = Utc::now();
        Ok(result)
    }

    /// Try to take the write lock without blocking. Used by readiness.
    pub fn is_writable(&self) -> bool {
        self.inner.try_write().is_some()
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(Snapshot::seeded())
    }
}

// -- Configuration ------------------------------------------------------------

/// Error reading configuration from the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} must be a valid port number, got {value:?}")]
    InvalidPort { var: &'static str, value: String },

    #[error("SIBANGDA_MAX_IMAGE_BYTES must be a positive integer, got {0:?}")]
    InvalidImageLimit(String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Largest accepted image upload in bytes.
    pub max_image_bytes: usize,
    /// Whether `/metrics` and the request metrics middleware are mounted.
    pub metrics_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            metrics_enabled: true,
        }
    }
}

impl AppConfig {
    /// Build configuration from environment variables.
    ///
    /// - `SIBANGDA_PORT` (fallback `PORT`, default 8080)
    /// - `SIBANGDA_MAX_IMAGE_BYTES` (default 5 MiB)
    /// - `SIBANGDA_METRICS_ENABLED` (anything but `"false"` enables)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match ["SIBANGDA_PORT", "PORT"]
            .into_iter()
            .find_map(|var| lookup(var).map(|value| (var, value)))
        {
            Some((var, value)) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort { var, value })?,
            None => defaults.port,
        };

        let max_image_bytes = match lookup("SIBANGDA_MAX_IMAGE_BYTES") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidImageLimit(value)),
            },
            None => defaults.max_image_bytes,
        };

        let metrics_enabled = lookup("SIBANGDA_METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(defaults.metrics_enabled);

        Ok(Self {
            port,
            max_image_bytes,
            metrics_enabled,
        })
    }
}

// -- AppState -----------------------------------------------------------------

/// Shared application state accessible to all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: SnapshotStore,
    pub config: AppConfig,
}

impl AppState {
    /// Seeded state with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Seeded state with the given configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            store: SnapshotStore::default(),
            config,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn config_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_image_bytes, 5 * 1024 * 1024);
        assert!(config.metrics_enabled);
    }

    #[test]
    fn sibangda_port_takes_precedence() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("SIBANGDA_PORT", "9000"), ("PORT", "7000")]))
                .unwrap();
        assert_eq!(config.port, 9000);
        let config = AppConfig::from_lookup(lookup_from(&[("PORT", "7000")])).unwrap();
        assert_eq!(config.port, 7000);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&[("PORT", "http")])),
            Err(ConfigError::InvalidPort { var: "PORT", .. })
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&[("SIBANGDA_MAX_IMAGE_BYTES", "0")])),
            Err(ConfigError::InvalidImageLimit(_))
        ));
    }

    #[test]
    fn metrics_can_be_disabled() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("SIBANGDA_METRICS_ENABLED", "FALSE")])).unwrap();
        assert!(!config.metrics_enabled);
    }

    #[test]
    fn store_update_swaps_snapshot_and_bumps_revision() {
        let store = SnapshotStore::default();
        let before = store.current();
        let removed: Result<usize, ()> = store.update(|s| {
            let mut next = s.clone();
            next.ormas.clear();
            Ok((next, 5))
        });
        assert_eq!(removed, Ok(5));
        assert_eq!(store.current().ormas.len(), 0);
        assert_eq!(before.ormas.len(), 5, "held snapshots are immutable");
        assert_eq!(store.revision().revision, 1);
    }

    #[test]
    fn failed_update_keeps_snapshot() {
        let store = SnapshotStore::default();
        let result: Result<(), &str> = store.update(|_| Err("rejected"));
        assert_eq!(result, Err("rejected"));
        assert_eq!(store.current().ormas.len(), 5);
        assert_eq!(store.revision().revision, 0);
    }

    #[test]
    fn snapshot_and_revision_read_together() {
        let store = SnapshotStore::default();
        for expected in 1..=3u64 {
            store
                .update(|s| {
                    let mut next = s.clone();
                    next.ormas.pop();
                    Ok::<_, ()>((next, ()))
                })
                .unwrap();
            let (snapshot, revision) = store.current_with_revision();
            assert_eq!(revision.revision, expected);
            assert_eq!(snapshot.ormas.len() as u64, 5 - expected);
        }
    }
}
