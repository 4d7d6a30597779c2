//! # Middleware Stack
//!
//! Tower middleware for the API layer:
//! - `TraceLayer` request spans (mounted in [`crate::app`]).
//! - [`metrics`]: Prometheus request metrics and domain gauges.

pub mod metrics;
