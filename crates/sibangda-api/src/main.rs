//! # sibangda-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the SIBANGDA dashboard.
//! Binds to configurable port (default 8080).

use sibangda_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Build configuration from environment.
    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Invalid configuration: {e}");
        e
    })?;
    let port = config.port;

    let state = AppState::with_config(config);
    {
        let snapshot = state.store.current();
        tracing::info!(
            conflicts = snapshot.conflicts.len(),
            handling = snapshot.handling.len(),
            foreigners = snapshot.foreigners.len(),
            ormas = snapshot.ormas.len(),
            "seed data loaded"
        );
    }

    let app = sibangda_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("SIBANGDA API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
