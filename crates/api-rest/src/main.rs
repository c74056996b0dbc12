//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging. The workspace's main `prestadores-run` binary wires the
//! same router and reads the same environment.

use std::sync::Arc;

use prestadores_core::config::{page_size_from_env_value, seed_flag_from_env_value};
use prestadores_core::{CoreConfig, Services};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the prestadores REST API server
///
/// # Environment Variables
/// - `PRESTADORES_REST_ADDR`: Server address (default: "0.0.0.0:8080")
/// - `PRESTADORES_PAGE_SIZE`: Default list page size (default: 20)
/// - `PRESTADORES_SEED_DATA`: Load the demo records at startup (default: true)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("prestadores_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("PRESTADORES_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());

    let cfg = Arc::new(CoreConfig::new(
        page_size_from_env_value(std::env::var("PRESTADORES_PAGE_SIZE").ok())?,
        seed_flag_from_env_value(std::env::var("PRESTADORES_SEED_DATA").ok())?,
    )?);

    let span = tracing::info_span!("prestadores");
    let services = Services::new(cfg, &span)?;
    let app = api_rest::router(api_rest::AppState::new(services));

    tracing::info!("-- Starting prestadores REST API on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
