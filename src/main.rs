use std::sync::Arc;

use api_rest::AppState;
use prestadores_core::config::{page_size_from_env_value, seed_flag_from_env_value};
use prestadores_core::{CoreConfig, Services};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the prestadores back end
///
/// Loads `.env`, resolves configuration once, seeds the in-memory stores and serves the REST API
/// until Ctrl-C. All state is lost on shutdown.
///
/// # Environment Variables
/// - `PRESTADORES_REST_ADDR`: REST server address (default: "0.0.0.0:8080")
/// - `PRESTADORES_PAGE_SIZE`: Default list page size (default: 20)
/// - `PRESTADORES_SEED_DATA`: Load the demo records at startup (default: true)
/// - `RUST_LOG`: Log filter directives
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, startup or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("prestadores=info".parse()?)
                .add_directive("prestadores_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("PRESTADORES_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());

    let cfg = Arc::new(CoreConfig::new(
        page_size_from_env_value(std::env::var("PRESTADORES_PAGE_SIZE").ok())?,
        seed_flag_from_env_value(std::env::var("PRESTADORES_SEED_DATA").ok())?,
    )?);

    tracing::info!(
        page_size = cfg.default_page_size(),
        seed = cfg.seed_mock_data(),
        "++ Configuration loaded"
    );

    let span = tracing::info_span!("prestadores");
    let services = Services::new(cfg, &span)?;
    let app = api_rest::router(AppState::new(services));

    tracing::info!("++ Starting prestadores REST on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- prestadores REST stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
    }
}
