//! Agri-Forecast - Backend Server
//!
//! Serves the proactive crop and resource planning dashboard.

use std::net::SocketAddr;

use agri_forecast_backend::{create_app, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "agri_forecast_server=debug,agri_forecast_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Agri-Forecast Server");
    tracing::info!("Environment: {}", config.environment);

    // Create application state
    let state = AppState::new(config.clone());

    // Reference tables must agree before any session can be served
    state.reference.check_consistency()?;
    tracing::info!(
        clusters = state.reference.clusters().count(),
        "Reference data loaded"
    );

    // Build application
    let app = create_app(state);

    // Start server
    let ip: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((ip, config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
