//! lead-dashboard server entry point.
//!
//! Starts the Axum HTTP server with the REST endpoints.

use tracing_subscriber::EnvFilter;

use lead_dashboard::api;
use lead_dashboard::app_state::AppState;
use lead_dashboard::config::DashboardConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = DashboardConfig::from_env()?;
    let addr = config.listen_addr;
    tracing::info!(
        %addr,
        monthly_window = config.monthly_window_months,
        utc_offset_minutes = config.display_utc_offset_minutes,
        timeout_secs = config.request_timeout_secs,
        "starting lead-dashboard"
    );

    // Build application
    let app = api::build_app(AppState::new(config));

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
