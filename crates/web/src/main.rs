//! Web server for Valentine invitations.
//!
//! Serves the creation page, the recipient flow over JSON sessions, and the
//! sender dashboard, all backed by SQLite.

mod config;
mod countdown;
mod error;
mod routes;
mod state;

use std::sync::Arc;
use std::time::Duration;

use database::{Database, SqliteInvitationStore};
use invitation_flow::FlowConfig;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, public_url = %config.public_url, "Starting web server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;
    let store = SqliteInvitationStore::new(db);

    // Build application state
    let state = AppState::with_session_idle(
        Arc::new(store),
        FlowConfig::with_viewport(config.viewport),
        config.public_url.as_str(),
        config.session_idle,
    );
    state.start_session_sweeper(SESSION_SWEEP_INTERVAL);

    // Build router
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    info!(addr = %config.addr, "Web server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
