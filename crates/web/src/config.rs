//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use invitation_flow::Viewport;

use crate::state::DEFAULT_SESSION_IDLE;

/// Web server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Base URL share links are built from.
    pub public_url: String,
    /// Viewport new flow sessions start with.
    pub viewport: Viewport,
    /// Idle time after which a flow session is dropped.
    pub session_idle: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `WEB_ADDR` | Server bind address | `127.0.0.1:8790` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:valentine.db?mode=rwc` |
    /// | `PUBLIC_URL` | Base of share links | `http://127.0.0.1:8790/` |
    /// | `VIEWPORT_WIDTH` | Default viewport width | `448` |
    /// | `VIEWPORT_HEIGHT` | Default viewport height | `360` |
    /// | `SESSION_IDLE_SECS` | Idle seconds before a session is dropped | `1800` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("WEB_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8790".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = env::var("SQLITE_PATH")
            .unwrap_or_else(|_| "sqlite:valentine.db?mode=rwc".to_string());

        let public_url =
            env::var("PUBLIC_URL").unwrap_or_else(|_| "http://127.0.0.1:8790/".to_string());

        let default_viewport = Viewport::default();
        let viewport = Viewport::new(
            dimension("VIEWPORT_WIDTH", default_viewport.width)?,
            dimension("VIEWPORT_HEIGHT", default_viewport.height)?,
        );

        let session_idle = match env::var("SESSION_IDLE_SECS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidSessionIdle)?,
            Err(_) => DEFAULT_SESSION_IDLE,
        };

        Ok(Self {
            addr,
            database_url,
            public_url,
            viewport,
            session_idle,
        })
    }
}

fn dimension(var: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(var) {
        Ok(raw) => match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
            _ => Err(ConfigError::InvalidDimension(var)),
        },
        Err(_) => Ok(default),
    }
}

/// Build the share link for an invitation: `{public_url}?invite={id}`.
pub fn share_link(public_url: &str, id: &str) -> String {
    format!("{}?invite={}", public_url, id)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid WEB_ADDR format")]
    InvalidAddr,

    #[error("{0} must be a non-negative number")]
    InvalidDimension(&'static str),

    #[error("SESSION_IDLE_SECS must be a whole number of seconds")]
    InvalidSessionIdle,
}
