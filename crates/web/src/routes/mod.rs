//! Route handlers for the web server.

pub mod dashboard;
pub mod health;
pub mod invitations;
pub mod pages;
pub mod sessions;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // HTML pages
        .route("/", get(pages::index))
        .route("/dashboard", get(dashboard::dashboard_page))
        // Health check
        .route("/health", get(health::health))
        // Invitations
        .route("/api/invitations", post(invitations::create_api))
        .route("/api/invitations/:id", get(invitations::get_api))
        // Recipient flow sessions
        .route("/api/sessions", post(sessions::start))
        .route(
            "/api/sessions/:sid",
            get(sessions::show).delete(sessions::discard),
        )
        .route("/api/sessions/:sid/advance", post(sessions::advance))
        .route("/api/sessions/:sid/no", post(sessions::no))
        .route("/api/sessions/:sid/yes", post(sessions::yes))
        .route("/api/sessions/:sid/preferences", post(sessions::preference))
        .route("/api/sessions/:sid/submit", post(sessions::submit))
        // Sender views
        .route("/api/dashboard", get(dashboard::dashboard_api))
        .route("/api/countdown", get(pages::countdown_api))
}
