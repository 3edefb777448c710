//! Sender dashboard routes.

use askama::Template;
use axum::extract::{Query, State};
use axum::Json;
use invitation_core::{DatePreferences, InvitationStatus};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::share_link;
use crate::state::AppState;

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub dashboard: Dashboard,
}

/// Comma-separated invitation ids held by the sender.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub ids: Option<String>,
}

impl DashboardQuery {
    fn ids(&self) -> Vec<String> {
        self.ids
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// One invitation as the sender sees it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardEntry {
    pub id: String,
    pub link: String,
    pub recipient_name: String,
    pub message: String,
    pub status: InvitationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<DatePreferences>,
    pub created_at: i64,
}

/// Invitation counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
}

/// Everything the dashboard shows.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub entries: Vec<DashboardEntry>,
    pub counts: StatusCounts,
}

/// Render the dashboard page.
pub async fn dashboard_page(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> DashboardTemplate {
    DashboardTemplate {
        dashboard: load(&state, &query.ids()).await,
    }
}

/// Get the dashboard as JSON.
pub async fn dashboard_api(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Json<Dashboard> {
    Json(load(&state, &query.ids()).await)
}

/// Read the ids in one batch, skipping missing records. A failed read is
/// logged and shows an empty dashboard.
async fn load(state: &AppState, ids: &[String]) -> Dashboard {
    let records = match state.store.get_many(ids).await {
        Ok(records) => records,
        Err(err) => {
            warn!(ids = ids.len(), error = %err, "Dashboard fetch failed");
            Vec::new()
        }
    };

    let mut entries = Vec::with_capacity(records.len());
    let mut counts = StatusCounts::default();

    for (id, record) in records {
        let status = record.effective_status();
        counts.total += 1;
        match status {
            InvitationStatus::Pending => counts.pending += 1,
            InvitationStatus::Accepted => counts.accepted += 1,
            InvitationStatus::Rejected => counts.rejected += 1,
        }

        entries.push(DashboardEntry {
            link: share_link(&state.public_url, &id),
            id,
            recipient_name: record.recipient_name,
            message: record.message,
            status,
            preferences: record.preferences,
            created_at: record.created_at,
        });
    }

    Dashboard { entries, counts }
}
