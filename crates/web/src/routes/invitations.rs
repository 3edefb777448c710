//! Invitation create and fetch.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use invitation_core::{InvitationDraft, InvitationRecord};
use serde::Serialize;
use tracing::info;

use crate::config::share_link;
use crate::error::{Result, WebError};
use crate::state::AppState;

/// Response to a successful create.
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: String,
    pub link: String,
}

/// Create an invitation from the sender's form input.
pub async fn create_api(
    State(state): State<AppState>,
    Json(draft): Json<InvitationDraft>,
) -> Result<(StatusCode, Json<Created>)> {
    let record = draft.into_record(Utc::now().timestamp_millis())?;
    let id = state.store.create(&record).await?;
    let link = share_link(&state.public_url, &id);

    info!(
        invitation_id = %id,
        has_memory = record.has_memory(),
        has_media = record.has_media(),
        "Invitation created"
    );
    Ok((StatusCode::CREATED, Json(Created { id, link })))
}

/// Fetch one invitation record.
pub async fn get_api(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InvitationRecord>> {
    state
        .store
        .get(&id)
        .await?
        .map(Json)
        .ok_or(WebError::InvitationNotFound(id))
}
