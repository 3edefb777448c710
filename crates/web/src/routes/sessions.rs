//! Recipient flow sessions.
//!
//! Each session owns one [`FlowController`]. Handlers tick the acceptance
//! timer before every command and every read, so a session that sat past its
//! accept delay is on the preferences step by the time anything looks at it.
//! Sessions left idle past the configured limit are evicted on the next
//! request and by the background sweeper.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use invitation_core::{InvitationRecord, PreferenceChoice};
use invitation_flow::{FlowController, FlowError, FlowState, FlowStep, Viewport};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, WebError};
use crate::state::{AppState, SessionMap};

/// Request to open an invitation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSession {
    pub invitation_id: String,
    #[serde(default)]
    pub viewport: Option<Viewport>,
}

/// Optional body of a "No" press.
#[derive(Debug, Default, Deserialize)]
pub struct NoPress {
    #[serde(default)]
    pub viewport: Option<Viewport>,
}

/// What the recipient sees right now.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: Uuid,
    pub step: FlowStep,
    pub record: InvitationRecord,
    pub state: FlowState,
    pub viewport: Viewport,
    pub yes_width: f64,
    pub can_submit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Vec<String>>,
}

impl SessionView {
    fn new(session_id: Uuid, flow: &FlowController) -> Self {
        Self {
            session_id,
            step: flow.step(),
            record: flow.record().clone(),
            state: flow.state().clone(),
            viewport: flow.viewport(),
            yes_width: flow.yes_button_width(),
            can_submit: flow.can_submit(),
            summary: flow.summary_lines(),
        }
    }
}

/// Load the invitation once and start a flow for it.
pub async fn start(
    State(state): State<AppState>,
    Json(req): Json<StartSession>,
) -> Result<(StatusCode, Json<SessionView>)> {
    let record = state
        .store
        .get(&req.invitation_id)
        .await?
        .ok_or_else(|| WebError::InvitationNotFound(req.invitation_id.clone()))?;

    let mut flow = FlowController::with_config(
        req.invitation_id.as_str(),
        record,
        Arc::clone(&state.store),
        state.flow,
    );
    if let Some(viewport) = req.viewport {
        flow.set_viewport(viewport);
    }

    let session_id = Uuid::new_v4();
    let view = SessionView::new(session_id, &flow);
    let live = {
        let mut sessions = state.sessions.lock().await;
        evict_idle(&mut sessions);
        sessions.insert(session_id, flow);
        sessions.len()
    };

    info!(
        session_id = %session_id,
        invitation_id = %req.invitation_id,
        live,
        "Flow session started"
    );
    Ok((StatusCode::CREATED, Json(view)))
}

/// Current view of a session.
pub async fn show(State(state): State<AppState>, Path(sid): Path<Uuid>) -> Result<Json<SessionView>> {
    command(&state, sid, |_| Ok(())).await
}

pub async fn advance(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<SessionView>> {
    command(&state, sid, |flow| flow.advance().map(drop)).await
}

/// Press "No". The body may carry the viewport the control moves within.
pub async fn no(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    body: Option<Json<NoPress>>,
) -> Result<Json<SessionView>> {
    let viewport = body.and_then(|Json(press)| press.viewport);
    command(&state, sid, |flow| {
        if let Some(viewport) = viewport {
            flow.set_viewport(viewport);
        }
        flow.record_no().map(drop)
    })
    .await
}

/// Press "Yes". The write runs detached.
pub async fn yes(State(state): State<AppState>, Path(sid): Path<Uuid>) -> Result<Json<SessionView>> {
    command(&state, sid, |flow| flow.accept_and_advance().map(drop)).await
}

pub async fn preference(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    Json(choice): Json<PreferenceChoice>,
) -> Result<Json<SessionView>> {
    command(&state, sid, |flow| flow.set_preference(choice)).await
}

pub async fn submit(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<SessionView>> {
    command(&state, sid, |flow| flow.submit_preferences().map(drop)).await
}

/// Drop a session when the recipient navigates away.
pub async fn discard(State(state): State<AppState>, Path(sid): Path<Uuid>) -> Result<StatusCode> {
    state
        .sessions
        .lock()
        .await
        .remove(&sid)
        .ok_or(WebError::SessionNotFound(sid))?;

    debug!(session_id = %sid, "Flow session discarded");
    Ok(StatusCode::NO_CONTENT)
}

/// Tick the session's timer, run one command, and render the result.
async fn command<F>(state: &AppState, sid: Uuid, run: F) -> Result<Json<SessionView>>
where
    F: FnOnce(&mut FlowController) -> std::result::Result<(), FlowError>,
{
    let mut sessions = state.sessions.lock().await;
    evict_idle(&mut sessions);
    let flow = sessions
        .get_mut(&sid)
        .ok_or(WebError::SessionNotFound(sid))?;

    flow.tick();
    run(flow)?;
    Ok(Json(SessionView::new(sid, flow)))
}

fn evict_idle(sessions: &mut SessionMap) {
    let evicted = sessions.evict_idle(Instant::now());
    if evicted > 0 {
        debug!(evicted, "Idle flow sessions evicted");
    }
}
