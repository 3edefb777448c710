//! Application state shared across handlers.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use invitation_core::InvitationStore;
use invitation_flow::{FlowConfig, FlowController};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

/// How long a session may sit untouched before it is dropped.
pub const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(30 * 60);

struct Session {
    flow: FlowController,
    touched: Instant,
}

/// Live recipient sessions, one controller each.
///
/// Every access refreshes a session's last-touched time; sessions idle for
/// longer than `idle` are evicted by [`evict_idle`](Self::evict_idle).
pub struct SessionMap {
    sessions: HashMap<Uuid, Session>,
    idle: Duration,
}

impl SessionMap {
    pub fn new(idle: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            idle,
        }
    }

    pub fn insert(&mut self, id: Uuid, flow: FlowController) {
        self.sessions.insert(
            id,
            Session {
                flow,
                touched: Instant::now(),
            },
        );
    }

    /// Look up a session and mark it as touched.
    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut FlowController> {
        let session = self.sessions.get_mut(id)?;
        session.touched = Instant::now();
        Some(&mut session.flow)
    }

    pub fn remove(&mut self, id: &Uuid) -> Option<FlowController> {
        self.sessions.remove(id).map(|session| session.flow)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop every session untouched for longer than the idle limit.
    /// Returns how many were dropped.
    pub fn evict_idle(&mut self, now: Instant) -> usize {
        let idle = self.idle;
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| now.saturating_duration_since(session.touched) <= idle);
        before - self.sessions.len()
    }
}

/// Shared handle to the session map.
pub type Sessions = Arc<Mutex<SessionMap>>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Invitation store.
    pub store: Arc<dyn InvitationStore>,
    /// Live flow sessions.
    pub sessions: Sessions,
    /// Tunables for new sessions.
    pub flow: FlowConfig,
    /// Base URL share links are built from.
    pub public_url: Arc<str>,
}

impl AppState {
    /// Create new application state with the default session idle limit.
    pub fn new(
        store: Arc<dyn InvitationStore>,
        flow: FlowConfig,
        public_url: impl Into<Arc<str>>,
    ) -> Self {
        Self::with_session_idle(store, flow, public_url, DEFAULT_SESSION_IDLE)
    }

    pub fn with_session_idle(
        store: Arc<dyn InvitationStore>,
        flow: FlowConfig,
        public_url: impl Into<Arc<str>>,
        idle: Duration,
    ) -> Self {
        Self {
            store,
            sessions: Arc::new(Mutex::new(SessionMap::new(idle))),
            flow,
            public_url: public_url.into(),
        }
    }

    /// Periodically evict idle sessions in the background.
    pub fn start_session_sweeper(&self, interval: Duration) -> JoinHandle<()> {
        let sessions = Arc::clone(&self.sessions);

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;

                let evicted = sessions.lock().await.evict_idle(Instant::now());
                if evicted > 0 {
                    debug!(evicted, "Idle flow sessions evicted");
                }
            }
        })
    }
}
