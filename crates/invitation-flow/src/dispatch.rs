//! Fire-and-forget write-back to the invitation store.

use std::sync::Arc;

use invitation_core::{InvitationStore, RecordPatch, StoreError};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Sends merge updates for one invitation without waiting on them.
#[derive(Clone)]
pub struct WriteDispatcher {
    store: Arc<dyn InvitationStore>,
    invitation_id: Arc<str>,
}

impl WriteDispatcher {
    pub fn new(store: Arc<dyn InvitationStore>, invitation_id: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            invitation_id: invitation_id.into(),
        }
    }

    /// Start a merge update in the background and return at once.
    ///
    /// Failures are logged and never retried. Outside a Tokio runtime the
    /// write cannot start; the returned handle then reports the failure.
    pub fn dispatch(&self, patch: RecordPatch) -> WriteHandle {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(err) => {
                warn!(
                    invitation_id = %self.invitation_id,
                    error = %err,
                    "No async runtime; invitation write dropped"
                );
                return WriteHandle {
                    patch,
                    task: WriteTask::NotStarted(StoreError::Unavailable(err.to_string())),
                };
            }
        };

        let store = Arc::clone(&self.store);
        let id = Arc::clone(&self.invitation_id);
        let task = runtime.spawn(async move {
            let result = store.merge_update(&id, &patch).await;
            match &result {
                Ok(()) => debug!(invitation_id = %id, store = store.name(), "Invitation write stored"),
                Err(err) => warn!(
                    invitation_id = %id,
                    store = store.name(),
                    error = %err,
                    "Invitation write failed; not retried"
                ),
            }
            result
        });

        WriteHandle {
            patch,
            task: WriteTask::Spawned(task),
        }
    }
}

enum WriteTask {
    Spawned(JoinHandle<Result<(), StoreError>>),
    NotStarted(StoreError),
}

/// Handle to a dispatched write.
///
/// Dropping the handle detaches the write; it still runs to completion.
pub struct WriteHandle {
    patch: RecordPatch,
    task: WriteTask,
}

impl WriteHandle {
    /// The patch this write carries.
    pub fn patch(&self) -> &RecordPatch {
        &self.patch
    }

    /// Whether the write has finished, successfully or not.
    pub fn is_finished(&self) -> bool {
        match &self.task {
            WriteTask::Spawned(task) => task.is_finished(),
            WriteTask::NotStarted(_) => true,
        }
    }

    /// Wait for the write and return its result.
    pub async fn outcome(self) -> Result<(), StoreError> {
        match self.task {
            WriteTask::Spawned(task) => match task.await {
                Ok(result) => result,
                Err(err) => Err(StoreError::backend(err)),
            },
            WriteTask::NotStarted(err) => Err(err),
        }
    }
}

impl std::fmt::Debug for WriteHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteHandle")
            .field("patch", &self.patch)
            .field("finished", &self.is_finished())
            .finish()
    }
}
