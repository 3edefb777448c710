//! Failing store implementation - every write errors.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use invitation_core::{InvitationRecord, InvitationStore, RecordPatch, StoreError};

/// A store whose writes always fail with `StoreError::Unavailable`.
///
/// Reads are served by an optional inner store, so a flow can be built from
/// a real record while its write-backs are lost. Attempted writes are counted.
#[derive(Clone, Default)]
pub struct FailingStore {
    reads: Option<Arc<dyn InvitationStore>>,
    attempts: Arc<AtomicUsize>,
}

impl FailingStore {
    /// Create a store that fails reads and writes alike.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that reads from `inner` but fails every write.
    pub fn wrapping(inner: impl InvitationStore + 'static) -> Self {
        Self {
            reads: Some(Arc::new(inner)),
            attempts: Arc::default(),
        }
    }

    /// Number of write calls received.
    pub fn write_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    fn unavailable() -> StoreError {
        StoreError::Unavailable("simulated backend outage".to_string())
    }
}

#[async_trait]
impl InvitationStore for FailingStore {
    async fn create(&self, _record: &InvitationRecord) -> Result<String, StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(Self::unavailable())
    }

    async fn get(&self, id: &str) -> Result<Option<InvitationRecord>, StoreError> {
        match &self.reads {
            Some(inner) => inner.get(id).await,
            None => Err(Self::unavailable()),
        }
    }

    async fn merge_update(&self, _id: &str, _patch: &RecordPatch) -> Result<(), StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(Self::unavailable())
    }

    fn name(&self) -> &str {
        "FailingStore"
    }
}
