//! Delayed store implementation - wraps another store with artificial latency.

use std::time::Duration;

use async_trait::async_trait;
use invitation_core::{InvitationRecord, InvitationStore, RecordPatch, StoreError};
use tokio::time::sleep;

/// A store that wraps another store and delays every call.
///
/// Useful for checking that the flow never waits on a slow backend.
pub struct DelayedStore<S: InvitationStore> {
    inner: S,
    delay: Duration,
}

impl<S: InvitationStore> DelayedStore<S> {
    /// Create a new DelayedStore wrapping the given store with the specified delay.
    pub fn new(inner: S, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Create a store with a delay in milliseconds.
    pub fn with_millis(inner: S, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// Create a store with a delay in seconds.
    pub fn with_secs(inner: S, secs: u64) -> Self {
        Self::new(inner, Duration::from_secs(secs))
    }
}

#[async_trait]
impl<S: InvitationStore> InvitationStore for DelayedStore<S> {
    async fn create(&self, record: &InvitationRecord) -> Result<String, StoreError> {
        sleep(self.delay).await;
        self.inner.create(record).await
    }

    async fn get(&self, id: &str) -> Result<Option<InvitationRecord>, StoreError> {
        sleep(self.delay).await;
        self.inner.get(id).await
    }

    async fn merge_update(&self, id: &str, patch: &RecordPatch) -> Result<(), StoreError> {
        sleep(self.delay).await;
        self.inner.merge_update(id, patch).await
    }

    fn name(&self) -> &str {
        "DelayedStore"
    }
}
