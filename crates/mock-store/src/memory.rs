//! In-memory store implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use invitation_core::validation::validate_record;
use invitation_core::{InvitationRecord, InvitationStore, RecordPatch, StoreError};
use tokio::sync::RwLock;

/// A store that keeps records in a shared map.
///
/// Clones share the same records, so a test can keep one handle while the
/// flow under test owns another. Every merge is logged in call order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<HashMap<String, InvitationRecord>>>,
    merges: Arc<RwLock<Vec<(String, RecordPatch)>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record under a known id.
    pub async fn insert(&self, id: impl Into<String>, record: InvitationRecord) {
        self.records.write().await.insert(id.into(), record);
    }

    /// All merge patches received so far, including rejected ones.
    pub async fn merges(&self) -> Vec<(String, RecordPatch)> {
        self.merges.read().await.clone()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl InvitationStore for MemoryStore {
    async fn create(&self, record: &InvitationRecord) -> Result<String, StoreError> {
        validate_record(record)?;

        let id = uuid::Uuid::new_v4().to_string();
        self.records.write().await.insert(id.clone(), record.clone());
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<InvitationRecord>, StoreError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn merge_update(&self, id: &str, patch: &RecordPatch) -> Result<(), StoreError> {
        self.merges.write().await.push((id.to_string(), *patch));

        let mut records = self.records.write().await;
        let record = records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        record.apply(id, patch)
    }

    fn name(&self) -> &str {
        "MemoryStore"
    }
}
