//! The InvitationStore trait definition.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::record::{InvitationRecord, RecordPatch};

/// A key-value document store for invitation records, addressed by id.
///
/// Implementations must guarantee:
/// - `create` returns a fresh unique id and the record is readable as soon
///   as the call returns.
/// - `merge_update` writes only the fields present in the patch, so
///   concurrent merges over disjoint fields never clobber each other.
///
/// This trait is object-safe and can be used with `Arc<dyn InvitationStore>`.
#[async_trait]
pub trait InvitationStore: Send + Sync {
    /// Persist a new record and return its generated id.
    async fn create(&self, record: &InvitationRecord) -> Result<String, StoreError>;

    /// Read a full record. Returns `Ok(None)` when no record has this id.
    async fn get(&self, id: &str) -> Result<Option<InvitationRecord>, StoreError>;

    /// Shallow-merge `patch` into the record with this id.
    async fn merge_update(&self, id: &str, patch: &RecordPatch) -> Result<(), StoreError>;

    /// Read several records, skipping ids that do not resolve.
    ///
    /// Default implementation reads each id in turn.
    async fn get_many(&self, ids: &[String]) -> Result<Vec<(String, InvitationRecord)>, StoreError> {
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(record) = self.get(id).await? {
                records.push((id.clone(), record));
            }
        }
        Ok(records)
    }

    /// Get a human-readable name for this store implementation.
    fn name(&self) -> &str;
}
