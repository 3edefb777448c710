//! `InvitationStore` backed by SQLite.

use async_trait::async_trait;
use invitation_core::{InvitationRecord, InvitationStore, RecordPatch, StoreError};

use crate::invitation;
use crate::Database;

/// SQLite-backed invitation store.
#[derive(Debug, Clone)]
pub struct SqliteInvitationStore {
    db: Database,
}

impl SqliteInvitationStore {
    /// Create a store over an already migrated database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl InvitationStore for SqliteInvitationStore {
    async fn create(&self, record: &InvitationRecord) -> Result<String, StoreError> {
        Ok(invitation::create_invitation(self.db.pool(), record).await?)
    }

    async fn get(&self, id: &str) -> Result<Option<InvitationRecord>, StoreError> {
        Ok(invitation::get_invitation(self.db.pool(), id).await?)
    }

    async fn merge_update(&self, id: &str, patch: &RecordPatch) -> Result<(), StoreError> {
        Ok(invitation::merge_invitation(self.db.pool(), id, patch).await?)
    }

    async fn get_many(&self, ids: &[String]) -> Result<Vec<(String, InvitationRecord)>, StoreError> {
        Ok(invitation::get_invitations(self.db.pool(), ids).await?)
    }

    fn name(&self) -> &str {
        "SqliteInvitationStore"
    }
}
