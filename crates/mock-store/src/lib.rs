//! Mock store implementations for testing the invitation flow.
//!
//! This crate provides implementations of the `InvitationStore` trait for tests:
//! - `MemoryStore` - Keeps records in memory and logs every merge
//! - `FailingStore` - Fails every write, optionally reading from another store
//! - `DelayedStore` - Wraps another store with artificial latency
//!
//! For production persistence, use the `database` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_store::{InvitationDraft, InvitationStore, MemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_store::StoreError> {
//!     let store = MemoryStore::new();
//!     let record = InvitationDraft::new("Sam", "Ana", "hi").into_record(0)?;
//!
//!     let id = store.create(&record).await?;
//!     assert!(store.get(&id).await?.is_some());
//!     Ok(())
//! }
//! ```

mod delayed;
mod failing;
mod memory;

// Re-export invitation-core types for convenience
pub use invitation_core::{
    async_trait, InvitationDraft, InvitationRecord, InvitationStatus, InvitationStore,
    RecordPatch, StoreError,
};

pub use delayed::DelayedStore;
pub use failing::FailingStore;
pub use memory::MemoryStore;
