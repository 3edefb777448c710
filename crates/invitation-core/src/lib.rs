//! Core trait and types for Valentine invitations.
//!
//! This crate provides the shared interface between the recipient flow,
//! the persistence backends and the web layer. It defines:
//!
//! - [`InvitationRecord`] - The persisted invitation document
//! - [`RecordPatch`] - A partial (merge) update of a record
//! - [`InvitationDraft`] - Raw sender input, validated into a record
//! - [`InvitationStore`] - The trait every store backend implements
//! - [`StoreError`] - Error types for store operations
//!
//! # Example
//!
//! ```rust
//! use invitation_core::{InvitationDraft, InvitationStatus};
//!
//! let draft = InvitationDraft::new("  Sam ", "Ana", "Be mine?");
//! let record = draft.into_record(1_707_868_800_000).unwrap();
//!
//! assert_eq!(record.sender_name, "Sam");
//! assert_eq!(record.effective_status(), InvitationStatus::Pending);
//! ```

mod error;
mod record;
mod store;
pub mod validation;

pub use error::StoreError;
pub use record::{
    DateIdea, DatePreferences, InvitationRecord, InvitationStatus, MealTime, PreferenceChoice,
    RecordPatch, Treat,
};
pub use store::InvitationStore;
pub use validation::{InvitationDraft, ValidationError};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
