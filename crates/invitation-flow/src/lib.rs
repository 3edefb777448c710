//! Recipient-side flow for Valentine invitations.
//!
//! A [`FlowController`] walks a recipient through
//! `welcome → [memory] → [media] → question → preferences → summary`,
//! runs the evasive "No" control, and writes acceptance and preferences
//! back to an [`InvitationStore`](invitation_core::InvitationStore) without
//! waiting on the writes.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use invitation_core::{InvitationDraft, PreferenceChoice, Treat, DateIdea, MealTime};
//! use invitation_flow::{FlowController, FlowStep};
//! use mock_store::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = MemoryStore::new();
//!     let record = InvitationDraft::new("Sam", "Ana", "hi").into_record(0).unwrap();
//!     store.insert("abc", record.clone()).await;
//!
//!     let mut flow = FlowController::new("abc", record, Arc::new(store));
//!     assert_eq!(flow.advance().unwrap(), FlowStep::Question);
//!
//!     flow.accept_and_advance().unwrap();
//!     assert_eq!(flow.settle().await, FlowStep::Preferences);
//!
//!     flow.set_preference(PreferenceChoice::Treat(Treat::Flowers)).unwrap();
//!     flow.set_preference(PreferenceChoice::Date(DateIdea::Picnic)).unwrap();
//!     flow.set_preference(PreferenceChoice::Time(MealTime::Lunch)).unwrap();
//!     flow.submit_preferences().unwrap();
//!     assert_eq!(flow.step(), FlowStep::Summary);
//! }
//! ```

mod config;
mod controller;
mod dispatch;
mod error;
mod evasive;
mod state;
mod step;

pub use config::{EvasiveConfig, FlowConfig, Viewport, DEFAULT_ACCEPT_DELAY};
pub use controller::FlowController;
pub use dispatch::{WriteDispatcher, WriteHandle};
pub use error::{FlowAction, FlowError};
pub use evasive::{random_position, scale_for, EvasiveControl, Position};
pub use state::{FlowState, PreferenceDraft};
pub use step::FlowStep;
