//! Error types for flow commands.

use std::fmt;

use thiserror::Error;

use crate::step::FlowStep;

/// A recipient command, named for error reporting and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowAction {
    Advance,
    RecordNo,
    Accept,
    SetPreference,
    SubmitPreferences,
    Reject,
}

impl FlowAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowAction::Advance => "advance",
            FlowAction::RecordNo => "record_no",
            FlowAction::Accept => "accept",
            FlowAction::SetPreference => "set_preference",
            FlowAction::SubmitPreferences => "submit_preferences",
            FlowAction::Reject => "reject",
        }
    }
}

impl fmt::Display for FlowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by [`FlowController`](crate::FlowController) commands.
///
/// A failed command never changes the flow state and never writes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// The command does not apply to the current step.
    #[error("{action} is not available in the {step} step")]
    InvalidAction { action: FlowAction, step: FlowStep },

    /// "Yes" was already pressed in this session.
    #[error("invitation already accepted")]
    AlreadyAccepted,

    /// A rejection was already sent in this session.
    #[error("invitation already rejected")]
    AlreadyRejected,

    /// Submit was attempted before every category was chosen.
    #[error("preferences incomplete: {0} not chosen")]
    PreferencesIncomplete(&'static str),
}
