//! Flow steps and the skip rule between them.

use std::fmt;

use invitation_core::InvitationRecord;
use serde::{Deserialize, Serialize};

/// One phase of the recipient's guided reveal, in forward order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowStep {
    Welcome,
    Memory,
    Media,
    Question,
    Preferences,
    Summary,
}

impl FlowStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowStep::Welcome => "welcome",
            FlowStep::Memory => "memory",
            FlowStep::Media => "media",
            FlowStep::Question => "question",
            FlowStep::Preferences => "preferences",
            FlowStep::Summary => "summary",
        }
    }

    /// Target of `advance()` from this step, if `advance()` applies here.
    ///
    /// Memory is shown only when the record has one, media only when it has
    /// a song link; skipped steps fall through to the next present one.
    pub fn next_for(self, record: &InvitationRecord) -> Option<FlowStep> {
        match self {
            FlowStep::Welcome if record.has_memory() => Some(FlowStep::Memory),
            FlowStep::Welcome | FlowStep::Memory if record.has_media() => Some(FlowStep::Media),
            FlowStep::Welcome | FlowStep::Memory | FlowStep::Media => Some(FlowStep::Question),
            FlowStep::Question | FlowStep::Preferences | FlowStep::Summary => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self == FlowStep::Summary
    }
}

impl fmt::Display for FlowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
