//! Input validation for new invitations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::{InvitationRecord, InvitationStatus};

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty value where one is required.
    Empty(&'static str),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Raw invitation input as submitted by the sender.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationDraft {
    pub sender_name: String,
    pub recipient_name: String,
    pub message: String,
    #[serde(default)]
    pub memory: Option<String>,
    #[serde(default)]
    pub song_link: Option<String>,
}

impl InvitationDraft {
    /// Create a draft with the required fields only.
    pub fn new(
        sender_name: impl Into<String>,
        recipient_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            sender_name: sender_name.into(),
            recipient_name: recipient_name.into(),
            message: message.into(),
            memory: None,
            song_link: None,
        }
    }

    pub fn with_memory(mut self, memory: impl Into<String>) -> Self {
        self.memory = Some(memory.into());
        self
    }

    pub fn with_song_link(mut self, song_link: impl Into<String>) -> Self {
        self.song_link = Some(song_link.into());
        self
    }

    /// Trim every field and build a pending record.
    ///
    /// Blank optional fields become absent. The first blank required field
    /// is reported.
    pub fn into_record(self, created_at: i64) -> Result<InvitationRecord, ValidationError> {
        let record = InvitationRecord {
            sender_name: self.sender_name.trim().to_string(),
            recipient_name: self.recipient_name.trim().to_string(),
            message: self.message.trim().to_string(),
            memory: non_blank(self.memory),
            song_link: non_blank(self.song_link),
            status: Some(InvitationStatus::Pending),
            preferences: None,
            created_at,
        };
        validate_record(&record)?;
        Ok(record)
    }
}

/// Check the required fields of a record.
pub fn validate_record(record: &InvitationRecord) -> Result<(), ValidationError> {
    require("senderName", &record.sender_name)?;
    require("recipientName", &record.recipient_name)?;
    require("message", &record.message)?;
    Ok(())
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_record_trims_fields() {
        let record = InvitationDraft::new(" Sam ", "\tAna", " hi \n")
            .with_memory("  our first walk ")
            .into_record(42)
            .unwrap();

        assert_eq!(record.sender_name, "Sam");
        assert_eq!(record.recipient_name, "Ana");
        assert_eq!(record.message, "hi");
        assert_eq!(record.memory.as_deref(), Some("our first walk"));
        assert_eq!(record.status, Some(InvitationStatus::Pending));
        assert_eq!(record.created_at, 42);
    }

    #[test]
    fn test_blank_optionals_become_absent() {
        let record = InvitationDraft::new("Sam", "Ana", "hi")
            .with_memory("   ")
            .with_song_link("")
            .into_record(0)
            .unwrap();

        assert_eq!(record.memory, None);
        assert_eq!(record.song_link, None);
    }

    #[test]
    fn test_blank_required_field_is_rejected() {
        let err = InvitationDraft::new("Sam", "   ", "hi")
            .into_record(0)
            .unwrap_err();
        assert_eq!(err, ValidationError::Empty("recipientName"));
        assert_eq!(err.to_string(), "recipientName cannot be empty");
    }

    #[test]
    fn test_first_missing_field_is_reported() {
        let err = InvitationDraft::default().into_record(0).unwrap_err();
        assert_eq!(err, ValidationError::Empty("senderName"));
    }
}
