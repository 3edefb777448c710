//! Database models.

use invitation_core::{DatePreferences, InvitationRecord, InvitationStatus};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{DatabaseError, Result};

/// A row of the `invitations` table.
///
/// Enum columns are kept as their stored strings; use
/// [`InvitationRow::into_record`] to get the typed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct InvitationRow {
    /// Generated invitation id (UUID v4)
    pub id: String,
    pub sender_name: String,
    pub recipient_name: String,
    pub message: String,
    pub memory: Option<String>,
    pub song_link: Option<String>,
    /// One of `pending`, `accepted`, `rejected`
    pub status: Option<String>,
    pub pref_treat: Option<String>,
    pub pref_date: Option<String>,
    pub pref_time: Option<String>,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
}

impl InvitationRow {
    /// Convert into the typed record, rejecting unknown enum strings.
    pub fn into_record(self) -> Result<(String, InvitationRecord)> {
        let status = self
            .status
            .as_deref()
            .map(|s| s.parse::<InvitationStatus>())
            .transpose()
            .map_err(DatabaseError::InvalidData)?;

        let preferences = match (self.pref_treat, self.pref_date, self.pref_time) {
            (Some(treat), Some(date), Some(time)) => Some(DatePreferences {
                treat: treat.parse().map_err(DatabaseError::InvalidData)?,
                date: date.parse().map_err(DatabaseError::InvalidData)?,
                time: time.parse().map_err(DatabaseError::InvalidData)?,
            }),
            (None, None, None) => None,
            _ => {
                return Err(DatabaseError::InvalidData(format!(
                    "partial preferences on invitation {}",
                    self.id
                )))
            }
        };

        let record = InvitationRecord {
            sender_name: self.sender_name,
            recipient_name: self.recipient_name,
            message: self.message,
            memory: self.memory,
            song_link: self.song_link,
            status,
            preferences,
            created_at: self.created_at,
        };

        Ok((self.id, record))
    }
}
