//! Invitation record and merge-patch types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Implements the lowercase string mapping shared by every stored enum.
///
/// The strings are the wire and column values; they must never change.
macro_rules! wire_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// All variants in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The stored string value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($text => Ok($name::$variant),)+
                    other => Err(format!(
                        "unknown {} value `{}`",
                        stringify!($name),
                        other
                    )),
                }
            }
        }
    };
}

/// Response state of an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Rejected,
}

wire_enum!(InvitationStatus {
    Pending => "pending",
    Accepted => "accepted",
    Rejected => "rejected",
});

impl InvitationStatus {
    /// Whether a record in this status may be written with `next`.
    ///
    /// Pending moves anywhere; settled statuses only accept themselves.
    pub fn can_become(self, next: InvitationStatus) -> bool {
        self == InvitationStatus::Pending || self == next
    }
}

/// Gift preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Treat {
    Chocolates,
    Flowers,
}

wire_enum!(Treat {
    Chocolates => "chocolates",
    Flowers => "flowers",
});

/// Date activity preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateIdea {
    Dinner,
    Movie,
    Picnic,
}

wire_enum!(DateIdea {
    Dinner => "dinner",
    Movie => "movie",
    Picnic => "picnic",
});

/// Time-of-day preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealTime {
    Lunch,
    Dinner,
}

wire_enum!(MealTime {
    Lunch => "lunch",
    Dinner => "dinner",
});

/// Date preferences captured after acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePreferences {
    pub treat: Treat,
    pub date: DateIdea,
    pub time: MealTime,
}

/// One selection in one preference category.
///
/// Serialized as `{"category": "treat", "value": "flowers"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", content = "value", rename_all = "lowercase")]
pub enum PreferenceChoice {
    Treat(Treat),
    Date(DateIdea),
    Time(MealTime),
}

/// A persisted invitation, as stored and as sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationRecord {
    pub sender_name: String,
    pub recipient_name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub song_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InvitationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<DatePreferences>,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl InvitationRecord {
    /// Status with an absent value read as pending.
    pub fn effective_status(&self) -> InvitationStatus {
        self.status.unwrap_or(InvitationStatus::Pending)
    }

    pub fn has_memory(&self) -> bool {
        self.memory.is_some()
    }

    pub fn has_media(&self) -> bool {
        self.song_link.is_some()
    }

    /// Shallow-merge `patch` into this record.
    ///
    /// Fields absent from the patch are left untouched. A status change out
    /// of a settled status is rejected and nothing is applied.
    pub fn apply(&mut self, id: &str, patch: &RecordPatch) -> Result<(), StoreError> {
        if let Some(next) = patch.status {
            let current = self.effective_status();
            if !current.can_become(next) {
                return Err(StoreError::InvalidTransition {
                    id: id.to_string(),
                    from: current,
                    to: next,
                });
            }
        }

        if let Some(status) = patch.status {
            self.status = Some(status);
        }
        if let Some(preferences) = patch.preferences {
            self.preferences = Some(preferences);
        }
        Ok(())
    }
}

/// Partial update of an invitation record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InvitationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<DatePreferences>,
}

impl RecordPatch {
    pub fn status(status: InvitationStatus) -> Self {
        Self {
            status: Some(status),
            preferences: None,
        }
    }

    pub fn preferences(preferences: DatePreferences) -> Self {
        Self {
            status: None,
            preferences: Some(preferences),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.preferences.is_none()
    }
}
