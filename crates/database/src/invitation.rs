//! Invitation CRUD operations.

use invitation_core::validation::validate_record;
use invitation_core::{InvitationRecord, InvitationStatus, RecordPatch};
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::InvitationRow;

const INVITATION_COLUMNS: &str = "id, sender_name, recipient_name, message, memory, song_link, \
     status, pref_treat, pref_date, pref_time, created_at";

/// Insert a new invitation under a freshly generated id.
pub async fn create_invitation(pool: &SqlitePool, record: &InvitationRecord) -> Result<String> {
    validate_record(record)?;

    let id = uuid::Uuid::new_v4().to_string();
    let preferences = record.preferences;

    sqlx::query(
        r#"
        INSERT INTO invitations (
            id, sender_name, recipient_name, message, memory, song_link,
            status, pref_treat, pref_date, pref_time, created_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&record.sender_name)
    .bind(&record.recipient_name)
    .bind(&record.message)
    .bind(record.memory.as_deref())
    .bind(record.song_link.as_deref())
    .bind(record.status.map(|s| s.as_str()))
    .bind(preferences.map(|p| p.treat.as_str()))
    .bind(preferences.map(|p| p.date.as_str()))
    .bind(preferences.map(|p| p.time.as_str()))
    .bind(record.created_at)
    .execute(pool)
    .await?;

    tracing::debug!(invitation_id = %id, "Invitation created");
    Ok(id)
}

/// Get an invitation by ID.
pub async fn get_invitation(pool: &SqlitePool, id: &str) -> Result<Option<InvitationRecord>> {
    let row = sqlx::query_as::<_, InvitationRow>(&format!(
        "SELECT {INVITATION_COLUMNS} FROM invitations WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(|row| row.into_record().map(|(_, record)| record))
        .transpose()
}

/// Get several invitations in one query.
///
/// Unknown ids are skipped; the result follows the order of `ids`.
pub async fn get_invitations(
    pool: &SqlitePool,
    ids: &[String],
) -> Result<Vec<(String, InvitationRecord)>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!(
        "SELECT {INVITATION_COLUMNS} FROM invitations WHERE id IN ({placeholders})"
    );

    let mut query = sqlx::query_as::<_, InvitationRow>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    let rows = query.fetch_all(pool).await?;

    let mut found = rows
        .into_iter()
        .map(InvitationRow::into_record)
        .collect::<Result<Vec<_>>>()?;
    found.sort_by_key(|(id, _)| ids.iter().position(|wanted| wanted == id));

    Ok(found)
}

/// Shallow-merge a patch into an existing invitation.
///
/// Only the columns named by the patch are written, in a single statement,
/// so merges of disjoint fields never overwrite each other. A status write
/// out of a settled status is refused.
pub async fn merge_invitation(pool: &SqlitePool, id: &str, patch: &RecordPatch) -> Result<()> {
    if patch.is_empty() {
        return match current_status(pool, id).await? {
            Some(_) => Ok(()),
            None => Err(not_found(id)),
        };
    }

    let status = patch.status.map(|s| s.as_str());
    let preferences = patch.preferences;

    let result = sqlx::query(
        r#"
        UPDATE invitations
        SET status = COALESCE(?, status),
            pref_treat = COALESCE(?, pref_treat),
            pref_date = COALESCE(?, pref_date),
            pref_time = COALESCE(?, pref_time),
            updated_at = datetime('now')
        WHERE id = ?
          AND (? IS NULL OR status IS NULL OR status = 'pending' OR status = ?)
        "#,
    )
    .bind(status)
    .bind(preferences.map(|p| p.treat.as_str()))
    .bind(preferences.map(|p| p.date.as_str()))
    .bind(preferences.map(|p| p.time.as_str()))
    .bind(id)
    .bind(status)
    .bind(status)
    .execute(pool)
    .await?;

    if result.rows_affected() > 0 {
        return Ok(());
    }

    // Nothing matched: either the id is unknown or the status guard refused.
    match (current_status(pool, id).await?, patch.status) {
        (None, _) => Err(not_found(id)),
        (Some(from), Some(to)) => Err(DatabaseError::InvalidTransition {
            id: id.to_string(),
            from,
            to,
        }),
        (Some(_), None) => Ok(()),
    }
}

/// Read the stored status; the outer `None` means the invitation is missing.
async fn current_status(pool: &SqlitePool, id: &str) -> Result<Option<InvitationStatus>> {
    let row = sqlx::query_scalar::<_, Option<String>>(
        r#"
        SELECT status FROM invitations WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match row {
        None => Ok(None),
        Some(status) => {
            let status = status
                .as_deref()
                .map(|s| s.parse::<InvitationStatus>())
                .transpose()
                .map_err(DatabaseError::InvalidData)?;
            Ok(Some(status.unwrap_or(InvitationStatus::Pending)))
        }
    }
}

fn not_found(id: &str) -> DatabaseError {
    DatabaseError::NotFound {
        entity: "Invitation",
        id: id.to_string(),
    }
}
