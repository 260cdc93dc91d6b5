//! Database operations for direct messages
//!
//! Append-only inserts with server-assigned id and timestamp, and the
//! full-history range query between two identities. No pagination: the data
//! volumes in scope make full history per conversation acceptable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// A persisted direct message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectMessage {
    pub id: String,
    pub sender: String,
    pub receiver: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Insert a direct message with a server-assigned id and timestamp.
///
/// Append-only; there is no idempotency key, so duplicate submissions from
/// client retries produce duplicate stored messages.
pub async fn insert_direct_message(
    pool: &SqlitePool,
    sender: &str,
    receiver: &str,
    text: &str,
) -> Result<DirectMessage, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO direct_messages (id, sender, receiver, text, created_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(&id)
    .bind(sender)
    .bind(receiver)
    .bind(text)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(DirectMessage {
        id,
        sender: sender.to_string(),
        receiver: receiver.to_string(),
        text: text.to_string(),
        created_at: now,
    })
}

/// Get all messages between two identities, oldest first.
///
/// Matches either direction (A→B or B→A), so the same history is returned
/// regardless of argument order.
pub async fn get_messages_between(
    pool: &SqlitePool,
    sender: &str,
    receiver: &str,
) -> Result<Vec<DirectMessage>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, sender, receiver, text, created_at
        FROM direct_messages
        WHERE (sender = $1 AND receiver = $2)
           OR (sender = $2 AND receiver = $1)
        ORDER BY created_at ASC, rowid ASC
        "#,
    )
    .bind(sender)
    .bind(receiver)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| DirectMessage {
            id: row.get("id"),
            sender: row.get("sender"),
            receiver: row.get("receiver"),
            text: row.get("text"),
            created_at: row.get("created_at"),
        })
        .collect())
}
