//! Database operations for rooms
//!
//! Room name uniqueness is enforced by the UNIQUE constraint on
//! `rooms.name`, so two near-simultaneous creates with the same name cannot
//! both succeed; the loser sees a unique violation. Membership add is
//! idempotent via `ON CONFLICT DO NOTHING` on the `(room_id, user_id)`
//! primary key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::auth::users::UserDisplay;

/// A persistent group channel with a durable member list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// A room message enriched with the sender's display info, so every
/// recipient renders it identically without a secondary lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomMessageView {
    pub id: String,
    pub room_id: String,
    pub sender: UserDisplay,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregate statistics for a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStats {
    pub total_members: i64,
    pub total_messages: i64,
    pub unique_users_texted: i64,
}

/// Create a room; the creator becomes its first member.
///
/// The room insert and the creator's membership commit together, so a room
/// never exists with an empty member set. Returns the underlying
/// `sqlx::Error` on a duplicate name; callers translate that with
/// `AppError::conflict_on_unique`.
pub async fn create_room(
    pool: &SqlitePool,
    name: &str,
    created_by: &str,
) -> Result<Room, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO rooms (id, name, created_by, created_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(&id)
    .bind(name)
    .bind(created_by)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    add_member(&mut *tx, &id, created_by).await?;

    tx.commit().await?;

    Ok(Room {
        id,
        name: name.to_string(),
        created_by: created_by.to_string(),
        created_at: now,
    })
}

/// List all rooms, newest first.
pub async fn list_rooms(pool: &SqlitePool) -> Result<Vec<Room>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, created_by, created_at
        FROM rooms
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(room_from_row).collect())
}

/// Get a room by id.
pub async fn get_room(pool: &SqlitePool, room_id: &str) -> Result<Option<Room>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, name, created_by, created_at
        FROM rooms
        WHERE id = $1
        "#,
    )
    .bind(room_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(room_from_row))
}

fn room_from_row(row: sqlx::sqlite::SqliteRow) -> Room {
    Room {
        id: row.get("id"),
        name: row.get("name"),
        created_by: row.get("created_by"),
        created_at: row.get("created_at"),
    }
}

/// Add a user to a room's member set. Idempotent: joining twice leaves the
/// membership unchanged. Takes any executor so `create_room` can run it
/// inside its transaction.
pub async fn add_member<'e, E>(
    executor: E,
    room_id: &str,
    user_id: &str,
) -> Result<(), sqlx::Error>
where
    E: sqlx::SqliteExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO room_members (room_id, user_id, joined_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (room_id, user_id) DO NOTHING
        "#,
    )
    .bind(room_id)
    .bind(user_id)
    .bind(Utc::now())
    .execute(executor)
    .await?;

    Ok(())
}

/// Get a room's members with their display info.
pub async fn get_members(
    pool: &SqlitePool,
    room_id: &str,
) -> Result<Vec<UserDisplay>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT rm.user_id, u.name, u.avatar_url
        FROM room_members rm
        LEFT JOIN users u ON u.id = rm.user_id
        WHERE rm.room_id = $1
        ORDER BY rm.joined_at ASC
        "#,
    )
    .bind(room_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| UserDisplay {
            id: row.get("user_id"),
            name: row.get::<Option<String>, _>("name").unwrap_or_default(),
            avatar_url: row.get("avatar_url"),
        })
        .collect())
}

/// Insert a room message with a server-assigned id and timestamp, returning
/// the enriched view delivered to listeners.
pub async fn insert_room_message(
    pool: &SqlitePool,
    room_id: &str,
    sender: UserDisplay,
    text: &str,
) -> Result<RoomMessageView, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO room_messages (id, room_id, sender_id, text, created_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(&id)
    .bind(room_id)
    .bind(&sender.id)
    .bind(text)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(RoomMessageView {
        id,
        room_id: room_id.to_string(),
        sender,
        text: text.to_string(),
        created_at: now,
    })
}

/// Get a room's messages, oldest first, enriched with sender display info.
pub async fn get_room_messages(
    pool: &SqlitePool,
    room_id: &str,
) -> Result<Vec<RoomMessageView>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT m.id, m.room_id, m.sender_id, m.text, m.created_at, u.name, u.avatar_url
        FROM room_messages m
        LEFT JOIN users u ON u.id = m.sender_id
        WHERE m.room_id = $1
        ORDER BY m.created_at ASC, m.rowid ASC
        "#,
    )
    .bind(room_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| RoomMessageView {
            id: row.get("id"),
            room_id: row.get("room_id"),
            sender: UserDisplay {
                id: row.get("sender_id"),
                name: row.get::<Option<String>, _>("name").unwrap_or_default(),
                avatar_url: row.get("avatar_url"),
            },
            text: row.get("text"),
            created_at: row.get("created_at"),
        })
        .collect())
}

/// Compute aggregate stats for a room.
///
/// `total_messages` counts the room's message records; `unique_users_texted`
/// counts distinct sender ids among them.
pub async fn get_room_stats(pool: &SqlitePool, room_id: &str) -> Result<RoomStats, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT
            (SELECT COUNT(*) FROM room_members WHERE room_id = $1) AS total_members,
            (SELECT COUNT(*) FROM room_messages WHERE room_id = $1) AS total_messages,
            (SELECT COUNT(DISTINCT sender_id) FROM room_messages WHERE room_id = $1) AS unique_users_texted
        "#,
    )
    .bind(room_id)
    .fetch_one(pool)
    .await?;

    Ok(RoomStats {
        total_members: row.get("total_members"),
        total_messages: row.get("total_messages"),
        unique_users_texted: row.get("unique_users_texted"),
    })
}
