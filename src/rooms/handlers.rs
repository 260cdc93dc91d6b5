//! Rooms HTTP Handlers
//!
//! Room creation and joining require a bearer token (the acting user is the
//! token's subject). Reads are open. Room sends over HTTP are not exposed;
//! room messages arrive via the live channel and are read back through
//! GET /api/rooms/{room_id}/messages.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::auth::sessions::bearer_user_id;
use crate::auth::users::UserDisplay;
use crate::error::{AppError, AppResult};
use crate::rooms::db::{self, Room, RoomMessageView, RoomStats};

#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct JoinRoomResponse {
    pub message: String,
    pub room: Room,
}

/// List all rooms, newest first (GET /api/rooms)
pub async fn list_rooms(State(pool): State<SqlitePool>) -> AppResult<Json<Vec<Room>>> {
    let rooms = db::list_rooms(&pool).await?;
    Ok(Json(rooms))
}

/// Create a room (POST /api/rooms/create)
///
/// Fails with 409 when the name is already taken; the existing room's member
/// set is untouched in that case.
pub async fn create_room(
    State(pool): State<SqlitePool>,
    headers: HeaderMap,
    Json(request): Json<CreateRoomRequest>,
) -> AppResult<Json<Room>> {
    let user_id = bearer_user_id(&headers)?;

    if request.name.trim().is_empty() {
        return Err(AppError::validation("name"));
    }

    let room = db::create_room(&pool, &request.name, &user_id)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "room name"))?;

    tracing::info!(room_id = %room.id, name = %room.name, "room created");

    Ok(Json(room))
}

/// Join a room (POST /api/rooms/{room_id}/join)
///
/// Idempotent membership add; joining twice leaves the member set unchanged.
pub async fn join_room(
    State(pool): State<SqlitePool>,
    headers: HeaderMap,
    Path(room_id): Path<String>,
) -> AppResult<Json<JoinRoomResponse>> {
    let user_id = bearer_user_id(&headers)?;

    let room = db::get_room(&pool, &room_id)
        .await?
        .ok_or_else(|| AppError::not_found("room"))?;

    db::add_member(&pool, &room.id, &user_id).await?;

    Ok(Json(JoinRoomResponse {
        message: "Joined room".to_string(),
        room,
    }))
}

/// Get a room's members (GET /api/rooms/{room_id}/members)
pub async fn get_members(
    State(pool): State<SqlitePool>,
    Path(room_id): Path<String>,
) -> AppResult<Json<Vec<UserDisplay>>> {
    ensure_room_exists(&pool, &room_id).await?;
    let members = db::get_members(&pool, &room_id).await?;
    Ok(Json(members))
}

/// Get a room's messages, oldest first (GET /api/rooms/{room_id}/messages)
pub async fn get_messages(
    State(pool): State<SqlitePool>,
    Path(room_id): Path<String>,
) -> AppResult<Json<Vec<RoomMessageView>>> {
    ensure_room_exists(&pool, &room_id).await?;
    let messages = db::get_room_messages(&pool, &room_id).await?;
    Ok(Json(messages))
}

/// Get a room's aggregate stats (GET /api/rooms/{room_id}/stats)
pub async fn get_stats(
    State(pool): State<SqlitePool>,
    Path(room_id): Path<String>,
) -> AppResult<Json<RoomStats>> {
    ensure_room_exists(&pool, &room_id).await?;
    let stats = db::get_room_stats(&pool, &room_id).await?;
    Ok(Json(stats))
}

async fn ensure_room_exists(pool: &SqlitePool, room_id: &str) -> AppResult<()> {
    db::get_room(pool, room_id)
        .await?
        .ok_or_else(|| AppError::not_found("room"))?;
    Ok(())
}
