//! Direct Messaging HTTP Handlers
//!
//! The send path goes through the fan-out dispatcher so a message submitted
//! over HTTP is persisted and pushed to live listeners exactly like one
//! submitted over the WebSocket channel.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::messaging::db::{self, DirectMessage};
use crate::realtime::dispatcher::Dispatcher;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub receiver: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct GetMessagesQuery {
    pub sender: Option<String>,
    pub receiver: Option<String>,
}

/// Send a direct message (POST /api/messages/send)
///
/// All three fields are required; nothing is persisted or delivered when
/// validation fails.
pub async fn send_message(
    State(dispatcher): State<Dispatcher>,
    Json(request): Json<SendMessageRequest>,
) -> AppResult<Json<DirectMessage>> {
    let message = dispatcher
        .handle_direct_send(&request.sender, &request.receiver, &request.text)
        .await?;

    Ok(Json(message))
}

/// Get messages between two users (GET /api/messages/get?sender=..&receiver=..)
///
/// Returns the full history oldest to newest, matching either direction.
pub async fn get_messages(
    State(pool): State<SqlitePool>,
    Query(query): Query<GetMessagesQuery>,
) -> AppResult<Json<Vec<DirectMessage>>> {
    let sender = query
        .sender
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::validation("sender"))?;
    let receiver = query
        .receiver
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::validation("receiver"))?;

    let messages = db::get_messages_between(&pool, &sender, &receiver).await?;
    Ok(Json(messages))
}
