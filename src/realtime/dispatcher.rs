//! Fan-out Dispatcher
//!
//! Receives inbound events, validates and persists them via the durable
//! stores, resolves the delivery set from the connection directory, and
//! pushes to each live connection in that set.
//!
//! # Delivery semantics
//!
//! Delivery is fire-and-forget per listener: a connection that cannot accept
//! the event (its writer task already went away) never blocks or fails
//! delivery to the others, and never fails the persisted-send result already
//! owed to the submitter. The recipient sees the message via history
//! retrieval next time it queries.
//!
//! Direct messages are fanned out to the receiver's inbox listeners *and*
//! echoed to the sender's own listeners, so every device of the sender
//! observes the send without relying on local optimistic state. Listeners
//! subscribed to both addresses (sender messaging themselves) are
//! deduplicated per connection.

use std::collections::HashMap;

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::users;
use crate::error::{AppError, AppResult};
use crate::messaging::db::{self as messaging_db, DirectMessage};
use crate::realtime::directory::{ConnectionDirectory, ConnectionHandle, Listener};
use crate::realtime::event::{Address, ServerEvent};
use crate::rooms::db::{self as rooms_db, RoomMessageView};

/// The realtime core. Cloneable — store in AppState.
#[derive(Clone)]
pub struct Dispatcher {
    pool: SqlitePool,
    directory: ConnectionDirectory,
}

impl Dispatcher {
    pub fn new(pool: SqlitePool, directory: ConnectionDirectory) -> Self {
        Self { pool, directory }
    }

    /// Register a connection's interest in an address.
    ///
    /// Used for personal-inbox addresses on login and room addresses when a
    /// client opens a room.
    pub fn handle_join(&self, handle: &ConnectionHandle, address: Address) {
        tracing::debug!(connection_id = %handle.id, ?address, "connection joined address");
        self.directory.subscribe(handle, address);
    }

    /// Validate, persist and fan out a direct message.
    ///
    /// Nothing is persisted or delivered when validation fails.
    pub async fn handle_direct_send(
        &self,
        sender: &str,
        receiver: &str,
        text: &str,
    ) -> AppResult<DirectMessage> {
        if sender.trim().is_empty() {
            return Err(AppError::validation("sender"));
        }
        if receiver.trim().is_empty() {
            return Err(AppError::validation("receiver"));
        }
        if text.trim().is_empty() {
            return Err(AppError::validation("text"));
        }

        let message = messaging_db::insert_direct_message(&self.pool, sender, receiver, text).await?;

        // Snapshot both listener sets after the persist completes; the
        // directory lock is not held across the database await.
        let mut targets: HashMap<Uuid, Listener> = HashMap::new();
        for listener in self
            .directory
            .listeners_of(&Address::User(receiver.to_string()))
            .into_iter()
            .chain(
                self.directory
                    .listeners_of(&Address::User(sender.to_string())),
            )
        {
            targets.insert(listener.connection_id, listener);
        }

        let event = ServerEvent::ReceiveDirect {
            message: message.clone(),
        };
        let delivered = deliver(targets.into_values(), &event);
        tracing::debug!(
            message_id = %message.id,
            delivered,
            "direct message persisted and fanned out"
        );

        Ok(message)
    }

    /// Validate, persist and fan out a room message.
    ///
    /// The room must exist and the sender must be a known user; the message
    /// is enriched with the sender's display info before delivery so every
    /// recipient renders it identically.
    pub async fn handle_room_send(
        &self,
        room_id: &str,
        sender_id: &str,
        text: &str,
    ) -> AppResult<RoomMessageView> {
        if sender_id.trim().is_empty() {
            return Err(AppError::validation("sender_id"));
        }
        if text.trim().is_empty() {
            return Err(AppError::validation("text"));
        }

        let room = rooms_db::get_room(&self.pool, room_id)
            .await?
            .ok_or_else(|| AppError::not_found("room"))?;

        let sender = users::get_user_display(&self.pool, sender_id)
            .await?
            .ok_or_else(|| AppError::not_found("user"))?;

        let message = rooms_db::insert_room_message(&self.pool, &room.id, sender, text).await?;

        // The delivery set is whoever has the room open right now, which is
        // not necessarily the room's durable membership.
        let listeners = self.directory.listeners_of(&Address::Room(room.id.clone()));
        let event = ServerEvent::ReceiveRoom {
            message: message.clone(),
        };
        let delivered = deliver(listeners, &event);
        tracing::debug!(
            room_id = %room.id,
            message_id = %message.id,
            delivered,
            "room message persisted and fanned out"
        );

        Ok(message)
    }
}

/// Push one event to each listener, best effort. Returns the delivered count.
fn deliver(listeners: impl IntoIterator<Item = Listener>, event: &ServerEvent) -> usize {
    let mut delivered = 0;
    for listener in listeners {
        match listener.tx.send(event.clone()) {
            Ok(()) => delivered += 1,
            Err(_) => {
                // Receiver already dropped; the connection is mid-teardown
                // and will be purged by its unsubscribe_all.
                tracing::debug!(
                    connection_id = %listener.connection_id,
                    "skipped delivery to closed connection"
                );
            }
        }
    }
    delivered
}
