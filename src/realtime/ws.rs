//! WebSocket endpoint for the live channel (GET /ws)
//!
//! Each upgraded socket gets a fresh [`ConnectionHandle`] and two halves: a
//! writer task draining the connection's event queue into the socket, and
//! the read loop below feeding inbound events to the dispatcher one at a
//! time, preserving per-connection submission order.
//!
//! When the read loop ends for any reason (clean close or network failure)
//! the connection is removed from every listener set exactly once.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::realtime::directory::{ConnectionDirectory, ConnectionHandle};
use crate::realtime::dispatcher::Dispatcher;
use crate::realtime::event::{Address, ClientEvent, ServerEvent};

/// Upgrade handler for GET /ws.
pub async fn ws_handler(
    State(dispatcher): State<Dispatcher>,
    State(directory): State<ConnectionDirectory>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, dispatcher, directory))
}

async fn handle_socket(socket: WebSocket, dispatcher: Dispatcher, directory: ConnectionDirectory) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();
    let handle = ConnectionHandle::new(tx);
    let connection_id = handle.id;

    tracing::info!(%connection_id, "live connection opened");

    let mut writer_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let payload = match serde_json::to_string(&event) {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::error!(%connection_id, "failed to serialize event: {e}");
                    continue;
                }
            };
            if ws_sender.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(msg)) = ws_receiver.next().await {
        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => break,
            // Pings are answered by axum automatically.
            _ => continue,
        };

        let event = match serde_json::from_str::<ClientEvent>(text.as_str()) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(%connection_id, "ignoring malformed event: {e}");
                let _ = handle.tx.send(ServerEvent::Error {
                    message: "malformed event".to_string(),
                });
                continue;
            }
        };

        handle_event(&dispatcher, &handle, event).await;
    }

    // Exactly one teardown per connection lifecycle, regardless of how the
    // read loop ended.
    directory.unsubscribe_all(connection_id);
    writer_task.abort();
    let _ = (&mut writer_task).await;

    tracing::info!(%connection_id, "live connection closed");
}

/// Feed one inbound event to the dispatcher.
///
/// Rejections (validation, unknown room) are reported back on this
/// connection only; delivery failures inside the dispatcher are already
/// swallowed there.
async fn handle_event(dispatcher: &Dispatcher, handle: &ConnectionHandle, event: ClientEvent) {
    let result = match event {
        ClientEvent::Join { user_id } => {
            dispatcher.handle_join(handle, Address::User(user_id));
            Ok(())
        }
        ClientEvent::JoinRoom { room_id } => {
            dispatcher.handle_join(handle, Address::Room(room_id));
            Ok(())
        }
        ClientEvent::SendDirect {
            sender,
            receiver,
            text,
        } => dispatcher
            .handle_direct_send(&sender, &receiver, &text)
            .await
            .map(|_| ()),
        ClientEvent::SendRoom {
            room_id,
            sender_id,
            text,
        } => dispatcher
            .handle_room_send(&room_id, &sender_id, &text)
            .await
            .map(|_| ()),
    };

    if let Err(err) = result {
        let _ = handle.tx.send(ServerEvent::Error {
            message: err.message(),
        });
    }
}
