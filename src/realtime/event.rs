//! Live-channel wire events and delivery addresses.

use serde::{Deserialize, Serialize};

use crate::messaging::db::DirectMessage;
use crate::rooms::db::RoomMessageView;

/// A logical delivery target.
///
/// Two address namespaces exist simultaneously: personal inboxes keyed by
/// user identity and rooms keyed by room id. The tag keeps them from
/// colliding when a user id and a room id happen to share a string value;
/// the directory itself treats both identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Address {
    /// A user's personal inbox.
    User(String),
    /// A room's live channel.
    Room(String),
}

/// Client → server events on the live channel.
///
/// Serialized as JSON with a `type` tag, e.g.
/// `{"type":"send_direct","sender":"A","receiver":"B","text":"hi"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Subscribe this connection to a personal-inbox address.
    Join { user_id: String },
    /// Subscribe this connection to a room's live channel.
    JoinRoom { room_id: String },
    /// Submit a direct message.
    SendDirect {
        #[serde(default)]
        sender: String,
        #[serde(default)]
        receiver: String,
        #[serde(default)]
        text: String,
    },
    /// Submit a room message.
    SendRoom {
        room_id: String,
        #[serde(default)]
        sender_id: String,
        #[serde(default)]
        text: String,
    },
}

/// Server → client events on the live channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A direct message addressed to (or echoed back to) this connection.
    ReceiveDirect { message: DirectMessage },
    /// A room message, enriched with the sender's display info.
    ReceiveRoom { message: RoomMessageView },
    /// A submitted event was rejected; the reason mirrors the HTTP error text.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_event_wire_format() {
        let event: ClientEvent =
            serde_json::from_str(r#"{"type":"join","user_id":"alice"}"#).unwrap();
        assert!(matches!(event, ClientEvent::Join { user_id } if user_id == "alice"));

        let event: ClientEvent = serde_json::from_str(
            r#"{"type":"send_direct","sender":"A","receiver":"B","text":"hi"}"#,
        )
        .unwrap();
        match event {
            ClientEvent::SendDirect {
                sender,
                receiver,
                text,
            } => {
                assert_eq!(sender, "A");
                assert_eq!(receiver, "B");
                assert_eq!(text, "hi");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        // The dispatcher rejects empties; deserialization should not.
        let event: ClientEvent = serde_json::from_str(r#"{"type":"send_direct"}"#).unwrap();
        assert!(
            matches!(event, ClientEvent::SendDirect { sender, .. } if sender.is_empty())
        );
    }

    #[test]
    fn test_address_namespaces_do_not_collide() {
        let shared = "4242".to_string();
        assert_ne!(Address::User(shared.clone()), Address::Room(shared));
    }
}
