//! Connection Directory
//!
//! Process-wide registry of which live connections are subscribed to which
//! addresses, so the dispatcher can resolve "who is listening right now".
//! Purely ephemeral: rebuilt empty on restart, because clients re-subscribe
//! on reconnect.
//!
//! # Locking
//!
//! All reads and mutations go through one `std::sync::Mutex`, and the lock is
//! never held across an await point. Subscribe/unsubscribe are therefore
//! serialized relative to the delivery-resolution reads, so a connection
//! mid-teardown is never handed out as a listener after its
//! `unsubscribe_all` completes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::realtime::event::{Address, ServerEvent};

/// The sending half handed to the directory for each live connection.
///
/// Events pushed into `tx` are forwarded to the connection's WebSocket by its
/// writer task. Cloneable; the id stays stable across clones.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    /// Unique id for this connection's lifetime. A reconnect is a brand-new
    /// connection with a fresh id and no carried-over subscriptions.
    pub id: Uuid,
    /// Fire-and-forget event sink for this connection.
    pub tx: mpsc::UnboundedSender<ServerEvent>,
}

impl ConnectionHandle {
    pub fn new(tx: mpsc::UnboundedSender<ServerEvent>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tx,
        }
    }
}

/// A snapshot entry from [`ConnectionDirectory::listeners_of`].
#[derive(Debug, Clone)]
pub struct Listener {
    pub connection_id: Uuid,
    pub tx: mpsc::UnboundedSender<ServerEvent>,
}

/// Address → listener-set registry. Cloneable — store in AppState.
#[derive(Clone, Default)]
pub struct ConnectionDirectory {
    inner: Arc<Mutex<HashMap<Address, HashMap<Uuid, mpsc::UnboundedSender<ServerEvent>>>>>,
}

impl ConnectionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a connection to an address.
    ///
    /// Idempotent: subscribing twice has no additional effect. Addresses are
    /// created implicitly by their first subscriber.
    pub fn subscribe(&self, handle: &ConnectionHandle, address: Address) {
        let mut inner = self.inner.lock().expect("directory lock poisoned");
        inner
            .entry(address)
            .or_default()
            .insert(handle.id, handle.tx.clone());
    }

    /// Remove a connection from every listener set it had joined.
    ///
    /// Called exactly once when a connection closes, whether the closure was
    /// client-initiated or a network failure. Empty listener sets are dropped
    /// so abandoned addresses do not accumulate.
    pub fn unsubscribe_all(&self, connection_id: Uuid) {
        let mut inner = self.inner.lock().expect("directory lock poisoned");
        inner.retain(|_, listeners| {
            listeners.remove(&connection_id);
            !listeners.is_empty()
        });
    }

    /// Snapshot of the connections currently subscribed to an address.
    ///
    /// No ordering guarantee, and the snapshot may go stale as soon as it is
    /// returned; callers use it immediately for one delivery pass.
    pub fn listeners_of(&self, address: &Address) -> Vec<Listener> {
        let inner = self.inner.lock().expect("directory lock poisoned");
        inner
            .get(address)
            .map(|listeners| {
                listeners
                    .iter()
                    .map(|(id, tx)| Listener {
                        connection_id: *id,
                        tx: tx.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> (ConnectionHandle, mpsc::UnboundedReceiver<ServerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ConnectionHandle::new(tx), rx)
    }

    #[test]
    fn test_subscribe_and_resolve() {
        let directory = ConnectionDirectory::new();
        let (conn, _rx) = handle();

        directory.subscribe(&conn, Address::User("alice".into()));

        let listeners = directory.listeners_of(&Address::User("alice".into()));
        assert_eq!(listeners.len(), 1);
        assert_eq!(listeners[0].connection_id, conn.id);

        // Unknown addresses resolve to an empty set, not an error.
        assert!(directory
            .listeners_of(&Address::User("nobody".into()))
            .is_empty());
    }

    #[test]
    fn test_subscribe_is_idempotent() {
        let directory = ConnectionDirectory::new();
        let (conn, _rx) = handle();

        directory.subscribe(&conn, Address::Room("r1".into()));
        directory.subscribe(&conn, Address::Room("r1".into()));

        assert_eq!(directory.listeners_of(&Address::Room("r1".into())).len(), 1);
    }

    #[test]
    fn test_unsubscribe_all_clears_every_address() {
        let directory = ConnectionDirectory::new();
        let (conn, _rx) = handle();
        let (other, _other_rx) = handle();

        directory.subscribe(&conn, Address::User("alice".into()));
        directory.subscribe(&conn, Address::Room("r1".into()));
        directory.subscribe(&other, Address::Room("r1".into()));

        directory.unsubscribe_all(conn.id);

        assert!(directory
            .listeners_of(&Address::User("alice".into()))
            .is_empty());

        let remaining = directory.listeners_of(&Address::Room("r1".into()));
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].connection_id, other.id);
    }

    #[test]
    fn test_user_and_room_namespaces_are_distinct() {
        let directory = ConnectionDirectory::new();
        let (conn, _rx) = handle();

        // Same string in both namespaces must not cross-deliver.
        directory.subscribe(&conn, Address::User("42".into()));

        assert!(directory.listeners_of(&Address::Room("42".into())).is_empty());
        assert_eq!(directory.listeners_of(&Address::User("42".into())).len(), 1);
    }
}
