//! Realtime Module
//!
//! The real-time fan-out layer: the only part of the system tying
//! persistence to live delivery.
//!
//! # Architecture
//!
//! - **`event`** - wire events for the live channel and the `Address` type
//! - **`directory`** - the connection directory: address → listener set
//! - **`dispatcher`** - validates, persists and fans out inbound events
//! - **`ws`** - the WebSocket endpoint feeding the dispatcher
//!
//! A client opens a WebSocket, joins its personal-inbox address (and any room
//! addresses it opens), and sends message events. The dispatcher persists each
//! message via the durable stores, resolves the delivery set from the
//! directory, and pushes to every matching live connection. Delivery is
//! fire-and-forget; a listener that cannot be reached still sees the message
//! via history retrieval.

pub mod directory;
pub mod dispatcher;
pub mod event;
pub mod ws;

pub use directory::{ConnectionDirectory, ConnectionHandle};
pub use dispatcher::Dispatcher;
pub use event::{Address, ClientEvent, ServerEvent};
