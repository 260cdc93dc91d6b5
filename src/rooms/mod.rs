//! Rooms Module
//!
//! Durable rooms with a member list and a message log. The member list grows
//! monotonically via join (no leave operation); the transient "who has the
//! room open right now" listener set lives in the connection directory, not
//! here.
//!
//! - **`db`** - room create/lookup, membership, messages and aggregate stats
//! - **`handlers`** - the /api/rooms HTTP surface

pub mod db;
pub mod handlers;

pub use db::{Room, RoomMessageView, RoomStats};
