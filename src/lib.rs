//! chatline — a small social/chat backend
//!
//! Account management, profile storage, direct messages, and group rooms
//! with real-time delivery over a WebSocket live channel.
//!
//! # Module Map
//!
//! - [`auth`] - accounts, password hashing, bearer-token sessions
//! - [`profiles`] - lazy-created per-user profiles with typed partial updates
//! - [`messaging`] - durable direct messages and their HTTP surface
//! - [`rooms`] - durable rooms, membership, messages and stats
//! - [`realtime`] - connection directory, fan-out dispatcher, WebSocket endpoint
//! - [`routes`] / [`server`] - router assembly, state and configuration
//! - [`error`] - application error type and HTTP conversion

pub mod auth;
pub mod error;
pub mod messaging;
pub mod profiles;
pub mod realtime;
pub mod rooms;
pub mod routes;
pub mod server;
