//! Direct Messaging Module
//!
//! Durable storage and HTTP handlers for one-to-one messages. Sender and
//! receiver are free-form identity strings, matching whatever identity the
//! client joined its inbox address with; they are not foreign keys.
//!
//! - **`db`** - append-only insert and full-history range query
//! - **`handlers`** - POST /api/messages/send, GET /api/messages/get

pub mod db;
pub mod handlers;

pub use db::DirectMessage;
