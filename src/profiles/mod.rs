//! Profiles Module
//!
//! One profile per user, created lazily on first access. Reads merge the
//! user's display fields with the profile record and substitute defaults for
//! unset fields (empty string / empty list / zero credit) instead of nulls.
//! Updates are a strongly-typed patch: each field is independently
//! absent-or-present, and absent fields keep their stored values.

pub mod db;
pub mod handlers;

pub use db::{ProfilePatch, ProfileView};
