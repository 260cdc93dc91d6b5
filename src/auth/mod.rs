//! Authentication Module
//!
//! Account storage, password hashing and bearer-token sessions.
//!
//! - **`users`** - user model and database operations
//! - **`sessions`** - JWT token creation and verification
//! - **`handlers`** - register/login HTTP handlers

pub mod handlers;
pub mod sessions;
pub mod users;
