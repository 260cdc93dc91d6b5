//! Server Module
//!
//! Configuration, shared application state and server initialization.
//!
//! - **`config`** - environment-driven settings and database setup
//! - **`state`** - `AppState` and its `FromRef` extractions
//! - **`init`** - wiring: state construction and router assembly

pub mod config;
pub mod init;
pub mod state;

pub use state::AppState;
