//! Application Error Module
//!
//! This module defines the error types used by HTTP handlers and the
//! realtime dispatcher, and the conversions that turn them into HTTP
//! responses.
//!
//! # Module Structure
//!
//! - **`types`** - Error type definitions and constructors
//! - **`conversion`** - `IntoResponse` implementation
//!
//! # Propagation policy
//!
//! Validation, not-found and conflict errors surface to the caller as a
//! rejected operation with a descriptive reason. Storage errors surface as a
//! generic failure. Delivery errors never reach this type at all: a persisted
//! message that fails to reach a live listener is logged and dropped.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::{AppError, AppResult};
