//! Routes Module
//!
//! - **`router`** - top-level router assembly (live channel + fallback)
//! - **`api_routes`** - the /api request/response surface

pub mod api_routes;
pub mod router;
