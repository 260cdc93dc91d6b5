/**
 * Server Initialization
 *
 * Builds the application: database pool, shared state and router.
 *
 * # Initialization Process
 *
 * 1. Connect the database pool and run migrations
 * 2. Create the connection directory and dispatcher
 * 3. Assemble the router with all routes and middleware
 */

use axum::Router;
use sqlx::SqlitePool;

use crate::routes::router::create_router;
use crate::server::config::{load_database, ServerConfig};
use crate::server::state::AppState;

/// Create and configure the Axum application.
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, sqlx::Error> {
    tracing::info!("initializing chatline backend server");

    let pool = load_database(&config.database_url).await?;
    Ok(create_app_with_pool(pool))
}

/// Assemble the application around an existing pool.
///
/// Split out so tests can hand in a migrated in-memory pool.
pub fn create_app_with_pool(pool: SqlitePool) -> Router<()> {
    let state = AppState::new(pool);
    create_router(state)
}
