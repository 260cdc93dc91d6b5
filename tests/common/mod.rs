//! Shared test fixtures
//!
//! Every integration test runs against a fresh in-memory SQLite database
//! with the real migrations applied, so the uniqueness constraints under
//! test are the ones production runs with.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use chatline::auth::users::{self, User};

/// Create a migrated in-memory database pool.
///
/// A single connection is used so every query sees the same in-memory
/// database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

/// Insert a user directly, bypassing the HTTP surface.
#[allow(dead_code)]
pub async fn seed_user(pool: &SqlitePool, name: &str, email: &str) -> User {
    users::create_user(pool, name, email, "not-a-real-hash")
        .await
        .expect("failed to seed user")
}
