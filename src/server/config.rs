/**
 * Server Configuration
 *
 * Loads settings from environment variables with development defaults and
 * sets up the database pool.
 *
 * # Configuration Sources
 *
 * - `DATABASE_URL` - SQLite connection string (default: `sqlite:chatline.db?mode=rwc`)
 * - `SERVER_PORT` - listen port (default: 5000)
 * - `JWT_SECRET` - bearer-token signing secret (development default used if unset)
 */

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Resolved server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
}

impl ServerConfig {
    /// Read configuration from the environment.
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:chatline.db?mode=rwc".to_string());

        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(5000);

        Self { database_url, port }
    }
}

/// Connect the database pool and run migrations.
///
/// The durable stores are the single source of truth for conversation
/// history, so unlike the in-memory directory this must come up before the
/// server can serve anything.
pub async fn load_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("connecting to database");

    let pool = SqlitePoolOptions::new()
        .max_connections(16)
        .connect(database_url)
        .await?;

    tracing::info!("running database migrations");
    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}
