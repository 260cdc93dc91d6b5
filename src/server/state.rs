/**
 * Application State Management
 *
 * `AppState` is the central state container: the database pool (durable
 * source of truth), the connection directory (ephemeral, rebuilt empty on
 * restart) and the fan-out dispatcher tying the two together.
 *
 * The `FromRef` implementations let handlers extract just the part they
 * need — `State<SqlitePool>` for plain CRUD, `State<Dispatcher>` for send
 * paths — following Axum's recommended state pattern.
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::realtime::directory::ConnectionDirectory;
use crate::realtime::dispatcher::Dispatcher;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db_pool: SqlitePool,
    /// Live-connection registry. Process-wide, in-memory; all mutation is
    /// serialized inside the directory itself.
    pub directory: ConnectionDirectory,
    /// The realtime core: validates, persists, fans out.
    pub dispatcher: Dispatcher,
}

impl AppState {
    /// Build the state graph around an existing pool.
    pub fn new(db_pool: SqlitePool) -> Self {
        let directory = ConnectionDirectory::new();
        let dispatcher = Dispatcher::new(db_pool.clone(), directory.clone());
        Self {
            db_pool,
            directory,
            dispatcher,
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.db_pool.clone()
    }
}

impl FromRef<AppState> for ConnectionDirectory {
    fn from_ref(state: &AppState) -> Self {
        state.directory.clone()
    }
}

impl FromRef<AppState> for Dispatcher {
    fn from_ref(state: &AppState) -> Self {
        state.dispatcher.clone()
    }
}
