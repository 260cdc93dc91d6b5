/**
 * Router Configuration
 *
 * Combines the live channel, the REST API and the liveness route into one
 * Axum router.
 *
 * # Route Overview
 *
 * - `GET /` - liveness text
 * - `GET /ws` - WebSocket upgrade for the live channel
 * - `/api/...` - request/response surface (see `api_routes`)
 */

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::realtime::ws::ws_handler;
use crate::routes::api_routes::configure_api_routes;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured.
pub fn create_router(state: AppState) -> Router<()> {
    let router = Router::new()
        .route("/", get(|| async { "API is running..." }))
        .route("/ws", get(ws_handler));

    let router = configure_api_routes(router);

    router
        .fallback(|| async { "404 Not Found" })
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
