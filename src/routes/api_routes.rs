/**
 * API Route Configuration
 *
 * The request/response surface, kept thin: every handler delegates to a
 * store module or the dispatcher.
 *
 * # Routes
 *
 * ## Users
 * - `POST /api/users/register` - create an account, returns token + user
 * - `POST /api/users/login` - returns token + user
 *
 * ## Messages
 * - `POST /api/messages/send` - persist + fan out a direct message
 * - `GET /api/messages/get?sender=..&receiver=..` - full history, oldest first
 *
 * ## Rooms
 * - `GET /api/rooms` - all rooms, newest first
 * - `POST /api/rooms/create` - bearer auth; 409 on duplicate name
 * - `POST /api/rooms/{room_id}/join` - bearer auth; idempotent
 * - `GET /api/rooms/{room_id}/members`
 * - `GET /api/rooms/{room_id}/messages`
 * - `GET /api/rooms/{room_id}/stats`
 *
 * ## Profiles
 * - `GET /api/profile/{user_id}` - merged view with defaults
 * - `PUT /api/profile/{user_id}` - typed partial patch, upsert
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth_handlers;
use crate::messaging::handlers as message_handlers;
use crate::profiles::handlers as profile_handlers;
use crate::rooms::handlers as room_handlers;
use crate::server::state::AppState;

/// Add the /api routes to the router.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Users
        .route("/api/users/register", post(auth_handlers::register))
        .route("/api/users/login", post(auth_handlers::login))
        // Direct messages
        .route("/api/messages/send", post(message_handlers::send_message))
        .route("/api/messages/get", get(message_handlers::get_messages))
        // Rooms
        .route("/api/rooms", get(room_handlers::list_rooms))
        .route("/api/rooms/create", post(room_handlers::create_room))
        .route("/api/rooms/{room_id}/join", post(room_handlers::join_room))
        .route(
            "/api/rooms/{room_id}/members",
            get(room_handlers::get_members),
        )
        .route(
            "/api/rooms/{room_id}/messages",
            get(room_handlers::get_messages),
        )
        .route("/api/rooms/{room_id}/stats", get(room_handlers::get_stats))
        // Profiles
        .route(
            "/api/profile/{user_id}",
            get(profile_handlers::get_profile).put(profile_handlers::update_profile),
        )
}
