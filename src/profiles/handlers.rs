//! Profile HTTP Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::profiles::db::{self, ProfilePatch, ProfileView};

/// Get a user's profile (GET /api/profile/{user_id})
///
/// Unset fields come back as defaults, never null. The profile row is
/// created on first access if absent.
pub async fn get_profile(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<String>,
) -> AppResult<Json<ProfileView>> {
    let view = db::get_profile(&pool, &user_id)
        .await?
        .ok_or_else(|| AppError::not_found("user"))?;

    Ok(Json(view))
}

/// Update a user's profile (PUT /api/profile/{user_id})
///
/// Accepts a partial field set; omitted fields keep their stored values.
/// Patching `email` to an address another user holds fails with 409.
pub async fn update_profile(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<String>,
    Json(patch): Json<ProfilePatch>,
) -> AppResult<Json<ProfileView>> {
    let view = db::update_profile(&pool, &user_id, patch)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "email"))?
        .ok_or_else(|| AppError::not_found("user"))?;

    tracing::debug!(user_id = %user_id, "profile updated");

    Ok(Json(view))
}
