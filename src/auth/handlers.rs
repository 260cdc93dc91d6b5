/**
 * Auth HTTP Handlers
 *
 * Registration and login for POST /api/users/register and
 * POST /api/users/login.
 *
 * # Security
 *
 * - Passwords are hashed with bcrypt (DEFAULT_COST) and never returned
 * - Email uniqueness is enforced by the store; a duplicate registration
 *   surfaces as 409 Conflict
 */

use axum::{extract::State, Json};
use bcrypt::{hash, verify, DEFAULT_COST};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::auth::sessions::create_token;
use crate::auth::users::{self, User};
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Register a new user (POST /api/users/register)
pub async fn register(
    State(pool): State<SqlitePool>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    if request.name.trim().is_empty() {
        return Err(AppError::validation("name"));
    }
    if request.email.trim().is_empty() {
        return Err(AppError::validation("email"));
    }
    if request.password.len() < 8 {
        return Err(AppError::validation("password (min 8 characters)"));
    }

    let password_hash = hash(&request.password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;

    let user = users::create_user(&pool, &request.name, &request.email, &password_hash)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "email"))?;

    tracing::info!(user_id = %user.id, "registered new user");

    let token = create_token(&user.id, &user.email)
        .map_err(|e| AppError::Internal(format!("token creation failed: {e}")))?;

    Ok(Json(AuthResponse { token, user }))
}

/// Log in an existing user (POST /api/users/login)
pub async fn login(
    State(pool): State<SqlitePool>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = users::get_user_by_email(&pool, &request.email)
        .await?
        .ok_or_else(|| AppError::unauthorized("invalid email or password"))?;

    let matches = verify(&request.password, &user.password_hash)
        .map_err(|_| AppError::unauthorized("invalid email or password"))?;
    if !matches {
        return Err(AppError::unauthorized("invalid email or password"));
    }

    let token = create_token(&user.id, &user.email)
        .map_err(|e| AppError::Internal(format!("token creation failed: {e}")))?;

    tracing::debug!(user_id = %user.id, "user logged in");

    Ok(Json(AuthResponse { token, user }))
}
