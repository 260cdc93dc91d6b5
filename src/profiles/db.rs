//! Database operations for profiles
//!
//! The interests list is stored as a JSON array in a TEXT column; it is
//! decoded on read and re-encoded on write.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::auth::users;

/// The merged user + profile view returned by GET /api/profile/{user_id}.
///
/// Every field has a concrete default so clients never see null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub dob: String,
    pub mobile: String,
    pub interested_areas: Vec<String>,
    pub credit: f64,
}

/// A partial profile update.
///
/// Each field is independently absent-vs-present; absent fields are left
/// unchanged by [`update_profile`]. `name` and `email` patch the user record,
/// the rest patch the profile record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub dob: Option<String>,
    pub mobile: Option<String>,
    pub interested_areas: Option<Vec<String>>,
    pub credit: Option<f64>,
}

struct ProfileRecord {
    dob: String,
    mobile: String,
    interests_json: String,
    credit: f64,
}

/// Fetch the profile row for a user, creating an empty one if absent.
async fn get_or_create_record(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<ProfileRecord, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT dob, mobile, interests, credit
        FROM profiles
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    if let Some(row) = row {
        return Ok(ProfileRecord {
            dob: row.get("dob"),
            mobile: row.get("mobile"),
            interests_json: row.get("interests"),
            credit: row.get("credit"),
        });
    }

    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO profiles (id, user_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(user_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(ProfileRecord {
        dob: String::new(),
        mobile: String::new(),
        interests_json: "[]".to_string(),
        credit: 0.0,
    })
}

/// Get the merged profile view for a user.
///
/// Returns `Ok(None)` when the user itself does not exist. A missing profile
/// row is not an error; it is created lazily with defaults.
pub async fn get_profile(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Option<ProfileView>, sqlx::Error> {
    let Some(user) = users::get_user_by_id(pool, user_id).await? else {
        return Ok(None);
    };

    let record = get_or_create_record(pool, user_id).await?;
    let interested_areas: Vec<String> =
        serde_json::from_str(&record.interests_json).unwrap_or_default();

    Ok(Some(ProfileView {
        name: user.name,
        email: user.email,
        avatar_url: user.avatar_url.unwrap_or_default(),
        dob: record.dob,
        mobile: record.mobile,
        interested_areas,
        credit: record.credit,
    }))
}

/// Apply a partial update to a user's profile (upsert semantics).
///
/// Fields absent from the patch keep their stored values. Returns the merged
/// view after the update, or `Ok(None)` when the user does not exist.
///
/// A patched `email` that collides with another user's surfaces as the
/// underlying `sqlx::Error` unique violation; callers translate that with
/// `AppError::conflict_on_unique`.
pub async fn update_profile(
    pool: &SqlitePool,
    user_id: &str,
    patch: ProfilePatch,
) -> Result<Option<ProfileView>, sqlx::Error> {
    if users::get_user_by_id(pool, user_id).await?.is_none() {
        return Ok(None);
    }

    if patch.name.is_some() || patch.email.is_some() {
        users::update_user_display(pool, user_id, patch.name.as_deref(), patch.email.as_deref())
            .await?;
    }

    // Make sure the row exists before patching it.
    get_or_create_record(pool, user_id).await?;

    let interests_json = match &patch.interested_areas {
        Some(areas) => Some(serde_json::to_string(areas).unwrap_or_else(|_| "[]".to_string())),
        None => None,
    };

    sqlx::query(
        r#"
        UPDATE profiles
        SET dob = COALESCE($1, dob),
            mobile = COALESCE($2, mobile),
            interests = COALESCE($3, interests),
            credit = COALESCE($4, credit),
            updated_at = $5
        WHERE user_id = $6
        "#,
    )
    .bind(patch.dob.as_deref())
    .bind(patch.mobile.as_deref())
    .bind(interests_json.as_deref())
    .bind(patch.credit)
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await?;

    get_profile(pool, user_id).await
}
