// src/handlers/account.rs

use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Extension, Json,
};
use serde_json::json;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::user::{MeResponse, UpdateUsernameRequest, User},
    utils::jwt::Claims,
    validation::{validate_username_update, MSG_REQUIRED, MSG_USERNAME_TAKEN},
};

async fn load_me(pool: &SqlitePool, user_id: i64) -> Result<MeResponse, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password, pfp, pfp_content_type, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    let team =
        sqlx::query_scalar::<_, String>("SELECT item_id FROM team_members WHERE user_id = ? ORDER BY id")
            .bind(user_id)
            .fetch_all(pool)
            .await?;

    Ok(MeResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        has_picture: user.pfp.is_some(),
        team,
        created_at: user.created_at,
    })
}

/// Get the current user's account data.
pub async fn get_account(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.sub.parse::<i64>().unwrap_or(0);

    Ok(Json(load_me(&pool, user_id).await?))
}

/// Change the current user's username.
///
/// Responds with the updated account so the caller immediately operates on
/// the new identity. The token stays valid because its subject is the user
/// id, not the name.
pub async fn update_username(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateUsernameRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.sub.parse::<i64>().unwrap_or(0);

    let errors = validate_username_update(&payload.username);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // Unique among everyone else; renaming to your own current name is a no-op.
    let taken =
        sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE username = ? AND id != ?")
            .bind(&payload.username)
            .bind(user_id)
            .fetch_optional(&pool)
            .await?;
    if taken.is_some() {
        return Err(AppError::Conflict(MSG_USERNAME_TAKEN.to_string()));
    }

    sqlx::query("UPDATE users SET username = ? WHERE id = ?")
        .bind(&payload.username)
        .bind(user_id)
        .execute(&pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                AppError::Conflict(MSG_USERNAME_TAKEN.to_string())
            } else {
                AppError::from(e)
            }
        })?;

    Ok(Json(load_me(&pool, user_id).await?))
}

/// Upload or replace the current user's profile picture.
///
/// Expects a multipart field named 'pfp'. The blob and its content type are
/// stored on the user row; a later upload overwrites both (last write wins).
pub async fn update_picture(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.sub.parse::<i64>().unwrap_or(0);

    let mut picture: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("pfp") {
            let content_type = field
                .content_type()
                .map(|ct| ct.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;

            picture = Some((data.to_vec(), content_type));
            break;
        }
    }

    let (data, content_type) = match picture {
        Some((data, _)) if data.is_empty() => {
            return Err(AppError::BadRequest(MSG_REQUIRED.to_string()))
        }
        Some(found) => found,
        None => return Err(AppError::BadRequest(MSG_REQUIRED.to_string())),
    };

    sqlx::query("UPDATE users SET pfp = ?, pfp_content_type = ? WHERE id = ?")
        .bind(&data)
        .bind(&content_type)
        .bind(user_id)
        .execute(&pool)
        .await?;

    Ok(Json(json!({ "message": "Picture updated" })))
}
