// src/handlers/users.rs

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::{
        review::ReviewResponse,
        user::{ProfileResponse, User},
    },
};

/// Public profile: the user's reviews and team, newest review last.
pub async fn user_detail(
    State(pool): State<SqlitePool>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password, pfp, pfp_content_type, created_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(&username)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    let reviews = sqlx::query_as::<_, ReviewResponse>(
        r#"
        SELECT
            r.id, r.item_id, r.title, r.content,
            u.username,
            (u.pfp IS NOT NULL) AS has_picture,
            r.created_at
        FROM reviews r
        JOIN users u ON r.user_id = u.id
        WHERE r.user_id = ?
        ORDER BY r.id ASC
        "#,
    )
    .bind(user.id)
    .fetch_all(&pool)
    .await?;

    let team =
        sqlx::query_scalar::<_, String>("SELECT item_id FROM team_members WHERE user_id = ? ORDER BY id")
            .bind(user.id)
            .fetch_all(&pool)
            .await?;

    Ok(Json(ProfileResponse {
        username: user.username,
        has_picture: user.pfp.is_some(),
        reviews,
        team,
    }))
}

/// Serve a user's profile picture with its stored content type.
pub async fn user_picture(
    State(pool): State<SqlitePool>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password, pfp, pfp_content_type, created_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(&username)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    let blob = user
        .pfp
        .ok_or(AppError::NotFound("Picture not found".to_string()))?;

    let content_type = user
        .pfp_content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());

    Ok(([(header::CONTENT_TYPE, content_type)], blob))
}
