// src/handlers/teams.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::team::{AddTeamMemberRequest, TeamMemberResponse, TEAM_MAX},
    utils::jwt::Claims,
    validation::{FieldError, MSG_REQUIRED, MSG_TEAM_FULL},
};

/// View any user's team, in insertion order.
pub async fn get_team(
    State(pool): State<SqlitePool>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE username = ?")
        .bind(&username)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    let members = sqlx::query_as::<_, TeamMemberResponse>(
        "SELECT id, item_id, created_at FROM team_members WHERE user_id = ? ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(members))
}

/// Append an entry to the current user's team.
///
/// The team is capped at six members; an add past the cap is rejected.
/// Duplicate entries are allowed.
pub async fn add_member(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<AddTeamMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.item_id.is_empty() {
        return Err(AppError::Validation(vec![FieldError {
            field: "item_id",
            message: MSG_REQUIRED.to_string(),
        }]));
    }

    let user_id = claims.sub.parse::<i64>().unwrap_or(0);

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM team_members WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(&pool)
        .await?;

    if count >= TEAM_MAX {
        return Err(AppError::Conflict(MSG_TEAM_FULL.to_string()));
    }

    let member = sqlx::query_as::<_, TeamMemberResponse>(
        r#"
        INSERT INTO team_members (user_id, item_id, created_at)
        VALUES (?, ?, ?)
        RETURNING id, item_id, created_at
        "#,
    )
    .bind(user_id)
    .bind(&payload.item_id)
    .bind(chrono::Utc::now())
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(member)))
}
