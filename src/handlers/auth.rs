// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use sqlx::SqlitePool;

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginRequest, RegisterRequest, User},
    utils::{
        hash::{hash_password, verify_password},
        jwt::sign_jwt,
    },
    validation::{
        validate_login, validate_registration, MSG_EMAIL_TAKEN, MSG_LOGIN_FAILED,
        MSG_USERNAME_TAKEN,
    },
};

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it.
/// Returns 201 Created and the user object (excluding password).
pub async fn register(
    State(pool): State<SqlitePool>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let errors = validate_registration(&payload);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // Field checks passed; uniqueness runs after them so the taken-name
    // message never masks a malformed input.
    let username_taken = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE username = ?")
        .bind(&payload.username)
        .fetch_optional(&pool)
        .await?;
    if username_taken.is_some() {
        return Err(AppError::Conflict(MSG_USERNAME_TAKEN.to_string()));
    }

    let email_taken = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE email = ?")
        .bind(&payload.email)
        .fetch_optional(&pool)
        .await?;
    if email_taken.is_some() {
        return Err(AppError::Conflict(MSG_EMAIL_TAKEN.to_string()));
    }

    let hashed_password = hash_password(&payload.password)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, email, password, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, username, email, password, pfp, pfp_content_type, created_at
        "#,
    )
    .bind(&payload.username)
    .bind(&payload.email)
    .bind(&hashed_password)
    .bind(chrono::Utc::now())
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        // Two concurrent registrations can both pass the SELECT above; the
        // unique index is the backstop.
        let msg = e.to_string();
        if msg.contains("UNIQUE constraint failed: users.username") {
            AppError::Conflict(MSG_USERNAME_TAKEN.to_string())
        } else if msg.contains("UNIQUE constraint failed: users.email") {
            AppError::Conflict(MSG_EMAIL_TAKEN.to_string())
        } else {
            tracing::error!("Failed to register user: {:?}", e);
            AppError::from(e)
        }
    })?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Authenticates a user and returns a JWT token.
///
/// Unknown username and wrong password produce the same generic message, so
/// the response never confirms whether an account exists.
pub async fn login(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let errors = validate_login(&payload);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password, pfp, pfp_content_type, created_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(&payload.username)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Login DB error: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let user = user.ok_or_else(|| AppError::AuthError(MSG_LOGIN_FAILED.to_string()))?;

    let is_valid = verify_password(&payload.password, &user.password)?;

    if !is_valid {
        return Err(AppError::AuthError(MSG_LOGIN_FAILED.to_string()));
    }

    let token = sign_jwt(
        user.id,
        &user.username,
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
        "username": user.username
    })))
}

/// Ends a session. Tokens are stateless, so there is nothing to revoke
/// server-side; the endpoint exists for surface parity and is idempotent.
pub async fn logout() -> impl IntoResponse {
    Json(json!({ "message": "Logged out" }))
}
