// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Unique display name, 1-40 characters.
    pub username: String,

    /// Unique, syntactically valid email address.
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    /// Profile picture bytes. Absent until the first upload; later uploads
    /// replace it in place.
    #[serde(skip)]
    pub pfp: Option<Vec<u8>>,

    #[serde(skip)]
    pub pfp_content_type: Option<String>,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for registration. `confirm_password` must equal `password`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// DTO for user login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// DTO for a username change on the account page.
#[derive(Debug, Deserialize)]
pub struct UpdateUsernameRequest {
    pub username: String,
}

/// Aggregated account data for the current user.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub has_picture: bool,
    pub team: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Public profile for `/api/users/{username}`.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub has_picture: bool,
    pub reviews: Vec<crate::models::review::ReviewResponse>,
    pub team: Vec<String>,
}
