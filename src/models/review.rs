// src/models/review.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::catalog::Movie;

/// Represents the 'reviews' table in the database.
/// Rows are immutable once written; there is no edit or delete path.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub user_id: i64,

    /// Identifier of the reviewed catalog entry (IMDb id).
    pub item_id: String,

    /// Display title captured from the catalog at write time.
    pub title: String,

    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for creating a new review.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub content: String,
}

/// DTO for displaying a review with author info.
#[derive(Debug, Serialize, FromRow)]
pub struct ReviewResponse {
    pub id: i64,
    pub item_id: String,
    pub title: String,
    pub content: String,
    pub username: String,
    pub has_picture: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Detail page payload: the live catalog record plus stored reviews.
#[derive(Debug, Serialize)]
pub struct MovieDetailResponse {
    pub movie: Movie,
    pub reviews: Vec<ReviewResponse>,
}
