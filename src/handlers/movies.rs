// src/handlers/movies.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::review::{CreateReviewRequest, MovieDetailResponse, ReviewResponse},
    state::DynCatalog,
    utils::jwt::Claims,
    validation::validate_review_content,
};

/// Search the external catalog by free-text query.
pub async fn search(
    State(catalog): State<DynCatalog>,
    Path(query): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let results = catalog.search(&query).await?;

    Ok(Json(results))
}

/// Detail page data: the live catalog record plus all stored reviews for it,
/// each annotated with the author's current username.
pub async fn movie_detail(
    State(pool): State<SqlitePool>,
    State(catalog): State<DynCatalog>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let movie = catalog.lookup(&id).await?;

    let reviews = sqlx::query_as::<_, ReviewResponse>(
        r#"
        SELECT
            r.id, r.item_id, r.title, r.content,
            u.username,
            (u.pfp IS NOT NULL) AS has_picture,
            r.created_at
        FROM reviews r
        JOIN users u ON r.user_id = u.id
        WHERE r.item_id = ?
        ORDER BY r.id ASC
        "#,
    )
    .bind(&id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(MovieDetailResponse { movie, reviews }))
}

/// Submit a review for a catalog entry.
///
/// The target id must resolve via the catalog; its display title is captured
/// into the review row at write time. Reviews are immutable once created.
pub async fn create_review(
    State(pool): State<SqlitePool>,
    State(catalog): State<DynCatalog>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse, AppError> {
    let errors = validate_review_content(&payload.content);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let movie = catalog.lookup(&id).await?;

    let user_id = claims.sub.parse::<i64>().unwrap_or(0);

    let review_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO reviews (user_id, item_id, title, content, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(&movie.imdb_id)
    .bind(&movie.title)
    .bind(&payload.content)
    .bind(chrono::Utc::now())
    .fetch_one(&pool)
    .await?;

    let review = sqlx::query_as::<_, ReviewResponse>(
        r#"
        SELECT
            r.id, r.item_id, r.title, r.content,
            u.username,
            (u.pfp IS NOT NULL) AS has_picture,
            r.created_at
        FROM reviews r
        JOIN users u ON r.user_id = u.id
        WHERE r.id = ?
        "#,
    )
    .bind(review_id)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(review)))
}
