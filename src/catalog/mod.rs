// src/catalog/mod.rs

pub mod omdb;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed lookup failures. `Upstream` is a transport or decode problem and is
/// kept distinct from `NotFound` so the caller can surface a 502 instead of
/// pretending the title does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    NotFound,
    TooManyResults,
    InvalidId,
    Upstream(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::NotFound => write!(f, "movie not found"),
            CatalogError::TooManyResults => write!(f, "too many results"),
            CatalogError::InvalidId => write!(f, "incorrect IMDb id"),
            CatalogError::Upstream(msg) => write!(f, "catalog upstream error: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

/// One row of a search result list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieSummary {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster: Option<String>,
}

/// Full record for a detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub poster: Option<String>,
}

/// External catalog lookups. Object-safe so the router state can hold a fake
/// implementation in tests.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, CatalogError>;
    async fn lookup(&self, id: &str) -> Result<Movie, CatalogError>;
}
