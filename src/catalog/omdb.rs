// src/catalog/omdb.rs

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::{CatalogClient, CatalogError, Movie, MovieSummary};

/// OMDb API client. All requests are plain GETs against one endpoint with an
/// api key; the API signals failure inside a 200 body via `"Response":"False"`.
pub struct OmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| CatalogError::Upstream(e.to_string()))?
            .error_for_status()
            .map_err(|e| CatalogError::Upstream(e.to_string()))?;

        resp.json::<T>()
            .await
            .map_err(|e| CatalogError::Upstream(e.to_string()))
    }
}

/// Maps OMDb's error strings onto the typed variants.
fn map_api_error(message: &str) -> CatalogError {
    if message.contains("Movie not found") {
        CatalogError::NotFound
    } else if message.contains("Too many results") {
        CatalogError::TooManyResults
    } else if message.contains("Incorrect IMDb ID") {
        CatalogError::InvalidId
    } else {
        CatalogError::Upstream(message.to_string())
    }
}

#[derive(Deserialize)]
struct SearchEnvelope {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Search")]
    search: Option<Vec<WireSummary>>,
}

#[derive(Deserialize)]
struct WireSummary {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

#[derive(Deserialize)]
struct DetailEnvelope {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Actors")]
    actors: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
}

#[async_trait]
impl CatalogClient for OmdbClient {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, CatalogError> {
        let envelope: SearchEnvelope = self.get_json(&[("s", query)]).await?;

        if envelope.response != "True" {
            let message = envelope.error.unwrap_or_default();
            return Err(map_api_error(&message));
        }

        let results = envelope
            .search
            .unwrap_or_default()
            .into_iter()
            .map(|s| MovieSummary {
                imdb_id: s.imdb_id,
                title: s.title,
                year: s.year,
                poster: s.poster,
            })
            .collect();

        Ok(results)
    }

    async fn lookup(&self, id: &str) -> Result<Movie, CatalogError> {
        let envelope: DetailEnvelope = self.get_json(&[("i", id)]).await?;

        if envelope.response != "True" {
            let message = envelope.error.unwrap_or_default();
            return Err(map_api_error(&message));
        }

        Ok(Movie {
            imdb_id: envelope.imdb_id.unwrap_or_else(|| id.to_string()),
            title: envelope.title.unwrap_or_default(),
            year: envelope.year.unwrap_or_default(),
            genre: envelope.genre,
            director: envelope.director,
            actors: envelope.actors,
            plot: envelope.plot,
            poster: envelope.poster,
        })
    }
}
