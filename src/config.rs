// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// JWT lifetime in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub port: u16,
    pub omdb_base_url: String,
    pub omdb_api_key: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86400);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        let omdb_base_url =
            env::var("OMDB_BASE_URL").unwrap_or_else(|_| "https://www.omdbapi.com/".to_string());

        let omdb_api_key = env::var("OMDB_API_KEY").expect("OMDB_API_KEY must be set");

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            port,
            omdb_base_url,
            omdb_api_key,
        }
    }
}
