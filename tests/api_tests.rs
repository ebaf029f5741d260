// tests/api_tests.rs

use std::sync::Arc;

use filmlog::catalog::{CatalogClient, CatalogError, Movie, MovieSummary};
use filmlog::{config::Config, routes, state::AppState};
use sqlx::sqlite::SqlitePoolOptions;

/// Catalog stub with one known title, so no network is needed.
struct FakeCatalog;

#[async_trait::async_trait]
impl CatalogClient for FakeCatalog {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, CatalogError> {
        if query.to_lowercase().contains("guardians") {
            Ok(vec![MovieSummary {
                imdb_id: "tt2015381".to_string(),
                title: "Guardians of the Galaxy".to_string(),
                year: "2014".to_string(),
                poster: None,
            }])
        } else {
            Err(CatalogError::NotFound)
        }
    }

    async fn lookup(&self, id: &str) -> Result<Movie, CatalogError> {
        if id == "tt2015381" {
            Ok(Movie {
                imdb_id: "tt2015381".to_string(),
                title: "Guardians of the Galaxy".to_string(),
                year: "2014".to_string(),
                genre: None,
                director: None,
                actors: None,
                plot: None,
                poster: None,
            })
        } else {
            Err(CatalogError::NotFound)
        }
    }
}

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    // One connection keeps the in-memory database alive for the whole test.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600, // 10 minutes for tests
        rust_log: "error".to_string(),
        port: 0,
        omdb_base_url: "http://127.0.0.1:9/".to_string(),
        omdb_api_key: "unused".to_string(),
    };

    let state = AppState {
        pool,
        config,
        catalog: Arc::new(FakeCatalog),
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

fn register_body(username: &str, email: &str, password: &str, confirm: &str) -> serde_json::Value {
    serde_json::json!({
        "username": username,
        "email": email,
        "password": password,
        "confirm_password": confirm
    })
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn register_works_and_user_is_retrievable() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let unique_name = format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8]);

    // Act
    let response = client
        .post(&format!("{}/api/auth/register", address))
        .json(&register_body(
            &unique_name,
            &format!("{}@email.com", unique_name),
            "password123",
            "password123",
        ))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let created: serde_json::Value = response.json().await.unwrap();
    assert_eq!(created["username"], unique_name.as_str());
    // The hash must never leak
    assert!(created.get("password").is_none());

    // A lookup by that username returns a matching record
    let profile: serde_json::Value = client
        .get(&format!("{}/api/users/{}", address, unique_name))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(profile["username"], unique_name.as_str());
}

#[tokio::test]
async fn register_fails_validation() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let cases = [
        (
            register_body("", "test@email.com", "test", "test"),
            400,
            "This field is required",
        ),
        (
            register_body(&"p".repeat(41), "test@email.com", "test", "test"),
            400,
            "Field must be between 1 and 40 characters long",
        ),
        (
            register_body("username", "test", "test", "test"),
            400,
            "Invalid email address.",
        ),
        (
            register_body("username", "test@email.com", "test", "test2"),
            400,
            "Field must be equal to password.",
        ),
    ];

    for (body, expected_status, expected_message) in cases {
        let response = client
            .post(&format!("{}/api/auth/register", address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status().as_u16(), expected_status);
        let json: serde_json::Value = response.json().await.unwrap();
        assert_eq!(json["error"], expected_message);
    }
}

#[tokio::test]
async fn register_duplicate_username_is_taken() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let first = client
        .post(&format!("{}/api/auth/register", address))
        .json(&register_body("test", "test@email.com", "test", "test"))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status().as_u16(), 201);

    // Act: same username, different email
    let second = client
        .post(&format!("{}/api/auth/register", address))
        .json(&register_body("test", "other@email.com", "test", "test"))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(second.status().as_u16(), 409);
    let json: serde_json::Value = second.json().await.unwrap();
    assert_eq!(json["error"], "Username is taken");
}

#[tokio::test]
async fn register_duplicate_email_is_taken() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    client
        .post(&format!("{}/api/auth/register", address))
        .json(&register_body("first", "test@email.com", "test", "test"))
        .send()
        .await
        .unwrap();

    let second = client
        .post(&format!("{}/api/auth/register", address))
        .json(&register_body("second", "test@email.com", "test", "test"))
        .send()
        .await
        .unwrap();

    assert_eq!(second.status().as_u16(), 409);
    let json: serde_json::Value = second.json().await.unwrap();
    assert_eq!(json["error"], "Email is taken");
}

#[tokio::test]
async fn login_works() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    client
        .post(&format!("{}/api/auth/register", address))
        .json(&register_body("test", "test@email.com", "test", "test"))
        .send()
        .await
        .unwrap();

    // Act
    let response = client
        .post(&format!("{}/api/auth/login", address))
        .json(&serde_json::json!({ "username": "test", "password": "test" }))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let json: serde_json::Value = response.json().await.unwrap();
    assert!(json["token"].as_str().is_some());
    assert_eq!(json["username"], "test");

    // The token identifies the registered user
    let token = json["token"].as_str().unwrap();
    let me: serde_json::Value = client
        .get(&format!("{}/api/account", address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["username"], "test");
}

#[tokio::test]
async fn login_failure_is_generic() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    client
        .post(&format!("{}/api/auth/register", address))
        .json(&register_body("test", "test@email.com", "test", "test"))
        .send()
        .await
        .unwrap();

    // Act: wrong username, then wrong password
    let mut messages = Vec::new();
    for (username, password) in [("yuh", "test"), ("test", "yuh")] {
        let response = client
            .post(&format!("{}/api/auth/login", address))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 401);
        let json: serde_json::Value = response.json().await.unwrap();
        messages.push(json["error"].as_str().unwrap().to_string());
    }

    // Assert: the two failure shapes are indistinguishable
    assert_eq!(messages[0], "Login failed. Check your username and/or password");
    assert_eq!(messages[0], messages[1]);
}

#[tokio::test]
async fn login_empty_fields_are_required() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    for body in [
        serde_json::json!({ "username": "", "password": "test" }),
        serde_json::json!({ "username": "test", "password": "" }),
    ] {
        let response = client
            .post(&format!("{}/api/auth/login", address))
            .json(&body)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400);
        let json: serde_json::Value = response.json().await.unwrap();
        assert_eq!(json["error"], "This field is required");
    }
}

#[tokio::test]
async fn logout_is_idempotent() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act: logging out without ever logging in must not error, twice
    for _ in 0..2 {
        let response = client
            .post(&format!("{}/api/auth/logout", address))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200);
    }
}
