// src/routes.rs

use axum::{
    http::Method,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{account, auth, movies, teams, users},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, account, movies, users, teams).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (database pool, config, catalog client).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout));

    let account_routes = Router::new()
        .route("/", get(account::get_account))
        .route("/username", put(account::update_username))
        .route("/picture", put(account::update_picture))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let movie_routes = Router::new()
        .route("/search/{query}", get(movies::search))
        .route("/{id}", get(movies::movie_detail))
        // Protected: only authenticated users may review
        .merge(
            Router::new()
                .route("/{id}/reviews", post(movies::create_review))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    let user_routes = Router::new()
        .route("/{username}", get(users::user_detail))
        .route("/{username}/picture", get(users::user_picture));

    let team_routes = Router::new()
        .route("/{username}", get(teams::get_team))
        .merge(
            Router::new()
                .route("/", post(teams::add_member))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/account", account_routes)
        .nest("/api/movies", movie_routes)
        .nest("/api/users", user_routes)
        .nest("/api/teams", team_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
