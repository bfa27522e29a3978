// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{quiz, topics},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges the topic and quiz sub-routers.
/// * Serves static assets under `/static`.
/// * Applies global middleware (Trace, CORS).
/// * Mounts everything under `ROOT_PATH` when one is configured.
pub fn create_router(state: AppState) -> Router {
    let root_path = state.config.root_path.trim_matches('/').to_string();

    let origins = [
        HeaderValue::from_static("http://localhost:8000"),
        HeaderValue::from_static("http://127.0.0.1:8000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true);

    let quiz_routes = Router::new()
        .route("/start", post(quiz::start_quiz))
        .route("/{index}", get(quiz::get_question))
        .route("/{index}/answer", post(quiz::submit_answer));

    let app = Router::new()
        .route("/api/topics", get(topics::list_topics))
        .route("/api/result", get(quiz::get_result))
        .route("/api/reset", post(quiz::reset_session))
        .nest("/api/quiz", quiz_routes)
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state);

    if root_path.is_empty() {
        app
    } else {
        Router::new().nest(&format!("/{}", root_path), app)
    }
}
