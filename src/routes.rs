// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    handlers::{self, quiz, topic},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Taxonomy routes (`/topics`, `/topics/{topic_id}/subtopics`).
/// * Quiz routes (`/questions`, `/stats`, `/submit`).
/// * Global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/topics", get(topic::list_topics))
        .route("/topics/{topic_id}/subtopics", get(topic::list_subtopics))
        .route("/questions", get(quiz::list_questions))
        .route("/stats", get(quiz::get_stats))
        .route("/submit", post(quiz::submit_answer))
        .fallback(handlers::fallback)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
