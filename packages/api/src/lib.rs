// ABOUTME: HTTP API layer for the knowledge base providing REST endpoints and routing
// ABOUTME: Maps HTTP requests onto the use-case handlers and errors onto status codes

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};
use kb_storage::QuestionStore;
use kb_usecases::UseCaseHandlers;
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod error;
pub mod health;
pub mod questions_handlers;
pub mod response;

pub use error::{ApiError, ApiResult};
pub use response::ApiResponse;

/// Shared state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub use_cases: UseCaseHandlers,
}

impl ApiState {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self {
            use_cases: UseCaseHandlers::new(store),
        }
    }
}

/// Creates the questions API router
pub fn create_questions_router() -> Router<ApiState> {
    Router::new()
        .route("/questions", post(questions_handlers::add_question))
        .route("/questions/{id}", get(questions_handlers::get_question))
        .route(
            "/questions/byLinkedTags/{tag}",
            get(questions_handlers::get_questions_by_linked_tag),
        )
        .route(
            "/questions/{id}/linkTag",
            patch(questions_handlers::link_tags_to_question),
        )
        .route(
            "/questions/{id}/withdrawTags",
            patch(questions_handlers::withdraw_tags_from_question),
        )
}

/// Creates the full application router with request tracing
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .merge(create_questions_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
