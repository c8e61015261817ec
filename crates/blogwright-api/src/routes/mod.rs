mod agents;
mod health;
mod pipeline;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .nest("/api/agents", agents::agents_router())
        .route("/api/pipeline", post(pipeline::run_pipeline))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
