//! HTTP routes for the channel endpoint.

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::handlers::{health, post_activity, BotHandlers};

/// Creates the bot router.
pub fn bot_routes(handlers: BotHandlers) -> Router {
    Router::new()
        .route("/api/messages", post(post_activity))
        .route("/health", get(health))
        .with_state(handlers)
}

/// Bot router wrapped with request tracing and a per-request timeout.
pub fn app_router(handlers: BotHandlers, request_timeout: Duration) -> Router {
    bot_routes(handlers).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(request_timeout)),
    )
}
