//! Route table and middleware stack.
//!
//! Returns a composable `Router` so tests can drive it in-process with
//! `tower::ServiceExt::oneshot` without binding a socket.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::api::endpoints;
use crate::state::AppState;

/// Build the service router: liveness, chat, and prediction routes
/// behind permissive CORS (the browser frontend calls cross-origin).
pub fn api_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", get(endpoints::health::liveness))
        .route("/chat", post(endpoints::chat::chat))
        .route("/predict", post(endpoints::predict::predict))
        .with_state(state)
        .layer(trace_layer)
        .layer(cors)
}
