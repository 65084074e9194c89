//! API module
//!
//! HTTP handlers for the chat widget, the stateless matcher and the
//! credential settings, plus the router that ties them together.

pub mod credentials;
pub mod health;
pub mod respond;
pub mod utils;
pub mod widget;

use crate::state::SharedState;
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use std::time::Instant;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Request ID middleware - adds unique ID to each request for tracing
async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    let response = next.run(request).instrument(span).await;

    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status().as_u16(),
        duration_ms = start.elapsed().as_millis(),
        "Request completed"
    );

    response
}

/// Build the application router
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        // Health check and hello world
        .route("/", get(health::hello_world))
        .route("/api/health", get(health::health_check))
        // Stateless matcher
        .route("/api/match", post(respond::match_text))
        // Chat widget lifecycle
        .route("/api/widget", post(widget::open_widget))
        .route(
            "/api/widget/:id",
            get(widget::get_widget).delete(widget::close_widget),
        )
        .route("/api/widget/:id/messages", post(widget::send_message))
        // Optional API key
        .route(
            "/api/credentials",
            get(credentials::get_credentials)
                .put(credentials::put_credentials)
                .delete(credentials::delete_credentials),
        )
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive()) // Allow CORS for the website front end
        .with_state(state)
}
