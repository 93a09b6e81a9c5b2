//! Router configuration for the bundled server.
//!
//! # Route Structure
//!
//! ```text
//! /health     - Health check (JSON)
//! /*          - Static asset from the public root; on miss, the resize
//!               middleware materializes the file and 302s back to the path
//! ```

use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{health_handler, resize_handler, AppState, ServerMiddleware};

/// Build the application router.
///
/// The public root is taken from the middleware itself, so the static
/// service and the materializer always agree on where files land.
pub fn create_router(middleware: ServerMiddleware, enable_tracing: bool) -> Router {
    let public_root = middleware.public_root().to_path_buf();
    let state = AppState::new(middleware);

    let materializer = Router::new()
        .fallback(resize_handler)
        .with_state(state);

    // ServeDir::fallback preserves the inner response status, so the 302
    // from the materializer reaches the client intact.
    let assets = ServeDir::new(public_root).fallback(materializer);

    let router = Router::new()
        .route("/health", get(health_handler))
        .fallback_service(assets);

    if enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}
