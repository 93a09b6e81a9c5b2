//! HTTP request handlers for the bundled server.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - any other path - Static asset, materialized on miss by the resize
//!   handler

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, Uri};
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use tracing::debug;

use crate::media::{BicubicProcessor, LocalStore};
use crate::middleware::{MiddlewareResponse, ResizeMiddleware};

/// The middleware instantiation the bundled server uses: requests are
/// represented by their [`Uri`].
pub type ServerMiddleware = ResizeMiddleware<Uri, BicubicProcessor, LocalStore>;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state, passed to handlers via axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    /// The built resize middleware
    pub middleware: Arc<ServerMiddleware>,
}

impl AppState {
    pub fn new(middleware: ServerMiddleware) -> Self {
        Self {
            middleware: Arc::new(middleware),
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

impl IntoResponse for MiddlewareResponse {
    fn into_response(self) -> Response {
        let MiddlewareResponse {
            status,
            location,
            body,
        } = self;

        if let Some(location) = location {
            return (status, [(header::LOCATION, location)]).into_response();
        }

        match body {
            Some(body) => (
                status,
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response(),
            None => status.into_response(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Materialize the requested asset and redirect to it.
///
/// Mounted as the static file service's miss fallback: by the time this runs
/// the file does not exist under the public root yet. On success the client
/// is redirected back to the original path, which the static service then
/// serves.
pub async fn resize_handler(State(state): State<AppState>, uri: Uri) -> Response {
    debug!(path = uri.path(), "Static miss; running resize middleware");
    state.middleware.handle(&uri).await.into_response()
}

/// Health check endpoint.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
