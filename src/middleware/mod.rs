//! Framework-agnostic request handler.
//!
//! [`ResizeMiddleware`] is the artifact produced by [`MiddlewareBuilder`]: a
//! handler that, per request, extracts the requested path, materializes the
//! asset under the public root, and describes the response to send — a 302
//! redirect back to the requested path on success, or a 500 with a JSON
//! error body on failure. The host framework adapts [`MiddlewareResponse`]
//! to its own response type; the bundled axum adapter lives in
//! [`crate::server`].
//!
//! The middleware is generic over the host framework's request type `R`. The
//! caller supplies an accessor closure extracting the requested URL path
//! from `R`, which replaces the original design's dotted-string reflection
//! into the request object.

mod builder;

use std::path::PathBuf;
use std::sync::Arc;

use http::StatusCode;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ResizeError;
use crate::media::{FileStore, ImageProcessor};
use crate::path::{parse_request_path, strip_leading_slashes};
use crate::resize::{ResizeOutcome, ResizeRequest, ResizeService};

pub use builder::MiddlewareBuilder;

/// Closure extracting the requested URL path from the host request.
///
/// Returning `None` means the request carries no usable path and is reported
/// as a per-request error, not a panic.
pub type PathAccessor<R> = Arc<dyn Fn(&R) -> Option<String> + Send + Sync>;

/// Hook invoked after every handled request, successful or not, with the
/// request and the response that was produced. Lets the adapting framework
/// continue its own middleware chain.
pub type FallbackHook<R> = Arc<dyn Fn(&R, &MiddlewareResponse) + Send + Sync>;

// =============================================================================
// Middleware Response
// =============================================================================

/// JSON body of the 500 response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable error code (e.g. "UNSUPPORTED_EXTENSION")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

/// Framework-neutral description of the response to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiddlewareResponse {
    /// HTTP status code (302 on success, 500 on failure)
    pub status: StatusCode,

    /// `Location` header value for redirects
    pub location: Option<String>,

    /// Serialized JSON error body for failures
    pub body: Option<String>,
}

impl MiddlewareResponse {
    /// A 302 redirect to the given location.
    pub fn redirect(location: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FOUND,
            location: Some(location.into()),
            body: None,
        }
    }

    /// A 500 response carrying the serialized error.
    pub fn internal_error(error: &ResizeError) -> Self {
        let body = ErrorBody {
            error: error.code().to_string(),
            message: error.to_string(),
        };
        let body = serde_json::to_string(&body)
            .unwrap_or_else(|_| format!(r#"{{"error":"{}"}}"#, error.code()));
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            location: None,
            body: Some(body),
        }
    }

    /// Whether this response is the success redirect.
    pub fn is_redirect(&self) -> bool {
        self.status == StatusCode::FOUND
    }
}

// =============================================================================
// Resize Middleware
// =============================================================================

/// Request handler produced by [`MiddlewareBuilder::build`].
///
/// Immutable once built; share it across requests behind an `Arc`.
pub struct ResizeMiddleware<R, P: ImageProcessor, S: FileStore> {
    source_root: PathBuf,
    public_root: PathBuf,
    service: ResizeService<P, S>,
    accessor: PathAccessor<R>,
    fallback: FallbackHook<R>,
}

impl<R, P: ImageProcessor, S: FileStore> std::fmt::Debug for ResizeMiddleware<R, P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeMiddleware")
            .field("source_root", &self.source_root)
            .field("public_root", &self.public_root)
            .finish_non_exhaustive()
    }
}

impl<R, P: ImageProcessor, S: FileStore> ResizeMiddleware<R, P, S> {
    pub(crate) fn new(
        source_root: PathBuf,
        public_root: PathBuf,
        service: ResizeService<P, S>,
        accessor: PathAccessor<R>,
        fallback: FallbackHook<R>,
    ) -> Self {
        Self {
            source_root,
            public_root,
            service,
            accessor,
            fallback,
        }
    }

    /// Handle one request.
    ///
    /// Never panics the host: every failure is converted into a 500
    /// description. The configured fallback hook runs after the response is
    /// decided, in both the success and the failure case.
    pub async fn handle(&self, request: &R) -> MiddlewareResponse {
        let response = match self.materialize(request).await {
            Ok(location) => MiddlewareResponse::redirect(location),
            Err(e) => {
                warn!(code = e.code(), "Materialization failed: {}", e);
                MiddlewareResponse::internal_error(&e)
            }
        };

        (self.fallback)(request, &response);
        response
    }

    /// Run the pipeline and return the redirect location on success.
    async fn materialize(&self, request: &R) -> Result<String, ResizeError> {
        let original = (self.accessor)(request).ok_or_else(|| {
            ResizeError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "request path accessor returned no path",
            ))
        })?;

        let query = strip_leading_slashes(&original);
        let destination = self.public_root.join(query);
        let parsed = parse_request_path(query);
        let source = self.source_root.join(&parsed.source_path);

        let resize = ResizeRequest::new(parsed.width, parsed.height, source, destination);
        let outcome = self.service.run(&resize).await?;

        match outcome {
            ResizeOutcome::Resized { width, height } => {
                debug!(path = %original, width, height, "Materialized resized asset");
            }
            ResizeOutcome::Copied => {
                debug!(path = %original, "Materialized verbatim copy");
            }
        }

        Ok(original)
    }

    /// Root directory source images are read from.
    pub fn source_root(&self) -> &std::path::Path {
        &self.source_root
    }

    /// Root directory materialized assets are written to.
    pub fn public_root(&self) -> &std::path::Path {
        &self.public_root
    }
}

// =============================================================================
// Tests
// =============================================================================
