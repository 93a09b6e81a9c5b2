//! # Pixelgate
//!
//! On-demand image resize middleware for HTTP servers.
//!
//! Pixelgate intercepts requests for image assets, parses a requested
//! `<width>x<height>` dimension segment out of the URL path, and either
//! resizes the source image to that resolution (bicubic) or copies it
//! unchanged into a public directory, then redirects the client to the
//! now-materialized file. Pair it with any static file service: the first
//! request for `/trains/128x0/test.jpg` materializes
//! `public/trains/128x0/test.jpg` from `src/trains/test.jpg` and 302s back;
//! every later request is a plain static hit.
//!
//! ## Architecture
//!
//! - [`path`] - Dimension segment parsing
//! - [`resize`] - Allow-list validation and the resize/copy executor
//! - [`media`] - Delegated image-processing and filesystem capabilities
//! - [`middleware`] - Builder and framework-agnostic request handler
//! - [`server`] - Axum adapter and router
//! - [`config`] - CLI configuration for the bundled binary
//!
//! ## Example
//!
//! ```no_run
//! use http::Uri;
//! use pixelgate::{create_router, MiddlewareBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let middleware = MiddlewareBuilder::<Uri>::new("./images", "./public")
//!         .allowed_extensions(vec!["jpg".into(), "png".into()])?
//!         .allowed_resolutions(vec![-1, 128, 256, 1024])?
//!         .request_path(|uri: &Uri| Some(uri.path().to_string()))
//!         .build()?;
//!
//!     let router = create_router(middleware, true);
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, router).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod media;
pub mod middleware;
pub mod path;
pub mod resize;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use error::{BuildError, ResizeError};
pub use media::{BicubicProcessor, FileStore, ImageProcessor, LocalStore};
pub use middleware::{
    ErrorBody, FallbackHook, MiddlewareBuilder, MiddlewareResponse, PathAccessor, ResizeMiddleware,
};
pub use path::{parse_request_path, strip_leading_slashes, Dimension, ParsedPath, AUTO_RESOLUTION};
pub use resize::{
    ResizeOutcome, ResizeRequest, ResizeService, DEFAULT_ALLOWED_EXTENSIONS,
    DEFAULT_ALLOWED_RESOLUTIONS,
};
pub use server::{create_router, AppState, HealthResponse, ServerMiddleware};
