//! Axum adapter for the resize middleware.
//!
//! Wires the framework-agnostic [`ResizeMiddleware`](crate::middleware) into
//! an axum [`Router`](axum::Router): static assets are served from the
//! public root, and any miss falls through to the resize handler, which
//! materializes the file and redirects the client back to the same path.

mod handlers;
mod routes;

pub use handlers::{health_handler, resize_handler, AppState, HealthResponse, ServerMiddleware};
pub use routes::create_router;
