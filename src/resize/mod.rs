//! Resize/copy execution layer.
//!
//! [`ResizeRequest`] carries the resolved parameters of one request;
//! [`ResizeService`] validates them against the configured allow-lists and
//! then either resizes the source image or copies it unchanged to the
//! destination.

mod request;
mod service;

pub use request::{
    validate, ResizeRequest, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_ALLOWED_RESOLUTIONS,
};
pub use service::{ResizeOutcome, ResizeService};
