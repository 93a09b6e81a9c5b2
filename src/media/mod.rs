//! Delegated image-processing and filesystem capabilities.
//!
//! The resize pipeline never touches codecs or the filesystem directly; it
//! goes through the [`ImageProcessor`] and [`FileStore`] traits. Production
//! uses [`BicubicProcessor`] (backed by the `image` crate) and [`LocalStore`]
//! (backed by `tokio::fs`); tests substitute counting mocks to assert that
//! validation failures never reach I/O.

mod processor;
mod store;

pub use processor::{BicubicProcessor, ImageProcessor};
pub use store::{FileStore, LocalStore};
