//! Builder for [`ResizeMiddleware`].
//!
//! The builder accumulates optional settings via fluent setters and produces
//! the immutable handler with [`build`](MiddlewareBuilder::build). Setters
//! whose argument can be malformed fail synchronously with a [`BuildError`];
//! the closure-shaped settings are checked by the type system instead.

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::BuildError;
use crate::media::{BicubicProcessor, FileStore, ImageProcessor, LocalStore};
use crate::resize::{
    ResizeService, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_ALLOWED_RESOLUTIONS,
};

use super::{FallbackHook, MiddlewareResponse, PathAccessor, ResizeMiddleware};

/// Accumulates configuration for a [`ResizeMiddleware`].
///
/// Generic over the host framework's request type `R` and over the delegated
/// capabilities, which default to the production implementations.
///
/// # Example
///
/// ```no_run
/// use http::Uri;
/// use pixelgate::MiddlewareBuilder;
///
/// # fn main() -> Result<(), pixelgate::BuildError> {
/// let middleware = MiddlewareBuilder::<Uri>::new("./src-images", "./public")
///     .allowed_extensions(vec!["jpg".into()])?
///     .allowed_resolutions(vec![-1, 128, 256])?
///     .request_path(|uri: &Uri| Some(uri.path().to_string()))
///     .build()?;
/// # let _ = middleware;
/// # Ok(())
/// # }
/// ```
pub struct MiddlewareBuilder<R, P: ImageProcessor = BicubicProcessor, S: FileStore = LocalStore> {
    source_root: PathBuf,
    public_root: PathBuf,
    allowed_extensions: Option<Vec<String>>,
    allowed_resolutions: Option<Vec<i32>>,
    accessor: Option<PathAccessor<R>>,
    fallback: FallbackHook<R>,
    processor: P,
    store: S,
}

impl<R, P: ImageProcessor, S: FileStore> std::fmt::Debug for MiddlewareBuilder<R, P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiddlewareBuilder")
            .field("source_root", &self.source_root)
            .field("public_root", &self.public_root)
            .field("allowed_extensions", &self.allowed_extensions)
            .field("allowed_resolutions", &self.allowed_resolutions)
            .finish_non_exhaustive()
    }
}

impl<R> MiddlewareBuilder<R> {
    /// Start a builder for the given source and public roots, using the
    /// production image processor and file store.
    pub fn new(source_root: impl Into<PathBuf>, public_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            public_root: public_root.into(),
            allowed_extensions: None,
            allowed_resolutions: None,
            accessor: None,
            fallback: Arc::new(|_, _| {}),
            processor: BicubicProcessor::new(),
            store: LocalStore::new(),
        }
    }
}

impl<R, P: ImageProcessor, S: FileStore> MiddlewareBuilder<R, P, S> {
    /// Replace the allowed extension set.
    ///
    /// # Errors
    ///
    /// Fails with [`BuildError::EmptyExtensions`] for an empty list.
    pub fn allowed_extensions(mut self, extensions: Vec<String>) -> Result<Self, BuildError> {
        if extensions.is_empty() {
            return Err(BuildError::EmptyExtensions);
        }
        self.allowed_extensions = Some(extensions);
        Ok(self)
    }

    /// Replace the allowed resolution set.
    ///
    /// Include `-1` to permit auto axes.
    ///
    /// # Errors
    ///
    /// Fails with [`BuildError::EmptyResolutions`] for an empty list.
    pub fn allowed_resolutions(mut self, resolutions: Vec<i32>) -> Result<Self, BuildError> {
        if resolutions.is_empty() {
            return Err(BuildError::EmptyResolutions);
        }
        self.allowed_resolutions = Some(resolutions);
        Ok(self)
    }

    /// Set the closure extracting the requested URL path from the host
    /// request. Required before [`build`](Self::build).
    pub fn request_path<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&R) -> Option<String> + Send + Sync + 'static,
    {
        self.accessor = Some(Arc::new(accessor));
        self
    }

    /// Set the hook invoked after every handled request (default: no-op).
    pub fn fallback<F>(mut self, hook: F) -> Self
    where
        F: Fn(&R, &MiddlewareResponse) + Send + Sync + 'static,
    {
        self.fallback = Arc::new(hook);
        self
    }

    /// Swap in alternative capability implementations. Used by tests to
    /// observe (or forbid) delegated I/O.
    pub fn backend<P2, S2>(self, processor: P2, store: S2) -> MiddlewareBuilder<R, P2, S2>
    where
        P2: ImageProcessor,
        S2: FileStore,
    {
        MiddlewareBuilder {
            source_root: self.source_root,
            public_root: self.public_root,
            allowed_extensions: self.allowed_extensions,
            allowed_resolutions: self.allowed_resolutions,
            accessor: self.accessor,
            fallback: self.fallback,
            processor,
            store,
        }
    }

    /// Produce the immutable handler.
    ///
    /// # Errors
    ///
    /// Fails with [`BuildError::NoRequestPath`] when no request-path
    /// accessor was configured.
    pub fn build(self) -> Result<ResizeMiddleware<R, P, S>, BuildError> {
        let accessor = self.accessor.ok_or(BuildError::NoRequestPath)?;

        let extensions = self.allowed_extensions.unwrap_or_else(|| {
            DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect()
        });
        let resolutions = self
            .allowed_resolutions
            .unwrap_or_else(|| DEFAULT_ALLOWED_RESOLUTIONS.to_vec());
        let service =
            ResizeService::with_allow_lists(self.processor, self.store, extensions, resolutions);

        Ok(ResizeMiddleware::new(
            self.source_root,
            self.public_root,
            service,
            accessor,
            self.fallback,
        ))
    }
}

// =============================================================================
// Tests
// =============================================================================
