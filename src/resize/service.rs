//! Resize/copy executor.
//!
//! One entry point, two terminal outcomes:
//!
//! ```text
//! run() ── validate ──┬── both axes auto ── copy ───────────── Copied
//!                     └── otherwise ─ read ─ resize ─ write ── Resized
//! ```
//!
//! Validation failures and delegated image/file failures propagate to the
//! caller; nothing is written on the failure path.

use tracing::debug;

use crate::error::ResizeError;
use crate::media::{FileStore, ImageProcessor};
use crate::path::Dimension;

use super::request::{
    validate, ResizeRequest, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_ALLOWED_RESOLUTIONS,
};

// =============================================================================
// Outcome
// =============================================================================

/// How a request was materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// The source was resampled to the given concrete dimensions.
    Resized { width: u32, height: u32 },

    /// Both axes were the auto sentinel; the source was copied unchanged.
    Copied,
}

// =============================================================================
// Resize Service
// =============================================================================

/// Executes resize/copy requests against the delegated capabilities.
///
/// Holds the allow-lists and the two collaborators. The service is immutable
/// and shared across requests; concurrent requests for the same destination
/// are not serialized — each one independently re-runs the pipeline and the
/// last write wins.
pub struct ResizeService<P: ImageProcessor, S: FileStore> {
    processor: P,
    store: S,
    allowed_extensions: Vec<String>,
    allowed_resolutions: Vec<i32>,
}

impl<P: ImageProcessor, S: FileStore> ResizeService<P, S> {
    /// Create a service with the default allow-lists.
    pub fn new(processor: P, store: S) -> Self {
        Self {
            processor,
            store,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            allowed_resolutions: DEFAULT_ALLOWED_RESOLUTIONS.to_vec(),
        }
    }

    /// Create a service with explicit allow-lists.
    pub fn with_allow_lists(
        processor: P,
        store: S,
        allowed_extensions: Vec<String>,
        allowed_resolutions: Vec<i32>,
    ) -> Self {
        Self {
            processor,
            store,
            allowed_extensions,
            allowed_resolutions,
        }
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn allowed_resolutions(&self) -> &[i32] {
        &self.allowed_resolutions
    }

    /// Run the full pipeline for one request.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the source cannot be read or
    /// decoded, a concrete target axis is zero, or the destination cannot be
    /// written.
    pub async fn run(&self, request: &ResizeRequest) -> Result<ResizeOutcome, ResizeError> {
        validate(request, &self.allowed_extensions, &self.allowed_resolutions)?;

        if request.width.is_auto() && request.height.is_auto() {
            debug!(
                source = %request.source.display(),
                destination = %request.destination.display(),
                "Both axes auto; copying source unchanged"
            );
            self.store
                .copy_file(&request.source, &request.destination)
                .await?;
            return Ok(ResizeOutcome::Copied);
        }

        // A concrete zero axis can pass the allow-list (0 is a listed value)
        // but a zero-pixel output can never be materialized.
        if request.width == Dimension::Pixels(0) || request.height == Dimension::Pixels(0) {
            return Err(ResizeError::UnsupportedResolution {
                width: request.width,
                height: request.height,
            });
        }

        let image = self.processor.read(&request.source).await?;
        let (source_width, source_height) = self.processor.dimensions(&image);
        let (width, height) = resolve_target(
            request.width,
            request.height,
            source_width,
            source_height,
        );

        debug!(
            source = %request.source.display(),
            destination = %request.destination.display(),
            width,
            height,
            "Resizing"
        );

        let resized = self.processor.resize(image, width, height);
        self.processor.write(resized, &request.destination).await?;

        Ok(ResizeOutcome::Resized { width, height })
    }
}

/// Resolve auto axes against the source aspect ratio.
///
/// Exactly one axis can be auto here (both-auto is the copy path and a
/// concrete zero has already been rejected), but the all-concrete case falls
/// through untouched.
fn resolve_target(
    width: Dimension,
    height: Dimension,
    source_width: u32,
    source_height: u32,
) -> (u32, u32) {
    match (width, height) {
        (Dimension::Pixels(w), Dimension::Pixels(h)) => (w, h),
        (Dimension::Pixels(w), Dimension::Auto) => (w, derive_axis(w, source_height, source_width)),
        (Dimension::Auto, Dimension::Pixels(h)) => (derive_axis(h, source_width, source_height), h),
        // Unreachable via run(); keep the source size as a safe identity.
        (Dimension::Auto, Dimension::Auto) => (source_width, source_height),
    }
}

/// Scale `other` by `fixed / base`, rounded, clamped to at least one pixel.
fn derive_axis(fixed: u32, other: u32, base: u32) -> u32 {
    if base == 0 {
        return 1;
    }
    let scaled = (u64::from(fixed) * u64::from(other) + u64::from(base) / 2) / u64::from(base);
    (scaled as u32).max(1)
}

// =============================================================================
// Tests
// =============================================================================
