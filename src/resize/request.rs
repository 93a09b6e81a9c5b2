//! Resize request parameters and allow-list validation.

use std::path::{Path, PathBuf};

use crate::error::ResizeError;
use crate::path::Dimension;

/// Extensions accepted when no explicit allow-list is configured.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["jpg", "png"];

/// Resolutions accepted when no explicit allow-list is configured.
///
/// `-1` is the value auto axes validate as; `0` permits the concrete `0x0`
/// pair produced by paths without a dimension segment (which still fails at
/// the resize step, since a zero-pixel output cannot be materialized).
pub const DEFAULT_ALLOWED_RESOLUTIONS: &[i32] = &[
    -1, 0, 32, 64, 128, 256, 320, 480, 640, 768, 960, 1024, 1080, 1280, 1440, 1920, 2048,
];

// =============================================================================
// Resize Request
// =============================================================================

/// Parameters for one materialization: target dimensions plus resolved
/// source and destination paths.
///
/// Constructed fresh per incoming request and discarded once the response is
/// sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeRequest {
    /// Target width
    pub width: Dimension,

    /// Target height
    pub height: Dimension,

    /// Absolute or root-relative path of the source image
    pub source: PathBuf,

    /// Path the materialized file is written to
    pub destination: PathBuf,
}

impl ResizeRequest {
    pub fn new(
        width: Dimension,
        height: Dimension,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            width,
            height,
            source: source.into(),
            destination: destination.into(),
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Validate a request against the configured allow-lists.
///
/// Checks the source extension first, then both dimensions. Runs before any
/// file access.
pub fn validate(
    request: &ResizeRequest,
    allowed_extensions: &[String],
    allowed_resolutions: &[i32],
) -> Result<(), ResizeError> {
    if !extension_allowed(&request.source, allowed_extensions) {
        return Err(ResizeError::UnsupportedExtension {
            path: request.source.display().to_string(),
        });
    }

    if !allowed_resolutions.contains(&request.width.resolution_value())
        || !allowed_resolutions.contains(&request.height.resolution_value())
    {
        return Err(ResizeError::UnsupportedResolution {
            width: request.width,
            height: request.height,
        });
    }

    Ok(())
}

fn extension_allowed(source: &Path, allowed: &[String]) -> bool {
    let Some(ext) = source.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    allowed.iter().any(|a| a.eq_ignore_ascii_case(&ext))
}

// =============================================================================
// Tests
// =============================================================================
