//! Image processing capability.
//!
//! The trait mirrors the three delegated operations of the pipeline: read a
//! source image, resize it, and write the result. The resampling algorithm
//! is fixed to bicubic and is not part of the trait surface.

use std::io::Cursor;
use std::path::Path;

use async_trait::async_trait;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use crate::error::ResizeError;

// =============================================================================
// ImageProcessor Trait
// =============================================================================

/// Delegated image read/resize/write operations.
///
/// Implementations own the image handle type, so the service layer never
/// depends on a concrete codec library. `resize` and `dimensions` are
/// synchronous; resampling is CPU-bound and runs inline.
#[async_trait]
pub trait ImageProcessor: Send + Sync {
    /// Decoded image handle.
    type Image: Send + 'static;

    /// Read and decode the image at `path`.
    async fn read(&self, path: &Path) -> Result<Self::Image, ResizeError>;

    /// Pixel dimensions of a decoded image as `(width, height)`.
    fn dimensions(&self, image: &Self::Image) -> (u32, u32);

    /// Resample the image to exactly `width` x `height`.
    fn resize(&self, image: Self::Image, width: u32, height: u32) -> Self::Image;

    /// Encode the image and write it to `path`, creating intermediate
    /// directories as needed. The output format is derived from the path's
    /// extension.
    async fn write(&self, image: Self::Image, path: &Path) -> Result<(), ResizeError>;
}

// =============================================================================
// Bicubic Processor
// =============================================================================

/// Production [`ImageProcessor`] backed by the `image` crate.
///
/// Resampling uses the Catmull-Rom filter, the crate's cubic interpolation
/// (bicubic).
#[derive(Debug, Clone, Default)]
pub struct BicubicProcessor;

impl BicubicProcessor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ImageProcessor for BicubicProcessor {
    type Image = DynamicImage;

    async fn read(&self, path: &Path) -> Result<DynamicImage, ResizeError> {
        let bytes = tokio::fs::read(path).await?;
        image::load_from_memory(&bytes).map_err(|e| ResizeError::Decode(e.to_string()))
    }

    fn dimensions(&self, image: &DynamicImage) -> (u32, u32) {
        (image.width(), image.height())
    }

    fn resize(&self, image: DynamicImage, width: u32, height: u32) -> DynamicImage {
        image.resize_exact(width, height, FilterType::CatmullRom)
    }

    async fn write(&self, image: DynamicImage, path: &Path) -> Result<(), ResizeError> {
        let format =
            ImageFormat::from_path(path).map_err(|e| ResizeError::Encode(e.to_string()))?;

        let mut buf = Cursor::new(Vec::new());
        image
            .write_to(&mut buf, format)
            .map_err(|e| ResizeError::Encode(e.to_string()))?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, buf.into_inner()).await?;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
