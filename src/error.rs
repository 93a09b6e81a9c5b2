use thiserror::Error;

use crate::path::Dimension;

/// Errors that can occur while materializing a single request.
///
/// Every variant carries a stable [`code`](ResizeError::code) string that is
/// serialized into the JSON body of the 500 response, so clients can match on
/// the kind without parsing the human-readable message.
#[derive(Debug, Error)]
pub enum ResizeError {
    /// The source path's trailing extension is not in the allowed set
    #[error("Unsupported extension: {path}")]
    UnsupportedExtension { path: String },

    /// Width or height is not in the allowed resolution set
    #[error("Unsupported resolution: {width}x{height}")]
    UnsupportedResolution { width: Dimension, height: Dimension },

    /// The source image could not be decoded
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// The resized image could not be encoded to the destination format
    #[error("Failed to encode image: {0}")]
    Encode(String),

    /// Filesystem error while reading, writing, or copying
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResizeError {
    /// Stable error code for the serialized error body.
    pub fn code(&self) -> &'static str {
        match self {
            ResizeError::UnsupportedExtension { .. } => "UNSUPPORTED_EXTENSION",
            ResizeError::UnsupportedResolution { .. } => "UNSUPPORTED_RESOLUTION",
            ResizeError::Decode(_) => "DECODE_ERROR",
            ResizeError::Encode(_) => "ENCODE_ERROR",
            ResizeError::Io(_) => "IO_ERROR",
        }
    }
}

/// Fatal configuration errors raised by the middleware builder.
///
/// These are raised synchronously at setup time. A misconfigured builder is a
/// programming error on the caller's side and is never recoverable at
/// runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// An empty extension allow-list was supplied
    #[error("EXTENSIONS_ARRAY_EXPECTED: allowed extensions must be a non-empty list")]
    EmptyExtensions,

    /// An empty resolution allow-list was supplied
    #[error("RESOLUTIONS_ARRAY_EXPECTED: allowed resolutions must be a non-empty list")]
    EmptyResolutions,

    /// `build()` was called without configuring a request-path accessor
    #[error("NO_REQ_PATH: a request path accessor must be configured before build()")]
    NoRequestPath,
}
