//! Configuration for the bundled server binary.
//!
//! Options come from command-line arguments via clap, with environment
//! variable fallbacks under the `PIXELGATE_` prefix:
//!
//! - `PIXELGATE_HOST` - Server bind address (default: 0.0.0.0)
//! - `PIXELGATE_PORT` - Server port (default: 3000)
//! - `PIXELGATE_SOURCE_ROOT` - Directory containing source images (required)
//! - `PIXELGATE_PUBLIC_ROOT` - Directory materialized assets are written to
//!   and served from (required)
//! - `PIXELGATE_ALLOWED_EXTENSIONS` - Comma-separated extension allow-list
//! - `PIXELGATE_ALLOWED_RESOLUTIONS` - Comma-separated resolution allow-list
//!   (include -1 to permit auto axes)

use std::path::PathBuf;

use clap::Parser;

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Dimension segments carry at most five digits per axis.
const MAX_RESOLUTION: i32 = 99_999;

/// Pixelgate - on-demand image resize middleware.
///
/// Serves assets from the public root and materializes missing ones from the
/// source root, resizing according to the dimension segment in the request
/// path.
#[derive(Parser, Debug, Clone)]
#[command(name = "pixelgate")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "PIXELGATE_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PIXELGATE_PORT")]
    pub port: u16,

    /// Directory containing the original source images.
    #[arg(long, env = "PIXELGATE_SOURCE_ROOT")]
    pub source_root: PathBuf,

    /// Directory materialized assets are written to and served from.
    #[arg(long, env = "PIXELGATE_PUBLIC_ROOT")]
    pub public_root: PathBuf,

    /// Allowed source extensions (comma-separated). Defaults to jpg,png.
    #[arg(long, env = "PIXELGATE_ALLOWED_EXTENSIONS", value_delimiter = ',')]
    pub allowed_extensions: Option<Vec<String>>,

    /// Allowed resolutions (comma-separated). Include -1 to permit auto
    /// axes. Defaults to the built-in list.
    #[arg(
        long,
        env = "PIXELGATE_ALLOWED_RESOLUTIONS",
        value_delimiter = ',',
        allow_negative_numbers = true
    )]
    pub allowed_resolutions: Option<Vec<i32>>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !self.source_root.is_dir() {
            return Err(format!(
                "Source root is not a directory: {}",
                self.source_root.display()
            ));
        }

        if self.public_root.as_os_str().is_empty() {
            return Err("Public root is required. Set --public-root or PIXELGATE_PUBLIC_ROOT"
                .to_string());
        }

        if let Some(ref extensions) = self.allowed_extensions {
            if extensions.is_empty() {
                return Err("allowed_extensions must not be empty".to_string());
            }
            if let Some(bad) = extensions
                .iter()
                .find(|e| e.is_empty() || e.contains('.') || e.contains('/'))
            {
                return Err(format!(
                    "Invalid extension '{}': expected a bare extension like 'jpg'",
                    bad
                ));
            }
        }

        if let Some(ref resolutions) = self.allowed_resolutions {
            if resolutions.is_empty() {
                return Err("allowed_resolutions must not be empty".to_string());
            }
            if let Some(bad) = resolutions
                .iter()
                .find(|r| **r < -1 || **r > MAX_RESOLUTION)
            {
                return Err(format!(
                    "Invalid resolution {}: must be between -1 and {}",
                    bad, MAX_RESOLUTION
                ));
            }
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Tests
// =============================================================================
