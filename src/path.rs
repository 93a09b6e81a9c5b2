//! Request path parsing for dimension segments.
//!
//! A dimension segment is a URL path component of the form
//! `/<width>x<height>/` (1-5 digits per axis), e.g. `/128x64/`. The parser
//! locates the first such segment, extracts both axes, and strips the segment
//! to derive the path of the underlying source file.
//!
//! A `0` inside a matched segment means "derive this axis" and maps to
//! [`Dimension::Auto`]. When no segment is present at all, both axes default
//! to a concrete `0x0` pair, which is a normal allow-listed value and does
//! *not* trigger copy mode.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Pattern for a dimension segment bounded by slashes.
static DIMENSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/[0-9]{1,5}x[0-9]{1,5}/").expect("valid dimension regex"));

/// Resolution value the auto sentinel validates as.
///
/// The default resolution allow-list contains `-1` so that auto axes pass
/// validation out of the box.
pub const AUTO_RESOLUTION: i32 = -1;

// =============================================================================
// Dimension
// =============================================================================

/// A single target axis of a resize request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Derive this axis from the other one (or leave the source value).
    ///
    /// Validates against the allow-list as [`AUTO_RESOLUTION`].
    Auto,

    /// Concrete target size in pixels.
    Pixels(u32),
}

impl Dimension {
    /// Interpret a value parsed out of a matched dimension segment.
    ///
    /// Inside a segment, `0` is the "derive this axis" marker.
    pub fn from_segment(value: u32) -> Self {
        if value == 0 {
            Dimension::Auto
        } else {
            Dimension::Pixels(value)
        }
    }

    /// The value this axis validates as against the resolution allow-list.
    pub fn resolution_value(&self) -> i32 {
        match self {
            Dimension::Auto => AUTO_RESOLUTION,
            // Segments are capped at 5 digits, so this always fits.
            Dimension::Pixels(px) => *px as i32,
        }
    }

    /// Whether this axis is the auto sentinel.
    pub fn is_auto(&self) -> bool {
        matches!(self, Dimension::Auto)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Auto => write!(f, "auto"),
            Dimension::Pixels(px) => write!(f, "{}", px),
        }
    }
}

// =============================================================================
// Parsed Path
// =============================================================================

/// Result of parsing a request path for a dimension segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    /// Requested width
    pub width: Dimension,

    /// Requested height
    pub height: Dimension,

    /// Request path with the dimension segment removed.
    ///
    /// This is the path of the source file relative to the source root. The
    /// destination path keeps the full original request path, including the
    /// dimension segment.
    pub source_path: String,
}

/// Strip leading slashes from a request path.
pub fn strip_leading_slashes(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// Parse the first dimension segment out of a request path.
///
/// The path is expected to already have its leading slashes stripped (see
/// [`strip_leading_slashes`]). Only the first match participates; any further
/// segments are left in place and treated as ordinary directories.
///
/// When no segment matches, both axes default to a concrete `0x0` and the
/// source path is the request path unchanged.
///
/// A matched segment is stripped even when both axes parse to zero.
pub fn parse_request_path(path: &str) -> ParsedPath {
    let Some(found) = DIMENSION_REGEX.find(path) else {
        return ParsedPath {
            width: Dimension::Pixels(0),
            height: Dimension::Pixels(0),
            source_path: path.to_string(),
        };
    };

    // Matched text is "/<w>x<h>/"; drop the bounding slashes before split.
    let segment = &path[found.start() + 1..found.end() - 1];
    let (w, h) = segment
        .split_once('x')
        .expect("dimension segment contains 'x'");
    // At most 5 digits per axis, so parsing cannot overflow u32.
    let width = Dimension::from_segment(w.parse().expect("digits"));
    let height = Dimension::from_segment(h.parse().expect("digits"));

    // Keep the segment's leading slash so the surrounding directories stay
    // joined: "trains/128x0/test.jpg" becomes "trains/test.jpg".
    let mut source_path = String::with_capacity(path.len());
    source_path.push_str(&path[..found.start() + 1]);
    source_path.push_str(&path[found.end()..]);

    ParsedPath {
        width,
        height,
        source_path,
    }
}

// =============================================================================
// Tests
// =============================================================================
