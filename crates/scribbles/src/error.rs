//! Error type for the scribbles library.
//!
//! Point generation and transformation are total over finite floats, so the
//! only failures are rejected configuration values and I/O during export.
//! Non-finite rule output is NOT an error: degenerate points are passed
//! through unchanged.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong in the library.
///
/// ## Rust Lesson #20: Error Handling
///
/// `thiserror` writes the `Display` and `std::error::Error` impls for us.
/// Each `#[error(...)]` string is what `{}` prints for that variant.
#[derive(Debug, Error)]
pub enum ScribbleError {
    /// A clip/clamp box with inverted or non-finite bounds.
    #[error("invalid box: min ({min_x}, {min_y}) must not exceed max ({max_x}, {max_y})")]
    InvalidClipBox {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },

    /// An update rule recipe that cannot be evaluated.
    #[error("invalid rule: {0}")]
    InvalidRule(String),

    /// Canvas dimensions that cannot be drawn on.
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },

    /// A color string that is not a valid SVG color.
    #[error("invalid color '{0}'")]
    InvalidColor(String),

    /// Failed to write an exported drawing.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = ScribbleError> = std::result::Result<T, E>;
