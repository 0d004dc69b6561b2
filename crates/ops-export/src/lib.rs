//! # ops-export
//!
//! Client-side utilities that leave the chart layer: image compression before
//! upload and self-contained HTML report export.

pub mod compress;
pub mod download;
pub mod report;

pub use compress::*;
pub use download::*;
pub use report::*;

use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

/// Failure to load, decode or re-encode a single image
#[derive(Debug, Error)]
pub enum CompressError {
    #[error("failed to fetch `{url}`: {reason}")]
    Fetch { url: String, reason: String },
    #[error("malformed data URL")]
    InvalidDataUrl,
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("image codec error: {0}")]
    Image(#[from] ::image::ImageError),
    #[error("failed to read image file: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported image source `{0}`")]
    UnsupportedSource(String),
}

/// Failure to hand a generated document to the user
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("browser download failed: {0}")]
    Browser(String),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}
