//! # Error Types
//!
//! Errors surfaced by the steganography library. Binaries wrap these in
//! `anyhow` for context; library callers can match on the variants.

use std::path::PathBuf;

use image::ImageFormat;
use thiserror::Error;

/// Main error type for the lsb-stego library.
#[derive(Error, Debug)]
pub enum StegoError {
    /// Failed to load an image file.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to decode an image held in memory.
    #[error("failed to decode image data: {0}")]
    ImageDecode(#[source] image::ImageError),

    /// Failed to save an image file.
    #[error("failed to save image to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to encode an image into memory.
    #[error("failed to encode image: {0}")]
    ImageEncode(#[source] image::ImageError),

    /// The payload does not fit in the carrier. Raised before any pixel is touched.
    #[error(
        "image too small for this text: need {needed} bits but only {available} bits available"
    )]
    CapacityExceeded { needed: usize, available: usize },

    /// An empty delimiter would match at offset zero of every carrier.
    #[error("delimiter must not be empty")]
    EmptyDelimiter,

    /// The target format recompresses pixels and would destroy the embedded bits.
    #[error("{format:?} is a lossy format and cannot carry hidden text ({path})")]
    LossyFormat { path: PathBuf, format: ImageFormat },

    /// The target format cannot represent the carrier's pixel layout (RGBA into PPM).
    #[error("{format:?} cannot store the pixel layout of this carrier ({path})")]
    UnsupportedLayout { path: PathBuf, format: ImageFormat },

    /// The file extension does not name an image format we can write.
    #[error("unsupported image format for {path}")]
    UnsupportedFormat { path: PathBuf },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for lsb-stego operations.
pub type Result<T> = std::result::Result<T, StegoError>;
