//! Slide-related types and error definitions

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when working with slides
#[derive(Debug, Error)]
pub enum SlideError {
    #[error("Failed to open slide {path:?}: {detail}")]
    OpenError { path: PathBuf, detail: String },

    #[error("Failed to read slide region: {0}")]
    ReadError(String),

    #[error("Failed to encode scaled image: {0}")]
    EncodeError(String),
}

/// Full-resolution (level 0) pixel dimensions of a slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideDimensions {
    pub width: u32,
    pub height: u32,
}
