//! Slide access for reading and downscaling whole-slide images
//!
//! This module provides:
//! - `OpenedSlide` for opening slides locally with OpenSlide
//! - Scaling of the base level into an on-disk PNG

mod local;
mod scale;
mod types;

pub use local::OpenedSlide;
pub use scale::{OUTPUT_EXTENSION, scale_to_png, target_dimensions};
pub use types::{SlideDimensions, SlideError};
