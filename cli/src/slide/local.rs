//! Local slide access using OpenSlide

use std::path::{Path, PathBuf};

use image::RgbaImage;
use openslide_rs::{Address, OpenSlide, Region, Size};
use tracing::debug;

use super::types::{SlideDimensions, SlideError};

/// An opened whole-slide image.
///
/// Opening is fallible and returns an error for a missing file or an
/// unsupported format; there is no null handle state to check later.
pub struct OpenedSlide {
    slide: OpenSlide,
    path: PathBuf,
}

impl OpenedSlide {
    /// Open a slide by path
    pub fn open(path: &Path) -> Result<Self, SlideError> {
        debug!("Opening slide: {:?}", path);
        let slide = OpenSlide::new(path).map_err(|e| SlideError::OpenError {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

        Ok(Self {
            slide,
            path: path.to_path_buf(),
        })
    }

    /// Path this slide was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full-resolution (level 0) pixel dimensions
    pub fn dimensions(&self) -> Result<SlideDimensions, SlideError> {
        let size = self
            .slide
            .get_level_dimensions(0)
            .map_err(|e| SlideError::ReadError(e.to_string()))?;

        Ok(SlideDimensions {
            width: size.w,
            height: size.h,
        })
    }

    /// Read a region as RGBA pixels.
    ///
    /// Origin is in level-0 coordinates; size is in pixels of the requested
    /// pyramid level.
    pub fn read_region(
        &self,
        x: u32,
        y: u32,
        level: u32,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage, SlideError> {
        let region = Region {
            address: Address { x, y },
            level,
            size: Size {
                w: width,
                h: height,
            },
        };

        self.slide.read_image_rgba(&region).map_err(|e| {
            SlideError::ReadError(format!(
                "Failed to read region at level {} ({},{}) {}x{}: {}",
                level, x, y, width, height, e
            ))
        })
    }
}
