//! Scaled PNG generation from a whole-slide image

use std::path::PathBuf;

use tracing::{debug, info};

use super::local::OpenedSlide;
use super::types::SlideError;

/// Extension of the scaled output image written next to the source
pub const OUTPUT_EXTENSION: &str = "png";

/// Compute the scaled-down target dimensions for a slide
pub fn target_dimensions(width: u32, height: u32, scale_factor: u32) -> (u32, u32) {
    (width / scale_factor, height / scale_factor)
}

/// Read the base level of `slide`, downscale it by `scale_factor` and write
/// the result as a PNG next to the source file. Returns the output path.
///
/// The whole of level 0 is read at source resolution before resizing, so
/// peak memory is proportional to the original image, not the output.
pub fn scale_to_png(slide: &OpenedSlide, scale_factor: u32) -> Result<PathBuf, SlideError> {
    let dims = slide.dimensions()?;
    let (new_w, new_h) = target_dimensions(dims.width, dims.height, scale_factor);

    info!(
        "Scaling slide {:?}: {}x{} -> {}x{}",
        slide.path(),
        dims.width,
        dims.height,
        new_w,
        new_h
    );

    let rgba = slide.read_region(0, 0, 0, dims.width, dims.height)?;

    // The upload format carries no alpha channel, so convert before resampling
    let rgb = image::DynamicImage::ImageRgba8(rgba).into_rgb8();

    let scaled =
        image::imageops::resize(&rgb, new_w, new_h, image::imageops::FilterType::Triangle);

    let out_path = slide.path().with_extension(OUTPUT_EXTENSION);
    scaled
        .save(&out_path)
        .map_err(|e| SlideError::EncodeError(format!("{:?}: {}", out_path, e)))?;

    debug!("Wrote scaled image: {:?}", out_path);
    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_dimensions_floor() {
        assert_eq!(target_dimensions(100_000, 75_000, 25), (4_000, 3_000));
        assert_eq!(target_dimensions(100_024, 75_049, 25), (4_000, 3_001));
        // Anything smaller than the factor collapses to zero
        assert_eq!(target_dimensions(24, 24, 25), (0, 0));
    }

    #[test]
    fn test_target_dimensions_identity_factor() {
        assert_eq!(target_dimensions(1920, 1080, 1), (1920, 1080));
    }
}
