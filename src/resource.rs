//! Image resource probing.
//!
//! Layout waits for an explicit ready signal carrying each image's
//! natural size. This module produces those sizes on native targets by
//! reading the encoded file header, without decoding the full image.

use std::path::Path;

use crate::geometry::ImageSize;

/// Errors raised while probing an image resource.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("failed to read image dimensions from {path}: {source}")]
    Probe {
        path: String,
        source: image::ImageError,
    },
}

/// Read the natural pixel size of an image resource.
pub fn probe_image_size(path: impl AsRef<Path>) -> Result<ImageSize, ResourceError> {
    let path = path.as_ref();
    let (width, height) = image::image_dimensions(path).map_err(|source| ResourceError::Probe {
        path: path.display().to_string(),
        source,
    })?;
    log::debug!("probed {} at {width}x{height}", path.display());
    Ok(ImageSize::new(width as f32, height as f32))
}
