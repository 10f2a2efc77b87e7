pub mod mask;
pub mod slide;

use std::path::Path;

use image::DynamicImage;

use crate::error::{MaskError, Result};

const RASTER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff"];

/// Decode a raster file after checking that it exists and has a supported extension.
pub(crate) fn read_raster(path: &Path) -> Result<DynamicImage> {
    if !path.is_file() {
        return Err(MaskError::NotFound {
            path: path.to_path_buf(),
        });
    }
    if !is_raster(path) {
        return Err(MaskError::UnsupportedFormat {
            extension: path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
        });
    }

    image::open(path).map_err(|source| MaskError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn is_raster(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |ext| {
            RASTER_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}
