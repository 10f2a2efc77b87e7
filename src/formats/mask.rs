use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::processing::threshold::normalize_bytes;
use crate::types::ConfidenceMask;

/// Class sub-directory holding HEV prediction masks.
pub const HEV_DIR: &str = "hev";
/// Class sub-directory holding tumor prediction masks.
pub const TUMOR_DIR: &str = "tumor";

/// Load an 8-bit mask image as confidences in `[0, 1]`.
///
/// Color or 16-bit inputs are reduced to 8-bit luma first.
pub fn read_mask(path: &Path) -> Result<ConfidenceMask> {
    let img = super::read_raster(path)?;
    Ok(normalize_bytes(&img.to_luma8()))
}

/// `{mask_dir}/{class_dir}/{slide_stem}_scene_{scene}.png`
pub fn class_mask_path(mask_dir: &Path, class_dir: &str, slide: &Path, scene: usize) -> PathBuf {
    let stem = slide
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    mask_dir
        .join(class_dir)
        .join(format!("{}_scene_{}.png", stem, scene))
}
