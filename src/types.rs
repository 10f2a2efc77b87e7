use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Per-pixel model confidence in `[0, 1]`, indexed `[[row, col]]`.
pub type ConfidenceMask = Array2<f32>;

/// Filled region grid: 1 inside a kept contour, 0 elsewhere.
pub type RegionMask = Array2<u8>;

/// Fixed RGB tint used to visualize a region.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorTint(pub [u8; 3]);

impl ColorTint {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        ColorTint([r, g, b])
    }
}

impl From<[u8; 3]> for ColorTint {
    fn from(rgb: [u8; 3]) -> Self {
        ColorTint(rgb)
    }
}

/// Summary of one area-filter pass.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct FilterStats {
    /// Contours traced in the (possibly preprocessed) binary mask.
    pub contours_found: usize,
    /// Contours whose polygon area exceeded the threshold.
    pub contours_kept: usize,
    /// Pixels with a non-zero value after filtering.
    pub surviving_pixels: usize,
}

/// Number of non-zero pixels in a mask.
pub fn count_nonzero(mask: &ConfidenceMask) -> usize {
    mask.iter().filter(|&&v| v != 0.0).count()
}
