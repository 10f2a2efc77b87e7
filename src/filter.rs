//! Confidence thresholding + contour-area filtering of segmentation masks.

use std::sync::Arc;

use log::debug;

use crate::error::{ensure_non_negative, ensure_unit_interval, Result};
use crate::processing::{morphology, threshold};
use crate::regions::{fill_contours, BorderFollowing, Contour, RegionExtractor};
use crate::types::{count_nonzero, ConfidenceMask, FilterStats};

/// Output of one area-filter pass.
pub struct FilteredMask {
    /// Original confidences inside kept regions, zero elsewhere.
    pub mask: ConfidenceMask,
    pub stats: FilterStats,
}

/// Area filter with builder pattern.
#[derive(Clone)]
pub struct AreaFilter {
    conf_thresh: f32,
    area_thresh: f64,
    preprocess: bool,
    dilate_iterations: u8,
    erode_iterations: u8,
    extractor: Arc<dyn RegionExtractor>,
}

impl AreaFilter {
    pub fn new() -> Self {
        AreaFilter {
            conf_thresh: 0.5,
            area_thresh: 0.0,
            preprocess: false,
            dilate_iterations: morphology::DILATE_ITERATIONS,
            erode_iterations: morphology::ERODE_ITERATIONS,
            extractor: Arc::new(BorderFollowing),
        }
    }

    /// Minimum confidence (inclusive) for a pixel to count as foreground.
    pub fn with_conf_thresh(mut self, conf_thresh: f32) -> Self {
        self.conf_thresh = conf_thresh;
        self
    }

    /// Contours must enclose strictly more than this polygon area (pixels²).
    pub fn with_area_thresh(mut self, area_thresh: f64) -> Self {
        self.area_thresh = area_thresh;
        self
    }

    /// Run the dilate/erode close before tracing contours.
    pub fn with_preprocess(mut self, preprocess: bool) -> Self {
        self.preprocess = preprocess;
        self
    }

    /// Override the close iteration counts (defaults 12 / 10).
    pub fn with_close_iterations(mut self, dilate: u8, erode: u8) -> Self {
        self.dilate_iterations = dilate;
        self.erode_iterations = erode;
        self
    }

    /// Substitute the boundary tracer.
    pub fn with_extractor(mut self, extractor: Arc<dyn RegionExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Threshold, trace, drop small regions and mask the original confidences.
    pub fn apply(&self, mask: &ConfidenceMask) -> Result<FilteredMask> {
        ensure_unit_interval("conf_thresh", self.conf_thresh)?;
        ensure_non_negative("area_thresh", self.area_thresh)?;

        let (height, width) = mask.dim();

        let mut binary = threshold::threshold_binary(mask, self.conf_thresh);
        if self.preprocess {
            binary = morphology::close_regions(&binary, self.dilate_iterations, self.erode_iterations);
        }

        let contours = self.extractor.extract(&binary);
        let kept: Vec<Contour> = contours
            .iter()
            .filter(|c| c.area() > self.area_thresh)
            .cloned()
            .collect();

        debug!("ori contours num: {}", contours.len());
        debug!("new contours num: {}", kept.len());

        let regions = fill_contours(&kept, width, height);
        let filtered = ndarray::Zip::from(&regions)
            .and(mask)
            .map_collect(|&r, &v| r as f32 * v);

        let stats = FilterStats {
            contours_found: contours.len(),
            contours_kept: kept.len(),
            surviving_pixels: count_nonzero(&filtered),
        };

        Ok(FilteredMask {
            mask: filtered,
            stats,
        })
    }
}

impl Default for AreaFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep only confident regions whose contour area exceeds `area_thresh`.
///
/// Surviving pixels keep their original confidence; everything else becomes 0.
pub fn filter_by_area(
    mask: &ConfidenceMask,
    conf_thresh: f32,
    area_thresh: f64,
    preprocess: bool,
) -> Result<ConfidenceMask> {
    AreaFilter::new()
        .with_conf_thresh(conf_thresh)
        .with_area_thresh(area_thresh)
        .with_preprocess(preprocess)
        .apply(mask)
        .map(|f| f.mask)
}
