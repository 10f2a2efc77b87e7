use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use image::RgbImage;
use log::info;

use crate::config::PipelineConfig;
use crate::error::ensure_same_shape;
use crate::filter::AreaFilter;
use crate::formats::mask::read_mask;
use crate::formats::slide::SlideSource;
use crate::output::{overlay_path, save_jpeg, JpegConfig};
use crate::overlay::generate_color_blend_img;
use crate::processing::{combine::combine, threshold::gate_above};
use crate::types::{count_nonzero, ConfidenceMask, FilterStats};

/// Intermediate masks of the HEV/tumor intersection.
pub struct Intersection {
    /// HEV confidences after the area filter.
    pub hev: ConfidenceMask,
    /// Tumor confidences strictly above the tumor threshold.
    pub tumor: ConfidenceMask,
    /// Filtered product of the two, the region of interest.
    pub roi: ConfidenceMask,
    pub hev_stats: FilterStats,
    pub roi_stats: FilterStats,
}

/// Summary of a finished run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub output_path: PathBuf,
    pub hev_stats: FilterStats,
    pub roi_stats: FilterStats,
    /// Nonzero tumor pixels after gating.
    pub tumor_pixels: usize,
    /// Nonzero pixels of the final region of interest.
    pub roi_pixels: usize,
}

pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Validates the configuration up front so a run never starts with bad parameters.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate().context("Invalid pipeline configuration")?;
        Ok(Pipeline { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Filter HEV, gate tumor, multiply and filter the product again with closing.
    pub fn intersect(&self, hev: &ConfidenceMask, tumor: &ConfidenceMask) -> Result<Intersection> {
        let cfg = &self.config;
        ensure_same_shape("tumor mask", hev.dim(), tumor.dim())?;

        let hev = AreaFilter::new()
            .with_conf_thresh(cfg.hev_conf_thresh)
            .with_area_thresh(cfg.hev_area_thresh)
            .apply(hev)
            .context("HEV area filter failed")?;
        info!(
            "HEV: kept {}/{} contours, {} pixels",
            hev.stats.contours_kept, hev.stats.contours_found, hev.stats.surviving_pixels
        );

        let tumor = gate_above(tumor, cfg.tumor_conf_thresh);
        info!("Tumor: {} pixels above {}", count_nonzero(&tumor), cfg.tumor_conf_thresh);

        let product = combine(&hev.mask, &tumor)?;

        let roi = AreaFilter::new()
            .with_conf_thresh(cfg.inter_conf_thresh)
            .with_area_thresh(cfg.inter_area_thresh)
            .with_preprocess(true)
            .apply(&product)
            .context("Intersection area filter failed")?;
        info!(
            "Intersection: kept {}/{} contours, {} pixels",
            roi.stats.contours_kept, roi.stats.contours_found, roi.stats.surviving_pixels
        );

        Ok(Intersection {
            hev: hev.mask,
            tumor,
            roi: roi.mask,
            hev_stats: hev.stats,
            roi_stats: roi.stats,
        })
    }

    /// Paint `roi` over the thumbnail in the configured overlay color.
    pub fn render(&self, thumbnail: &RgbImage, roi: &ConfidenceMask) -> Result<RgbImage> {
        let color = self
            .config
            .overlay_color()
            .ok_or_else(|| anyhow!("color_index {} out of range", self.config.color_index))?;
        let img = generate_color_blend_img(thumbnail, roi, color, self.config.alpha)
            .context("Failed to render overlay")?;
        Ok(img)
    }

    /// Load masks and thumbnail, compute the intersection and write the overlay JPEG.
    pub fn run(&self, slide: &dyn SlideSource) -> Result<PipelineReport> {
        let cfg = &self.config;
        info!(
            "Parameters: hev_conf={} tumor_conf={} inter_conf={} hev_area={} inter_area={} alpha={}",
            cfg.hev_conf_thresh,
            cfg.tumor_conf_thresh,
            cfg.inter_conf_thresh,
            cfg.hev_area_thresh,
            cfg.inter_area_thresh,
            cfg.alpha
        );

        let hev_path = cfg.hev_mask_path();
        let hev = read_mask(&hev_path)
            .with_context(|| format!("Failed to load HEV mask {}", hev_path.display()))?;
        let tumor_path = cfg.tumor_mask_path();
        let tumor = read_mask(&tumor_path)
            .with_context(|| format!("Failed to load tumor mask {}", tumor_path.display()))?;
        info!("Masks: {}x{}", hev.ncols(), hev.nrows());

        let inter = self.intersect(&hev, &tumor)?;

        let thumbnail = slide
            .thumbnail(cfg.scene)
            .with_context(|| format!("Failed to load thumbnail for scene {}", cfg.scene))?;
        let overlay = self.render(&thumbnail, &inter.roi)?;

        let output_path = overlay_path(&cfg.output_prefix, &cfg.output_tag());
        save_jpeg(
            &overlay,
            &output_path,
            JpegConfig {
                quality: cfg.jpeg_quality,
            },
        )?;
        info!("Saved overlay to {}", output_path.display());

        Ok(PipelineReport {
            output_path,
            hev_stats: inter.hev_stats,
            roi_stats: inter.roi_stats,
            tumor_pixels: count_nonzero(&inter.tumor),
            roi_pixels: count_nonzero(&inter.roi),
        })
    }
}
