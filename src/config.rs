use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_unit_interval, MaskError};
use crate::formats::mask::{class_mask_path, HEV_DIR, TUMOR_DIR};
use crate::output::OutputTag;
use crate::overlay::DEFAULT_ALPHA;
use crate::types::ColorTint;

/// All parameters of one overlay run.
///
/// Defaults reproduce the values the analysis was tuned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Slide container; only its file stem is used to locate masks.
    pub slide: PathBuf,
    /// Prediction folder with `hev/` and `tumor/` sub-directories.
    pub mask_dir: PathBuf,
    /// Explicit HEV mask, overrides the `mask_dir` convention.
    pub hev_mask: Option<PathBuf>,
    /// Explicit tumor mask, overrides the `mask_dir` convention.
    pub tumor_mask: Option<PathBuf>,
    /// Exported thumbnail raster; `{scene}` is replaced by the scene index.
    pub thumbnail: Option<PathBuf>,
    pub scene: usize,
    /// Output path prefix; thresholds are appended to form the file name.
    pub output_prefix: String,

    /// Minimum confidence of valid HEV pixels.
    pub hev_conf_thresh: f32,
    /// Tumor pixels must be strictly above this confidence.
    pub tumor_conf_thresh: f32,
    /// Minimum confidence of valid intersection pixels.
    pub inter_conf_thresh: f32,
    /// HEV contours must enclose more than this area (pixels).
    pub hev_area_thresh: f64,
    /// Intersection contours must enclose more than this area (pixels).
    pub inter_area_thresh: f64,

    /// Overlay palette; `color_index` selects the intersection tint.
    pub color_list: Vec<ColorTint>,
    pub color_index: usize,
    pub alpha: f32,
    pub jpeg_quality: u8,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            slide: PathBuf::new(),
            mask_dir: PathBuf::new(),
            hev_mask: None,
            tumor_mask: None,
            thumbnail: None,
            scene: 1,
            output_prefix: "output_dir/overlay".to_string(),
            hev_conf_thresh: 0.99,
            tumor_conf_thresh: 0.99,
            inter_conf_thresh: 0.99,
            hev_area_thresh: 150.0,
            inter_area_thresh: 20.0,
            color_list: vec![
                ColorTint::new(255, 128, 128),
                ColorTint::new(128, 255, 128),
                ColorTint::new(0, 255, 220),
            ],
            color_index: 2,
            alpha: DEFAULT_ALPHA,
            jpeg_quality: 95,
        }
    }
}

impl PipelineConfig {
    /// Load a YAML config file. Missing keys keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: PipelineConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject thresholds and blend settings outside their valid ranges.
    pub fn validate(&self) -> std::result::Result<(), MaskError> {
        ensure_unit_interval("hev_conf_thresh", self.hev_conf_thresh)?;
        ensure_unit_interval("tumor_conf_thresh", self.tumor_conf_thresh)?;
        ensure_unit_interval("inter_conf_thresh", self.inter_conf_thresh)?;
        ensure_non_negative("hev_area_thresh", self.hev_area_thresh)?;
        ensure_non_negative("inter_area_thresh", self.inter_area_thresh)?;
        ensure_unit_interval("alpha", self.alpha)?;

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(MaskError::OutOfRange {
                name: "jpeg_quality",
                value: self.jpeg_quality as f64,
                range: "[1, 100]",
            });
        }
        if self.color_index >= self.color_list.len() {
            return Err(MaskError::OutOfRange {
                name: "color_index",
                value: self.color_index as f64,
                range: "[0, color_list.len())",
            });
        }
        Ok(())
    }

    pub fn hev_mask_path(&self) -> PathBuf {
        self.hev_mask
            .clone()
            .unwrap_or_else(|| class_mask_path(&self.mask_dir, HEV_DIR, &self.slide, self.scene))
    }

    pub fn tumor_mask_path(&self) -> PathBuf {
        self.tumor_mask
            .clone()
            .unwrap_or_else(|| class_mask_path(&self.mask_dir, TUMOR_DIR, &self.slide, self.scene))
    }

    /// Tint used for the intersection overlay.
    pub fn overlay_color(&self) -> Option<ColorTint> {
        self.color_list.get(self.color_index).copied()
    }

    pub fn output_tag(&self) -> OutputTag {
        OutputTag {
            hev_conf: self.hev_conf_thresh,
            tumor_conf: self.tumor_conf_thresh,
            inter_conf: self.inter_conf_thresh,
            hev_area: self.hev_area_thresh,
            inter_area: self.inter_area_thresh,
        }
    }
}
