use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::RgbImage;

pub struct JpegConfig {
    /// JPEG quality (1-100)
    pub quality: u8,
}

impl Default for JpegConfig {
    fn default() -> Self {
        JpegConfig { quality: 95 }
    }
}

/// Thresholds that are encoded into the overlay file name.
pub struct OutputTag {
    pub hev_conf: f32,
    pub tumor_conf: f32,
    pub inter_conf: f32,
    pub hev_area: f64,
    pub inter_area: f64,
}

/// `{prefix}_hconf_{h}_tconf_{t}_iconf_{i}_harea_{ha}_iarea_{ia}.jpg`
pub fn overlay_path(prefix: &str, tag: &OutputTag) -> PathBuf {
    PathBuf::from(format!(
        "{}_hconf_{}_tconf_{}_iconf_{}_harea_{}_iarea_{}.jpg",
        prefix,
        format_conf(tag.hev_conf),
        format_conf(tag.tumor_conf),
        format_conf(tag.inter_conf),
        format_area(tag.hev_area),
        format_area(tag.inter_area),
    ))
}

/// Confidences always carry a decimal point (`1.0`, `0.99`).
fn format_conf(v: f32) -> String {
    if v.fract() == 0.0 {
        format!("{:.1}", v)
    } else {
        v.to_string()
    }
}

/// Whole-pixel areas print without a fraction (`150`), others as-is.
fn format_area(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

pub fn save_jpeg<P: AsRef<Path>>(image: &RgbImage, path: P, config: JpegConfig) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
        }
    }

    let mut output = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;

    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut output, config.quality);

    image.write_with_encoder(encoder)
        .context("Failed to encode JPEG")?;

    Ok(())
}
