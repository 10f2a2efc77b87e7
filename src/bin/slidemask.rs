use std::path::PathBuf;
use std::process;

use anyhow::{anyhow, Result};
use clap::Parser;
use log::LevelFilter;
use slidemask::{ImageFileSlide, Pipeline, PipelineConfig};

/// Intersect HEV and tumor prediction masks and overlay the result on a slide thumbnail.
#[derive(Parser, Debug)]
#[command(name = "slidemask", version, about)]
struct Args {
    /// YAML config; command-line values override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Slide file; its stem names the mask files
    #[arg(long)]
    slide: Option<PathBuf>,

    /// Prediction folder containing hev/ and tumor/
    #[arg(long)]
    mask_dir: Option<PathBuf>,

    #[arg(long)]
    hev_mask: Option<PathBuf>,

    #[arg(long)]
    tumor_mask: Option<PathBuf>,

    /// Exported thumbnail (PNG/JPEG/TIFF); `{scene}` is replaced by the scene index
    #[arg(long)]
    thumbnail: Option<PathBuf>,

    #[arg(long)]
    scene: Option<usize>,

    /// Output prefix; thresholds are appended to build the JPEG name
    #[arg(long)]
    output_prefix: Option<String>,

    #[arg(long)]
    hev_conf: Option<f32>,

    #[arg(long)]
    tumor_conf: Option<f32>,

    #[arg(long)]
    inter_conf: Option<f32>,

    #[arg(long)]
    hev_area: Option<f64>,

    #[arg(long)]
    inter_area: Option<f64>,

    #[arg(long)]
    alpha: Option<f32>,

    /// JPEG quality 1-100
    #[arg(long)]
    quality: Option<u8>,

    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Args {
    /// Config file (or defaults) with every given flag layered on top.
    fn into_config(self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)?,
            None => PipelineConfig::default(),
        };
        self.apply_to(&mut config);
        Ok(config)
    }

    fn apply_to(self, config: &mut PipelineConfig) {
        if let Some(v) = self.slide {
            config.slide = v;
        }
        if let Some(v) = self.mask_dir {
            config.mask_dir = v;
        }
        if self.hev_mask.is_some() {
            config.hev_mask = self.hev_mask;
        }
        if self.tumor_mask.is_some() {
            config.tumor_mask = self.tumor_mask;
        }
        if self.thumbnail.is_some() {
            config.thumbnail = self.thumbnail;
        }
        if let Some(v) = self.scene {
            config.scene = v;
        }
        if let Some(v) = self.output_prefix {
            config.output_prefix = v;
        }
        if let Some(v) = self.hev_conf {
            config.hev_conf_thresh = v;
        }
        if let Some(v) = self.tumor_conf {
            config.tumor_conf_thresh = v;
        }
        if let Some(v) = self.inter_conf {
            config.inter_conf_thresh = v;
        }
        if let Some(v) = self.hev_area {
            config.hev_area_thresh = v;
        }
        if let Some(v) = self.inter_area {
            config.inter_area_thresh = v;
        }
        if let Some(v) = self.alpha {
            config.alpha = v;
        }
        if let Some(v) = self.quality {
            config.jpeg_quality = v;
        }
    }
}

fn setup_logger(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_env("RUST_LOG");
    } else {
        builder.filter(Some("slidemask"), level);
        builder.filter(None, LevelFilter::Off);
    }

    builder.format_timestamp_millis().init();
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    setup_logger(args.log_level);

    let config = args.into_config()?;

    let thumbnail = config
        .thumbnail
        .clone()
        .ok_or_else(|| anyhow!("No thumbnail given (use --thumbnail or set `thumbnail` in the config)"))?;
    let slide = ImageFileSlide::new(thumbnail);

    let pipeline = Pipeline::new(config)?;
    let report = pipeline.run(&slide)?;

    println!("{}", report.output_path.display());
    println!(
        "ROI pixels: {} (HEV contours {}/{}, intersection contours {}/{})",
        report.roi_pixels,
        report.hev_stats.contours_kept,
        report.hev_stats.contours_found,
        report.roi_stats.contours_kept,
        report.roi_stats.contours_found
    );

    Ok(())
}
