use std::path::{Path, PathBuf};

use image::RgbImage;
use log::info;

use crate::error::Result;

/// Placeholder replaced by the scene index in thumbnail paths.
pub const SCENE_PLACEHOLDER: &str = "{scene}";

/// Anything that can render an RGB thumbnail for a scene of a slide.
///
/// Container readers for vendor slide formats implement this; the pipeline
/// only needs the thumbnail raster.
pub trait SlideSource {
    fn thumbnail(&self, scene: usize) -> Result<RgbImage>;
}

/// Thumbnail already exported to a raster file (PNG, JPEG or TIFF).
pub struct ImageFileSlide {
    path: PathBuf,
}

impl ImageFileSlide {
    /// `path` may contain `{scene}`, e.g. `thumbs/case7_scene_{scene}.png`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ImageFileSlide {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path_for_scene(&self, scene: usize) -> PathBuf {
        let raw = self.path.to_string_lossy();
        if raw.contains(SCENE_PLACEHOLDER) {
            PathBuf::from(raw.replace(SCENE_PLACEHOLDER, &scene.to_string()))
        } else {
            self.path.clone()
        }
    }
}

impl SlideSource for ImageFileSlide {
    fn thumbnail(&self, scene: usize) -> Result<RgbImage> {
        let path = self.path_for_scene(scene);
        let img = super::read_raster(&path)?.to_rgb8();
        info!(
            "Loaded thumbnail {} ({}x{})",
            path.display(),
            img.width(),
            img.height()
        );
        Ok(img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MaskError;
    use image::Rgb;

    #[test]
    fn test_scene_placeholder() {
        let slide = ImageFileSlide::new("thumbs/case_scene_{scene}.png");
        assert_eq!(slide.path_for_scene(2), PathBuf::from("thumbs/case_scene_2.png"));
        let fixed = ImageFileSlide::new("thumbs/case.png");
        assert_eq!(fixed.path_for_scene(2), PathBuf::from("thumbs/case.png"));
    }

    #[test]
    fn test_thumbnail_loads_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thumb_1.png");
        RgbImage::from_pixel(5, 4, Rgb([10, 20, 30])).save(&path).unwrap();

        let slide = ImageFileSlide::new(dir.path().join("thumb_{scene}.png"));
        let img = slide.thumbnail(1).unwrap();
        assert_eq!(img.dimensions(), (5, 4));
        assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30]);
    }

    #[test]
    fn test_unsupported_container() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slide.czi");
        std::fs::write(&path, b"ZISRAWFILE").unwrap();
        let err = ImageFileSlide::new(&path).thumbnail(0).unwrap_err();
        assert!(matches!(err, MaskError::UnsupportedFormat { .. }));
    }
}
