use std::path::{Path, PathBuf};

use image::{GrayImage, Luma, Rgb, RgbImage};
use slidemask::{ImageFileSlide, MaskError, Pipeline, PipelineConfig};
use tempfile::TempDir;

fn write_mask(path: &Path, width: u32, height: u32, f: impl Fn(u32, u32) -> u8) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    GrayImage::from_fn(width, height, |x, y| Luma([f(x, y)]))
        .save(path)
        .unwrap();
}

struct Fixture {
    dir: TempDir,
    config: PipelineConfig,
    thumbnail: PathBuf,
}

fn fixture(width: u32, height: u32) -> Fixture {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    let thumbnail = root.join("thumbs/case7_scene_{scene}.png");
    std::fs::create_dir_all(root.join("thumbs")).unwrap();
    RgbImage::from_pixel(width, height, Rgb([100, 100, 100]))
        .save(root.join("thumbs/case7_scene_1.png"))
        .unwrap();

    let config = PipelineConfig {
        slide: root.join("slides/case7.czi"),
        mask_dir: root.join("pred"),
        thumbnail: Some(thumbnail.clone()),
        output_prefix: root.join("out/case7").to_string_lossy().into_owned(),
        ..Default::default()
    };
    Fixture {
        dir,
        config,
        thumbnail,
    }
}

#[test]
fn full_masks_render_tinted_overlay() {
    let mut fx = fixture(4, 4);
    fx.config.hev_area_thresh = 0.0;
    fx.config.inter_area_thresh = 0.0;
    let pred = fx.dir.path().join("pred");
    write_mask(&pred.join("hev/case7_scene_1.png"), 4, 4, |_, _| 255);
    write_mask(&pred.join("tumor/case7_scene_1.png"), 4, 4, |_, _| 255);

    let pipeline = Pipeline::new(fx.config).unwrap();
    let report = pipeline.run(&ImageFileSlide::new(&fx.thumbnail)).unwrap();

    assert_eq!(
        report.output_path.file_name().unwrap().to_str().unwrap(),
        "case7_hconf_0.99_tconf_0.99_iconf_0.99_harea_0_iarea_0.jpg"
    );
    assert_eq!(report.roi_pixels, 16);
    assert_eq!(report.tumor_pixels, 16);

    let out = image::open(&report.output_path).unwrap().to_rgb8();
    assert_eq!(out.dimensions(), (4, 4));
    // JPEG is lossy; the blend of gray 100 with tint (0, 255, 220) is (50, 177, 160).
    let px = out.get_pixel(1, 1).0;
    let expected = [50i32, 177, 160];
    for c in 0..3 {
        assert!((px[c] as i32 - expected[c]).abs() <= 12, "channel {} = {}", c, px[c]);
    }
}

#[test]
fn disjoint_masks_leave_no_roi() {
    let fx = fixture(64, 48);
    let pred = fx.dir.path().join("pred");
    write_mask(&pred.join("hev/case7_scene_1.png"), 64, 48, |x, _| if x < 32 { 255 } else { 0 });
    write_mask(&pred.join("tumor/case7_scene_1.png"), 64, 48, |x, _| if x >= 32 { 255 } else { 0 });

    let pipeline = Pipeline::new(fx.config).unwrap();
    let report = pipeline.run(&ImageFileSlide::new(&fx.thumbnail)).unwrap();

    assert_eq!(report.hev_stats.contours_kept, 1);
    assert_eq!(report.roi_stats.contours_found, 0);
    assert_eq!(report.roi_pixels, 0);
    assert!(report.output_path.is_file());
    assert!(report
        .output_path
        .to_string_lossy()
        .ends_with("case7_hconf_0.99_tconf_0.99_iconf_0.99_harea_150_iarea_20.jpg"));
}

#[test]
fn overlapping_blocks_keep_large_intersection_only() {
    let fx = fixture(100, 100);
    let pred = fx.dir.path().join("pred");
    // HEV: one large block; tumor: a large overlap and a lone pixel far from it.
    write_mask(&pred.join("hev/case7_scene_1.png"), 100, 100, |x, y| {
        if (5..95).contains(&x) && (5..95).contains(&y) { 255 } else { 0 }
    });
    write_mask(&pred.join("tumor/case7_scene_1.png"), 100, 100, |x, y| {
        let big = (50..70).contains(&x) && (50..70).contains(&y);
        let speck = x == 20 && y == 20;
        if big || speck { 255 } else { 0 }
    });

    let pipeline = Pipeline::new(fx.config).unwrap();
    let report = pipeline.run(&ImageFileSlide::new(&fx.thumbnail)).unwrap();

    // Closing grows the lone pixel to 5x5 (area 16), still below 20.
    assert_eq!(report.roi_stats.contours_found, 2);
    assert_eq!(report.roi_stats.contours_kept, 1);
    assert_eq!(report.roi_pixels, 400);
}

#[test]
fn thumbnail_size_mismatch_fails() {
    let fx = fixture(8, 8);
    let pred = fx.dir.path().join("pred");
    write_mask(&pred.join("hev/case7_scene_1.png"), 16, 16, |_, _| 255);
    write_mask(&pred.join("tumor/case7_scene_1.png"), 16, 16, |_, _| 255);

    let pipeline = Pipeline::new(fx.config).unwrap();
    let err = pipeline
        .run(&ImageFileSlide::new(&fx.thumbnail))
        .err()
        .unwrap();
    assert!(err
        .chain()
        .any(|cause| matches!(cause.downcast_ref::<MaskError>(), Some(MaskError::ShapeMismatch { .. }))));
}

#[test]
fn mask_size_mismatch_fails() {
    let fx = fixture(8, 8);
    let pred = fx.dir.path().join("pred");
    write_mask(&pred.join("hev/case7_scene_1.png"), 8, 8, |_, _| 255);
    write_mask(&pred.join("tumor/case7_scene_1.png"), 8, 6, |_, _| 255);

    let pipeline = Pipeline::new(fx.config).unwrap();
    let err = pipeline
        .run(&ImageFileSlide::new(&fx.thumbnail))
        .err()
        .unwrap();
    assert!(format!("{:#}", err).contains("Shape mismatch"));
}

#[test]
fn missing_tumor_mask_is_reported() {
    let fx = fixture(8, 8);
    let pred = fx.dir.path().join("pred");
    write_mask(&pred.join("hev/case7_scene_1.png"), 8, 8, |_, _| 255);

    let pipeline = Pipeline::new(fx.config).unwrap();
    let err = pipeline
        .run(&ImageFileSlide::new(&fx.thumbnail))
        .err()
        .unwrap();
    assert!(err
        .chain()
        .any(|cause| matches!(cause.downcast_ref::<MaskError>(), Some(MaskError::NotFound { .. }))));
}
