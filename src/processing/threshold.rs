use image::GrayImage;
use rayon::prelude::*;

use crate::types::ConfidenceMask;

/// Foreground byte written into binary images handed to the contour tracer.
pub const FOREGROUND: u8 = 255;

/// Binarize a confidence mask: `255` where `mask >= conf_thresh`, `0` elsewhere.
pub fn threshold_binary(mask: &ConfidenceMask, conf_thresh: f32) -> GrayImage {
    let (height, width) = mask.dim();
    let mut data = vec![0u8; width * height];

    if width > 0 {
        data.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, dst) in row.iter_mut().enumerate() {
                    if mask[[y, x]] >= conf_thresh {
                        *dst = FOREGROUND;
                    }
                }
            });
    }

    // Buffer length is width * height by construction.
    GrayImage::from_raw(width as u32, height as u32, data)
        .unwrap_or_else(|| GrayImage::new(width as u32, height as u32))
}

/// Keep confidences strictly above `conf_thresh`, zeroing the rest.
///
/// Used for the tumor mask, which is gated without any area filtering.
pub fn gate_above(mask: &ConfidenceMask, conf_thresh: f32) -> ConfidenceMask {
    mask.mapv(|v| if v > conf_thresh { v } else { 0.0 })
}

/// Normalize 8-bit mask bytes into `[0, 1]` confidences.
pub fn normalize_bytes(gray: &GrayImage) -> ConfidenceMask {
    let (width, height) = gray.dimensions();
    ConfidenceMask::from_shape_fn((height as usize, width as usize), |(y, x)| {
        gray.get_pixel(x as u32, y as u32)[0] as f32 / 255.0
    })
}
