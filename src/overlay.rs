//! Tinted mask overlay: paints a confidence mask in a solid color over a thumbnail.

use image::{Rgb, RgbImage};
use rayon::prelude::*;

use crate::error::{ensure_same_shape, ensure_unit_interval, Result};
use crate::processing::color::{hsv_to_rgb, rgb_to_hsv};
use crate::types::{ColorTint, ConfidenceMask};

/// Default blend factor between thumbnail and tint layer.
pub const DEFAULT_ALPHA: f32 = 0.5;

/// Build the tint layer: `color` with its HSV value scaled per pixel by `value_mask`.
///
/// The scaled value is truncated to a whole byte level. Mask 0 renders black,
/// mask 1 renders the full tint.
pub fn tint_layer(value_mask: &ConfidenceMask, color: ColorTint) -> RgbImage {
    let (height, width) = value_mask.dim();
    let (h, s, v) = rgb_to_hsv(color.0);

    let mut data = vec![0u8; width * height * 3];
    if width > 0 {
        data.par_chunks_mut(width * 3)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, px) in row.chunks_exact_mut(3).enumerate() {
                    let scaled = (v * value_mask[[y, x]]).clamp(0.0, 255.0).floor();
                    let rgb = hsv_to_rgb(h, s, scaled);
                    px.copy_from_slice(&rgb);
                }
            });
    }

    RgbImage::from_raw(width as u32, height as u32, data)
        .unwrap_or_else(|| RgbImage::new(width as u32, height as u32))
}

/// Blend a tinted rendering of `value_mask` onto `base`.
///
/// `out = base + alpha * (tint - base)`, truncated per channel. The mask
/// acts as the tint's brightness, so pixels outside the mask are darkened
/// toward black by `alpha` rather than passed through untouched.
pub fn generate_color_blend_img(
    base: &RgbImage,
    value_mask: &ConfidenceMask,
    color: ColorTint,
    alpha: f32,
) -> Result<RgbImage> {
    ensure_unit_interval("alpha", alpha)?;
    let (width, height) = base.dimensions();
    ensure_same_shape("overlay mask", (height as usize, width as usize), value_mask.dim())?;

    let tint = tint_layer(value_mask, color);
    Ok(blend(base, &tint, alpha))
}

/// Linear blend of two same-size images.
fn blend(base: &RgbImage, layer: &RgbImage, alpha: f32) -> RgbImage {
    let (width, height) = base.dimensions();
    let mut out = RgbImage::new(width, height);

    out.pixels_mut()
        .zip(base.pixels().zip(layer.pixels()))
        .for_each(|(dst, (a, b))| {
            *dst = Rgb([
                mix(a[0], b[0], alpha),
                mix(a[1], b[1], alpha),
                mix(a[2], b[2], alpha),
            ]);
        });
    out
}

#[inline]
fn mix(a: u8, b: u8, alpha: f32) -> u8 {
    let a = a as f32;
    (a + alpha * (b as f32 - a)).clamp(0.0, 255.0) as u8
}
