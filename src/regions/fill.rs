use image::{GrayImage, Luma};
use imageproc::drawing::draw_line_segment_mut;

use super::contour::Contour;
use crate::types::RegionMask;

const INSIDE: Luma<u8> = Luma([1]);

/// Rasterize every contour as a solid region into a `height x width` grid of 0/1.
///
/// Each contour is filled independently, so a hole border fills the hole it
/// encloses just like an outer border fills its region. Boundary pixels are
/// always part of the fill.
pub fn fill_contours(contours: &[Contour], width: usize, height: usize) -> RegionMask {
    let mut canvas = GrayImage::new(width as u32, height as u32);

    for contour in contours {
        fill_polygon(&mut canvas, &contour.points);
    }

    RegionMask::from_shape_fn((height, width), |(y, x)| {
        canvas.get_pixel(x as u32, y as u32)[0]
    })
}

fn fill_polygon(canvas: &mut GrayImage, points: &[(i32, i32)]) {
    if points.is_empty() {
        return;
    }
    let width = canvas.width() as i32;
    let height = canvas.height() as i32;

    // Interior: even-odd scanline through pixel centres, half-open in y so
    // shared vertices are counted once.
    let y_min = points.iter().map(|p| p.1).min().unwrap_or(0).max(0);
    let y_max = points.iter().map(|p| p.1).max().unwrap_or(-1).min(height - 1);
    let mut crossings: Vec<f64> = Vec::new();

    for y in y_min..=y_max {
        crossings.clear();
        for (i, &(x0, y0)) in points.iter().enumerate() {
            let (x1, y1) = points[(i + 1) % points.len()];
            if y0 == y1 {
                continue;
            }
            let (lo, hi) = if y0 < y1 { (y0, y1) } else { (y1, y0) };
            if y < lo || y >= hi {
                continue;
            }
            let t = (y - y0) as f64 / (y1 - y0) as f64;
            crossings.push(x0 as f64 + t * (x1 - x0) as f64);
        }
        crossings.sort_by(|a, b| a.total_cmp(b));

        for pair in crossings.chunks_exact(2) {
            let start = (pair[0].ceil() as i32).max(0);
            let end = (pair[1].floor() as i32).min(width - 1);
            for x in start..=end {
                canvas.put_pixel(x as u32, y as u32, INSIDE);
            }
        }
    }

    // Boundary: connect consecutive points so sparse polygons stay closed.
    if points.len() == 1 {
        let (x, y) = points[0];
        if x >= 0 && x < width && y >= 0 && y < height {
            canvas.put_pixel(x as u32, y as u32, INSIDE);
        }
        return;
    }
    for (i, &(x0, y0)) in points.iter().enumerate() {
        let (x1, y1) = points[(i + 1) % points.len()];
        draw_line_segment_mut(
            canvas,
            (x0 as f32, y0 as f32),
            (x1 as f32, y1 as f32),
            INSIDE,
        );
    }
}
