use image::GrayImage;
use imageproc::contours::{self, BorderType};

/// Boundary of one connected foreground region (or of a hole inside one).
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    /// Boundary pixels `(x, y)` in tracing order.
    pub points: Vec<(i32, i32)>,
    /// True when this border separates a hole from its enclosing region.
    pub is_hole: bool,
    /// Index of the enclosing contour in the same extraction result.
    pub parent: Option<usize>,
}

impl Contour {
    pub fn new(points: Vec<(i32, i32)>) -> Self {
        Contour {
            points,
            is_hole: false,
            parent: None,
        }
    }

    /// Enclosed polygon area (shoelace formula over the boundary points).
    ///
    /// This is the geometric area of the polygon through pixel centres, not a
    /// pixel count: a 10x10 block measures 81 and a single pixel measures 0.
    pub fn area(&self) -> f64 {
        polygon_area(&self.points)
    }
}

/// Absolute shoelace area of a closed polygon.
pub fn polygon_area(points: &[(i32, i32)]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice = 0i64;
    for (i, &(x0, y0)) in points.iter().enumerate() {
        let (x1, y1) = points[(i + 1) % points.len()];
        twice += x0 as i64 * y1 as i64 - x1 as i64 * y0 as i64;
    }
    (twice as f64).abs() * 0.5
}

/// Capability that turns a binary mask into traced region boundaries.
///
/// Non-zero pixels are foreground. Implementations must report both outer
/// borders and hole borders.
pub trait RegionExtractor: Send + Sync {
    fn extract(&self, binary: &GrayImage) -> Vec<Contour>;
}

/// Suzuki-Abe border following, backed by `imageproc::contours`.
#[derive(Copy, Clone, Debug, Default)]
pub struct BorderFollowing;

impl RegionExtractor for BorderFollowing {
    fn extract(&self, binary: &GrayImage) -> Vec<Contour> {
        // One pixel of background around the image so regions touching the
        // edge still get a closed outer border.
        let mut padded = GrayImage::new(binary.width() + 2, binary.height() + 2);
        image::imageops::replace(&mut padded, binary, 1, 1);

        contours::find_contours::<i32>(&padded)
            .into_iter()
            .map(|c| Contour {
                points: c.points.iter().map(|p| (p.x - 1, p.y - 1)).collect(),
                is_hole: matches!(c.border_type, BorderType::Hole),
                parent: c.parent,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn draw_block(img: &mut GrayImage, x0: u32, y0: u32, w: u32, h: u32) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                img.put_pixel(x, y, Luma([255]));
            }
        }
    }

    #[test]
    fn test_polygon_area_square() {
        let square = vec![(0, 0), (9, 0), (9, 9), (0, 9)];
        assert_eq!(polygon_area(&square), 81.0);
        // Orientation does not matter.
        let reversed: Vec<_> = square.iter().rev().copied().collect();
        assert_eq!(polygon_area(&reversed), 81.0);
    }

    #[test]
    fn test_degenerate_polygons() {
        assert_eq!(polygon_area(&[]), 0.0);
        assert_eq!(polygon_area(&[(3, 3)]), 0.0);
        assert_eq!(polygon_area(&[(0, 0), (5, 0)]), 0.0);
    }

    #[test]
    fn test_empty_image_has_no_contours() {
        let img = GrayImage::new(16, 16);
        assert!(BorderFollowing.extract(&img).is_empty());
    }

    #[test]
    fn test_two_blocks_areas() {
        let mut img = GrayImage::new(30, 20);
        draw_block(&mut img, 2, 2, 10, 10);
        draw_block(&mut img, 20, 5, 3, 3);
        let found = BorderFollowing.extract(&img);
        assert_eq!(found.len(), 2);
        let mut areas: Vec<f64> = found.iter().map(|c| c.area()).collect();
        areas.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(areas, vec![4.0, 81.0]);
        assert!(found.iter().all(|c| !c.is_hole));
    }

    #[test]
    fn test_ring_reports_hole() {
        let mut img = GrayImage::new(20, 20);
        draw_block(&mut img, 2, 2, 12, 12);
        for y in 5..11 {
            for x in 5..11 {
                img.put_pixel(x, y, Luma([0]));
            }
        }
        let found = BorderFollowing.extract(&img);
        assert_eq!(found.len(), 2);
        let hole = found.iter().find(|c| c.is_hole).expect("hole contour");
        assert!(hole.parent.is_some());
    }

    #[test]
    fn test_region_touching_image_border() {
        let mut img = GrayImage::new(6, 4);
        draw_block(&mut img, 0, 0, 6, 4);
        let found = BorderFollowing.extract(&img);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].area(), 15.0);
    }
}
