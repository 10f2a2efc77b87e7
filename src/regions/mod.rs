//! Region extraction: contour tracing, polygon area and solid fill.

mod contour;
mod fill;

pub use contour::{polygon_area, BorderFollowing, Contour, RegionExtractor};
pub use fill::fill_contours;
