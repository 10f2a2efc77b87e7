pub mod config;
pub mod error;
pub mod filter;
pub mod formats;
pub mod output;
pub mod overlay;
pub mod pipeline;
pub mod processing;
pub mod regions;
pub mod types;

pub use config::PipelineConfig;
pub use error::MaskError;
pub use filter::{filter_by_area, AreaFilter, FilteredMask};
pub use formats::mask::read_mask;
pub use formats::slide::{ImageFileSlide, SlideSource};
pub use overlay::generate_color_blend_img;
pub use pipeline::{Intersection, Pipeline, PipelineReport};
pub use processing::combine::combine;
pub use regions::{BorderFollowing, Contour, RegionExtractor};
pub use types::{ColorTint, ConfidenceMask, FilterStats};
