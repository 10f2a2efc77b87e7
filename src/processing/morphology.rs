use image::GrayImage;
use imageproc::morphology::{grayscale_dilate, grayscale_erode, Mask};

/// Dilation passes with a 3x3 all-ones element before area filtering.
pub const DILATE_ITERATIONS: u8 = 12;

/// Erosion passes with a 3x3 all-ones element after dilation.
///
/// Two fewer than `DILATE_ITERATIONS`, so the close grows regions by a net
/// two pixels and neighbouring fragments merge.
pub const ERODE_ITERATIONS: u8 = 10;

/// Dilate then erode a binary image.
///
/// `k` passes of a 3x3 square element equal one pass with a
/// `(2k + 1)`-wide square mask. Pixels outside the image never take part,
/// so a uniform image is left unchanged by either step.
pub fn close_regions(binary: &GrayImage, dilate_iterations: u8, erode_iterations: u8) -> GrayImage {
    let grown = if dilate_iterations > 0 {
        grayscale_dilate(binary, &Mask::square(dilate_iterations))
    } else {
        binary.clone()
    };

    if erode_iterations > 0 {
        grayscale_erode(&grown, &Mask::square(erode_iterations))
    } else {
        grown
    }
}
