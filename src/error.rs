use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by mask loading, filtering and overlay rendering.
#[derive(Debug, Error)]
pub enum MaskError {
    #[error("Input file not found: '{path}'")]
    NotFound { path: PathBuf },

    #[error("Failed to decode image '{path}': {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Shape mismatch for {what}: expected {expected:?} (height, width), got {actual:?}")]
    ShapeMismatch {
        what: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Parameter '{name}' = {value} is outside {range}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        range: &'static str,
    },

    #[error("Unsupported file extension: '{extension}'")]
    UnsupportedFormat { extension: String },
}

pub type Result<T> = std::result::Result<T, MaskError>;

/// Fail with `ShapeMismatch` unless both `(height, width)` pairs agree.
pub(crate) fn ensure_same_shape(
    what: &'static str,
    expected: (usize, usize),
    actual: (usize, usize),
) -> Result<()> {
    if expected != actual {
        return Err(MaskError::ShapeMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Fail with `OutOfRange` unless `value` is finite and inside `[0, 1]`.
pub(crate) fn ensure_unit_interval(name: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(MaskError::OutOfRange {
            name,
            value: value as f64,
            range: "[0, 1]",
        });
    }
    Ok(())
}

/// Fail with `OutOfRange` unless `value` is finite and non-negative.
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(MaskError::OutOfRange {
            name,
            value,
            range: "[0, inf)",
        });
    }
    Ok(())
}
