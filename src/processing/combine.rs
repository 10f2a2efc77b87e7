use crate::error::{ensure_same_shape, Result};
use crate::types::ConfidenceMask;

/// Element-wise product of two same-shape masks (co-occurrence of two classes).
///
/// No clamping is applied; the product stays in `[0, 1]` only if both inputs do.
pub fn combine(a: &ConfidenceMask, b: &ConfidenceMask) -> Result<ConfidenceMask> {
    ensure_same_shape("combined mask", a.dim(), b.dim())?;
    Ok(a * b)
}
