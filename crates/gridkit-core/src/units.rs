//! Unit conversion utilities
//!
//! Converts between physical millimeters and device pixels. The whole
//! pipeline works at a fixed screen density of 96 DPI, so a page size in
//! millimeters always maps to the same pixel surface.

use crate::constants::{DPI, MM_PER_INCH};

/// Convert millimeters to device pixels at [`DPI`]
///
/// * `mm` - Length in millimeters
pub fn mm_to_px(mm: f64) -> f64 {
    mm * DPI / MM_PER_INCH
}

/// Convert device pixels to millimeters at [`DPI`]
///
/// * `px` - Length in pixels
pub fn px_to_mm(px: f64) -> f64 {
    px * MM_PER_INCH / DPI
}

/// Pixel extent of a physical length, rounded to whole device pixels.
///
/// Used to size raster surfaces; never returns less than one pixel.
pub fn mm_to_device_px(mm: f64) -> u32 {
    let px = mm_to_px(mm).round();
    if px.is_finite() && px >= 1.0 {
        px as u32
    } else {
        1
    }
}

/// Parse a numeric form field.
///
/// Returns `NaN` for anything that is not a number so that the caller's
/// clamp can map it onto the field's minimum bound.
pub fn parse_field(input: &str) -> f64 {
    input.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Clamp a value into `[min, max]`.
///
/// `NaN` falls back to `min`; infinities saturate to the nearest bound.
pub fn clamp_field(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}
