//! Fixed numeric constants shared across the workspace.

/// Screen density used for every mm/px conversion.
pub const DPI: f64 = 96.0;

/// Millimeters in one inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Allowed range for custom page dimensions (mm).
pub const PAGE_MIN_MM: f64 = 10.0;
pub const PAGE_MAX_MM: f64 = 2000.0;

/// Allowed range for each page margin (mm).
pub const MARGIN_MIN_MM: f64 = 0.0;
pub const MARGIN_MAX_MM: f64 = 50.0;

/// Allowed range for grid cell size (mm).
pub const CELL_MIN_MM: f64 = 2.0;
pub const CELL_MAX_MM: f64 = 100.0;

/// Thinnest grid stroke (mm).
pub const LINE_WIDTH_MIN_MM: f64 = 0.1;

/// Background scale bounds for interactive zoom (factor).
pub const BG_SCALE_MIN: f64 = 0.1;
pub const BG_SCALE_MAX: f64 = 4.0;

/// Background scale bounds for the percentage form field.
pub const BG_SCALE_PERCENT_MIN: f64 = 10.0;
pub const BG_SCALE_PERCENT_MAX: f64 = 400.0;

/// Multiplicative wheel zoom steps.
pub const BG_ZOOM_IN_FACTOR: f64 = 1.05;
pub const BG_ZOOM_OUT_FACTOR: f64 = 0.95;

/// Storage key of the persisted document.
pub const STATE_KEY: &str = "tta_state_v1";

/// File name stem used for exports when the project name is empty.
pub const FALLBACK_EXPORT_NAME: &str = "tabletop";
