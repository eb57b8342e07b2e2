//! Pointer and wheel gestures on the page preview
//!
//! Gestures are turned into [`ConfigChange`]s; the configuration does the
//! accumulation and clamping. Pointer positions arrive in display
//! coordinates and are mapped to surface pixels first, since the preview is
//! usually shown at a different size than the surface it displays.

use gridkit_core::{ConfigChange, ZoomDirection};

/// Maps display coordinates onto surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewMapping {
    pub display_width: f64,
    pub display_height: f64,
    pub surface_width: u32,
    pub surface_height: u32,
}

impl ViewMapping {
    /// Preview shown at the surface's own size
    pub fn identity(surface_width: u32, surface_height: u32) -> Self {
        Self {
            display_width: surface_width as f64,
            display_height: surface_height as f64,
            surface_width,
            surface_height,
        }
    }

    pub fn to_surface(&self, x: f64, y: f64) -> (f64, f64) {
        let sx = if self.display_width > 0.0 {
            self.surface_width as f64 / self.display_width
        } else {
            1.0
        };
        let sy = if self.display_height > 0.0 {
            self.surface_height as f64 / self.display_height
        } else {
            1.0
        };
        (x * sx, y * sy)
    }
}

/// Drag tracking for background panning
///
/// Only the delta since the previous pointer position is reported, so a drag
/// can span any number of move events.
#[derive(Debug, Clone, Default)]
pub struct DragGesture {
    last: Option<(f64, f64)>,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a drag at a surface position. Ignored without a bitmap.
    pub fn press(&mut self, x: f64, y: f64, has_image: bool) -> bool {
        if !has_image {
            return false;
        }
        self.last = Some((x, y));
        true
    }

    /// Pointer moved; returns the pan change when a drag is in progress.
    pub fn drag_to(&mut self, x: f64, y: f64) -> Option<ConfigChange> {
        let (last_x, last_y) = self.last?;
        self.last = Some((x, y));
        Some(ConfigChange::PanBackground {
            dx: x - last_x,
            dy: y - last_y,
        })
    }

    pub fn release(&mut self) {
        self.last = None;
    }

    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }
}

/// Map a wheel delta to a zoom step. Negative deltas (scroll up) zoom in.
pub fn wheel_change(delta_y: f64) -> Option<ConfigChange> {
    if delta_y < 0.0 {
        Some(ConfigChange::ZoomBackground(ZoomDirection::In))
    } else if delta_y > 0.0 {
        Some(ConfigChange::ZoomBackground(ZoomDirection::Out))
    } else {
        None
    }
}
