//! Page geometry
//!
//! Resolves the page settings into a surface size in device pixels and the
//! inner rectangle left over after margins. The inner rectangle is the clip
//! region of the grid and the outline of the margin guide.

use gridkit_core::units::{mm_to_device_px, mm_to_px};
use gridkit_core::{Margins, PageSettings};

/// Axis-aligned rectangle in surface pixels.
///
/// Width and height may be zero or negative when margins consume the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InnerRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl InnerRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when there is no drawable area
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite())
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Convert to a tiny-skia rect; `None` when empty
    pub fn to_skia(&self) -> Option<tiny_skia::Rect> {
        if self.is_empty() {
            return None;
        }
        tiny_skia::Rect::from_xywh(
            self.x as f32,
            self.y as f32,
            self.width as f32,
            self.height as f32,
        )
    }
}

/// Resolved page: physical size, surface size and inner rectangle
///
/// The surface is the page size rounded to whole pixels. The inner rectangle
/// is that rounded size less the exact margins, so its far edges can sit up
/// to half a pixel off the physical page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f64,
    pub height_mm: f64,
    /// Surface size in whole device pixels
    pub width_px: u32,
    pub height_px: u32,
    pub inner: InnerRect,
}

impl PageGeometry {
    /// Resolve page settings and margins.
    pub fn resolve(page: &PageSettings, margins: &Margins) -> Self {
        let (width_mm, height_mm) = page.size_mm();
        let width_px = mm_to_device_px(width_mm);
        let height_px = mm_to_device_px(height_mm);

        let inner = InnerRect::new(
            mm_to_px(margins.left),
            mm_to_px(margins.top),
            width_px as f64 - mm_to_px(margins.horizontal()),
            height_px as f64 - mm_to_px(margins.vertical()),
        );

        Self {
            width_mm,
            height_mm,
            width_px,
            height_px,
            inner,
        }
    }

    /// Surface size as a pair
    pub fn surface_size(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }

    /// Page center in surface pixels
    pub fn center(&self) -> (f64, f64) {
        (self.width_px as f64 / 2.0, self.height_px as f64 / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridkit_core::units::px_to_mm;
    use gridkit_core::PagePreset;

    #[test]
    fn test_a4_landscape_inner_rect() {
        let geometry = PageGeometry::resolve(&PageSettings::default(), &Margins::uniform(10.0));
        assert_eq!(geometry.surface_size(), (1123, 794));
        assert!((geometry.inner.x - mm_to_px(10.0)).abs() < 1e-9);
        assert!((geometry.inner.y - mm_to_px(10.0)).abs() < 1e-9);

        assert!((geometry.inner.width - mm_to_px(277.0)).abs() <= 0.5);
        assert!((geometry.inner.height - mm_to_px(190.0)).abs() <= 0.5);
    }

    #[test]
    fn test_inner_rect_ends_at_rounded_surface_edge() {
        let margins = Margins::uniform(10.0);
        let geometry = PageGeometry::resolve(&PageSettings::default(), &margins);
        assert!((geometry.inner.right() - (1123.0 - mm_to_px(10.0))).abs() < 1e-9);
        assert!((geometry.inner.bottom() - (794.0 - mm_to_px(10.0))).abs() < 1e-9);
        assert!((px_to_mm(geometry.inner.width) - 277.0).abs() > 1e-3);
    }

    #[test]
    fn test_custom_page_uses_stored_size() {
        let mut page = PageSettings::default();
        page.set_custom_width(100.0);
        page.set_custom_height(50.0);
        let geometry = PageGeometry::resolve(&page, &Margins::uniform(0.0));
        assert_eq!(geometry.width_mm, 100.0);
        assert_eq!(geometry.height_mm, 50.0);
        assert_eq!(geometry.surface_size(), (378, 189));
        assert_eq!(geometry.inner.width, 378.0);
        assert_eq!(geometry.inner.height, 189.0);
    }

    #[test]
    fn test_margins_consuming_page_give_empty_rect() {
        let mut page = PageSettings::default();
        page.select_preset(PagePreset::Custom);
        page.set_custom_width(60.0);
        page.set_custom_height(60.0);
        let geometry = PageGeometry::resolve(&page, &Margins::uniform(50.0));
        assert!(geometry.inner.width < 0.0);
        assert!(geometry.inner.is_empty());
        assert!(geometry.inner.to_skia().is_none());
    }

    #[test]
    fn test_center() {
        let geometry = PageGeometry::resolve(&PageSettings::default(), &Margins::default());
        assert_eq!(geometry.center(), (561.5, 397.0));
    }
}
