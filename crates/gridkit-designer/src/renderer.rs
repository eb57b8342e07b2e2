//! Page renderer
//! Composites the page into a raster surface using tiny-skia.
//!
//! Layers, bottom to top:
//! - Background fill color over the whole surface
//! - Background bitmap (placed, rotated, scaled, at its opacity; not clipped)
//! - Dashed margin guide around the inner rectangle
//! - Active grid, clipped to the inner rectangle
//!
//! Rendering is a pure function of the configuration and the decoded bitmap.

use crate::background::{placement_transform, BackgroundImage};
use crate::grid::{self, GridGeometry, GridStroke};
use crate::page::{InnerRect, PageGeometry};
use gridkit_core::{Configuration, Rgb};
use image::{RgbImage, RgbaImage};
use thiserror::Error;
use tiny_skia::{
    Color, FillRule, FilterQuality, Mask, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Stroke,
    StrokeDash, Transform,
};
use tracing::debug;

/// Margin guide dash pattern, on then off (px)
const GUIDE_DASH: [f32; 2] = [4.0, 4.0];
const GUIDE_WIDTH_PX: f32 = 1.0;
const GUIDE_ALPHA: f32 = 0.15;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Cannot allocate a {width}x{height} surface")]
    SurfaceSize { width: u32, height: u32 },
}

/// A rendered page
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pixmap: Pixmap,
}

impl Surface {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Straight-alpha RGBA of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Raw premultiplied RGBA bytes
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        let width = self.width();
        RgbaImage::from_fn(width, self.height(), |x, y| {
            image::Rgba(self.pixel(x, y).unwrap_or([0, 0, 0, 0]))
        })
    }

    /// Drop alpha; the surface is opaque since the fill covers it
    pub fn to_rgb_image(&self) -> RgbImage {
        let data = self.pixmap.data();
        let width = self.width();
        RgbImage::from_fn(width, self.height(), |x, y| {
            let idx = ((y * width + x) * 4) as usize;
            image::Rgb([data[idx], data[idx + 1], data[idx + 2]])
        })
    }
}

fn color(rgb: Rgb, alpha: f64) -> Color {
    let mut color = Color::from_rgba8(rgb.r, rgb.g, rgb.b, 255);
    let alpha = if alpha.is_finite() { alpha } else { 0.0 };
    color.set_alpha(alpha.clamp(0.0, 1.0) as f32);
    color
}

/// Render the page for a configuration.
///
/// `background` is the decoded form of `config.background.image_data`;
/// when `None` the bitmap layer is skipped.
pub fn render(
    config: &Configuration,
    background: Option<&BackgroundImage>,
) -> Result<Surface, RenderError> {
    let geometry = PageGeometry::resolve(&config.page, &config.margins);
    let (width, height) = geometry.surface_size();
    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::SurfaceSize { width, height })?;

    pixmap.fill(color(config.background.fill_color, 1.0));

    if let Some(image) = background {
        draw_background(&mut pixmap, config, image, geometry.center());
    }

    draw_margin_guide(&mut pixmap, &geometry.inner);

    let grid = grid::generate(config, &geometry.inner);
    draw_grid(&mut pixmap, &grid, &geometry.inner);

    debug!(
        width,
        height,
        background = background.is_some(),
        strokes = grid.strokes.len(),
        "Rendered page"
    );

    Ok(Surface { pixmap })
}

fn draw_background(
    pixmap: &mut Pixmap,
    config: &Configuration,
    image: &BackgroundImage,
    center: (f64, f64),
) {
    let settings = &config.background;
    let transform = placement_transform(settings, image.width(), image.height(), center);
    let opacity = if settings.alpha.is_finite() {
        settings.alpha.clamp(0.0, 1.0) as f32
    } else {
        0.0
    };

    let paint = PixmapPaint {
        opacity,
        quality: FilterQuality::Bilinear,
        ..Default::default()
    };
    pixmap.draw_pixmap(0, 0, image.pixmap().as_ref(), &paint, transform, None);
}

fn draw_margin_guide(pixmap: &mut Pixmap, inner: &InnerRect) {
    let Some(rect) = inner.to_skia() else {
        return;
    };
    let path = PathBuilder::from_rect(rect);

    let mut paint = Paint::default();
    paint.set_color(color(Rgb::BLACK, GUIDE_ALPHA as f64));
    paint.anti_alias = true;

    let stroke = Stroke {
        width: GUIDE_WIDTH_PX,
        dash: StrokeDash::new(GUIDE_DASH.to_vec(), 0.0),
        ..Default::default()
    };

    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

/// Build one path holding every stroke of the grid
pub fn grid_path(grid: &GridGeometry) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for stroke in &grid.strokes {
        match stroke {
            GridStroke::Line { from, to } => {
                pb.move_to(from.x as f32, from.y as f32);
                pb.line_to(to.x as f32, to.y as f32);
            }
            GridStroke::Hexagon { vertices, .. } => {
                let [first, rest @ ..] = vertices;
                pb.move_to(first.x as f32, first.y as f32);
                for v in rest {
                    pb.line_to(v.x as f32, v.y as f32);
                }
                pb.close();
            }
        }
    }
    pb.finish()
}

fn draw_grid(pixmap: &mut Pixmap, grid: &GridGeometry, inner: &InnerRect) {
    let Some(clip_rect) = inner.to_skia() else {
        return;
    };
    let Some(path) = grid_path(grid) else {
        return;
    };
    let Some(mut clip) = Mask::new(pixmap.width(), pixmap.height()) else {
        return;
    };
    clip.fill_path(
        &PathBuilder::from_rect(clip_rect),
        FillRule::Winding,
        true,
        Transform::identity(),
    );

    let mut paint = Paint::default();
    paint.set_color(color(grid.style.color, grid.style.alpha));
    paint.anti_alias = true;

    let stroke = Stroke {
        width: grid.style.width_px as f32,
        ..Default::default()
    };

    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), Some(&clip));
}
