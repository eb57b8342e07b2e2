//! Background bitmap decoding and placement
//!
//! The stored data URL is decoded once into a premultiplied tiny-skia
//! pixmap. Placement maps bitmap pixels onto the page: the bitmap center is
//! moved to the page center plus the pan offset, then rotated and scaled
//! about that point.

use gridkit_core::{data_url, BackgroundSettings, DataUrlError};
use std::f64::consts::{FRAC_PI_2, TAU};
use thiserror::Error;
use tiny_skia::{ColorU8, IntSize, Pixmap, Transform};

/// Errors raised while turning stored image data into a bitmap
#[derive(Error, Debug)]
pub enum BackgroundError {
    #[error("Invalid image data: {0}")]
    DataUrl(#[from] DataUrlError),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image has unusable dimensions {width}x{height}")]
    Dimensions { width: u32, height: u32 },
}

/// A decoded background bitmap ready for compositing
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundImage {
    pixmap: Pixmap,
}

impl BackgroundImage {
    /// Decode a `data:<mime>;base64,...` URL.
    pub fn from_data_url(url: &str) -> Result<Self, BackgroundError> {
        let (_mime, bytes) = data_url::decode(url)?;
        Self::from_bytes(&bytes)
    }

    /// Decode an encoded image file (any format the image crate reads).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BackgroundError> {
        let decoded = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = decoded.dimensions();
        let size =
            IntSize::from_wh(width, height).ok_or(BackgroundError::Dimensions { width, height })?;

        // tiny-skia expects premultiplied RGBA
        let mut data = decoded.into_raw();
        for px in data.chunks_exact_mut(4) {
            let premultiplied = ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
            px[0] = premultiplied.red();
            px[1] = premultiplied.green();
            px[2] = premultiplied.blue();
        }

        let pixmap =
            Pixmap::from_vec(data, size).ok_or(BackgroundError::Dimensions { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

/// Rotation reduced to one turn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormalizedRotation {
    /// Whole quarter turns clockwise, 0..=3
    Quarter(u8),
    /// Any other angle in degrees, [0, 360)
    Degrees(f64),
}

/// Tolerance when deciding that a rotation is a whole quarter turn (radians)
const QUARTER_TURN_EPSILON: f64 = 1e-9;

/// Reduce a stored rotation modulo a full turn.
///
/// Multiples of a quarter turn snap to an exact quarter so that repeated
/// button presses never accumulate floating point drift in the render.
pub fn normalize_rotation(rotation: f64) -> NormalizedRotation {
    if !rotation.is_finite() {
        return NormalizedRotation::Quarter(0);
    }

    let quarters = rotation / FRAC_PI_2;
    let nearest = quarters.round();
    if ((quarters - nearest) * FRAC_PI_2).abs() < QUARTER_TURN_EPSILON {
        return NormalizedRotation::Quarter(nearest.rem_euclid(4.0) as u8);
    }

    NormalizedRotation::Degrees(rotation.rem_euclid(TAU).to_degrees())
}

fn rotation_transform(rotation: f64) -> Transform {
    match normalize_rotation(rotation) {
        NormalizedRotation::Quarter(q) => {
            let (cos, sin) = match q {
                0 => (1.0, 0.0),
                1 => (0.0, 1.0),
                2 => (-1.0, 0.0),
                _ => (0.0, -1.0),
            };
            Transform::from_row(cos, sin, -sin, cos, 0.0, 0.0)
        }
        NormalizedRotation::Degrees(deg) => Transform::from_rotate(deg as f32),
    }
}

/// Transform from bitmap pixels to surface pixels.
pub fn placement_transform(
    settings: &BackgroundSettings,
    image_width: u32,
    image_height: u32,
    page_center: (f64, f64),
) -> Transform {
    let (cx, cy) = page_center;
    let scale = settings.scale as f32;

    Transform::from_translate(
        (cx + settings.offset_x) as f32,
        (cy + settings.offset_y) as f32,
    )
    .pre_concat(rotation_transform(settings.rotation))
    .pre_scale(scale, scale)
    .pre_translate(-(image_width as f32) / 2.0, -(image_height as f32) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridkit_core::RotateDirection;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use tiny_skia::Point;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 100, 50, 128]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn map(t: Transform, x: f32, y: f32) -> (f32, f32) {
        let mut p = [Point::from_xy(x, y)];
        t.map_points(&mut p);
        (p[0].x, p[0].y)
    }

    #[test]
    fn test_decode_premultiplies() {
        let image = BackgroundImage::from_bytes(&png_bytes(4, 3)).unwrap();
        assert_eq!((image.width(), image.height()), (4, 3));
        let px = image.pixmap().pixel(0, 0).unwrap();
        assert_eq!(px.alpha(), 128);
        assert!(px.red() <= 128);
    }

    #[test]
    fn test_decode_from_data_url() {
        let url = data_url::encode("image/png", &png_bytes(2, 2));
        let image = BackgroundImage::from_data_url(&url).unwrap();
        assert_eq!(image.width(), 2);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(
            BackgroundImage::from_bytes(b"not an image"),
            Err(BackgroundError::Decode(_))
        ));
        assert!(matches!(
            BackgroundImage::from_data_url("nope"),
            Err(BackgroundError::DataUrl(_))
        ));
    }

    #[test]
    fn test_normalize_rotation() {
        assert_eq!(normalize_rotation(0.0), NormalizedRotation::Quarter(0));
        assert_eq!(normalize_rotation(FRAC_PI_2), NormalizedRotation::Quarter(1));
        assert_eq!(normalize_rotation(-FRAC_PI_2), NormalizedRotation::Quarter(3));
        assert_eq!(normalize_rotation(4.0 * FRAC_PI_2), NormalizedRotation::Quarter(0));
        assert_eq!(normalize_rotation(f64::NAN), NormalizedRotation::Quarter(0));

        match normalize_rotation(TAU + 0.5) {
            NormalizedRotation::Degrees(deg) => assert!((deg - 0.5f64.to_degrees()).abs() < 1e-6),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_accumulated_quarter_turns_snap() {
        let mut settings = BackgroundSettings::default();
        for _ in 0..4 {
            settings.rotate(RotateDirection::Right);
        }
        assert_ne!(settings.rotation, 0.0);
        assert_eq!(normalize_rotation(settings.rotation), NormalizedRotation::Quarter(0));
    }

    #[test]
    fn test_placement_centers_image() {
        let settings = BackgroundSettings::default();
        let t = placement_transform(&settings, 100, 50, (200.0, 150.0));
        assert_eq!(map(t, 50.0, 25.0), (200.0, 150.0));
        assert_eq!(map(t, 0.0, 0.0), (150.0, 125.0));
    }

    #[test]
    fn test_placement_applies_pan_scale_and_rotation() {
        let mut settings = BackgroundSettings::default();
        settings.offset_x = 10.0;
        settings.offset_y = -5.0;
        settings.scale = 2.0;
        settings.rotate(RotateDirection::Right);

        let t = placement_transform(&settings, 100, 50, (200.0, 150.0));
        // Center stays at page center plus pan
        assert_eq!(map(t, 50.0, 25.0), (210.0, 145.0));
        // Right edge midpoint: +50 px, scaled to 100, turned clockwise to +y
        let (x, y) = map(t, 100.0, 25.0);
        assert!((x - 210.0).abs() < 1e-4);
        assert!((y - 245.0).abs() < 1e-4);
    }
}
