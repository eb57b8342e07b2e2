//! Integration tests for page compositing

use gridkit_core::units::mm_to_px;
use gridkit_core::{
    data_url, ConfigChange, Configuration, GridType, PagePreset, RotateDirection, ZoomDirection,
};
use gridkit_designer::{render, wheel_change, BackgroundImage, DragGesture};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// 40x20 image, left half red, right half blue
fn asymmetric_png() -> Vec<u8> {
    let img = RgbaImage::from_fn(40, 20, |x, _| {
        if x < 20 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 255, 255])
        }
    });
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

fn page_with_image() -> (Configuration, BackgroundImage) {
    let bytes = asymmetric_png();
    let mut config = Configuration::default();
    config.apply(ConfigChange::PagePreset(PagePreset::Custom));
    config.apply(ConfigChange::PageWidth(50.0));
    config.apply(ConfigChange::PageHeight(30.0));
    config.apply(ConfigChange::BackgroundAlpha(1.0));
    config.apply(ConfigChange::HexAlpha(0.0));
    config.apply(ConfigChange::BackgroundImage {
        data_url: data_url::encode("image/png", &bytes),
        form_scale_percent: 200.0,
    });
    let image = BackgroundImage::from_bytes(&bytes).unwrap();
    (config, image)
}

#[test]
fn test_four_quarter_turns_render_like_none() {
    let (config, image) = page_with_image();
    let baseline = render(&config, Some(&image)).unwrap();

    let mut turned = config.clone();
    for _ in 0..4 {
        turned.apply(ConfigChange::RotateBackground(RotateDirection::Right));
    }
    assert_ne!(turned.background.rotation, config.background.rotation);
    assert_eq!(render(&turned, Some(&image)).unwrap().data(), baseline.data());

    let mut counter = config.clone();
    for _ in 0..4 {
        counter.apply(ConfigChange::RotateBackground(RotateDirection::Left));
    }
    assert_eq!(render(&counter, Some(&image)).unwrap().data(), baseline.data());
}

#[test]
fn test_single_quarter_turn_changes_pixels() {
    let (config, image) = page_with_image();
    let baseline = render(&config, Some(&image)).unwrap();

    let mut turned = config.clone();
    turned.apply(ConfigChange::RotateBackground(RotateDirection::Right));
    assert_ne!(render(&turned, Some(&image)).unwrap().data(), baseline.data());
}

#[test]
fn test_background_is_centered_on_page() {
    let (config, image) = page_with_image();
    let surface = render(&config, Some(&image)).unwrap();
    let (w, h) = surface.size();
    let (cx, cy) = (w / 2, h / 2);

    // Scaled 2x: red spans 40 px left of center, blue 40 px right
    let [r, _, b, _] = surface.pixel(cx - 15, cy + 3).unwrap();
    assert!(r > 200 && b < 60, "expected red left of center");
    let [r, _, b, _] = surface.pixel(cx + 15, cy + 3).unwrap();
    assert!(b > 200 && r < 60, "expected blue right of center");
}

#[test]
fn test_pan_moves_background() {
    let (mut config, image) = page_with_image();
    let mut drag = DragGesture::new();
    assert!(drag.press(100.0, 100.0, config.background.has_image()));
    let change = drag.drag_to(130.0, 100.0).unwrap();
    config.apply(change);
    assert_eq!(config.background.offset_x, 30.0);

    let surface = render(&config, Some(&image)).unwrap();
    let (w, h) = surface.size();
    // Page center is now inside the red half
    let [r, _, b, _] = surface.pixel(w / 2, h / 2 + 3).unwrap();
    assert!(r > 200 && b < 60);
}

#[test]
fn test_missing_bitmap_skips_layer() {
    let (config, _image) = page_with_image();
    let surface = render(&config, None).unwrap();
    let (w, h) = surface.size();
    assert_eq!(surface.pixel(w / 2, h / 2 + 3), Some([255, 255, 255, 255]));
}

#[test]
fn test_wheel_zoom_clamps_at_400_percent() {
    let (mut config, _image) = page_with_image();
    config.apply(ConfigChange::BackgroundScalePercent(500.0));
    assert_eq!(config.background.scale_percent(), 400.0);

    for _ in 0..10 {
        config.apply(wheel_change(-1.0).unwrap());
    }
    assert_eq!(config.background.scale, 4.0);

    config.apply(ConfigChange::ZoomBackground(ZoomDirection::Out));
    assert!((config.background.scale - 3.8).abs() < 1e-12);
}

#[test]
fn test_wheel_ignored_without_image() {
    let mut config = Configuration::default();
    config.apply(wheel_change(-1.0).unwrap());
    assert_eq!(config.background.scale, 1.0);
}

#[test]
fn test_degenerate_inner_rect_draws_only_fill() {
    let mut config = Configuration::default();
    config.apply(ConfigChange::GridType(GridType::Square));
    config.apply(ConfigChange::PagePreset(PagePreset::Custom));
    config.apply(ConfigChange::PageWidth(30.0));
    config.apply(ConfigChange::PageHeight(30.0));
    config.apply(ConfigChange::UniformMargin(20.0));

    let surface = render(&config, None).unwrap();
    assert!(surface
        .to_rgb_image()
        .pixels()
        .all(|p| p.0 == [255, 255, 255]));
}

#[test]
fn test_margin_guide_is_dashed() {
    let mut config = Configuration::default();
    config.apply(ConfigChange::HexAlpha(0.0));
    let surface = render(&config, None).unwrap();

    let edge = mm_to_px(10.0);
    let rows = [edge.floor() as u32, edge.floor() as u32 + 1];
    // First dash runs 4 px right from the inner corner, then a 4 px gap
    let on_x = edge.ceil() as u32 + 1;
    let off_x = (edge + 5.5).floor() as u32;

    let darkest_on = rows
        .iter()
        .map(|&y| surface.pixel(on_x, y).unwrap()[0])
        .min()
        .unwrap();
    assert!(darkest_on < 255);
    for y in rows {
        assert_eq!(surface.pixel(off_x, y), Some([255, 255, 255, 255]));
    }
}
