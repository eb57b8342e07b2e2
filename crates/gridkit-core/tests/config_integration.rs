//! Integration tests for the configuration change model

use gridkit_core::constants::{BG_SCALE_MAX, BG_SCALE_MIN};
use gridkit_core::{
    apply_change, clamp_field, mm_to_px, px_to_mm, ConfigChange, Configuration, PagePreset, Side,
    ZoomDirection,
};
use proptest::prelude::*;

fn with_image() -> Configuration {
    apply_change(
        &Configuration::default(),
        ConfigChange::BackgroundImage {
            data_url: "data:image/png;base64,AA==".to_string(),
            form_scale_percent: 100.0,
        },
    )
}

#[test]
fn test_custom_then_a4_portrait_uses_exact_preset_size() {
    let mut config = Configuration::default();
    config.apply(ConfigChange::PagePreset(PagePreset::Custom));
    config.apply(ConfigChange::PageWidth(500.0));
    config.apply(ConfigChange::PageHeight(500.0));
    assert_eq!(config.page.size_mm(), (500.0, 500.0));

    config.apply(ConfigChange::PagePreset(PagePreset::A4Portrait));
    assert_eq!(config.page.width_mm, 210.0);
    assert_eq!(config.page.height_mm, 297.0);
}

#[test]
fn test_editing_width_switches_to_custom() {
    let mut config = Configuration::default();
    config.apply(ConfigChange::PageWidth(5000.0));
    assert_eq!(config.page.preset, PagePreset::Custom);
    assert_eq!(config.page.width_mm, 2000.0);
    assert_eq!(config.page.height_mm, 210.0);
}

#[test]
fn test_form_text_flows_through_clamps() {
    let mut config = Configuration::default();
    for (key, value) in [
        ("hex-size", "0"),
        ("square-size", "250"),
        ("hex-line-width", "-3"),
        ("bg-alpha", "abc"),
        ("margin", "80"),
    ] {
        config.apply(ConfigChange::parse(key, value).unwrap());
    }

    assert_eq!(config.hex.size_mm, 2.0);
    assert_eq!(config.square.size_mm, 100.0);
    assert_eq!(config.hex.line_width_mm, 0.1);
    assert_eq!(config.background.alpha, 0.0);
    assert_eq!(config.margins.top, 50.0);
    assert_eq!(config.margins.uniform_value, 50.0);
}

#[test]
fn test_side_margin_keeps_stale_uniform_value() {
    let mut config = Configuration::default();
    config.apply(ConfigChange::Margin(Side::Top, 20.0));
    assert_eq!(config.margins.top, 20.0);
    assert_eq!(config.margins.uniform_value, 10.0);

    config.apply(ConfigChange::Margin(Side::Top, 10.0));
    assert!(config.margins.is_uniform());
    assert_eq!(config.margins.uniform_value, 10.0);
}

#[test]
fn test_image_load_resets_pan_and_applies_form_scale() {
    let mut config = with_image();
    config.apply(ConfigChange::PanBackground { dx: 40.0, dy: 12.0 });
    config.apply(ConfigChange::BackgroundImage {
        data_url: "data:image/png;base64,AQ==".to_string(),
        form_scale_percent: 250.0,
    });
    assert_eq!(
        (config.background.offset_x, config.background.offset_y),
        (0.0, 0.0)
    );
    assert_eq!(config.background.scale, 2.5);
}

#[test]
fn test_reset_pan_preserves_scale_rotation_alpha() {
    let mut config = with_image();
    config.apply(ConfigChange::PanBackground { dx: 3.0, dy: 4.0 });
    config.apply(ConfigChange::ZoomBackground(ZoomDirection::In));
    config.apply(ConfigChange::parse_action("rotate-left").unwrap());
    config.apply(ConfigChange::BackgroundAlpha(0.4));
    let before = config.background.clone();

    config.apply(ConfigChange::ResetBackgroundPan);
    assert_eq!(config.background.offset_x, 0.0);
    assert_eq!(config.background.offset_y, 0.0);
    assert_eq!(config.background.scale, before.scale);
    assert_eq!(config.background.rotation, before.rotation);
    assert_eq!(config.background.alpha, before.alpha);
}

#[test]
fn test_export_stem() {
    let mut config = Configuration::default();
    assert_eq!(config.export_stem(), "My Project");
    config.apply(ConfigChange::ProjectName(String::new()));
    assert_eq!(config.export_stem(), "tabletop");
}

proptest! {
    #[test]
    fn prop_mm_px_round_trip(mm in 0.0f64..5000.0) {
        prop_assert!((px_to_mm(mm_to_px(mm)) - mm).abs() < 1e-9);
    }

    #[test]
    fn prop_clamp_stays_in_bounds(value in any::<f64>(), min in -100.0f64..0.0, span in 0.0f64..100.0) {
        let max = min + span;
        let clamped = clamp_field(value, min, max);
        prop_assert!(clamped >= min && clamped <= max);
    }

    #[test]
    fn prop_zoom_stays_in_bounds(steps in prop::collection::vec(any::<bool>(), 0..200)) {
        let mut config = with_image();
        for zoom_in in steps {
            let direction = if zoom_in { ZoomDirection::In } else { ZoomDirection::Out };
            config.apply(ConfigChange::ZoomBackground(direction));
            prop_assert!(config.background.scale >= BG_SCALE_MIN);
            prop_assert!(config.background.scale <= BG_SCALE_MAX);
        }
    }

    #[test]
    fn prop_pan_accumulates_deltas(deltas in prop::collection::vec((-50i32..50, -50i32..50), 0..40)) {
        let mut config = with_image();
        let (mut sx, mut sy) = (0.0, 0.0);
        for (dx, dy) in deltas {
            config.apply(ConfigChange::PanBackground { dx: dx as f64, dy: dy as f64 });
            sx += dx as f64;
            sy += dy as f64;
        }
        prop_assert_eq!(config.background.offset_x, sx);
        prop_assert_eq!(config.background.offset_y, sy);
    }
}
