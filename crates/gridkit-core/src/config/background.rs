//! Background image placement settings and gesture accumulation

use super::grid::clamp_alpha;
use crate::color::Rgb;
use crate::constants::{
    BG_SCALE_MAX, BG_SCALE_MIN, BG_SCALE_PERCENT_MAX, BG_SCALE_PERCENT_MIN, BG_ZOOM_IN_FACTOR,
    BG_ZOOM_OUT_FACTOR,
};
use crate::units::clamp_field;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Wheel direction for interactive zoom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Quarter-turn direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDirection {
    /// Counter-clockwise on screen
    Left,
    /// Clockwise on screen
    Right,
}

/// Background image settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundSettings {
    /// Embedded image as a data URL
    pub image_data: Option<String>,
    /// Pan from page center (px)
    pub offset_x: f64,
    pub offset_y: f64,
    /// Uniform scale factor
    pub scale: f64,
    /// Radians; never normalized when stored
    pub rotation: f64,
    pub alpha: f64,
    /// Page fill beneath everything else
    pub fill_color: Rgb,
}

impl BackgroundSettings {
    pub fn has_image(&self) -> bool {
        self.image_data.is_some()
    }

    /// Accumulate a drag delta into the pan offset.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Zero the pan; scale, rotation and alpha are kept.
    pub fn reset_pan(&mut self) {
        self.offset_x = 0.0;
        self.offset_y = 0.0;
    }

    /// Multiply the scale by one wheel step and clamp.
    pub fn zoom(&mut self, direction: ZoomDirection) {
        let factor = match direction {
            ZoomDirection::In => BG_ZOOM_IN_FACTOR,
            ZoomDirection::Out => BG_ZOOM_OUT_FACTOR,
        };
        self.scale = clamp_field(self.scale * factor, BG_SCALE_MIN, BG_SCALE_MAX);
    }

    /// Set the scale from the percentage form field.
    pub fn set_scale_percent(&mut self, percent: f64) {
        self.scale = clamp_field(percent, BG_SCALE_PERCENT_MIN, BG_SCALE_PERCENT_MAX) / 100.0;
    }

    /// Scale as a whole percentage, as shown in the form.
    pub fn scale_percent(&self) -> f64 {
        (self.scale * 100.0).round()
    }

    pub fn rotate(&mut self, direction: RotateDirection) {
        match direction {
            RotateDirection::Left => self.rotation -= FRAC_PI_2,
            RotateDirection::Right => self.rotation += FRAC_PI_2,
        }
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = clamp_alpha(alpha);
    }

    /// Attach a freshly imported image: pan is reset and the scale from the
    /// form field is applied.
    pub fn attach_image(&mut self, data_url: String, form_scale_percent: f64) {
        self.image_data = Some(data_url);
        self.reset_pan();
        self.set_scale_percent(form_scale_percent);
    }

    pub fn detach_image(&mut self) {
        self.image_data = None;
    }

    /// Clamp scale to the zoom range and alpha to `[0, 1]`.
    pub fn sanitize(&mut self) {
        self.scale = clamp_field(self.scale, BG_SCALE_MIN, BG_SCALE_MAX);
        self.set_alpha(self.alpha);
    }
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            image_data: None,
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
            rotation: 0.0,
            alpha: 0.8,
            fill_color: Rgb::WHITE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_pan_accumulates() {
        let mut bg = BackgroundSettings::default();
        bg.pan_by(10.0, -5.0);
        bg.pan_by(2.5, 1.0);
        assert_eq!((bg.offset_x, bg.offset_y), (12.5, -4.0));
    }

    #[test]
    fn test_reset_pan_keeps_other_fields() {
        let mut bg = BackgroundSettings::default();
        bg.pan_by(30.0, 40.0);
        bg.scale = 2.0;
        bg.rotate(RotateDirection::Right);
        bg.set_alpha(0.3);
        bg.reset_pan();
        assert_eq!((bg.offset_x, bg.offset_y), (0.0, 0.0));
        assert_eq!(bg.scale, 2.0);
        assert_eq!(bg.rotation, FRAC_PI_2);
        assert_eq!(bg.alpha, 0.3);
    }

    #[test]
    fn test_zoom_steps_and_clamps() {
        let mut bg = BackgroundSettings::default();
        bg.zoom(ZoomDirection::In);
        assert!((bg.scale - 1.05).abs() < 1e-12);
        bg.zoom(ZoomDirection::Out);
        assert!((bg.scale - 0.9975).abs() < 1e-12);

        bg.scale = 3.9;
        bg.zoom(ZoomDirection::In);
        assert_eq!(bg.scale, 4.0);

        bg.scale = 0.1;
        bg.zoom(ZoomDirection::Out);
        assert_eq!(bg.scale, 0.1);
    }

    #[test]
    fn test_scale_percent_form_clamps() {
        let mut bg = BackgroundSettings::default();
        bg.set_scale_percent(500.0);
        assert_eq!(bg.scale, 4.0);
        bg.set_scale_percent(5.0);
        assert_eq!(bg.scale, 0.1);
        bg.set_scale_percent(f64::NAN);
        assert_eq!(bg.scale, 0.1);
        bg.set_scale_percent(150.0);
        assert_eq!(bg.scale_percent(), 150.0);
    }

    #[test]
    fn test_rotation_is_not_normalized() {
        let mut bg = BackgroundSettings::default();
        for _ in 0..6 {
            bg.rotate(RotateDirection::Right);
        }
        assert!((bg.rotation - 3.0 * PI).abs() < 1e-12);
        bg.rotate(RotateDirection::Left);
        assert!((bg.rotation - 2.5 * PI).abs() < 1e-12);
    }

    #[test]
    fn test_attach_image_resets_pan_and_applies_form_scale() {
        let mut bg = BackgroundSettings::default();
        bg.pan_by(100.0, 100.0);
        bg.attach_image("data:image/png;base64,AA==".to_string(), 250.0);
        assert!(bg.has_image());
        assert_eq!((bg.offset_x, bg.offset_y), (0.0, 0.0));
        assert_eq!(bg.scale, 2.5);
    }
}
