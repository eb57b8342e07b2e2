//! Page size selection

use crate::constants::{PAGE_MAX_MM, PAGE_MIN_MM};
use crate::units::clamp_field;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named paper size or free custom dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PagePreset {
    #[serde(alias = "A4L")]
    A4Landscape,
    #[serde(alias = "A4P")]
    A4Portrait,
    #[serde(alias = "LetterL")]
    LetterLandscape,
    #[serde(alias = "LetterP")]
    LetterPortrait,
    Custom,
}

impl PagePreset {
    /// Fixed physical size `(width_mm, height_mm)`, `None` for `Custom`
    pub fn dimensions_mm(&self) -> Option<(f64, f64)> {
        match self {
            Self::A4Landscape => Some((297.0, 210.0)),
            Self::A4Portrait => Some((210.0, 297.0)),
            Self::LetterLandscape => Some((279.4, 215.9)),
            Self::LetterPortrait => Some((215.9, 279.4)),
            Self::Custom => None,
        }
    }
}

impl Default for PagePreset {
    fn default() -> Self {
        Self::A4Landscape
    }
}

impl fmt::Display for PagePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A4Landscape => write!(f, "A4 Landscape"),
            Self::A4Portrait => write!(f, "A4 Portrait"),
            Self::LetterLandscape => write!(f, "Letter Landscape"),
            Self::LetterPortrait => write!(f, "Letter Portrait"),
            Self::Custom => write!(f, "Custom"),
        }
    }
}

impl FromStr for PagePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "a4landscape" | "a4l" | "a4-landscape" => Ok(Self::A4Landscape),
            "a4portrait" | "a4p" | "a4-portrait" => Ok(Self::A4Portrait),
            "letterlandscape" | "letterl" | "letter-landscape" => Ok(Self::LetterLandscape),
            "letterportrait" | "letterp" | "letter-portrait" => Ok(Self::LetterPortrait),
            "custom" => Ok(Self::Custom),
            _ => Err(format!("Unknown page preset: {}", s)),
        }
    }
}

/// Page size settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSettings {
    pub preset: PagePreset,
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageSettings {
    /// Physical size in effect: the preset's fixed size, or the stored
    /// custom values.
    pub fn size_mm(&self) -> (f64, f64) {
        self.preset
            .dimensions_mm()
            .unwrap_or((self.width_mm, self.height_mm))
    }

    /// Switch preset. A fixed preset overwrites the stored dimensions;
    /// `Custom` keeps whatever is stored.
    pub fn select_preset(&mut self, preset: PagePreset) {
        self.preset = preset;
        if let Some((w, h)) = preset.dimensions_mm() {
            self.width_mm = w;
            self.height_mm = h;
        }
    }

    /// Edit the width field; this always switches to `Custom`.
    pub fn set_custom_width(&mut self, width_mm: f64) {
        self.preset = PagePreset::Custom;
        self.width_mm = clamp_field(width_mm, PAGE_MIN_MM, PAGE_MAX_MM);
    }

    /// Edit the height field; this always switches to `Custom`.
    pub fn set_custom_height(&mut self, height_mm: f64) {
        self.preset = PagePreset::Custom;
        self.height_mm = clamp_field(height_mm, PAGE_MIN_MM, PAGE_MAX_MM);
    }

    /// Fixed presets get their exact size back; custom sizes are clamped.
    pub fn sanitize(&mut self) {
        match self.preset.dimensions_mm() {
            Some(_) => self.select_preset(self.preset),
            None => {
                self.width_mm = clamp_field(self.width_mm, PAGE_MIN_MM, PAGE_MAX_MM);
                self.height_mm = clamp_field(self.height_mm, PAGE_MIN_MM, PAGE_MAX_MM);
            }
        }
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            preset: PagePreset::A4Landscape,
            width_mm: 297.0,
            height_mm: 210.0,
        }
    }
}
