//! Grid style settings

use crate::color::Rgb;
use crate::constants::{CELL_MAX_MM, CELL_MIN_MM, LINE_WIDTH_MIN_MM};
use crate::units::clamp_field;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Active tiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridType {
    #[serde(alias = "hex")]
    Hex,
    #[serde(alias = "square")]
    Square,
}

impl Default for GridType {
    fn default() -> Self {
        Self::Hex
    }
}

impl fmt::Display for GridType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex => write!(f, "Hex"),
            Self::Square => write!(f, "Square"),
        }
    }
}

impl FromStr for GridType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "square" => Ok(Self::Square),
            _ => Err(format!("Unknown grid type: {}", s)),
        }
    }
}

/// Hexagon orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HexOrientation {
    /// Vertex up
    #[serde(alias = "pointy")]
    Pointy,
    /// Edge up
    #[serde(alias = "flat")]
    Flat,
}

impl Default for HexOrientation {
    fn default() -> Self {
        Self::Pointy
    }
}

impl fmt::Display for HexOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pointy => write!(f, "Pointy"),
            Self::Flat => write!(f, "Flat"),
        }
    }
}

impl FromStr for HexOrientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pointy" => Ok(Self::Pointy),
            "flat" => Ok(Self::Flat),
            _ => Err(format!("Unknown hex orientation: {}", s)),
        }
    }
}

/// Grid type and shared stroke color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    #[serde(rename = "type")]
    pub grid_type: GridType,
    pub color: Rgb,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            grid_type: GridType::Hex,
            color: Rgb::BLACK,
        }
    }
}

/// Hex grid parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HexSettings {
    /// Center-to-vertex distance
    pub size_mm: f64,
    pub orientation: HexOrientation,
    pub line_width_mm: f64,
    pub alpha: f64,
}

impl HexSettings {
    pub fn set_size(&mut self, size_mm: f64) {
        self.size_mm = clamp_cell(size_mm);
    }

    pub fn set_line_width(&mut self, width_mm: f64) {
        self.line_width_mm = clamp_line_width(width_mm);
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = clamp_alpha(alpha);
    }

    pub fn sanitize(&mut self) {
        self.set_size(self.size_mm);
        self.set_line_width(self.line_width_mm);
        self.set_alpha(self.alpha);
    }
}

impl Default for HexSettings {
    fn default() -> Self {
        Self {
            size_mm: 10.0,
            orientation: HexOrientation::Pointy,
            line_width_mm: 0.8,
            alpha: 0.6,
        }
    }
}

/// Square grid parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SquareSettings {
    /// Cell edge length
    pub size_mm: f64,
    pub line_width_mm: f64,
    pub alpha: f64,
}

impl SquareSettings {
    pub fn set_size(&mut self, size_mm: f64) {
        self.size_mm = clamp_cell(size_mm);
    }

    pub fn set_line_width(&mut self, width_mm: f64) {
        self.line_width_mm = clamp_line_width(width_mm);
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = clamp_alpha(alpha);
    }

    pub fn sanitize(&mut self) {
        self.set_size(self.size_mm);
        self.set_line_width(self.line_width_mm);
        self.set_alpha(self.alpha);
    }
}

impl Default for SquareSettings {
    fn default() -> Self {
        Self {
            size_mm: 10.0,
            line_width_mm: 0.8,
            alpha: 0.6,
        }
    }
}

fn clamp_cell(size_mm: f64) -> f64 {
    clamp_field(size_mm, CELL_MIN_MM, CELL_MAX_MM)
}

fn clamp_line_width(width_mm: f64) -> f64 {
    clamp_field(width_mm, LINE_WIDTH_MIN_MM, f64::MAX)
}

pub(crate) fn clamp_alpha(alpha: f64) -> f64 {
    clamp_field(alpha, 0.0, 1.0)
}
