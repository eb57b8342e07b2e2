//! Page margins with a mirrored uniform control

use crate::constants::{MARGIN_MAX_MM, MARGIN_MIN_MM};
use crate::units::clamp_field;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One side of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => write!(f, "top"),
            Self::Right => write!(f, "right"),
            Self::Bottom => write!(f, "bottom"),
            Self::Left => write!(f, "left"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "right" => Ok(Self::Right),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            _ => Err(format!("Unknown side: {}", s)),
        }
    }
}

/// Margins in millimeters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
    /// Value of the single "all sides" control
    pub uniform_value: f64,
}

impl Margins {
    pub fn uniform(value: f64) -> Self {
        let v = clamp_field(value, MARGIN_MIN_MM, MARGIN_MAX_MM);
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
            uniform_value: v,
        }
    }

    /// Edit the uniform control: mirrors into all four sides.
    pub fn set_uniform(&mut self, value: f64) {
        *self = Self::uniform(value);
    }

    /// Edit a single side.
    ///
    /// All four sides are re-clamped; the uniform value follows only when
    /// the four sides end up equal, otherwise it keeps its last value.
    pub fn set_side(&mut self, side: Side, value: f64) {
        match side {
            Side::Top => self.top = value,
            Side::Right => self.right = value,
            Side::Bottom => self.bottom = value,
            Side::Left => self.left = value,
        }

        self.clamp_sides();
        if self.is_uniform() {
            self.uniform_value = self.top;
        }
    }

    /// Clamp every stored value without re-syncing the uniform control.
    pub fn sanitize(&mut self) {
        self.clamp_sides();
        self.uniform_value = clamp_field(self.uniform_value, MARGIN_MIN_MM, MARGIN_MAX_MM);
    }

    fn clamp_sides(&mut self) {
        self.top = clamp_field(self.top, MARGIN_MIN_MM, MARGIN_MAX_MM);
        self.right = clamp_field(self.right, MARGIN_MIN_MM, MARGIN_MAX_MM);
        self.bottom = clamp_field(self.bottom, MARGIN_MIN_MM, MARGIN_MAX_MM);
        self.left = clamp_field(self.left, MARGIN_MIN_MM, MARGIN_MAX_MM);
    }

    /// True when all four sides hold the same value
    pub fn is_uniform(&self) -> bool {
        self.top == self.right && self.top == self.bottom && self.top == self.left
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(10.0)
    }
}
