//! Configuration changes
//!
//! Every user edit is expressed as a [`ConfigChange`] and applied with
//! [`apply_change`]. Numeric values are clamped on application, never
//! rejected; form text goes through [`ConfigChange::parse`], where anything
//! non-numeric becomes `NaN` and therefore the field's minimum.

use super::background::{RotateDirection, ZoomDirection};
use super::grid::{GridType, HexOrientation};
use super::margins::Side;
use super::page::PagePreset;
use super::Configuration;
use crate::color::Rgb;
use crate::error::ChangeError;
use crate::units::parse_field;
use tracing::debug;

/// A single edit to the configuration document
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigChange {
    ProjectName(String),
    PagePreset(PagePreset),
    PageWidth(f64),
    PageHeight(f64),
    UniformMargin(f64),
    Margin(Side, f64),
    GridType(GridType),
    GridColor(Rgb),
    HexSize(f64),
    HexOrientation(HexOrientation),
    HexLineWidth(f64),
    HexAlpha(f64),
    SquareSize(f64),
    SquareLineWidth(f64),
    SquareAlpha(f64),
    BackgroundAlpha(f64),
    BackgroundScalePercent(f64),
    BackgroundFillColor(Rgb),
    /// A new image finished loading
    BackgroundImage {
        data_url: String,
        form_scale_percent: f64,
    },
    ClearBackgroundImage,
    /// Drag delta in surface pixels
    PanBackground { dx: f64, dy: f64 },
    ZoomBackground(ZoomDirection),
    RotateBackground(RotateDirection),
    ResetBackgroundPan,
    /// Back to the default document
    Reset,
}

impl ConfigChange {
    /// Map a form field key and its raw text onto a change.
    pub fn parse(key: &str, value: &str) -> Result<Self, ChangeError> {
        let invalid = || ChangeError::InvalidChoice {
            key: key.to_string(),
            value: value.to_string(),
        };
        let number = parse_field(value);

        let change = match key {
            "project-name" => Self::ProjectName(value.to_string()),
            "page-preset" => Self::PagePreset(value.parse().map_err(|_| invalid())?),
            "page-width" => Self::PageWidth(number),
            "page-height" => Self::PageHeight(number),
            "margin" => Self::UniformMargin(number),
            "margin-top" => Self::Margin(Side::Top, number),
            "margin-right" => Self::Margin(Side::Right, number),
            "margin-bottom" => Self::Margin(Side::Bottom, number),
            "margin-left" => Self::Margin(Side::Left, number),
            "grid-type" => Self::GridType(value.parse().map_err(|_| invalid())?),
            "grid-color" => Self::GridColor(value.parse()?),
            "hex-size" => Self::HexSize(number),
            "hex-orientation" => Self::HexOrientation(value.parse().map_err(|_| invalid())?),
            "hex-line-width" => Self::HexLineWidth(number),
            "hex-alpha" => Self::HexAlpha(number),
            "square-size" => Self::SquareSize(number),
            "square-line-width" => Self::SquareLineWidth(number),
            "square-alpha" => Self::SquareAlpha(number),
            "bg-alpha" => Self::BackgroundAlpha(number),
            "bg-scale" => Self::BackgroundScalePercent(number),
            "bg-color" => Self::BackgroundFillColor(value.parse()?),
            _ => {
                return Err(ChangeError::UnknownKey {
                    key: key.to_string(),
                })
            }
        };
        Ok(change)
    }

    /// Map a button or gesture name onto a change.
    pub fn parse_action(name: &str) -> Result<Self, ChangeError> {
        match name {
            "rotate-left" => Ok(Self::RotateBackground(RotateDirection::Left)),
            "rotate-right" => Ok(Self::RotateBackground(RotateDirection::Right)),
            "zoom-in" => Ok(Self::ZoomBackground(ZoomDirection::In)),
            "zoom-out" => Ok(Self::ZoomBackground(ZoomDirection::Out)),
            "reset-pan" => Ok(Self::ResetBackgroundPan),
            "clear-background" => Ok(Self::ClearBackgroundImage),
            "reset" => Ok(Self::Reset),
            _ => Err(ChangeError::UnknownKey {
                key: name.to_string(),
            }),
        }
    }

    /// Short name for log lines (image payloads are never logged)
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ProjectName(_) => "project_name",
            Self::PagePreset(_) => "page_preset",
            Self::PageWidth(_) => "page_width",
            Self::PageHeight(_) => "page_height",
            Self::UniformMargin(_) => "uniform_margin",
            Self::Margin(..) => "margin",
            Self::GridType(_) => "grid_type",
            Self::GridColor(_) => "grid_color",
            Self::HexSize(_) => "hex_size",
            Self::HexOrientation(_) => "hex_orientation",
            Self::HexLineWidth(_) => "hex_line_width",
            Self::HexAlpha(_) => "hex_alpha",
            Self::SquareSize(_) => "square_size",
            Self::SquareLineWidth(_) => "square_line_width",
            Self::SquareAlpha(_) => "square_alpha",
            Self::BackgroundAlpha(_) => "background_alpha",
            Self::BackgroundScalePercent(_) => "background_scale",
            Self::BackgroundFillColor(_) => "background_fill",
            Self::BackgroundImage { .. } => "background_image",
            Self::ClearBackgroundImage => "clear_background_image",
            Self::PanBackground { .. } => "pan_background",
            Self::ZoomBackground(_) => "zoom_background",
            Self::RotateBackground(_) => "rotate_background",
            Self::ResetBackgroundPan => "reset_background_pan",
            Self::Reset => "reset",
        }
    }

    /// Whether the change alters the render output.
    ///
    /// Renaming the project only touches the export file name.
    pub fn affects_render(&self) -> bool {
        !matches!(self, Self::ProjectName(_))
    }
}

/// Apply a change to a copy of the document and return the copy.
pub fn apply_change(config: &Configuration, change: ConfigChange) -> Configuration {
    let mut next = config.clone();
    next.apply(change);
    next
}

impl Configuration {
    /// Apply a change in place.
    pub fn apply(&mut self, change: ConfigChange) {
        debug!(change = change.kind(), "Applying configuration change");
        match change {
            ConfigChange::ProjectName(name) => self.project_name = name,
            ConfigChange::PagePreset(preset) => self.page.select_preset(preset),
            ConfigChange::PageWidth(mm) => self.page.set_custom_width(mm),
            ConfigChange::PageHeight(mm) => self.page.set_custom_height(mm),
            ConfigChange::UniformMargin(mm) => self.margins.set_uniform(mm),
            ConfigChange::Margin(side, mm) => self.margins.set_side(side, mm),
            ConfigChange::GridType(grid_type) => self.grid.grid_type = grid_type,
            ConfigChange::GridColor(color) => self.grid.color = color,
            ConfigChange::HexSize(mm) => self.hex.set_size(mm),
            ConfigChange::HexOrientation(orientation) => self.hex.orientation = orientation,
            ConfigChange::HexLineWidth(mm) => self.hex.set_line_width(mm),
            ConfigChange::HexAlpha(alpha) => self.hex.set_alpha(alpha),
            ConfigChange::SquareSize(mm) => self.square.set_size(mm),
            ConfigChange::SquareLineWidth(mm) => self.square.set_line_width(mm),
            ConfigChange::SquareAlpha(alpha) => self.square.set_alpha(alpha),
            ConfigChange::BackgroundAlpha(alpha) => self.background.set_alpha(alpha),
            ConfigChange::BackgroundScalePercent(percent) => {
                self.background.set_scale_percent(percent)
            }
            ConfigChange::BackgroundFillColor(color) => self.background.fill_color = color,
            ConfigChange::BackgroundImage {
                data_url,
                form_scale_percent,
            } => self.background.attach_image(data_url, form_scale_percent),
            ConfigChange::ClearBackgroundImage => self.background.detach_image(),
            ConfigChange::PanBackground { dx, dy } => {
                // Gestures only act on a loaded image
                if self.background.has_image() {
                    self.background.pan_by(dx, dy);
                }
            }
            ConfigChange::ZoomBackground(direction) => {
                if self.background.has_image() {
                    self.background.zoom(direction);
                }
            }
            ConfigChange::RotateBackground(direction) => self.background.rotate(direction),
            ConfigChange::ResetBackgroundPan => self.background.reset_pan(),
            ConfigChange::Reset => *self = Configuration::default(),
        }
    }
}
