//! The configuration document
//!
//! A single [`Configuration`] holds every input of a render: page size,
//! margins, grid style and background placement. It is serialized as JSON
//! with camelCase keys:
//!
//! ```text
//! {
//!   "projectName": "My Project",
//!   "page":       { "preset", "widthMm", "heightMm" },
//!   "margins":    { "top", "right", "bottom", "left", "uniformValue" },
//!   "grid":       { "type", "color" },
//!   "hex":        { "sizeMm", "orientation", "lineWidthMm", "alpha" },
//!   "square":     { "sizeMm", "lineWidthMm", "alpha" },
//!   "background": { "imageData", "offsetX", "offsetY", "scale",
//!                   "rotation", "alpha", "fillColor" }
//! }
//! ```
//!
//! Every field is required when deserializing; default filling is done by
//! the settings layer before deserialization so that a raw load can tell a
//! complete document from a partial one.

pub mod background;
pub mod change;
pub mod grid;
pub mod margins;
pub mod page;

pub use background::{BackgroundSettings, RotateDirection, ZoomDirection};
pub use change::{apply_change, ConfigChange};
pub use grid::{GridSettings, GridType, HexOrientation, HexSettings, SquareSettings};
pub use margins::{Margins, Side};
pub use page::{PagePreset, PageSettings};

use crate::color::Rgb;
use crate::constants::FALLBACK_EXPORT_NAME;
use serde::{Deserialize, Serialize};

/// Complete page configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub project_name: String,
    pub page: PageSettings,
    pub margins: Margins,
    pub grid: GridSettings,
    pub hex: HexSettings,
    pub square: SquareSettings,
    pub background: BackgroundSettings,
}

impl Configuration {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Stroke color of the active grid
    pub fn grid_color(&self) -> Rgb {
        self.grid.color
    }

    /// Export file stem: the project name, or the fallback when blank.
    ///
    /// Path separators and control characters become `_`, so the stem is
    /// always a single file name component.
    pub fn export_stem(&self) -> String {
        let trimmed = self.project_name.trim();
        if trimmed.is_empty() {
            return FALLBACK_EXPORT_NAME.to_string();
        }
        trimmed
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect()
    }

    /// Pull every numeric field back into its allowed range.
    ///
    /// Stored documents skip the clamping done by [`Configuration::apply`],
    /// so they go through here after loading. Returns `true` when anything
    /// changed.
    pub fn sanitize(&mut self) -> bool {
        let before = (
            self.page.clone(),
            self.margins.clone(),
            self.hex.clone(),
            self.square.clone(),
            self.background.scale,
            self.background.alpha,
        );

        self.page.sanitize();
        self.margins.sanitize();
        self.hex.sanitize();
        self.square.sanitize();
        self.background.sanitize();

        before
            != (
                self.page.clone(),
                self.margins.clone(),
                self.hex.clone(),
                self.square.clone(),
                self.background.scale,
                self.background.alpha,
            )
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            project_name: "My Project".to_string(),
            page: PageSettings::default(),
            margins: Margins::default(),
            grid: GridSettings::default(),
            hex: HexSettings::default(),
            square: SquareSettings::default(),
            background: BackgroundSettings::default(),
        }
    }
}
