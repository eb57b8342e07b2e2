//! # GridKit Designer
//!
//! Turns a page configuration into pixels: page geometry, grid tiling,
//! background placement, compositing and export.
//!
//! ## Core Components
//!
//! - **Page**: page size in device pixels and the inner drawable rectangle
//! - **Grid**: square and hex lattices as plain stroke geometry
//! - **Background**: bitmap decoding and the placement transform
//! - **Interaction**: drag and wheel gestures mapped to configuration changes
//! - **Loader**: async image file loading guarded by load generations
//! - **Renderer**: layer compositing into a [`Surface`]
//! - **Export**: PNG, JPEG and (with the `pdf` feature) PDF output
//!
//! ## Architecture
//!
//! ```text
//! Configuration
//!   ├── PageGeometry ──┬── grid::generate ──┐
//!   │                  └── InnerRect ───────┤
//!   └── BackgroundSettings ─ placement ─────┴── render ── Surface ── export
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gridkit_core::Configuration;
//! use gridkit_designer::{render, export, ExportFormat};
//!
//! let config = Configuration::default();
//! let surface = render(&config, None)?;
//! let png = export::encode(&surface, ExportFormat::Png)?;
//! ```

pub mod background;
pub mod export;
pub mod grid;
pub mod interaction;
pub mod loader;
pub mod page;
pub mod renderer;

pub use background::{
    normalize_rotation, placement_transform, BackgroundError, BackgroundImage, NormalizedRotation,
};
pub use export::{export_to_dir, ExportFormat};
pub use grid::{generate as generate_grid, GridGeometry, GridStroke, Point, StrokeStyle};
pub use interaction::{wheel_change, DragGesture, ViewMapping};
pub use loader::{load_image_file, LoadTicket, LoadTracker, LoadedImage};
pub use page::{InnerRect, PageGeometry};
pub use renderer::{render, RenderError, Surface};
