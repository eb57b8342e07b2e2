//! # GridKit
//!
//! Printable hex and square grid overlays for tabletop games:
//! - A4 and Letter presets or custom page sizes, with per-side margins
//! - Hex (pointy or flat) and square grids in physical units
//! - A background reference image that can be panned, zoomed and rotated
//! - PNG, JPEG and PDF export
//!
//! ## Architecture
//!
//! GridKit is organized as a workspace with multiple crates:
//!
//! 1. **gridkit-core** - Units, colors and the configuration document with its change model
//! 2. **gridkit-designer** - Page geometry, grid tiling, background placement, rendering, export
//! 3. **gridkit-settings** - Saving and restoring the configuration document
//! 4. **gridkit** - The editing [`Session`] and the command line binary

pub mod session;

pub use gridkit_designer as designer;
pub use gridkit_settings as settings;

pub use gridkit_core::{
    apply_change, ConfigChange, Configuration, Error, GridType, HexOrientation, PagePreset,
    Result, Rgb, Side,
};

pub use gridkit_designer::{render, ExportFormat, Surface};
pub use gridkit_settings::{FileStore, LoadMode, MemoryStore, StatePersistence};
pub use session::Session;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatted output on stderr, keeping stdout for command output
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
