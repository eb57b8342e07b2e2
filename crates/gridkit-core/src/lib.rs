//! # GridKit Core
//!
//! Core types and utilities for GridKit.
//! Provides unit conversion, colors, embedded image payloads and the
//! configuration document together with its change model.

pub mod color;
pub mod config;
pub mod constants;
pub mod data_url;
pub mod error;
pub mod units;

pub use color::Rgb;

pub use config::{
    apply_change, BackgroundSettings, ConfigChange, Configuration, GridSettings, GridType,
    HexOrientation, HexSettings, Margins, PagePreset, PageSettings, RotateDirection, Side,
    SquareSettings, ZoomDirection,
};

pub use error::{ChangeError, ColorError, DataUrlError, Error, Result};

pub use units::{clamp_field, mm_to_device_px, mm_to_px, parse_field, px_to_mm};
