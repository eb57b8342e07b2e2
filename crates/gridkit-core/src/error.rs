//! Error handling for GridKit
//!
//! Provides error types for the document layer:
//! - Color errors (hex color parsing)
//! - Change errors (unknown or malformed change requests)
//! - Data URL errors (embedded image payloads)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Color parsing error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    /// The string does not start with `#`
    #[error("Color must start with '#': {value}")]
    MissingHash {
        /// The rejected input.
        value: String,
    },

    /// The string has neither 3 nor 6 hex digits
    #[error("Color must have 3 or 6 hex digits: {value}")]
    InvalidLength {
        /// The rejected input.
        value: String,
    },

    /// A digit is not hexadecimal
    #[error("Invalid hex digit in color: {value}")]
    InvalidDigit {
        /// The rejected input.
        value: String,
    },
}

/// Change request error type
///
/// Raised when a textual change request (form key + value) cannot be
/// mapped onto a configuration change. Out-of-range numbers are never an
/// error; they are clamped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChangeError {
    /// The field key is not known
    #[error("Unknown setting: {key}")]
    UnknownKey {
        /// The unknown key.
        key: String,
    },

    /// The value is not one of the allowed choices
    #[error("Invalid value for '{key}': {value}")]
    InvalidChoice {
        /// The setting key.
        key: String,
        /// The rejected value.
        value: String,
    },

    /// The color value could not be parsed
    #[error(transparent)]
    Color(#[from] ColorError),
}

/// Embedded image payload error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataUrlError {
    /// Not a `data:` URL
    #[error("Not a data URL")]
    NotDataUrl,

    /// Missing the `,` separating header and payload
    #[error("Malformed data URL header")]
    MalformedHeader,

    /// Only base64 payloads are supported
    #[error("Data URL payload is not base64 encoded")]
    NotBase64,

    /// The base64 payload is invalid
    #[error("Invalid base64 payload: {reason}")]
    InvalidPayload {
        /// The decoder message.
        reason: String,
    },
}

/// Main error type for GridKit
///
/// A unified error type for the document layer.
#[derive(Error, Debug)]
pub enum Error {
    /// Color error
    #[error(transparent)]
    Color(#[from] ColorError),

    /// Change request error
    #[error(transparent)]
    Change(#[from] ChangeError),

    /// Data URL error
    #[error(transparent)]
    DataUrl(#[from] DataUrlError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
