//! Inline image payloads
//!
//! Imported background images are stored inside the persisted document as
//! `data:<mime>;base64,<payload>` strings, so the document size scales with
//! the image size.

use crate::error::DataUrlError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Encode raw file bytes as a base64 data URL
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Decode a base64 data URL into its mime type and raw bytes
pub fn decode(url: &str) -> Result<(String, Vec<u8>), DataUrlError> {
    let rest = url.strip_prefix("data:").ok_or(DataUrlError::NotDataUrl)?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or(DataUrlError::MalformedHeader)?;

    let mime = header
        .strip_suffix(";base64")
        .ok_or(DataUrlError::NotBase64)?;

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| DataUrlError::InvalidPayload {
            reason: e.to_string(),
        })?;

    Ok((mime.to_string(), bytes))
}
