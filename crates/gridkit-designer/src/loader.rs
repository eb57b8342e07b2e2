//! Background bitmap loading
//!
//! Loading is the only asynchronous step: the file is read with tokio, then
//! decoded in place. Each load is tagged with a generation from a
//! [`LoadTracker`]; a completion is only applied when its generation is still
//! the latest one issued, so a slow first load can never overwrite a faster
//! second one.

use crate::background::BackgroundImage;
use anyhow::{Context, Result};
use gridkit_core::data_url;
use std::path::Path;
use tracing::{debug, info};

/// Generation of one started load
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing load generations
#[derive(Debug, Default)]
pub struct LoadTracker {
    latest: u64,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load; every earlier ticket becomes stale.
    pub fn begin(&mut self) -> LoadTicket {
        self.latest += 1;
        LoadTicket(self.latest)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Invalidate every outstanding ticket without starting a load.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

/// A decoded file together with its embeddable form
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub data_url: String,
    pub image: BackgroundImage,
}

/// Read and decode an image file.
pub async fn load_image_file(path: &Path) -> Result<LoadedImage> {
    debug!("Reading background image {}", path.display());

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image file {}", path.display()))?;

    let format = image::guess_format(&bytes)
        .with_context(|| format!("Unrecognized image format in {}", path.display()))?;

    let image = BackgroundImage::from_bytes(&bytes)
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    info!(
        width = image.width(),
        height = image.height(),
        "Loaded background image {}",
        path.display()
    );

    Ok(LoadedImage {
        data_url: data_url::encode(format.to_mime_type(), &bytes),
        image,
    })
}
