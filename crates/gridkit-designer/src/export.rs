//! Surface export
//!
//! PNG keeps the surface as is, JPEG drops alpha (the surface is opaque
//! anyway) and PDF embeds the raster in a single page of the same pixel
//! dimensions. PDF output needs the `pdf` feature; without it a PDF export
//! produces nothing.

use crate::renderer::Surface;
use anyhow::{Context, Result};
use gridkit_core::Configuration;
use image::codecs::jpeg::JpegEncoder;
use image::ImageFormat;
use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// JPEG quality used for exports
pub const JPEG_QUALITY: u8 = 92;

/// Export target format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Pdf => "pdf",
        }
    }

    /// Whether this build can produce the format
    pub fn is_available(&self) -> bool {
        match self {
            Self::Pdf => cfg!(feature = "pdf"),
            Self::Png | Self::Jpeg => true,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

/// `<project name>.<ext>`, falling back to `tabletop` for a blank name.
///
/// Always a bare file name; separators in the project name are replaced.
pub fn file_name(config: &Configuration, format: ExportFormat) -> String {
    format!("{}.{}", config.export_stem(), format.extension())
}

/// Encode a surface. `Ok(None)` when the format is unavailable in this build.
pub fn encode(surface: &Surface, format: ExportFormat) -> Result<Option<Vec<u8>>> {
    match format {
        ExportFormat::Png => encode_png(surface).map(Some),
        ExportFormat::Jpeg => encode_jpeg(surface).map(Some),
        ExportFormat::Pdf => encode_pdf(surface),
    }
}

fn encode_png(surface: &Surface) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    surface
        .to_rgba_image()
        .write_to(&mut out, ImageFormat::Png)
        .context("Failed to encode PNG")?;
    Ok(out.into_inner())
}

fn encode_jpeg(surface: &Surface) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    surface
        .to_rgb_image()
        .write_with_encoder(encoder)
        .context("Failed to encode JPEG")?;
    Ok(out)
}

#[cfg(feature = "pdf")]
fn encode_pdf(surface: &Surface) -> Result<Option<Vec<u8>>> {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    let (width, height) = surface.size();
    let (w, h) = (width as i64, height as i64);

    let mut doc = Document::with_version("1.4");
    let id_pages = doc.new_object_id();

    let id_image = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => w,
            "Height" => h,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        surface.to_rgb_image().into_raw(),
    ));

    // Scale the unit image square up to the full page
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![w.into(), 0.into(), 0.into(), h.into(), 0.into(), 0.into()],
            ),
            Operation::new("Do", vec!["Im0".into()]),
            Operation::new("Q", vec![]),
        ],
    };
    let id_content = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().context("Failed to encode PDF page content")?,
    ));

    let id_page = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => id_pages,
        "Contents" => id_content,
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                "Im0" => id_image,
            },
        },
    });

    let kids: Vec<Object> = vec![id_page.into()];
    let media_box: Vec<Object> = vec![0.into(), 0.into(), w.into(), h.into()];
    let pages = dictionary! {
        "Type" => "Pages",
        "Count" => 1,
        "Kids" => kids,
        "MediaBox" => media_box,
    };
    doc.set_object(id_pages, pages);

    let id_catalog = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => id_pages,
    });
    doc.trailer.set("Root", id_catalog);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).context("Failed to write PDF")?;
    Ok(Some(buffer))
}

#[cfg(not(feature = "pdf"))]
fn encode_pdf(_surface: &Surface) -> Result<Option<Vec<u8>>> {
    Ok(None)
}

/// Encode and write into `dir` under [`file_name`].
///
/// Returns the written path, or `None` when the format is unavailable.
pub fn export_to_dir(
    config: &Configuration,
    surface: &Surface,
    format: ExportFormat,
    dir: &Path,
) -> Result<Option<PathBuf>> {
    let Some(bytes) = encode(surface, format)? else {
        warn!(%format, "Export format not available in this build");
        return Ok(None);
    };

    let path = dir.join(file_name(config, format));
    std::fs::write(&path, &bytes)
        .with_context(|| format!("Failed to write export {}", path.display()))?;

    info!(%format, bytes = bytes.len(), "Exported {}", path.display());
    Ok(Some(path))
}
