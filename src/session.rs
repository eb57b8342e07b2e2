//! Editing session
//!
//! A [`Session`] owns the live configuration, the decoded background bitmap,
//! the persistence handle and the current surface. Every change goes through
//! [`Session::apply`]: the configuration is updated, saved, and the page is
//! re-rendered before the call returns.
//!
//! Pointer positions are in display coordinates. When the preview is shown
//! at a different size than the surface, report that size with
//! [`Session::set_view_size`].

use anyhow::{Context, Result};
use gridkit_core::{ConfigChange, Configuration};
use gridkit_designer::export::{export_to_dir, ExportFormat};
use gridkit_designer::{
    load_image_file, render, wheel_change, BackgroundImage, DragGesture, LoadTicket,
    LoadTracker, LoadedImage, PageGeometry, Surface, ViewMapping,
};
use gridkit_settings::{LoadMode, StatePersistence};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Live editing state
pub struct Session {
    config: Configuration,
    background: Option<BackgroundImage>,
    persistence: StatePersistence,
    loads: LoadTracker,
    drag: DragGesture,
    view_size: Option<(f64, f64)>,
    surface: Surface,
}

/// Render a restored document, falling back to the defaults when the page
/// cannot be rendered. Returns whether the fallback was taken.
fn render_or_defaults(
    config: &mut Configuration,
    background: &mut Option<BackgroundImage>,
) -> Result<(Surface, bool)> {
    match render(config, background.as_ref()) {
        Ok(surface) => Ok((surface, false)),
        Err(e) => {
            warn!("Cannot render restored page, using defaults: {}", e);
            *config = Configuration::default();
            *background = None;
            let surface = render(config, None).context("Failed to render default page")?;
            Ok((surface, true))
        }
    }
}

impl Session {
    /// Restore the saved state and render it.
    ///
    /// A stored image that no longer decodes is dropped and the cleaned
    /// document saved back. A document that cannot be rendered at all is
    /// replaced by the defaults.
    pub fn open(persistence: StatePersistence, mode: LoadMode) -> Result<Self> {
        let mut config = persistence.load(mode);
        let mut dropped_image = false;

        let mut background = match config.background.image_data.as_deref() {
            Some(url) => match BackgroundImage::from_data_url(url) {
                Ok(image) => Some(image),
                Err(e) => {
                    warn!("Dropping stored background image: {}", e);
                    dropped_image = true;
                    None
                }
            },
            None => None,
        };
        if dropped_image {
            config.background.detach_image();
        }

        let (surface, fell_back) = render_or_defaults(&mut config, &mut background)?;
        info!(
            width = surface.width(),
            height = surface.height(),
            "Session opened"
        );

        let mut session = Self {
            config,
            background,
            persistence,
            loads: LoadTracker::new(),
            drag: DragGesture::new(),
            view_size: None,
            surface,
        };
        if dropped_image || fell_back {
            session.persistence.save(&session.config);
        }
        Ok(session)
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Apply one change, persist, and re-render.
    pub fn apply(&mut self, change: ConfigChange) -> Result<&Surface> {
        let bitmap = match &change {
            ConfigChange::BackgroundImage { data_url, .. } => {
                match BackgroundImage::from_data_url(data_url) {
                    Ok(image) => Some(image),
                    Err(e) => {
                        warn!("Ignoring undecodable background image: {}", e);
                        return Ok(&self.surface);
                    }
                }
            }
            _ => None,
        };
        self.apply_with_bitmap(change, bitmap)
    }

    fn apply_with_bitmap(
        &mut self,
        change: ConfigChange,
        bitmap: Option<BackgroundImage>,
    ) -> Result<&Surface> {
        if change == ConfigChange::Reset {
            return self.clear();
        }

        let redraw = change.affects_render();
        let drops_bitmap = change == ConfigChange::ClearBackgroundImage;

        self.config.apply(change);
        if let Some(image) = bitmap {
            self.background = Some(image);
        } else if drops_bitmap {
            self.background = None;
            self.drag.release();
        }

        self.persistence.save(&self.config);

        if redraw {
            self.redraw()?;
        }
        Ok(&self.surface)
    }

    /// Re-render the page from the current state.
    pub fn redraw(&mut self) -> Result<&Surface> {
        let geometry = PageGeometry::resolve(&self.config.page, &self.config.margins);
        if geometry.surface_size() != self.surface.size() {
            info!(
                from = ?self.surface.size(),
                to = ?geometry.surface_size(),
                "Surface resized"
            );
        }

        self.surface = render(&self.config, self.background.as_ref())?;
        Ok(&self.surface)
    }

    /// Start a bitmap load; earlier loads become stale.
    pub fn begin_import(&mut self) -> LoadTicket {
        let ticket = self.loads.begin();
        debug!(generation = ticket.generation(), "Background load started");
        ticket
    }

    /// Complete a load started with [`Session::begin_import`].
    ///
    /// Returns `false` when a newer load was started in the meantime and the
    /// result was discarded. The form's current scale is applied.
    pub fn finish_import(&mut self, ticket: LoadTicket, loaded: LoadedImage) -> Result<bool> {
        if !self.loads.is_current(ticket) {
            info!(
                generation = ticket.generation(),
                "Discarding stale background load"
            );
            return Ok(false);
        }

        let change = ConfigChange::BackgroundImage {
            data_url: loaded.data_url,
            form_scale_percent: self.config.background.scale_percent(),
        };
        self.apply_with_bitmap(change, Some(loaded.image))?;
        Ok(true)
    }

    /// Load an image file as the new background.
    pub async fn import_background(&mut self, path: &Path) -> Result<bool> {
        let ticket = self.begin_import();
        let loaded = load_image_file(path).await?;
        self.finish_import(ticket, loaded)
    }

    /// Size the preview is displayed at; `None` means the surface's own size.
    pub fn set_view_size(&mut self, size: Option<(f64, f64)>) {
        self.view_size = size;
    }

    fn view_mapping(&self) -> ViewMapping {
        let (surface_width, surface_height) = self.surface.size();
        match self.view_size {
            Some((display_width, display_height)) => ViewMapping {
                display_width,
                display_height,
                surface_width,
                surface_height,
            },
            None => ViewMapping::identity(surface_width, surface_height),
        }
    }

    /// Pointer pressed at a display position
    pub fn pointer_pressed(&mut self, x: f64, y: f64) -> bool {
        let (x, y) = self.view_mapping().to_surface(x, y);
        self.drag.press(x, y, self.background.is_some())
    }

    /// Pointer moved; pans the background while dragging.
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> Result<Option<&Surface>> {
        let (x, y) = self.view_mapping().to_surface(x, y);
        match self.drag.drag_to(x, y) {
            Some(change) => self.apply(change).map(Some),
            None => Ok(None),
        }
    }

    pub fn pointer_released(&mut self) {
        self.drag.release();
    }

    /// Wheel over the preview; zooms the background.
    pub fn wheel(&mut self, delta_y: f64) -> Result<Option<&Surface>> {
        if self.background.is_none() {
            return Ok(None);
        }
        match wheel_change(delta_y) {
            Some(change) => self.apply(change).map(Some),
            None => Ok(None),
        }
    }

    /// Remove the saved state and return to defaults.
    pub fn clear(&mut self) -> Result<&Surface> {
        self.persistence.clear();
        self.loads.invalidate();
        self.drag.release();
        self.config = Configuration::default();
        self.background = None;
        self.redraw()
    }

    /// Export the current surface into `dir`.
    ///
    /// `Ok(None)` when this build cannot produce `format`.
    pub fn export(&self, format: ExportFormat, dir: &Path) -> Result<Option<PathBuf>> {
        if !format.is_available() {
            warn!(%format, "Export format not available in this build");
            return Ok(None);
        }
        export_to_dir(&self.config, &self.surface, format, dir)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("project", &self.config.project_name)
            .field("background", &self.background.is_some())
            .field("surface", &self.surface.size())
            .finish_non_exhaustive()
    }
}
