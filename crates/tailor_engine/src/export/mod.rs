//! Fixed-geometry PDF export: rasterize the editing surface, slice the raster
//! into pages, and save the composed document atomically.
mod compose;
mod raster;

#[cfg(feature = "chromium")]
mod chromium;

use std::path::Path;
use std::sync::Arc;

use tailor_logging::{enter_operation, tailor_info};

use crate::persist::{AtomicFileWriter, PersistError};
use crate::ExportReceipt;

#[cfg(feature = "chromium")]
pub use chromium::ChromiumRasterizer;
pub use compose::{ComposedPdf, PdfComposer};
pub use raster::{surface_document, SurfaceRasterizer, SurfaceSpec, UnavailableRasterizer};

/// Print-page proportion at 96 DPI.
pub const PX_PER_PT: f32 = 96.0 / 72.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    pub filename: String,
    pub page_width_px: u32,
    pub page_height_px: u32,
    pub margin_px: u32,
    pub raster_scale: f32,
    /// Lossy image quality in `0.0..=1.0`.
    pub image_quality: f32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            filename: "optimized_resume.pdf".to_string(),
            page_width_px: 794,
            page_height_px: 1123,
            margin_px: 0,
            raster_scale: 2.0,
            image_quality: 0.98,
        }
    }
}

impl ExportSettings {
    pub fn surface(&self) -> SurfaceSpec {
        SurfaceSpec {
            width_px: self.page_width_px,
            min_height_px: self.page_height_px,
            scale: self.raster_scale,
        }
    }

    pub fn jpeg_quality(&self) -> u8 {
        (self.image_quality.clamp(0.01, 1.0) * 100.0).round() as u8
    }

    /// Page box in PDF points.
    pub fn page_size_pt(&self) -> (f32, f32) {
        (
            self.page_width_px as f32 / PX_PER_PT,
            self.page_height_px as f32 / PX_PER_PT,
        )
    }

    /// Printable area in CSS pixels once margins are removed.
    pub fn content_size_px(&self) -> (u32, u32) {
        (
            self.page_width_px.saturating_sub(2 * self.margin_px).max(1),
            self.page_height_px.saturating_sub(2 * self.margin_px).max(1),
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no rasterizer available: {0}")]
    Unavailable(String),
    #[error("rasterize failed: {0}")]
    Rasterize(String),
    #[error("surface rendered to an empty raster")]
    EmptySurface,
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),
    #[error("pdf composition failed: {0}")]
    Compose(String),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("export task aborted: {0}")]
    Aborted(String),
}

/// Rasterizer compiled into this build: headless Chromium when the
/// `chromium` feature is on. `sandbox` only applies to Chromium.
pub fn default_rasterizer(sandbox: bool) -> Arc<dyn SurfaceRasterizer> {
    #[cfg(feature = "chromium")]
    {
        Arc::new(ChromiumRasterizer { sandbox })
    }
    #[cfg(not(feature = "chromium"))]
    {
        let _ = sandbox;
        Arc::new(UnavailableRasterizer)
    }
}

pub struct PdfExporter {
    rasterizer: Arc<dyn SurfaceRasterizer>,
    composer: PdfComposer,
}

impl PdfExporter {
    pub fn new(rasterizer: Arc<dyn SurfaceRasterizer>, settings: ExportSettings) -> Self {
        Self {
            rasterizer,
            composer: PdfComposer::new(settings),
        }
    }

    pub fn settings(&self) -> &ExportSettings {
        self.composer.settings()
    }

    /// Renders `html` and writes the artifact into `output_dir`. Nothing is
    /// written unless every stage succeeds.
    pub fn export(&self, html: &str, output_dir: &Path) -> Result<ExportReceipt, ExportError> {
        let settings = self.settings();
        let raster = {
            let _scope = enter_operation("rasterize");
            self.rasterizer.rasterize(html, &settings.surface())?
        };
        tailor_info!("rasterized surface {}x{}", raster.width(), raster.height());

        let composed = self.composer.compose(&raster)?;
        let writer = AtomicFileWriter::new(output_dir.to_path_buf());
        let path = writer.write_bytes(&settings.filename, &composed.bytes)?;
        Ok(ExportReceipt {
            path,
            page_count: composed.page_count,
            byte_len: composed.bytes.len() as u64,
        })
    }
}
