use std::io::Write;

use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions};
use image::RgbImage;
use tailor_logging::tailor_debug;
use url::Url;

use super::raster::{surface_document, SurfaceRasterizer, SurfaceSpec};
use super::ExportError;

/// Renders the surface in a headless Chromium and captures it as a PNG clip.
#[derive(Debug, Clone)]
pub struct ChromiumRasterizer {
    /// Chromium's sandbox cannot start as root inside most containers.
    pub sandbox: bool,
}

impl Default for ChromiumRasterizer {
    fn default() -> Self {
        Self { sandbox: true }
    }
}

impl SurfaceRasterizer for ChromiumRasterizer {
    fn rasterize(&self, html: &str, surface: &SurfaceSpec) -> Result<RgbImage, ExportError> {
        let mut staged = tempfile::Builder::new()
            .prefix("tailor-surface-")
            .suffix(".html")
            .tempfile()?;
        staged.write_all(surface_document(html, surface).as_bytes())?;
        staged.flush()?;
        let url = Url::from_file_path(staged.path()).map_err(|()| {
            ExportError::Rasterize(format!("cannot address {}", staged.path().display()))
        })?;

        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(self.sandbox)
            .window_size(Some((surface.width_px, surface.min_height_px)))
            .build()
            .map_err(chrome_error)?;
        let browser = Browser::new(options).map_err(chrome_error)?;
        let tab = browser.new_tab().map_err(chrome_error)?;
        tab.navigate_to(url.as_str())
            .map_err(chrome_error)?
            .wait_until_navigated()
            .map_err(chrome_error)?;

        let content_height = tab
            .evaluate("document.documentElement.scrollHeight", false)
            .map_err(chrome_error)?
            .value
            .and_then(|value| value.as_f64())
            .unwrap_or(f64::from(surface.min_height_px))
            .max(f64::from(surface.min_height_px));
        tailor_debug!("surface content height {}px", content_height);

        let clip = Page::Viewport {
            x: 0.0,
            y: 0.0,
            width: f64::from(surface.width_px),
            height: content_height,
            scale: f64::from(surface.scale),
        };
        let png = tab
            .capture_screenshot(
                Page::CaptureScreenshotFormatOption::Png,
                None,
                Some(clip),
                true,
            )
            .map_err(chrome_error)?;
        Ok(image::load_from_memory(&png)?.to_rgb8())
    }
}

fn chrome_error(err: impl std::fmt::Display) -> ExportError {
    ExportError::Rasterize(err.to_string())
}
