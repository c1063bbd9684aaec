use image::RgbImage;

use super::ExportError;

/// Geometry of the editable surface being captured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSpec {
    pub width_px: u32,
    pub min_height_px: u32,
    /// Device pixels per CSS pixel in the produced raster.
    pub scale: f32,
}

pub trait SurfaceRasterizer: Send + Sync {
    /// Renders `html` on a surface `width_px` wide into an RGB raster
    /// `width_px * scale` pixels wide.
    fn rasterize(&self, html: &str, surface: &SurfaceSpec) -> Result<RgbImage, ExportError>;
}

/// Stand-in used when no rendering backend is compiled in.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableRasterizer;

impl SurfaceRasterizer for UnavailableRasterizer {
    fn rasterize(&self, _html: &str, _surface: &SurfaceSpec) -> Result<RgbImage, ExportError> {
        Err(ExportError::Unavailable(
            "built without the `chromium` feature".to_string(),
        ))
    }
}

/// Standalone page hosting `html` on a white column matching the editing
/// surface: fixed width, minimum page height, zero padding.
pub fn surface_document(html: &str, surface: &SurfaceSpec) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><style>\
         html,body{{margin:0;padding:0;background:#ffffff;}}\
         #surface{{width:{w}px;min-height:{h}px;margin:0;padding:0;background-color:white;}}\
         </style></head><body><div id=\"surface\">{html}</div></body></html>\n",
        w = surface.width_px,
        h = surface.min_height_px,
        html = html,
    )
}
