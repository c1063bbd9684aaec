use image::codecs::jpeg::JpegEncoder;
use image::{imageops, Rgb, RgbImage};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tailor_logging::tailor_debug;

use super::{ExportError, ExportSettings};

#[derive(Debug, Clone)]
pub struct ComposedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Lays a raster out over fixed-size pages, one JPEG per page.
#[derive(Debug, Clone)]
pub struct PdfComposer {
    settings: ExportSettings,
}

impl PdfComposer {
    pub fn new(settings: ExportSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn compose(&self, raster: &RgbImage) -> Result<ComposedPdf, ExportError> {
        if raster.width() == 0 || raster.height() == 0 {
            return Err(ExportError::EmptySurface);
        }
        let (content_w_px, content_h_px) = self.settings.content_size_px();
        let slice_h = slice_height(raster.width(), content_w_px, content_h_px);
        let slices = slice_pages(raster, slice_h);
        tailor_debug!(
            "composing {} page(s) from {}x{} raster (slice height {})",
            slices.len(),
            raster.width(),
            raster.height(),
            slice_h
        );

        let (page_w_pt, page_h_pt) = self.settings.page_size_pt();
        let margin_pt = self.settings.margin_px as f32 * 72.0 / 96.0;
        let draw_w = page_w_pt - 2.0 * margin_pt;
        let draw_h = page_h_pt - 2.0 * margin_pt;
        let quality = self.settings.jpeg_quality();

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let mut kids: Vec<Object> = Vec::with_capacity(slices.len());

        for slice in &slices {
            let jpeg = encode_jpeg(slice, quality)?;
            let image = Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => i64::from(slice.width()),
                    "Height" => i64::from(slice.height()),
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8_i64,
                    "Filter" => "DCTDecode",
                },
                jpeg,
            );
            let image_id = doc.add_object(image);

            let content = Content {
                operations: vec![
                    Operation::new("q", vec![]),
                    Operation::new(
                        "cm",
                        vec![
                            draw_w.into(),
                            Object::Integer(0),
                            Object::Integer(0),
                            draw_h.into(),
                            margin_pt.into(),
                            margin_pt.into(),
                        ],
                    ),
                    Operation::new("Do", vec!["Im0".into()]),
                    Operation::new("Q", vec![]),
                ],
            };
            let encoded = content
                .encode()
                .map_err(|err| ExportError::Compose(err.to_string()))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    page_w_pt.into(),
                    page_h_pt.into(),
                ],
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "XObject" => dictionary! { "Im0" => image_id },
                },
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count as i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|err| ExportError::Compose(err.to_string()))?;
        Ok(ComposedPdf { bytes, page_count })
    }
}

/// Raster rows that fill one page's printable area at the raster's width.
pub(crate) fn slice_height(raster_width: u32, content_w_px: u32, content_h_px: u32) -> u32 {
    let height = (f64::from(raster_width) * f64::from(content_h_px) / f64::from(content_w_px))
        .round() as u32;
    height.max(1)
}

/// Cuts `raster` into page-height slices; the last one is padded with white.
pub(crate) fn slice_pages(raster: &RgbImage, slice_h: u32) -> Vec<RgbImage> {
    let width = raster.width();
    let total = raster.height();
    let count = total.div_ceil(slice_h).max(1);

    (0..count)
        .map(|index| {
            let top = index * slice_h;
            let rows = slice_h.min(total - top);
            let mut page = RgbImage::from_pixel(width, slice_h, Rgb([255, 255, 255]));
            let strip = imageops::crop_imm(raster, 0, top, width, rows).to_image();
            imageops::replace(&mut page, &strip, 0, 0);
            page
        })
        .collect()
}

fn encode_jpeg(slice: &RgbImage, quality: u8) -> Result<Vec<u8>, ExportError> {
    let mut jpeg = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, quality);
        encoder.encode_image(slice)?;
    }
    Ok(jpeg)
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::{slice_height, slice_pages};

    #[test]
    fn slice_height_keeps_page_proportion() {
        assert_eq!(slice_height(1588, 794, 1123), 2246);
        assert_eq!(slice_height(794, 794, 1123), 1123);
    }

    #[test]
    fn short_raster_yields_one_padded_page() {
        let raster = RgbImage::from_pixel(10, 4, Rgb([0, 0, 0]));
        let pages = slice_pages(&raster, 14);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].dimensions(), (10, 14));
        assert_eq!(pages[0].get_pixel(0, 3), &Rgb([0, 0, 0]));
        assert_eq!(pages[0].get_pixel(0, 4), &Rgb([255, 255, 255]));
    }

    #[test]
    fn tall_raster_spills_onto_following_pages() {
        let raster = RgbImage::from_pixel(10, 29, Rgb([10, 20, 30]));
        let pages = slice_pages(&raster, 14);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[2].get_pixel(0, 0), &Rgb([10, 20, 30]));
        assert_eq!(pages[2].get_pixel(0, 1), &Rgb([255, 255, 255]));
    }

    #[test]
    fn exact_multiple_has_no_blank_trailing_page() {
        let raster = RgbImage::from_pixel(10, 28, Rgb([1, 1, 1]));
        assert_eq!(slice_pages(&raster, 14).len(), 2);
    }
}
