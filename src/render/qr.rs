//! QR code rendering in PNG and SVG formats.
//!
//! Requires the `qr` feature to be enabled for actual QR generation.
//! When disabled, every method returns an error explaining the missing feature.
//!
//! Exports add a white footer strip below the code. The label sits in the
//! bottom-left corner and the brand mark in the bottom-right, both bold, with
//! their baseline 10px above the bottom edge. The label is drawn at 14px, 12px
//! past 50 characters, and 11px when it would run into the right margin.

use super::{BarcodeRenderer, RenderError, RenderOptions};

/// Modules of white border on each side when the quiet zone is on.
#[cfg(feature = "qr")]
const QUIET_ZONE_MODULES: u32 = 4;

/// Bold sans-serif face used for footer text.
#[cfg(feature = "qr")]
static FOOTER_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

#[cfg(feature = "qr")]
const TEXT_MARGIN: u32 = 15;
#[cfg(feature = "qr")]
const BASELINE_OFFSET: u32 = 10;
#[cfg(feature = "qr")]
const LONG_LABEL_CHARS: usize = 50;
#[cfg(feature = "qr")]
const BRAND_MARK_PX: f32 = 14.0;
#[cfg(feature = "qr")]
const TEXT_SHADE: u8 = 0x33;

/// QR renderer backed by the `qrcode` crate.
#[derive(Debug, Clone, Default)]
pub struct QrRenderer {
    options: RenderOptions,
}

/// Footer text metrics shared by the PNG and SVG exports.
#[cfg(feature = "qr")]
struct FooterText<'a> {
    font: ab_glyph::FontRef<'static>,
    label: &'a str,
    label_px: f32,
}

#[cfg(feature = "qr")]
impl<'a> FooterText<'a> {
    fn new(label: &'a str, canvas_width: u32) -> Result<Self, RenderError> {
        let font = ab_glyph::FontRef::try_from_slice(FOOTER_FONT)?;
        let preferred = if label.chars().count() > LONG_LABEL_CHARS {
            12.0
        } else {
            14.0
        };
        let max_width = canvas_width.saturating_sub(2 * TEXT_MARGIN);
        let label_px = if text_width(&font, preferred, label) > max_width {
            11.0
        } else {
            preferred
        };
        Ok(Self {
            font,
            label,
            label_px,
        })
    }
}

#[cfg(feature = "qr")]
fn text_width(font: &ab_glyph::FontRef<'_>, px: f32, text: &str) -> u32 {
    imageproc::drawing::text_size(ab_glyph::PxScale::from(px), font, text).0
}

/// Top edge that puts the text's baseline at `baseline`.
#[cfg(feature = "qr")]
fn text_top(font: &ab_glyph::FontRef<'_>, px: f32, baseline: u32) -> i32 {
    use ab_glyph::{Font, ScaleFont};

    let ascent = font.as_scaled(ab_glyph::PxScale::from(px)).ascent();
    (baseline as f32 - ascent).round() as i32
}

impl QrRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    #[cfg(feature = "qr")]
    fn dimensions_error(&self) -> RenderError {
        RenderError::Dimensions {
            size: self.options.size,
            footer_height: self.options.footer_height,
        }
    }

    #[cfg(feature = "qr")]
    fn build_code(&self, payload: &str) -> Result<qrcode::QrCode, RenderError> {
        self.options.check_dimensions()?;
        let code = qrcode::QrCode::with_error_correction_level(
            payload.as_bytes(),
            self.options.error_correction.into(),
        )?;
        Ok(code)
    }

    #[cfg(feature = "qr")]
    fn raster(&self, payload: &str) -> Result<image::GrayImage, RenderError> {
        use image::Luma;

        let code = self.build_code(payload)?;
        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(self.options.size, self.options.size)
            .quiet_zone(self.options.quiet_zone)
            .build();
        Ok(image)
    }

    /// SVG document for the code, with an optional labeled footer strip.
    #[cfg(feature = "qr")]
    fn svg_document(&self, payload: &str, footer_label: Option<&str>) -> Result<String, RenderError> {
        use super::xml_escape;
        use qrcode::Color;

        let code = self.build_code(payload)?;
        let width = code.width() as u32;
        let border = if self.options.quiet_zone {
            QUIET_ZONE_MODULES
        } else {
            0
        };
        let modules = width + 2 * border;
        let module_px = self.options.size.div_ceil(modules).max(1);
        let side = module_px
            .checked_mul(modules)
            .ok_or_else(|| self.dimensions_error())?;
        let footer = if footer_label.is_some() {
            self.options.footer_height
        } else {
            0
        };
        let height = side
            .checked_add(footer)
            .ok_or_else(|| self.dimensions_error())?;

        let mut path = String::new();
        for (idx, color) in code.to_colors().into_iter().enumerate() {
            if color != Color::Dark {
                continue;
            }
            let x = (idx as u32 % width + border) * module_px;
            let y = (idx as u32 / width + border) * module_px;
            path.push_str(&format!("M{x},{y}h{module_px}v{module_px}h-{module_px}z"));
        }

        let mut svg = String::new();
        svg.push_str(r#"<?xml version="1.0" standalone="yes"?>"#);
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{side}" height="{height}" viewBox="0 0 {side} {height}" shape-rendering="crispEdges">"#
        ));
        svg.push_str(&format!(
            r##"<rect x="0" y="0" width="{side}" height="{height}" fill="#ffffff"/>"##
        ));
        svg.push_str(&format!(r##"<path fill="#000000" d="{path}"/>"##));

        if let Some(label) = footer_label.filter(|_| footer > 0) {
            let text = FooterText::new(label, side)?;
            let baseline = height.saturating_sub(BASELINE_OFFSET);
            svg.push_str(&format!(
                r##"<text x="{TEXT_MARGIN}" y="{baseline}" fill="#333333" font-family="DejaVu Sans, Arial, sans-serif" font-weight="bold" font-size="{}">{}</text>"##,
                text.label_px,
                xml_escape(text.label)
            ));
            if !self.options.brand_mark.is_empty() {
                svg.push_str(&format!(
                    r##"<text x="{}" y="{baseline}" fill="#333333" font-family="DejaVu Sans, Arial, sans-serif" font-weight="bold" font-size="{BRAND_MARK_PX}" text-anchor="end">{}</text>"##,
                    side.saturating_sub(TEXT_MARGIN),
                    xml_escape(&self.options.brand_mark)
                ));
            }
        }

        svg.push_str("</svg>");
        Ok(svg)
    }

    /// Raster export: the code on top, the labeled footer strip below.
    #[cfg(feature = "qr")]
    fn export_raster(&self, payload: &str, label: &str) -> Result<image::GrayImage, RenderError> {
        use ab_glyph::PxScale;
        use image::{GrayImage, Luma, imageops};
        use imageproc::drawing::draw_text_mut;

        let code = self.raster(payload)?;
        let (width, code_height) = code.dimensions();
        let height = code_height
            .checked_add(self.options.footer_height)
            .ok_or_else(|| self.dimensions_error())?;

        let mut canvas = GrayImage::from_pixel(width, height, Luma([255u8]));
        imageops::replace(&mut canvas, &code, 0, 0);

        if self.options.footer_height > 0 {
            let text = FooterText::new(label, width)?;
            let baseline = height.saturating_sub(BASELINE_OFFSET);
            let shade = Luma([TEXT_SHADE]);

            draw_text_mut(
                &mut canvas,
                shade,
                TEXT_MARGIN as i32,
                text_top(&text.font, text.label_px, baseline),
                PxScale::from(text.label_px),
                &text.font,
                label,
            );

            let mark = self.options.brand_mark.as_str();
            if !mark.is_empty() {
                let mark_width = text_width(&text.font, BRAND_MARK_PX, mark);
                let x = width.saturating_sub(TEXT_MARGIN + mark_width) as i32;
                draw_text_mut(
                    &mut canvas,
                    shade,
                    x,
                    text_top(&text.font, BRAND_MARK_PX, baseline),
                    PxScale::from(BRAND_MARK_PX),
                    &text.font,
                    mark,
                );
            }

            tracing::debug!(
                width,
                height,
                label_px = text.label_px,
                "rendered export raster"
            );
        }

        Ok(canvas)
    }
}

#[cfg(feature = "qr")]
fn encode_png(image: image::GrayImage) -> Result<Vec<u8>, RenderError> {
    let mut png_bytes = Vec::new();
    image::DynamicImage::ImageLuma8(image).write_to(
        &mut std::io::Cursor::new(&mut png_bytes),
        image::ImageFormat::Png,
    )?;
    Ok(png_bytes)
}

impl BarcodeRenderer for QrRenderer {
    fn render_png(&self, payload: &str) -> Result<Vec<u8>, RenderError> {
        #[cfg(feature = "qr")]
        {
            encode_png(self.raster(payload)?)
        }

        #[cfg(not(feature = "qr"))]
        {
            let _ = payload;
            Err(RenderError::FeatureDisabled)
        }
    }

    fn render_svg(&self, payload: &str) -> Result<String, RenderError> {
        #[cfg(feature = "qr")]
        {
            self.svg_document(payload, None)
        }

        #[cfg(not(feature = "qr"))]
        {
            let _ = payload;
            Err(RenderError::FeatureDisabled)
        }
    }

    fn export_png(&self, payload: &str, label: &str) -> Result<Vec<u8>, RenderError> {
        #[cfg(feature = "qr")]
        {
            encode_png(self.export_raster(payload, label)?)
        }

        #[cfg(not(feature = "qr"))]
        {
            let _ = (payload, label);
            Err(RenderError::FeatureDisabled)
        }
    }

    fn export_svg(&self, payload: &str, label: &str) -> Result<String, RenderError> {
        #[cfg(feature = "qr")]
        {
            self.svg_document(payload, Some(label))
        }

        #[cfg(not(feature = "qr"))]
        {
            let _ = (payload, label);
            Err(RenderError::FeatureDisabled)
        }
    }
}

#[cfg(all(test, feature = "qr"))]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    fn decode(bytes: &[u8]) -> image::GrayImage {
        image::load_from_memory(bytes).expect("decode png").to_luma8()
    }

    fn png_dimensions(bytes: &[u8]) -> (u32, u32) {
        decode(bytes).dimensions()
    }

    /// Dark pixels in the footer strip of an export.
    fn footer_ink(image: &image::GrayImage, footer_height: u32) -> Vec<(u32, u32)> {
        let top = image.height() - footer_height;
        image
            .enumerate_pixels()
            .filter(|(_, y, p)| *y >= top && p.0[0] < 128)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn test_render_png_meets_min_size() {
        let renderer = QrRenderer::default();
        let bytes = renderer.render_png("https://example.com").unwrap();
        assert!(bytes.starts_with(PNG_MAGIC));
        let (w, h) = png_dimensions(&bytes);
        assert_eq!(w, h);
        assert!(w >= 300);
    }

    #[test]
    fn test_export_png_adds_footer() {
        let renderer = QrRenderer::default();
        let bare = png_dimensions(&renderer.render_png("BEGIN:VCARD").unwrap());
        let exported = png_dimensions(&renderer.export_png("BEGIN:VCARD", "Jane").unwrap());
        assert_eq!(exported.0, bare.0);
        assert_eq!(exported.1, bare.1 + 40);
    }

    #[test]
    fn test_export_png_draws_label_and_mark() {
        let renderer = QrRenderer::default();
        let jane = renderer.export_png("payload", "Jane Doe").unwrap();
        let other = renderer
            .export_png("payload", "Completely Different Label")
            .unwrap();
        assert_ne!(jane, other);

        let image = decode(&jane);
        let ink = footer_ink(&image, 40);
        let mid = image.width() / 2;
        assert!(ink.iter().any(|(x, _)| *x < mid), "label missing on the left");
        assert!(ink.iter().any(|(x, _)| *x > mid), "brand mark missing on the right");
        assert!(ink.iter().all(|(_, y)| *y < image.height() - 5));
    }

    #[test]
    fn test_export_png_without_brand_mark() {
        let renderer = QrRenderer::new(RenderOptions {
            brand_mark: String::new(),
            ..Default::default()
        });
        let image = decode(&renderer.export_png("payload", "Jo").unwrap());
        let mid = image.width() / 2;
        assert!(footer_ink(&image, 40).iter().all(|(x, _)| *x < mid));
    }

    #[test]
    fn test_label_shrinks_when_too_wide() {
        let short = FooterText::new("Jane", 300).unwrap();
        assert_eq!(short.label_px, 14.0);

        let long = "x".repeat(60);
        let long = FooterText::new(&long, 1000).unwrap();
        assert_eq!(long.label_px, 12.0);

        let wide = "W".repeat(40);
        let wide = FooterText::new(&wide, 300).unwrap();
        assert_eq!(wide.label_px, 11.0);
    }

    #[test]
    fn test_export_svg_carries_label_and_mark() {
        let renderer = QrRenderer::default();
        let svg = renderer
            .export_svg("https://example.com", "LinkedIn: jdoe, Website: <x>")
            .unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("LinkedIn: jdoe, Website: &lt;x&gt;"));
        assert!(svg.contains(">GITS</text>"));
        assert!(svg.contains(r#"font-size="14""#));
    }

    #[test]
    fn test_long_label_uses_smaller_font() {
        let renderer = QrRenderer::default();
        let label = "x".repeat(55);
        let svg = renderer.export_svg("payload", &label).unwrap();
        assert!(svg.contains(r#"font-size="12""#) || svg.contains(r#"font-size="11""#));
        assert!(!svg.contains(&format!(r#"font-size="14">{label}"#)));
    }

    #[test]
    fn test_render_svg_has_no_footer_text() {
        let renderer = QrRenderer::default();
        let svg = renderer.render_svg("payload").unwrap();
        assert!(svg.contains("<path"));
        assert!(!svg.contains("<text"));
    }

    #[test]
    fn test_oversized_payload_errors() {
        let renderer = QrRenderer::default();
        let huge = "x".repeat(5000);
        assert!(matches!(renderer.render_png(&huge), Err(RenderError::Qr(_))));
    }

    #[test]
    fn test_out_of_range_dimensions_error_instead_of_overflowing() {
        let renderer = QrRenderer::new(RenderOptions {
            size: u32::MAX,
            ..Default::default()
        });
        assert!(matches!(
            renderer.render_svg("payload"),
            Err(RenderError::Dimensions { .. })
        ));

        let renderer = QrRenderer::new(RenderOptions {
            footer_height: u32::MAX,
            ..Default::default()
        });
        assert!(matches!(
            renderer.export_png("payload", "Jane"),
            Err(RenderError::Dimensions { .. })
        ));
        assert!(matches!(
            renderer.export_svg("payload", "Jane"),
            Err(RenderError::Dimensions { .. })
        ));
    }
}
