//! Presentation adapter: turns a payload into a scannable image.
//!
//! The core never calls into this module; callers encode a payload and derive
//! a label first, then hand both to a [`BarcodeRenderer`]. The bundled
//! [`QrRenderer`] uses the `qrcode` and `image` crates and requires the `qr`
//! feature (on by default). Without it every call returns
//! [`RenderError::FeatureDisabled`].

pub mod export;
pub mod qr;

pub use export::{ExportFormat, ExportedImage, downloads_dir, export_image, unique_path, write_export};
pub use qr::QrRenderer;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest side length that still fits a version 1 symbol at one pixel per module.
pub const MIN_RENDER_SIZE: u32 = 21;

/// Largest accepted side length.
pub const MAX_RENDER_SIZE: u32 = 4096;

/// Largest accepted export footer.
pub const MAX_FOOTER_HEIGHT: u32 = 512;

#[derive(Error, Debug)]
pub enum RenderError {
    #[cfg(feature = "qr")]
    #[error("payload cannot be encoded as a QR code: {0}")]
    Qr(#[from] qrcode::types::QrError),

    #[cfg(feature = "qr")]
    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[cfg(feature = "qr")]
    #[error("footer font is unreadable: {0}")]
    Font(#[from] ab_glyph::InvalidFont),

    #[error(
        "render size {size}px with a {footer_height}px footer is outside the supported range \
         ({MIN_RENDER_SIZE}..={MAX_RENDER_SIZE}px, footer at most {MAX_FOOTER_HEIGHT}px)"
    )]
    Dimensions { size: u32, footer_height: u32 },

    #[error("QR code generation requires the 'qr' feature to be enabled")]
    FeatureDisabled,
}

/// QR error-correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorCorrection {
    L,
    M,
    Q,
    #[default]
    H,
}

impl std::str::FromStr for ErrorCorrection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            other => Err(format!("unknown error correction level '{other}' (expected L, M, Q or H)")),
        }
    }
}

#[cfg(feature = "qr")]
impl From<ErrorCorrection> for qrcode::EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::L => qrcode::EcLevel::L,
            ErrorCorrection::M => qrcode::EcLevel::M,
            ErrorCorrection::Q => qrcode::EcLevel::Q,
            ErrorCorrection::H => qrcode::EcLevel::H,
        }
    }
}

/// Rendering and export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Minimum side length of the code in pixels.
    pub size: u32,
    pub error_correction: ErrorCorrection,
    /// Keep the 4-module white border scanners expect.
    pub quiet_zone: bool,
    /// Height of the white strip added below the code on export.
    pub footer_height: u32,
    /// Text drawn in the bottom-right corner of an export.
    pub brand_mark: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: 300,
            error_correction: ErrorCorrection::H,
            quiet_zone: true,
            footer_height: 40,
            brand_mark: "GITS".to_string(),
        }
    }
}

impl RenderOptions {
    /// Reject sizes the renderer cannot lay out.
    pub fn check_dimensions(&self) -> Result<(), RenderError> {
        if (MIN_RENDER_SIZE..=MAX_RENDER_SIZE).contains(&self.size)
            && self.footer_height <= MAX_FOOTER_HEIGHT
        {
            Ok(())
        } else {
            Err(RenderError::Dimensions {
                size: self.size,
                footer_height: self.footer_height,
            })
        }
    }
}

/// Anything that can turn a payload into a barcode image.
pub trait BarcodeRenderer {
    /// Bare code as PNG bytes.
    fn render_png(&self, payload: &str) -> Result<Vec<u8>, RenderError>;

    /// Bare code as SVG markup.
    fn render_svg(&self, payload: &str) -> Result<String, RenderError>;

    /// Code plus footer strip carrying `label` and the brand mark, as PNG bytes.
    fn export_png(&self, payload: &str, label: &str) -> Result<Vec<u8>, RenderError>;

    /// Code plus footer strip carrying `label` and the brand mark, as SVG markup.
    fn export_svg(&self, payload: &str, label: &str) -> Result<String, RenderError>;
}

/// Escape text for inclusion in XML character data or attribute values.
pub fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape("<b>"), "&lt;b&gt;");
        assert_eq!(xml_escape("O'Brien & Co"), "O&#39;Brien &amp; Co");
        assert_eq!(xml_escape(r#"say "hi""#), "say &quot;hi&quot;");
    }

    #[test]
    fn test_error_correction_parse() {
        assert_eq!("h".parse::<ErrorCorrection>().unwrap(), ErrorCorrection::H);
        assert_eq!(" q ".parse::<ErrorCorrection>().unwrap(), ErrorCorrection::Q);
        assert!("X".parse::<ErrorCorrection>().is_err());
    }

    #[test]
    fn test_check_dimensions_bounds() {
        assert!(RenderOptions::default().check_dimensions().is_ok());

        let too_big = RenderOptions {
            size: u32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            too_big.check_dimensions(),
            Err(RenderError::Dimensions { size: u32::MAX, .. })
        ));

        let tall_footer = RenderOptions {
            footer_height: u32::MAX,
            ..Default::default()
        };
        assert!(tall_footer.check_dimensions().is_err());

        let edge = RenderOptions {
            size: MAX_RENDER_SIZE,
            footer_height: MAX_FOOTER_HEIGHT,
            ..Default::default()
        };
        assert!(edge.check_dimensions().is_ok());
    }

    #[test]
    fn test_render_options_toml_defaults() {
        let options: RenderOptions = toml::from_str("error_correction = \"M\"").unwrap();
        assert_eq!(options.error_correction, ErrorCorrection::M);
        assert_eq!(options.size, 300);
        assert!(options.quiet_zone);
    }
}
