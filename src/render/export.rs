//! Export of a rendered code to disk.

use std::path::{Path, PathBuf};

use tracing::info;

use super::{BarcodeRenderer, RenderError};

/// Image format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Svg,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            other => Err(format!("unknown export format '{other}' (expected png or svg)")),
        }
    }
}

/// An export ready to be written.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub filename: String,
    pub label: String,
    pub bytes: Vec<u8>,
}

/// Render `payload` with its footer label.
///
/// `filename` is the derived `.png` name; SVG exports swap the extension.
pub fn export_image(
    renderer: &dyn BarcodeRenderer,
    payload: &str,
    label: &str,
    filename: &str,
    format: ExportFormat,
) -> Result<ExportedImage, RenderError> {
    let bytes = match format {
        ExportFormat::Png => renderer.export_png(payload, label)?,
        ExportFormat::Svg => renderer.export_svg(payload, label)?.into_bytes(),
    };
    let stem = filename.strip_suffix(".png").unwrap_or(filename);
    Ok(ExportedImage {
        filename: format!("{stem}.{}", format.extension()),
        label: label.to_string(),
        bytes,
    })
}

/// Write an export into `dir` without overwriting anything already there.
pub fn write_export(dir: &Path, export: &ExportedImage) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = unique_path(dir, &export.filename);
    std::fs::write(&path, &export.bytes)?;
    info!(path = %path.display(), bytes = export.bytes.len(), "wrote export");
    Ok(path)
}

/// Path in `dir` for `filename` that no existing file occupies.
///
/// Collisions get `_1`, `_2`, ... before the extension; past 999 a Unix
/// timestamp is used instead.
pub fn unique_path(dir: &Path, filename: &str) -> PathBuf {
    let path = dir.join(filename);
    if !path.exists() {
        return path;
    }

    let (stem, ext) = match filename.rfind('.') {
        Some(dot) => filename.split_at(dot),
        None => (filename, ""),
    };

    for i in 1..1000 {
        let candidate = dir.join(format!("{stem}_{i}{ext}"));
        if !candidate.exists() {
            return candidate;
        }
    }

    let ts = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    dir.join(format!("{stem}_{ts}{ext}"))
}

/// Default export directory: the platform downloads dir, `~/Downloads`, or
/// the current directory, whichever is found first.
pub fn downloads_dir() -> PathBuf {
    if let Some(downloads) = dirs::download_dir() {
        return downloads;
    }

    if let Some(home) = dirs::home_dir() {
        let fallback = home.join("Downloads");
        if fallback.exists() {
            return fallback;
        }
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
