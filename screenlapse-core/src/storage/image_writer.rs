use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::models::error::CaptureError;

/// Encoding chosen from the output file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    /// Any other extension; resolved through the `image` crate's extension
    /// table, PNG when it has no entry.
    Generic,
}

impl ImageFormat {
    /// Case-insensitive, leading dot stripped.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase());

        match ext.as_deref() {
            Some("jpg") | Some("jpeg") => Self::Jpeg,
            Some("png") => Self::Png,
            _ => Self::Generic,
        }
    }

    fn encoding_for(self, path: &Path) -> image::ImageFormat {
        match self {
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Png => image::ImageFormat::Png,
            Self::Generic => image::ImageFormat::from_path(path)
                .ok()
                .filter(|f| f.writing_enabled())
                .unwrap_or(image::ImageFormat::Png),
        }
    }
}

/// Encode `frame` to `path`.
///
/// The frame is written to a `.part` sibling first and renamed into place,
/// so `path` never holds a partially written image.
pub fn save(frame: &RgbImage, path: &Path) -> Result<(), CaptureError> {
    let format = ImageFormat::from_path(path).encoding_for(path);
    let partial = partial_path(path);

    if let Err(e) = write_encoded(frame, &partial, format) {
        let _ = fs::remove_file(&partial);
        return Err(e);
    }

    fs::rename(&partial, path).map_err(|e| {
        let _ = fs::remove_file(&partial);
        CaptureError::Storage(format!("failed to move frame to {}: {}", path.display(), e))
    })
}

fn write_encoded(frame: &RgbImage, partial: &Path, format: image::ImageFormat) -> Result<(), CaptureError> {
    let file = File::create(partial)
        .map_err(|e| CaptureError::Storage(format!("failed to create {}: {}", partial.display(), e)))?;
    let mut writer = BufWriter::new(file);

    frame
        .write_to(&mut writer, format)
        .map_err(|e| CaptureError::Encode(format!("{:?}: {}", format, e)))?;

    writer
        .flush()
        .map_err(|e| CaptureError::Storage(format!("failed to flush {}: {}", partial.display(), e)))
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
