//! Convenience helpers for loading and saving images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::util::{MockupError, MockupResult};
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, RgbImage, RgbaImage};
use std::path::Path;

/// Default JPEG quality for exported mockups.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Decodes an in-memory PNG/JPEG into straight-alpha RGBA.
pub fn load_rgba_from_memory(bytes: &[u8]) -> MockupResult<RgbaImage> {
    let img = image::load_from_memory(bytes).map_err(MockupError::image_io)?;
    Ok(img.to_rgba8())
}

/// Loads an image from disk and converts it to RGBA.
pub fn load_rgba<P: AsRef<Path>>(path: P) -> MockupResult<RgbaImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|err| MockupError::ImageIo {
        reason: format!("{}: {err}", path.display()),
    })?;
    Ok(img.to_rgba8())
}

/// Encodes an opaque image as JPEG.
///
/// `quality` is clamped to 1..=100.
pub fn encode_jpeg(img: &RgbImage, quality: u8) -> MockupResult<Vec<u8>> {
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    encoder
        .encode(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
        .map_err(MockupError::image_io)?;
    Ok(buf)
}

/// Returns the design name for an uploaded file: its file name up to the first `.`.
pub fn design_name_from_path<P: AsRef<Path>>(path: P) -> Option<String> {
    let file_name = path.as_ref().file_name()?.to_str()?;
    let stem = file_name.split('.').next()?;
    if stem.is_empty() {
        return None;
    }
    Some(stem.to_string())
}
