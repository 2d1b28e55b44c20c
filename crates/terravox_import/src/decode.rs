//! # Format Decoder
//!
//! Turns a source file's bytes into a normalised [`HeightGrid`].
//!
//! ## Supported formats
//!
//! - Raster images (`.png`, `.bmp`, `.jpg`, `.jpeg`, `.tga`): decoded via
//!   the `image` crate, one height sample per pixel from the configured
//!   [`Channel`].
//! - Raw 32-bit float little-endian binary (`.f32`): single channel, the
//!   element count must be a perfect square.
//! - Raw 16-bit float little-endian binary (`.f16`): as above, each sample
//!   run through the half-float codec.
//!
//! Format selection is by file extension only; there is no content
//! sniffing. The whole grid is decoded up front — no streaming.

use std::fs;
use std::path::Path;

use crate::config::Channel;
use crate::error::{ImportError, ImportResult};
use crate::grid::HeightGrid;
use crate::half::half_to_f32;

/// Source format classes recognised by the decoder and the preview
/// estimator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    /// A raster image the `image` crate can decode.
    Raster,
    /// Raw little-endian 32-bit floats, square element count.
    RawF32,
    /// Raw little-endian 16-bit half floats, square element count.
    RawF16,
}

impl SourceFormat {
    /// Classifies a path by its extension.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::UnsupportedFormat`] for unknown or missing
    /// extensions.
    pub fn from_path(path: &Path) -> ImportResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "png" | "bmp" | "jpg" | "jpeg" | "tga" => Ok(Self::Raster),
            "f32" => Ok(Self::RawF32),
            "f16" => Ok(Self::RawF16),
            _ => Err(ImportError::UnsupportedFormat { extension }),
        }
    }

    /// Bytes per raw element, if this is a raw format.
    #[must_use]
    pub const fn raw_element_size(self) -> Option<u64> {
        match self {
            Self::Raster => None,
            Self::RawF32 => Some(4),
            Self::RawF16 => Some(2),
        }
    }
}

/// Decodes a heightmap file into a normalised grid.
///
/// Every sample of the returned grid is in `[0, 1]`. When `invert` is set,
/// `v -> 1 - v` is applied elementwise as a final pass.
///
/// # Errors
///
/// - [`ImportError::FileNotFound`] when the path does not exist
/// - [`ImportError::UnsupportedFormat`] for unknown extensions
/// - [`ImportError::CorruptData`] when the bytes cannot form a grid
///   (undecodable image, raw element count not a perfect square)
/// - [`ImportError::Io`] for read failures
pub fn decode_height_data(path: &Path, channel: Channel, invert: bool) -> ImportResult<HeightGrid> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.to_path_buf()));
    }
    let mut grid = match SourceFormat::from_path(path)? {
        SourceFormat::Raster => decode_raster(path, channel)?,
        SourceFormat::RawF32 => decode_raw_f32(path)?,
        SourceFormat::RawF16 => decode_raw_f16(path)?,
    };
    if invert {
        grid.invert();
    }
    Ok(grid)
}

/// Decodes a raster image and extracts one `[0, 1]` sample per pixel.
fn decode_raster(path: &Path, channel: Channel) -> ImportResult<HeightGrid> {
    let img = image::open(path).map_err(map_image_error)?;
    let has_alpha = img.color().has_alpha();
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    if w == 0 || h == 0 {
        return Err(ImportError::CorruptData("image has a zero dimension".into()));
    }

    let mut samples = Vec::with_capacity(w as usize * h as usize);
    for z in 0..h {
        for x in 0..w {
            let p = rgba.get_pixel(x, z).0;
            samples.push(extract_channel(channel, p, has_alpha).clamp(0.0, 1.0));
        }
    }
    Ok(HeightGrid::from_samples(samples, w, h))
}

/// Extracts the configured channel from an RGBA pixel as a `[0, 1]` value.
fn extract_channel(channel: Channel, rgba: [u8; 4], has_alpha: bool) -> f32 {
    let r = f32::from(rgba[0]) / 255.0;
    let g = f32::from(rgba[1]) / 255.0;
    let b = f32::from(rgba[2]) / 255.0;
    match channel {
        Channel::Red => r,
        Channel::Green => g,
        Channel::Blue => b,
        Channel::Alpha => {
            if has_alpha {
                f32::from(rgba[3]) / 255.0
            } else {
                1.0
            }
        }
        // ITU-R BT.709
        Channel::Luminance => 0.2126 * r + 0.7152 * g + 0.0722 * b,
    }
}

/// Decodes a raw `.f32` file (little-endian, square element count).
fn decode_raw_f32(path: &Path) -> ImportResult<HeightGrid> {
    let bytes = fs::read(path)?;
    let side = raw_square_side(bytes.len() as u64, 4)?;
    let raw: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    Ok(normalize_raw(raw, side))
}

/// Decodes a raw `.f16` file through the half-float codec.
fn decode_raw_f16(path: &Path) -> ImportResult<HeightGrid> {
    let bytes = fs::read(path)?;
    let side = raw_square_side(bytes.len() as u64, 2)?;
    let raw: Vec<f32> = bytes
        .chunks_exact(2)
        .map(|c| half_to_f32(u16::from_le_bytes([c[0], c[1]])))
        .collect();
    Ok(normalize_raw(raw, side))
}

/// Validates the strict square constraint for raw files and returns the
/// side length.
fn raw_square_side(byte_len: u64, elem_size: u64) -> ImportResult<u32> {
    if byte_len == 0 || byte_len % elem_size != 0 {
        return Err(ImportError::CorruptData(format!(
            "raw file length {byte_len} is not a multiple of {elem_size}"
        )));
    }
    let count = byte_len / elem_size;
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let side = (count as f64).sqrt().round() as u64;
    if side == 0 || side * side != count {
        return Err(ImportError::CorruptData(format!(
            "raw element count {count} is not a perfect square"
        )));
    }
    #[allow(clippy::cast_possible_truncation)]
    Ok(side as u32)
}

/// Min-max normalises raw samples into a `[0, 1]` grid.
///
/// Degenerate all-equal input keeps `range = 1`, mapping every sample to
/// 0.0 (not 1.0). Non-finite results collapse to 0.0 so the grid invariant
/// holds for any input bytes.
fn normalize_raw(raw: Vec<f32>, side: u32) -> HeightGrid {
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for &v in &raw {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    let mut range = max - min;
    if range == 0.0 {
        range = 1.0;
    }

    let samples = raw
        .into_iter()
        .map(|v| {
            let n = (v - min) / range;
            if n.is_finite() {
                n.clamp(0.0, 1.0)
            } else {
                0.0
            }
        })
        .collect();
    HeightGrid::from_samples(samples, side, side)
}

/// Maps `image` crate failures onto the import taxonomy.
fn map_image_error(err: image::ImageError) -> ImportError {
    match err {
        image::ImageError::IoError(e) => ImportError::Io(e),
        other => ImportError::CorruptData(other.to_string()),
    }
}
