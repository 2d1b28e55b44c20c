//! # Preview Estimator
//!
//! Cheap, decode-free structure-size and block-count estimates for UI
//! feedback while the user edits settings.
//!
//! No pixel is ever decoded here: raster formats surrender their header
//! dimensions, raw float files imply a square side from their byte length.
//! The downscale formula is shared with the grid transform so the preview
//! and the real import always agree on effective extents.

use std::fs;
use std::path::Path;

use crate::config::{ImportConfig, ImportMode};
use crate::decode::SourceFormat;
use crate::grid::Downscale;

/// Reads the declared dimensions of a heightmap file without decoding
/// pixels.
///
/// Raw formats infer `side = round(sqrt(bytes / elem_size))` and answer
/// only when `side^2 * elem_size` matches the byte length exactly. Raster
/// formats read the image header. Returns `None` for anything unreadable.
#[must_use]
pub fn read_dimensions(path: &Path) -> Option<(u32, u32)> {
    if !path.exists() {
        return None;
    }
    match SourceFormat::from_path(path).ok()? {
        SourceFormat::Raster => image::image_dimensions(path).ok(),
        format => {
            let elem = format.raw_element_size()?;
            let bytes = fs::metadata(path).ok()?.len();
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let side = ((bytes / elem) as f64).sqrt().round() as u64;
            if side > 0 && side * side * elem == bytes {
                #[allow(clippy::cast_possible_truncation)]
                Some((side as u32, side as u32))
            } else {
                None
            }
        }
    }
}

/// Computes the preview line for the current settings, e.g.
/// `"256×32×256 (downscaled from 4096×4096)  ~524.3k blocks"`.
///
/// Returns `None` when the file is missing or its dimensions are unknown.
#[must_use]
pub fn preview_info(config: &ImportConfig) -> Option<String> {
    let (raw_w, raw_h) = read_dimensions(&config.heightmap_path)?;
    let down = Downscale::compute(raw_w, raw_h, config.clamped_max_size());
    let (eff_w, eff_h) = (down.target_w, down.target_h);
    let height_scale = config.clamped_height_scale();

    // ~50% average fill heuristic for HEIGHTMAP; integer division preserved
    let est_blocks = match config.mode {
        ImportMode::Heightmap => {
            u64::from(eff_w) * u64::from(eff_h) * u64::from(height_scale / 2)
        }
        ImportMode::Surface | ImportMode::Colormap | ImportMode::Normalmap => {
            u64::from(eff_w) * u64::from(eff_h)
        }
    };

    let size_label = match config.mode {
        ImportMode::Colormap => format!("{eff_w}\u{d7}1\u{d7}{eff_h}"),
        _ => format!("{eff_w}\u{d7}{height_scale}\u{d7}{eff_h}"),
    };

    let scale_note = if down.scale < 1.0 {
        format!(" (downscaled from {raw_w}\u{d7}{raw_h})")
    } else {
        String::new()
    };

    Some(format!(
        "{size_label}{scale_note}  ~{} blocks",
        format_count(est_blocks)
    ))
}

/// Formats a block count with magnitude suffixes: `1.5k`, `4.2M`.
#[must_use]
pub fn format_count(n: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}
