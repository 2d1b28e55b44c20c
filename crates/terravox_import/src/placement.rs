//! # Voxel Placement Engine
//!
//! The orchestrator: decode -> transform -> per-pixel block resolution ->
//! placement. One call per import request, pure in its inputs:
//!
//! ```text
//! (config, block list, collaborators, rng) -> Result<VoxelSelection>
//! ```
//!
//! ## Placement policies
//!
//! | Mode      | Placement |
//! |-----------|-----------|
//! | HEIGHTMAP | column of `max(1, round(norm * scale))` blocks from y = 0 |
//! | SURFACE   | single block at `max(0, round(norm * scale) - 1)` |
//! | NORMALMAP | as SURFACE, colour-matched against the colormap |
//! | COLORMAP  | single block at y = 0, gated by colormap alpha |
//!
//! The engine holds no session state; concurrent imports share nothing.
//! Memory is bounded by the raw grid (`raw_w * raw_h` samples) — the
//! `max_size` cap bounds placement cost, not decode memory.

use image::RgbaImage;
use rand::Rng;

use crate::config::{ImportConfig, ImportMode};
use crate::decode::decode_height_data;
use crate::error::ImportResult;
use crate::grid::{Downscale, HeightGrid};
use crate::pattern::{parse_block_pattern, select_weighted, BlockNameResolver, WeightedBlock};
use crate::selection::{PlacedBlock, VoxelSelection};
use crate::BlockId;

/// Minimum colormap alpha (of 255) for a COLORMAP block to be placed.
///
/// Preserved constant; do not re-derive.
pub const COLORMAP_ALPHA_THRESHOLD: u8 = 128;

/// Finds the registered block whose colour is nearest a given RGB.
///
/// Implemented outside this crate by the block registry.
pub trait BlockColorIndex {
    /// Returns the id of the closest block, or `None` when the index has
    /// no colour data at all.
    fn closest_block(&self, r: u8, g: u8, b: u8) -> Option<BlockId>;
}

/// Runs a complete import and returns the voxel selection.
///
/// This is the single entry point of the engine. It never returns a
/// partial selection: any failure surfaces as one [`crate::ImportError`]
/// and leaves no output behind.
///
/// # Errors
///
/// Block pattern errors, then decode errors, in that order. A secondary
/// colormap that fails to read is *not* an error — the engine logs it and
/// falls back to weighted selection.
pub fn run_import<R: Rng + ?Sized>(
    config: &ImportConfig,
    resolver: &dyn BlockNameResolver,
    color_index: &dyn BlockColorIndex,
    rng: &mut R,
) -> ImportResult<VoxelSelection> {
    let blocks = parse_block_pattern(&config.block_pattern, resolver)?;

    let mut grid = decode_height_data(
        &config.heightmap_path,
        config.channel,
        config.invert_height,
    )?;
    tracing::debug!(
        width = grid.width(),
        height = grid.height(),
        "decoded heightmap"
    );

    let down = Downscale::compute(grid.width(), grid.height(), config.clamped_max_size());

    // Smoothing always runs on the full-resolution grid
    if config.smooth {
        grid = grid.box_blur();
    }

    let colormap = load_colormap(config);

    Ok(place_blocks(
        &grid,
        config,
        down,
        &blocks,
        colormap.as_ref(),
        color_index,
        rng,
    ))
}

/// Loads the secondary colour image for COLORMAP / NORMALMAP modes.
///
/// Read failures fall back silently to weighted block selection; this is
/// the one non-fatal error path in the engine.
fn load_colormap(config: &ImportConfig) -> Option<RgbaImage> {
    if !matches!(config.mode, ImportMode::Colormap | ImportMode::Normalmap) {
        return None;
    }
    let path = config.colormap_path.as_deref()?;
    match image::open(path) {
        Ok(img) => Some(img.to_rgba8()),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "colormap unreadable, using block pattern");
            None
        }
    }
}

/// Places blocks for every output cell and applies the origin offset.
fn place_blocks<R: Rng + ?Sized>(
    grid: &HeightGrid,
    config: &ImportConfig,
    down: Downscale,
    blocks: &[WeightedBlock],
    colormap: Option<&RgbaImage>,
    color_index: &dyn BlockColorIndex,
    rng: &mut R,
) -> VoxelSelection {
    let height_scale = config.clamped_height_scale();
    let (w, h) = (down.target_w, down.target_h);

    #[allow(clippy::cast_possible_wrap)]
    let size_x = w as i32;
    #[allow(clippy::cast_possible_wrap)]
    let size_z = h as i32;
    #[allow(clippy::cast_possible_wrap)]
    let size_y = if config.mode == ImportMode::Colormap {
        1
    } else {
        height_scale as i32
    };

    let (off_x, off_y, off_z) = config.origin.offset(size_x, size_y, size_z);
    let min = [off_x, off_y, off_z];
    let max = [size_x - 1 + off_x, size_y - 1 + off_y, size_z - 1 + off_z];

    let mut selection =
        VoxelSelection::with_capacity(min, max, estimate_capacity(config.mode, w, h, height_scale));

    #[allow(clippy::cast_precision_loss)]
    let scale_f = height_scale as f32;

    for iz in 0..h {
        for ix in 0..w {
            // Nearest-neighbour sample from the full-resolution grid
            let src_x = down.source_index(ix, grid.width());
            let src_z = down.source_index(iz, grid.height());
            let norm = grid.sample(src_x, src_z);

            let block_id =
                resolve_block_id(config.mode, colormap, color_index, blocks, rng, src_x, src_z);

            #[allow(clippy::cast_possible_wrap)]
            let (lx, lz) = (ix as i32 + off_x, iz as i32 + off_z);

            match config.mode {
                ImportMode::Heightmap => {
                    #[allow(clippy::cast_possible_truncation)]
                    let col_h = ((norm * scale_f).round() as i32).max(1);
                    for iy in 0..col_h {
                        selection.blocks.push(PlacedBlock {
                            x: lx,
                            y: iy + off_y,
                            z: lz,
                            block_id,
                        });
                    }
                }
                ImportMode::Surface | ImportMode::Normalmap => {
                    #[allow(clippy::cast_possible_truncation)]
                    let iy = ((norm * scale_f).round() as i32 - 1).max(0);
                    selection.blocks.push(PlacedBlock {
                        x: lx,
                        y: iy + off_y,
                        z: lz,
                        block_id,
                    });
                }
                ImportMode::Colormap => {
                    if colormap_opaque(colormap, src_x, src_z) {
                        selection.blocks.push(PlacedBlock {
                            x: lx,
                            y: off_y,
                            z: lz,
                            block_id,
                        });
                    }
                }
            }
        }
    }

    selection
}

/// Alpha gate for COLORMAP placement: true when there is no colormap, or
/// the sampled alpha passes the threshold.
fn colormap_opaque(colormap: Option<&RgbaImage>, src_x: u32, src_z: u32) -> bool {
    let Some(cm) = colormap else {
        return true;
    };
    let cx = src_x.min(cm.width() - 1);
    let cz = src_z.min(cm.height() - 1);
    cm.get_pixel(cx, cz).0[3] >= COLORMAP_ALPHA_THRESHOLD
}

/// Resolves the block type for one output cell.
///
/// COLORMAP / NORMALMAP with a colormap present sample its RGB at the
/// source-resolution coordinate and ask the colour index for the nearest
/// block; everything else (including a failed match) uses the weighted
/// selector.
fn resolve_block_id<R: Rng + ?Sized>(
    mode: ImportMode,
    colormap: Option<&RgbaImage>,
    color_index: &dyn BlockColorIndex,
    blocks: &[WeightedBlock],
    rng: &mut R,
    src_x: u32,
    src_z: u32,
) -> BlockId {
    if matches!(mode, ImportMode::Colormap | ImportMode::Normalmap) {
        if let Some(cm) = colormap {
            let cx = src_x.min(cm.width() - 1);
            let cz = src_z.min(cm.height() - 1);
            let p = cm.get_pixel(cx, cz).0;
            if let Some(id) = color_index.closest_block(p[0], p[1], p[2]) {
                return id;
            }
        }
    }
    select_weighted(blocks, rng)
}

/// Pre-size hint for the selection's block store.
///
/// HEIGHTMAP uses the ~50% average fill heuristic; exact counts are not
/// needed for a capacity hint.
fn estimate_capacity(mode: ImportMode, w: u32, h: u32, height_scale: u32) -> usize {
    let cells = w as usize * h as usize;
    match mode {
        ImportMode::Heightmap => cells * (height_scale as usize / 2).max(1),
        ImportMode::Surface | ImportMode::Colormap | ImportMode::Normalmap => cells,
    }
}
