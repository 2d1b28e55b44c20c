//! # TERRAVOX Import Engine
//!
//! Converts a 2-D height or colour image into a three-dimensional voxel
//! layout: a bounded set of (position, block-type) assignments ready to
//! paste into a world.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: same file + same seed = same selection, always
//! 2. **Pure**: the engine is a function of its configuration snapshot;
//!    no mutable session state survives a call
//! 3. **Whole-grid**: the full raw grid is decoded before placement —
//!    memory is bounded by the source, placement cost by `max_size`
//! 4. **Injectable collaborators**: name resolution, colour matching and
//!    randomness come in through traits and `rand::Rng`
//!
//! ## Pipeline
//!
//! ```text
//! Format Decoder -> Grid Transform -> Placement Engine -> VoxelSelection
//!                                        |
//!                   Block Pattern Parser -> Weighted Selector
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use terravox_import::{run_import, ImportConfig};
//!
//! let mut cfg = ImportConfig::new("terrain.png");
//! cfg.height_scale = 64;
//! let selection = run_import(&cfg, &registry, &registry, &mut rng)?;
//! println!("{}", selection.summary());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod decode;
pub mod error;
pub mod grid;
pub mod half;
pub mod pattern;
pub mod placement;
pub mod preview;
pub mod selection;

/// Registry identifier of a block type. Always non-zero; 0 is reserved
/// for "no block".
pub type BlockId = u32;

pub use config::{Channel, ImportConfig, ImportMode, Origin};
pub use decode::{decode_height_data, SourceFormat};
pub use error::{ImportError, ImportResult};
pub use grid::{Downscale, HeightGrid};
pub use half::half_to_f32;
pub use pattern::{parse_block_pattern, select_weighted, BlockNameResolver, WeightedBlock};
pub use placement::{run_import, BlockColorIndex, COLORMAP_ALPHA_THRESHOLD};
pub use preview::{format_count, preview_info, read_dimensions};
pub use selection::{PlacedBlock, VoxelSelection};
