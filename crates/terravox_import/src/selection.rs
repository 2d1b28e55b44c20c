//! # Voxel Selection
//!
//! The engine's output: a bounding box plus the placed block assignments.
//!
//! A selection is produced exactly once per import and handed to the
//! consumer (clipboard/paste sink); the engine keeps no reference after
//! handoff.

use crate::BlockId;

/// One placed block in selection-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedBlock {
    /// X coordinate (origin offset already applied).
    pub x: i32,
    /// Y coordinate (origin offset already applied).
    pub y: i32,
    /// Z coordinate (origin offset already applied).
    pub z: i32,
    /// Registry id of the placed block type.
    pub block_id: BlockId,
}

/// A bounded set of positioned block assignments.
///
/// Invariant: every placed block lies inside `[min, max]`, and the box
/// extents equal the mode-derived structure size.
#[derive(Clone, Debug)]
pub struct VoxelSelection {
    /// Minimum corner of the bounding box (inclusive).
    pub min: [i32; 3],
    /// Maximum corner of the bounding box (inclusive).
    pub max: [i32; 3],
    /// The placed blocks.
    pub blocks: Vec<PlacedBlock>,
}

impl VoxelSelection {
    /// Creates a selection with the given bounds and pre-sized block store.
    #[must_use]
    pub fn with_capacity(min: [i32; 3], max: [i32; 3], capacity: usize) -> Self {
        Self {
            min,
            max,
            blocks: Vec::with_capacity(capacity),
        }
    }

    /// Number of placed blocks.
    #[inline]
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Structure extents derived from the bounding box.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> (i32, i32, i32) {
        (
            self.max[0] - self.min[0] + 1,
            self.max[1] - self.min[1] + 1,
            self.max[2] - self.min[2] + 1,
        )
    }

    /// True when every placed block lies inside the bounding box.
    #[must_use]
    pub fn is_within_bounds(&self) -> bool {
        self.blocks.iter().all(|b| {
            b.x >= self.min[0]
                && b.x <= self.max[0]
                && b.y >= self.min[1]
                && b.y <= self.max[1]
                && b.z >= self.min[2]
                && b.z <= self.max[2]
        })
    }

    /// Human-readable success summary for the consumer.
    #[must_use]
    pub fn summary(&self) -> String {
        let (sx, sy, sz) = self.size();
        format!(
            "Success! {} blocks copied to clipboard ({sx}x{sy}x{sz})",
            self.block_count()
        )
    }
}
