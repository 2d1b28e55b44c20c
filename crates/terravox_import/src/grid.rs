//! # Height Grid & Transforms
//!
//! The normalised 2-D sample grid every decoder produces, plus the two
//! transforms applied before placement:
//!
//! - **Downscale**: a pure index mapping (nearest neighbour). No resampled
//!   buffer is ever allocated; placement reads straight from the raw grid.
//! - **Smoothing**: an optional 3x3 mean filter over the full-resolution
//!   grid. Border cells average their in-bounds neighbours only.
//!
//! ## Storage
//!
//! Samples live in one flat row-major buffer (stride = width, rows indexed
//! by the depth axis). Flat storage keeps per-row allocations out of the
//! decode path.

/// A normalised 2-D height grid.
///
/// Invariants: `width >= 1`, `height >= 1`, every sample in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightGrid {
    samples: Vec<f32>,
    width: u32,
    height: u32,
}

impl HeightGrid {
    /// Wraps a flat row-major sample buffer.
    ///
    /// # Panics
    ///
    /// Panics if the buffer length does not equal `width * height` or if
    /// either dimension is zero. Decoders construct grids from their own
    /// verified dimensions, so this is a programming error, not input error.
    #[must_use]
    pub fn from_samples(samples: Vec<f32>, width: u32, height: u32) -> Self {
        assert!(width >= 1 && height >= 1, "grid dimensions must be >= 1");
        assert_eq!(
            samples.len(),
            width as usize * height as usize,
            "sample buffer does not match dimensions"
        );
        Self {
            samples,
            width,
            height,
        }
    }

    /// Grid width (primary axis).
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height (secondary / depth axis).
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the sample at `(x, z)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    #[inline]
    #[must_use]
    pub fn sample(&self, x: u32, z: u32) -> f32 {
        assert!(x < self.width && z < self.height, "sample out of bounds");
        self.samples[z as usize * self.width as usize + x as usize]
    }

    /// Read-only view of the flat sample buffer.
    #[inline]
    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Applies `v -> 1 - v` to every sample in place.
    pub fn invert(&mut self) {
        for v in &mut self.samples {
            *v = 1.0 - *v;
        }
    }

    /// Returns a 3x3 mean-filtered copy of this grid.
    ///
    /// Border cells average only their in-bounds neighbours; there is no
    /// padding and no wraparound. Always operates on the full-resolution
    /// grid, regardless of any downscale in effect.
    #[must_use]
    pub fn box_blur(&self) -> Self {
        let w = self.width as usize;
        let h = self.height as usize;
        let mut out = vec![0.0_f32; w * h];

        for z in 0..h {
            for x in 0..w {
                let mut sum = 0.0_f32;
                let mut n = 0u32;
                for dz in -1_i64..=1 {
                    for dx in -1_i64..=1 {
                        let nz = z as i64 + dz;
                        let nx = x as i64 + dx;
                        if nz >= 0 && nz < h as i64 && nx >= 0 && nx < w as i64 {
                            #[allow(clippy::cast_sign_loss)]
                            {
                                sum += self.samples[nz as usize * w + nx as usize];
                            }
                            n += 1;
                        }
                    }
                }
                #[allow(clippy::cast_precision_loss)]
                {
                    out[z * w + x] = sum / n as f32;
                }
            }
        }

        Self {
            samples: out,
            width: self.width,
            height: self.height,
        }
    }
}

/// Nearest-neighbour downscale mapping from a raw grid to target extents.
///
/// Shared by the placement engine and the preview estimator so both agree
/// on the effective output dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Downscale {
    /// Raw-to-target scale factor, `<= 1.0` (1.0 when no downscale applies).
    pub scale: f32,
    /// Effective output width after the cap.
    pub target_w: u32,
    /// Effective output height after the cap.
    pub target_h: u32,
}

impl Downscale {
    /// Computes the downscale for raw dimensions under a `max_size` cap.
    ///
    /// If both raw dimensions fit the cap the mapping is the identity.
    /// Otherwise `scale = max_size / max(raw_w, raw_h)` and target
    /// dimensions are `round(raw * scale)`.
    #[must_use]
    pub fn compute(raw_w: u32, raw_h: u32, max_size: u32) -> Self {
        if raw_w <= max_size && raw_h <= max_size {
            return Self {
                scale: 1.0,
                target_w: raw_w,
                target_h: raw_h,
            };
        }
        #[allow(clippy::cast_precision_loss)]
        let scale = max_size as f32 / raw_w.max(raw_h) as f32;
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let target_w = (raw_w as f32 * scale).round() as u32;
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let target_h = (raw_h as f32 * scale).round() as u32;
        Self {
            scale,
            target_w,
            target_h,
        }
    }

    /// Maps a target index back to its nearest source index.
    ///
    /// `min(floor(t / scale), raw_dim - 1)` — the clamp covers float
    /// round-up at the far edge.
    #[inline]
    #[must_use]
    pub fn source_index(&self, target: u32, raw_dim: u32) -> u32 {
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let src = (target as f32 / self.scale) as u32;
        src.min(raw_dim - 1)
    }
}
