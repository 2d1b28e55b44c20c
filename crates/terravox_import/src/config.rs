//! # Import Configuration
//!
//! The immutable configuration snapshot an import runs against.
//!
//! The interactive surface that edits these values lives outside this
//! crate; it captures one [`ImportConfig`] per submission so a running
//! import never races a live editor. The engine clamps the numeric limits
//! itself at entry, so a snapshot built from raw user input is still safe.

use std::path::PathBuf;

/// Smallest accepted height scale.
pub const MIN_HEIGHT_SCALE: u32 = 1;
/// Largest accepted height scale.
pub const MAX_HEIGHT_SCALE: u32 = 320;
/// Default height scale.
pub const DEFAULT_HEIGHT_SCALE: u32 = 32;
/// Largest accepted XZ footprint cap.
pub const MAX_MAX_SIZE: u32 = 1024;
/// Default XZ footprint cap.
pub const DEFAULT_MAX_SIZE: u32 = 256;
/// Default block pattern.
pub const DEFAULT_BLOCK_PATTERN: &str = "Rock_Stone";

/// Placement policy selecting how grid samples become voxels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImportMode {
    /// Solid terrain column, height derived from pixel brightness.
    #[default]
    Heightmap,
    /// Single surface block per column (hollow).
    Surface,
    /// Flat image-to-block colour match; height value unused.
    Colormap,
    /// Surface shape from a normal-map image; colour used for block match.
    Normalmap,
}

impl ImportMode {
    /// Parses a mode name, defaulting to [`ImportMode::Heightmap`] for
    /// anything unrecognised.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "surface" => Self::Surface,
            "colormap" => Self::Colormap,
            "normalmap" => Self::Normalmap,
            _ => Self::Heightmap,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heightmap => "heightmap",
            Self::Surface => "surface",
            Self::Colormap => "colormap",
            Self::Normalmap => "normalmap",
        }
    }
}

/// Which raster channel supplies the height sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Channel {
    /// ITU-R BT.709 luminance (0.2126 R + 0.7152 G + 0.0722 B).
    #[default]
    Luminance,
    /// Red channel.
    Red,
    /// Green channel.
    Green,
    /// Blue channel.
    Blue,
    /// Alpha channel (1.0 when the source has none).
    Alpha,
}

impl Channel {
    /// Parses a channel name, defaulting to [`Channel::Luminance`] for
    /// anything unrecognised.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "red" => Self::Red,
            "green" => Self::Green,
            "blue" => Self::Blue,
            "alpha" => Self::Alpha,
            _ => Self::Luminance,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Luminance => "luminance",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Alpha => "alpha",
        }
    }
}

/// Named anchor translating the placed structure into world-relative space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Origin {
    /// No offset; the structure grows from its minimum corner.
    BottomFrontLeft,
    /// Centred on XZ, resting on the bottom plane.
    #[default]
    BottomCenter,
    /// Centred on all three axes.
    Center,
    /// Centred on XZ, hanging below the top plane.
    TopCenter,
}

impl Origin {
    /// Parses an origin name, defaulting to [`Origin::BottomCenter`] for
    /// anything unrecognised.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "bottom_front_left" => Self::BottomFrontLeft,
            "center" => Self::Center,
            "top_center" => Self::TopCenter,
            _ => Self::BottomCenter,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BottomFrontLeft => "bottom_front_left",
            Self::BottomCenter => "bottom_center",
            Self::Center => "center",
            Self::TopCenter => "top_center",
        }
    }

    /// Offset applied to every placed coordinate and the bounding box,
    /// given the structure extents.
    #[must_use]
    pub const fn offset(self, size_x: i32, size_y: i32, size_z: i32) -> (i32, i32, i32) {
        match self {
            Self::BottomFrontLeft => (0, 0, 0),
            Self::BottomCenter => (-(size_x / 2), 0, -(size_z / 2)),
            Self::Center => (-(size_x / 2), -(size_y / 2), -(size_z / 2)),
            Self::TopCenter => (-(size_x / 2), -size_y, -(size_z / 2)),
        }
    }
}

/// Immutable import configuration snapshot.
#[derive(Clone, Debug)]
pub struct ImportConfig {
    /// Path to the heightmap file.
    pub heightmap_path: PathBuf,
    /// Optional secondary colour image (COLORMAP / NORMALMAP modes).
    pub colormap_path: Option<PathBuf>,
    /// Placement mode.
    pub mode: ImportMode,
    /// Raster channel feeding the height samples.
    pub channel: Channel,
    /// World anchor for the placed structure.
    pub origin: Origin,
    /// Vertical scale in blocks; clamped to `[1, 320]` at engine entry.
    pub height_scale: u32,
    /// XZ footprint cap; clamped to `[1, 1024]` at engine entry.
    pub max_size: u32,
    /// Invert heights (`v -> 1 - v`) after normalisation.
    pub invert_height: bool,
    /// Apply the 3x3 smoothing pass before placement.
    pub smooth: bool,
    /// Weighted block pattern, e.g. `"70%Rock_Stone,30%Dirt"`.
    pub block_pattern: String,
}

impl ImportConfig {
    /// Creates a configuration for a heightmap path with default settings.
    #[must_use]
    pub fn new(heightmap_path: impl Into<PathBuf>) -> Self {
        Self {
            heightmap_path: heightmap_path.into(),
            colormap_path: None,
            mode: ImportMode::default(),
            channel: Channel::default(),
            origin: Origin::default(),
            height_scale: DEFAULT_HEIGHT_SCALE,
            max_size: DEFAULT_MAX_SIZE,
            invert_height: false,
            smooth: false,
            block_pattern: DEFAULT_BLOCK_PATTERN.to_string(),
        }
    }

    /// Height scale clamped into its documented range.
    #[inline]
    #[must_use]
    pub fn clamped_height_scale(&self) -> u32 {
        self.height_scale.clamp(MIN_HEIGHT_SCALE, MAX_HEIGHT_SCALE)
    }

    /// Footprint cap clamped into its documented range.
    #[inline]
    #[must_use]
    pub fn clamped_max_size(&self) -> u32 {
        self.max_size.clamp(1, MAX_MAX_SIZE)
    }
}
