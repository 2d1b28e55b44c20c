//! # TERRAVOX Block Registry
//!
//! The catalogue of block types an import can place. The import engine
//! never knows block names or colours; it asks this registry through the
//! [`BlockNameResolver`] and [`BlockColorIndex`] traits.
//!
//! A registry is loaded once, either from a TOML definition file or from
//! the built-in default set, and is immutable afterwards. Ids are dense
//! positive integers assigned in definition order; id 0 is reserved for
//! "no block".
//!
//! ## Definition file format
//!
//! ```toml
//! [[blocks]]
//! name = "Rock_Stone"
//! color = [128, 128, 128]
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use terravox_import::{BlockColorIndex, BlockId, BlockNameResolver};

/// Errors that can occur while loading a block registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The definition file could not be read.
    #[error("failed to read registry file: {0}")]
    Io(#[from] std::io::Error),

    /// The definition file is not valid TOML.
    #[error("failed to parse registry file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The definition file declares no blocks.
    #[error("registry defines no blocks")]
    Empty,

    /// Two blocks share the same name.
    #[error("duplicate block name: {0}")]
    DuplicateName(String),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// One block definition as declared in a TOML file.
#[derive(Clone, Debug, Deserialize)]
pub struct BlockDef {
    /// Unique block name, matched exactly by the pattern parser.
    pub name: String,
    /// Representative RGB colour used for colormap matching.
    pub color: [u8; 3],
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    blocks: Vec<BlockDef>,
}

/// An immutable catalogue of block types.
#[derive(Clone, Debug)]
pub struct BlockRegistry {
    defs: Vec<BlockDef>,
    by_name: HashMap<String, BlockId>,
}

impl BlockRegistry {
    /// Builds a registry from a list of definitions.
    ///
    /// Ids are assigned densely in list order, starting at 1.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Empty`] for an empty list and
    /// [`RegistryError::DuplicateName`] when two definitions collide.
    pub fn from_defs(defs: Vec<BlockDef>) -> RegistryResult<Self> {
        if defs.is_empty() {
            return Err(RegistryError::Empty);
        }
        let mut by_name = HashMap::with_capacity(defs.len());
        for (index, def) in defs.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let id = (index + 1) as BlockId;
            if by_name.insert(def.name.clone(), id).is_some() {
                return Err(RegistryError::DuplicateName(def.name.clone()));
            }
        }
        Ok(Self { defs, by_name })
    }

    /// Loads a registry from a TOML definition file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read, parsed, or fails
    /// the [`Self::from_defs`] validation.
    pub fn from_toml(path: impl AsRef<Path>) -> RegistryResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parses a registry from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error when the text is not valid TOML or fails the
    /// [`Self::from_defs`] validation.
    pub fn from_toml_str(text: &str) -> RegistryResult<Self> {
        let file: RegistryFile = toml::from_str(text)?;
        Self::from_defs(file.blocks)
    }

    /// The built-in default block set.
    ///
    /// Covers the common terrain materials so imports work without a
    /// definition file; `Rock_Stone` is the default pattern block.
    #[must_use]
    pub fn builtin() -> Self {
        let defs = vec![
            def("Rock_Stone", [128, 128, 128]),
            def("Rock_Granite", [149, 103, 86]),
            def("Rock_Basalt", [73, 72, 78]),
            def("Dirt", [134, 96, 67]),
            def("Grass", [95, 159, 53]),
            def("Sand", [219, 207, 163]),
            def("Gravel", [136, 126, 126]),
            def("Snow", [240, 251, 251]),
            def("Ice", [145, 183, 253]),
            def("Water", [47, 67, 244]),
            def("Clay", [159, 164, 177]),
            def("Wood_Oak", [156, 127, 78]),
            def("Leaves_Oak", [60, 143, 40]),
        ];
        // The built-in set has no duplicates and is never empty
        match Self::from_defs(defs) {
            Ok(registry) => registry,
            Err(_) => unreachable!("built-in block set is valid"),
        }
    }

    /// Number of registered block types.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// True when the registry holds no blocks (never, post-construction).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// The definition behind an id, if the id is registered.
    #[must_use]
    pub fn get(&self, id: BlockId) -> Option<&BlockDef> {
        if id == 0 {
            return None;
        }
        self.defs.get(id as usize - 1)
    }
}

impl BlockNameResolver for BlockRegistry {
    fn resolve(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }
}

impl BlockColorIndex for BlockRegistry {
    /// Full scan minimising squared RGB distance. The catalogue is small
    /// enough that a spatial index would not pay for itself.
    fn closest_block(&self, r: u8, g: u8, b: u8) -> Option<BlockId> {
        let mut best: Option<(BlockId, i32)> = None;
        for (index, blockdef) in self.defs.iter().enumerate() {
            let dr = i32::from(blockdef.color[0]) - i32::from(r);
            let dg = i32::from(blockdef.color[1]) - i32::from(g);
            let db = i32::from(blockdef.color[2]) - i32::from(b);
            let dist = dr * dr + dg * dg + db * db;
            #[allow(clippy::cast_possible_truncation)]
            let id = (index + 1) as BlockId;
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((id, dist));
            }
        }
        best.map(|(id, _)| id)
    }
}

fn def(name: &str, color: [u8; 3]) -> BlockDef {
    BlockDef {
        name: name.to_string(),
        color,
    }
}
