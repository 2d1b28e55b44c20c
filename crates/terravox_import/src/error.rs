//! # Import Error Types
//!
//! All errors that can terminate a heightmap import.
//!
//! The engine returns exactly one of these per failed import; no partial
//! [`crate::selection::VoxelSelection`] is ever handed out on failure.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during a heightmap import.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The source file does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The file extension is not one the decoder understands.
    #[error("unsupported format: {extension:?} (expected .png/.bmp/.jpg/.jpeg/.tga/.f32/.f16)")]
    UnsupportedFormat {
        /// The offending extension (lowercased), if the path had one.
        extension: String,
    },

    /// The file bytes could not be decoded into a height grid.
    ///
    /// Raw float files additionally require the element count to be a
    /// perfect square.
    #[error("corrupt data: {0}")]
    CorruptData(String),

    /// A block pattern token carried a weight prefix that is not an integer.
    #[error("invalid weight in block pattern token {token:?}")]
    InvalidWeight {
        /// The token whose weight failed to parse.
        token: String,
    },

    /// A block pattern named a block the registry does not know.
    #[error("unknown block name: {name:?}")]
    InvalidBlockName {
        /// The unresolved block name.
        name: String,
    },

    /// The block pattern resolved to an empty list.
    #[error("invalid block pattern: no blocks")]
    InvalidBlockPattern,

    /// The import was submitted without a live execution context
    /// (worker queue gone, clipboard consumer missing).
    #[error("execution context missing")]
    ExecutionContextMissing,

    /// Underlying I/O failure while reading the source file.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;
