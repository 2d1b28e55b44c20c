//! # Block Pattern Parsing & Weighted Selection
//!
//! A block pattern is a comma-separated list of tokens, each either a bare
//! block name or `weight%name` (weight defaults to 100):
//!
//! ```text
//! 70%Rock_Stone,30%Dirt
//! ```
//!
//! Names are resolved through the [`BlockNameResolver`] collaborator; the
//! parser itself knows nothing about the block catalogue.
//!
//! Selection is inverse-CDF sampling over the weights: one uniform draw in
//! `[0, total)` and a cumulative scan, O(n) per call. The random source is
//! injected so imports are reproducible under a fixed seed.

use rand::Rng;

use crate::error::{ImportError, ImportResult};
use crate::BlockId;

/// Resolves block names to registry ids.
///
/// Implemented outside this crate by the block registry; ids are always
/// non-zero.
pub trait BlockNameResolver {
    /// Returns the id for a block name, or `None` if unknown.
    fn resolve(&self, name: &str) -> Option<BlockId>;
}

/// A block type paired with a relative selection weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeightedBlock {
    /// Registry id of the block type.
    pub block_id: BlockId,
    /// Relative weight; entries with non-positive total fall back to the
    /// first entry.
    pub weight: i32,
}

/// Parses a block pattern into an ordered weighted list.
///
/// Tokens are split on commas and trimmed; empty tokens are skipped. A `%`
/// after at least one character splits the token into an integer weight and
/// a block name.
///
/// # Errors
///
/// - [`ImportError::InvalidWeight`] when a weight prefix is not an integer
/// - [`ImportError::InvalidBlockName`] when the resolver rejects a name
/// - [`ImportError::InvalidBlockPattern`] when no tokens survive
pub fn parse_block_pattern(
    pattern: &str,
    resolver: &dyn BlockNameResolver,
) -> ImportResult<Vec<WeightedBlock>> {
    let mut result = Vec::new();
    for token in pattern.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let (weight, name) = match token.find('%') {
            Some(idx) if idx > 0 => {
                let weight = token[..idx].trim().parse::<i32>().map_err(|_| {
                    ImportError::InvalidWeight {
                        token: token.to_string(),
                    }
                })?;
                (weight, token[idx + 1..].trim())
            }
            _ => (100, token),
        };
        let block_id = resolver
            .resolve(name)
            .ok_or_else(|| ImportError::InvalidBlockName {
                name: name.to_string(),
            })?;
        result.push(WeightedBlock { block_id, weight });
    }
    if result.is_empty() {
        return Err(ImportError::InvalidBlockPattern);
    }
    Ok(result)
}

/// Draws one block id from a weighted list.
///
/// Fast path: a single entry is returned without touching the RNG. A
/// non-positive weight total falls back to the first entry — an explicit
/// degenerate case, not an error.
///
/// # Panics
///
/// Panics if the list is empty; [`parse_block_pattern`] never produces an
/// empty list.
pub fn select_weighted<R: Rng + ?Sized>(blocks: &[WeightedBlock], rng: &mut R) -> BlockId {
    assert!(!blocks.is_empty(), "weighted block list must be non-empty");
    if blocks.len() == 1 {
        return blocks[0].block_id;
    }
    let total: i64 = blocks.iter().map(|b| i64::from(b.weight)).sum();
    if total <= 0 {
        return blocks[0].block_id;
    }
    let roll = rng.gen_range(0..total);
    let mut cumulative = 0_i64;
    for block in blocks {
        cumulative += i64::from(block.weight);
        if roll < cumulative {
            return block.block_id;
        }
    }
    blocks[0].block_id
}
