//! Core trait for block compression.
//!
//! Every codec in the workspace operates on whole in-memory blocks: one call
//! owns the full input and produces the full output. There is no streaming,
//! no shared state across calls, and no suspension; a future multi-request
//! service would serialize per-block work around this trait.

use crate::error::Result;

/// A whole-block, in-memory compressor.
///
/// Implementations must be lossless: `expand(compress(x)) == x` for every
/// byte sequence `x`, including the empty one. Any error is terminal for the
/// whole block; there is no partial-block recovery.
pub trait BlockCodec {
    /// Compress one block.
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Expand one block previously produced by `compress`.
    fn expand(&self, input: &[u8]) -> Result<Vec<u8>>;
}
