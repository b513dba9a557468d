//! # bwpack Core
//!
//! Core components for the bwpack block compressor.
//!
//! This crate provides the building blocks the codecs are assembled from:
//!
//! - [`bitstream`]: MSB-first bit-level I/O over in-memory buffers
//! - [`pqueue`]: array-backed binary-heap priority queue
//! - [`traits`]: the whole-block codec trait
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │ CLI: type/mode dispatch, file I/O              │
//! ├────────────────────────────────────────────────┤
//! │ Codec: BWT, MTF, Huffman, pipelines            │
//! ├────────────────────────────────────────────────┤
//! │ Core (this crate)                              │
//! │ BitReader/BitWriter, PriorityQueue, BlockCodec │
//! └────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bitstream;
pub mod error;
pub mod pqueue;
pub mod traits;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{BwpackError, Result};
pub use pqueue::PriorityQueue;
pub use traits::BlockCodec;
