//! Block compressor pipelines.
//!
//! Two codecs share the [`BlockCodec`] trait: a plain Huffman compressor,
//! and the Burrows-Wheeler pipeline that runs BWT, Move-to-Front, and then
//! Huffman over the rank stream. Neither owns any state; every call builds
//! its own transform buffers and code tree and discards them on return.

use crate::{bwt, huffman::HuffmanCoder, mtf};
use bwpack_core::bitstream::{BitReader, BitWriter};
use bwpack_core::error::{BwpackError, Result};
use bwpack_core::traits::BlockCodec;

/// Count how often each byte value occurs in `input`.
pub fn count_frequencies(input: &[u8]) -> [u64; 256] {
    let mut freqs = [0u64; 256];
    for &byte in input {
        freqs[byte as usize] += 1;
    }
    freqs
}

fn block_len(input: &[u8]) -> Result<u32> {
    u32::try_from(input.len()).map_err(|_| {
        BwpackError::invalid_argument("block larger than a 4-byte length can describe")
    })
}

/// Entropy-only compressor.
///
/// Wire layout: `[code tree header][original length: u32 BE][N codewords]`,
/// zero-padded to a whole byte. The empty block compresses to empty output.
#[derive(Debug, Default, Clone, Copy)]
pub struct HuffmanCompressor;

impl BlockCodec for HuffmanCompressor {
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }

        let coder = HuffmanCoder::from_frequencies(&count_frequencies(input))?;
        let mut writer = BitWriter::with_capacity(input.len() / 2);
        coder.write_header(&mut writer);
        writer.write_u32(block_len(input)?);
        for &byte in input {
            coder.encode(byte, &mut writer)?;
        }
        Ok(writer.into_bytes())
    }

    fn expand(&self, input: &[u8]) -> Result<Vec<u8>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }

        let mut reader = BitReader::new(input);
        let coder = HuffmanCoder::parse_header(&mut reader)?;
        let count = reader.read_u32()? as usize;
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(coder.decode(&mut reader)?);
        }
        Ok(out)
    }
}

/// The full Burrows-Wheeler pipeline.
///
/// Compression runs BWT, peels off the 4-byte rotation rank, Move-to-Front
/// transforms the permuted payload only, and Huffman-compresses the rank
/// stream. Wire layout: `[BWT rotation rank: 4 bytes BE][Huffman block]`,
/// so expansion can invert BWT last. The empty block compresses to empty
/// output.
#[derive(Debug, Default, Clone, Copy)]
pub struct BurrowsWheelerCompressor;

impl BlockCodec for BurrowsWheelerCompressor {
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }

        let transformed = bwt::transform(input);
        let (rank, payload) = transformed.split_at(bwt::HEADER_LEN);
        let ranks = mtf::transform(payload);
        let packed = HuffmanCompressor.compress(&ranks)?;

        let mut out = Vec::with_capacity(bwt::HEADER_LEN + packed.len());
        out.extend_from_slice(rank);
        out.extend_from_slice(&packed);
        Ok(out)
    }

    fn expand(&self, input: &[u8]) -> Result<Vec<u8>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }
        if input.len() < bwt::HEADER_LEN {
            return Err(BwpackError::unexpected_eof(bwt::HEADER_LEN - input.len()));
        }

        let (rank, packed) = input.split_at(bwt::HEADER_LEN);
        let ranks = HuffmanCompressor.expand(packed)?;
        let payload = mtf::inverse_transform(&ranks);

        let mut block = Vec::with_capacity(bwt::HEADER_LEN + payload.len());
        block.extend_from_slice(rank);
        block.extend_from_slice(&payload);
        bwt::inverse_transform(&block)
    }
}
