//! Huffman coding.
//!
//! [`HuffmanCoder`] owns one code tree per block: built once from byte
//! frequencies (or parsed back from a serialized header), then used for many
//! per-symbol encode/decode calls and one header emission.
//!
//! The tree lives in a flat arena of nodes addressed by index. Leaves carry
//! their symbol; internal nodes carry two child indices; every node keeps a
//! parent back-index so codewords can be derived by walking leaf-to-root.
//!
//! # Header format
//!
//! The tree serializes in preorder: one tag bit per node (`0` leaf, `1`
//! internal), leaves followed by the raw 8-bit symbol value. An internal
//! node's tag is followed by its left then right subtree.

use bwpack_core::bitstream::{BitReader, BitWriter};
use bwpack_core::error::{BwpackError, Result};
use bwpack_core::pqueue::PriorityQueue;

/// Header tag bit marking a leaf node.
const LEAF: bool = false;
/// Header tag bit marking an internal node.
const INTERNAL: bool = true;
/// Codeword bit selecting the left child.
const LEFT: bool = false;
/// Codeword bit selecting the right child.
const RIGHT: bool = true;

/// Upper bound on tree depth: a full binary tree over a 256-symbol alphabet
/// never nests more than 255 internal nodes.
const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy)]
enum NodeKind {
    Leaf(u8),
    Internal { left: usize, right: usize },
}

#[derive(Debug, Clone, Copy)]
struct Node {
    kind: NodeKind,
    freq: u64,
    parent: Option<usize>,
}

/// A Huffman code over byte symbols.
#[derive(Debug)]
pub struct HuffmanCoder {
    nodes: Vec<Node>,
    root: usize,
    /// Arena index of the leaf for each byte value present in the code.
    leaf_of: [Option<usize>; 256],
}

impl HuffmanCoder {
    /// Build a code from per-byte frequency counts.
    ///
    /// Symbols with a zero count are absent from the code. Construction
    /// inserts one leaf per present symbol into a min-heap keyed on
    /// frequency, then repeatedly merges the two smallest nodes (first
    /// polled becomes the left child) until a single root remains. Ties on
    /// frequency break by node creation order, so headers are reproducible.
    ///
    /// Fails with [`BwpackError::InvalidArgument`] when every count is zero.
    pub fn from_frequencies(freqs: &[u64; 256]) -> Result<Self> {
        let mut nodes = Vec::new();
        let mut leaf_of = [None; 256];

        for (symbol, &freq) in freqs.iter().enumerate() {
            if freq > 0 {
                let index = nodes.len();
                nodes.push(Node {
                    kind: NodeKind::Leaf(symbol as u8),
                    freq,
                    parent: None,
                });
                leaf_of[symbol] = Some(index);
            }
        }

        if nodes.is_empty() {
            return Err(BwpackError::invalid_argument(
                "frequency table has no symbols",
            ));
        }

        // Queue entries are (frequency, creation index); the natural tuple
        // ordering makes equal frequencies resolve by creation order.
        let mut pq = PriorityQueue::with_capacity(nodes.len())?;
        for (index, node) in nodes.iter().enumerate() {
            pq.push((node.freq, index));
        }

        while pq.len() > 1 {
            let (left_freq, left) = pq.pop().expect("queue holds at least two nodes");
            let (right_freq, right) = pq.pop().expect("queue holds at least two nodes");
            let merged = nodes.len();
            nodes.push(Node {
                kind: NodeKind::Internal { left, right },
                freq: left_freq + right_freq,
                parent: None,
            });
            nodes[left].parent = Some(merged);
            nodes[right].parent = Some(merged);
            pq.push((left_freq + right_freq, merged));
        }

        let root = pq.pop().map(|(_, index)| index).expect("one node remains");
        Ok(Self {
            nodes,
            root,
            leaf_of,
        })
    }

    /// Parse a code back from the serialized header format.
    ///
    /// Fails with [`BwpackError::UnexpectedEof`] if the stream ends
    /// mid-header and [`BwpackError::CorruptHeader`] if the tag sequence
    /// cannot describe a tree over the byte alphabet.
    pub fn parse_header(reader: &mut BitReader<'_>) -> Result<Self> {
        let mut nodes = Vec::new();
        let mut leaf_of = [None; 256];
        let root = Self::read_node(reader, &mut nodes, &mut leaf_of, 0)?;
        Ok(Self {
            nodes,
            root,
            leaf_of,
        })
    }

    fn read_node(
        reader: &mut BitReader<'_>,
        nodes: &mut Vec<Node>,
        leaf_of: &mut [Option<usize>; 256],
        depth: usize,
    ) -> Result<usize> {
        if depth > MAX_DEPTH {
            return Err(BwpackError::corrupt_header(
                "tag sequence nests deeper than the byte alphabet allows",
            ));
        }

        if reader.read_bit()? == LEAF {
            let symbol = reader.read_byte()?;
            if leaf_of[symbol as usize].is_some() {
                return Err(BwpackError::corrupt_header(format!(
                    "symbol {symbol:#04x} appears twice"
                )));
            }
            let index = nodes.len();
            nodes.push(Node {
                kind: NodeKind::Leaf(symbol),
                freq: 0,
                parent: None,
            });
            leaf_of[symbol as usize] = Some(index);
            Ok(index)
        } else {
            let left = Self::read_node(reader, nodes, leaf_of, depth + 1)?;
            let right = Self::read_node(reader, nodes, leaf_of, depth + 1)?;
            let index = nodes.len();
            let freq = nodes[left].freq + nodes[right].freq;
            nodes.push(Node {
                kind: NodeKind::Internal { left, right },
                freq,
                parent: None,
            });
            nodes[left].parent = Some(index);
            nodes[right].parent = Some(index);
            Ok(index)
        }
    }

    /// Serialize the code tree in the header format.
    pub fn write_header(&self, writer: &mut BitWriter) {
        self.write_node(self.root, writer);
    }

    fn write_node(&self, index: usize, writer: &mut BitWriter) {
        match self.nodes[index].kind {
            NodeKind::Leaf(symbol) => {
                writer.write_bit(LEAF);
                writer.write_byte(symbol);
            }
            NodeKind::Internal { left, right } => {
                writer.write_bit(INTERNAL);
                self.write_node(left, writer);
                self.write_node(right, writer);
            }
        }
    }

    /// Emit the codeword for `symbol`.
    ///
    /// Walks from the symbol's leaf up to the root recording which side of
    /// its parent each node is on, then writes those bits in root-to-leaf
    /// order. A code built over a single symbol has an empty codeword.
    ///
    /// Fails with [`BwpackError::InvalidArgument`] if the symbol is not part
    /// of this code.
    pub fn encode(&self, symbol: u8, writer: &mut BitWriter) -> Result<()> {
        let Some(leaf) = self.leaf_of[symbol as usize] else {
            return Err(BwpackError::invalid_argument(format!(
                "symbol {symbol:#04x} is not part of this code"
            )));
        };

        let mut path = Vec::new();
        let mut node = leaf;
        while let Some(parent) = self.nodes[node].parent {
            let bit = match self.nodes[parent].kind {
                NodeKind::Internal { left, .. } if node == left => LEFT,
                NodeKind::Internal { .. } => RIGHT,
                NodeKind::Leaf(_) => unreachable!("a parent node is always internal"),
            };
            path.push(bit);
            node = parent;
        }

        for &bit in path.iter().rev() {
            writer.write_bit(bit);
        }
        Ok(())
    }

    /// Decode one symbol, descending left on `0` and right on `1` until a
    /// leaf is reached.
    ///
    /// A single-leaf code returns its symbol without consuming bits. Fails
    /// with [`BwpackError::UnexpectedEof`] if the stream ends mid-codeword.
    pub fn decode(&self, reader: &mut BitReader<'_>) -> Result<u8> {
        let mut node = self.root;
        loop {
            match self.nodes[node].kind {
                NodeKind::Leaf(symbol) => return Ok(symbol),
                NodeKind::Internal { left, right } => {
                    node = if reader.read_bit()? == LEFT { left } else { right };
                }
            }
        }
    }

    /// Number of distinct symbols in the code.
    pub fn symbol_count(&self) -> usize {
        self.leaf_of.iter().flatten().count()
    }

    /// The symbols present in the code, in ascending byte order.
    pub fn symbols(&self) -> Vec<u8> {
        (0u16..256)
            .filter(|&value| self.leaf_of[value as usize].is_some())
            .map(|value| value as u8)
            .collect()
    }

    /// Codeword length in bits for `symbol`, or `None` if absent.
    pub fn code_len(&self, symbol: u8) -> Option<usize> {
        let mut node = self.leaf_of[symbol as usize]?;
        let mut len = 0;
        while let Some(parent) = self.nodes[node].parent {
            len += 1;
            node = parent;
        }
        Some(len)
    }
}
