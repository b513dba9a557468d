//! Burrows-Wheeler transform.
//!
//! The BWT permutes a block so that bytes followed by similar contexts land
//! next to each other, which is what makes the downstream Move-to-Front and
//! Huffman stages effective. The transform is reversible given the rank of
//! the unrotated block within the sorted rotation order, carried as a 4-byte
//! big-endian header in front of the permuted payload.

use bwpack_core::error::{BwpackError, Result};
use std::cmp::Ordering;

/// Length in bytes of the rotation-rank header.
pub const HEADER_LEN: usize = 4;

/// Compare two cyclic rotations of `data` byte-by-byte with wraparound.
///
/// At most `n` byte pairs are examined: two distinct rotations of a block
/// made of a single repeated byte never produce a differing pair, so the
/// comparison must stop after one full cycle and report equality. The stable
/// sort in `transform` then keeps fully equal rotations in start-index order.
fn compare_rotations(data: &[u8], a: usize, b: usize) -> Ordering {
    let n = data.len();
    for i in 0..n {
        let x = data[(a + i) % n];
        let y = data[(b + i) % n];
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Apply the forward transform.
///
/// Output is the 4-byte big-endian rank of rotation 0 in the sorted rotation
/// order, followed by the last column of the sorted rotation matrix (the
/// byte cyclically preceding each rotation's start). Output length is
/// `n + 4` for a nonempty block; the empty block maps to empty output with
/// no header.
pub fn transform(data: &[u8]) -> Vec<u8> {
    if data.is_empty() {
        return Vec::new();
    }

    let n = data.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| compare_rotations(data, a, b));

    let rank = order
        .iter()
        .position(|&start| start == 0)
        .expect("rotation 0 is always among the sorted rotations") as u32;

    let mut out = Vec::with_capacity(HEADER_LEN + n);
    out.extend_from_slice(&rank.to_be_bytes());
    out.extend(order.iter().map(|&start| data[(start + n - 1) % n]));
    out
}

/// Invert the transform.
///
/// Reads the rotation rank from the header, rebuilds the successor relation
/// by stably ordering positions on their last-column byte (a counting sort,
/// the LF-mapping), and follows the chain for `n` steps. A header-only input
/// decodes to the empty block.
pub fn inverse_transform(data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    if data.len() < HEADER_LEN {
        return Err(BwpackError::unexpected_eof(HEADER_LEN - data.len()));
    }

    let rank = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
    let last = &data[HEADER_LEN..];
    let n = last.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    if rank >= n {
        return Err(BwpackError::corrupt_header(format!(
            "rotation rank {rank} out of range for a {n}-byte block"
        )));
    }

    let mut counts = [0usize; 256];
    for &byte in last {
        counts[byte as usize] += 1;
    }

    let mut slot = [0usize; 256];
    let mut total = 0;
    for (value, count) in counts.iter().enumerate() {
        slot[value] = total;
        total += count;
    }

    // next[k] is the position in `last` holding the k-th smallest byte,
    // equal bytes kept in position order.
    let mut next = vec![0usize; n];
    for (pos, &byte) in last.iter().enumerate() {
        next[slot[byte as usize]] = pos;
        slot[byte as usize] += 1;
    }

    let mut out = Vec::with_capacity(n);
    let mut cur = next[rank];
    for _ in 0..n {
        out.push(last[cur]);
        cur = next[cur];
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lcg_bytes(seed: u64, len: usize) -> Vec<u8> {
        let mut state = seed;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
                (state >> 33) as u8
            })
            .collect()
    }

    #[test]
    fn test_empty_block() {
        assert!(transform(b"").is_empty());
        assert_eq!(inverse_transform(b"").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_single_byte_block() {
        let out = transform(b"a");
        assert_eq!(out, vec![0, 0, 0, 0, b'a']);
        assert_eq!(inverse_transform(&out).unwrap(), b"a");
    }

    #[test]
    fn test_output_length_is_input_plus_header() {
        for len in [1usize, 2, 17, 256] {
            let data = lcg_bytes(len as u64, len);
            assert_eq!(transform(&data).len(), len + HEADER_LEN);
        }
    }

    #[test]
    fn test_known_block_all_rotations_distinct() {
        // Sorted rotations of "luke": eluk(3) kelu(2) luke(0) ukel(1), so the
        // unrotated block ranks 2nd and the last column reads "kuel".
        let out = transform(b"luke");
        assert_eq!(&out[..HEADER_LEN], &[0, 0, 0, 2]);
        assert_eq!(&out[HEADER_LEN..], b"kuel");
    }

    #[test]
    fn test_known_block_with_tied_prefixes() {
        // "lull" ranks its unrotated form 2nd as well; the payload "ulll"
        // checks the rank math when rotations share long common prefixes.
        let out = transform(b"lull");
        assert_eq!(&out[..HEADER_LEN], &[0, 0, 0, 2]);
        assert_eq!(&out[HEADER_LEN..], b"ulll");
    }

    #[test]
    fn test_repeated_byte_block_terminates_and_roundtrips() {
        // Every rotation of this block is identical; the bounded comparator
        // reports equality and the stable sort keeps index order, so the
        // unrotated block sorts first.
        let data = vec![99u8; 50];
        let out = transform(&data);
        assert_eq!(&out[..HEADER_LEN], &[0, 0, 0, 0]);
        assert_eq!(inverse_transform(&out).unwrap(), data);
    }

    #[test]
    fn test_roundtrip_strings() {
        let cases: &[&[u8]] = &[
            b"banana",
            b"mississippi",
            b"aluhgttttrsls",
            b"neeeeew",
            b"man this is fun",
            b"a man a plan a canal panama",
            b"colorless green ideas sleep furiously",
        ];
        for data in cases {
            let out = transform(data);
            assert_eq!(
                inverse_transform(&out).unwrap(),
                *data,
                "failed for {data:?}"
            );
        }
    }

    #[test]
    fn test_roundtrip_random_block() {
        let data = lcg_bytes(42, 500);
        assert_eq!(inverse_transform(&transform(&data)).unwrap(), data);
    }

    #[test]
    fn test_groups_similar_bytes() {
        let out = transform(b"abababab");
        let payload = &out[HEADER_LEN..];
        let runs = 1 + payload.windows(2).filter(|w| w[0] != w[1]).count();
        assert!(runs <= 4, "transform should cluster alternating input");
    }

    #[test]
    fn test_header_only_input_decodes_to_empty() {
        assert_eq!(inverse_transform(&[0, 0, 0, 0]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_truncated_header_rejected() {
        assert!(matches!(
            inverse_transform(&[0, 0]),
            Err(BwpackError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_out_of_range_rank_rejected() {
        // Rank 7 cannot index a 3-byte block.
        let bad = [0, 0, 0, 7, b'a', b'b', b'c'];
        assert!(matches!(
            inverse_transform(&bad),
            Err(BwpackError::CorruptHeader { .. })
        ));
    }
}
