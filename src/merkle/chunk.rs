use once_cell::sync::Lazy;

use crate::hash::{hash_pair, Digest};

/// Size of one Merkle-tree input chunk.
pub const CHUNK_SIZE: usize = 32;

/// A 32-byte chunk of Merkle-tree input.
pub type Chunk = [u8; CHUNK_SIZE];

/// The all-zero chunk used to pad sparse trees.
pub const ZERO_CHUNK: Chunk = [0u8; CHUNK_SIZE];

/// Deepest zero subtree the ladder precomputes (2^40 chunks).
const ZERO_LADDER_DEPTH: usize = 40;

/// Roots of all-zero subtrees by depth: entry `d` is the root of a perfect
/// tree over `2^d` zero chunks. Precomputing the ladder keeps merkleization
/// of mostly-empty trees at `O(occupied)` instead of `O(capacity)`.
static ZERO_SUBTREES: Lazy<[Digest; ZERO_LADDER_DEPTH + 1]> = Lazy::new(|| {
    let mut ladder = [ZERO_CHUNK; ZERO_LADDER_DEPTH + 1];
    for depth in 1..=ZERO_LADDER_DEPTH {
        ladder[depth] = hash_pair(&ladder[depth - 1], &ladder[depth - 1]);
    }
    ladder
});

/// Root of an all-zero subtree of the given depth.
pub fn zero_subtree(depth: usize) -> Digest {
    if depth <= ZERO_LADDER_DEPTH {
        return ZERO_SUBTREES[depth];
    }
    let mut digest = ZERO_SUBTREES[ZERO_LADDER_DEPTH];
    for _ in ZERO_LADDER_DEPTH..depth {
        digest = hash_pair(&digest, &digest);
    }
    digest
}

/// Tree depth needed to hold `limit` leaf chunks (`limit >= 1`).
fn depth_for(limit: usize) -> usize {
    limit.next_power_of_two().trailing_zeros() as usize
}

/// Merkleizes a chunk list padded up to `limit` leaves with zero chunks.
///
/// `limit` fixes the tree shape regardless of how many chunks are actually
/// supplied; callers must provide at most `limit` chunks. Zero-only subtrees
/// are resolved through the precomputed ladder rather than materialized.
pub fn merkleize(chunks: &[Chunk], limit: usize) -> Digest {
    debug_assert!(limit >= 1);
    debug_assert!(chunks.len() <= limit);
    subtree_root(chunks, depth_for(limit))
}

fn subtree_root(chunks: &[Chunk], depth: usize) -> Digest {
    if depth == 0 {
        return chunks.first().copied().unwrap_or(ZERO_CHUNK);
    }
    if chunks.is_empty() {
        return zero_subtree(depth);
    }
    let half = 1usize << (depth - 1);
    if chunks.len() <= half {
        hash_pair(&subtree_root(chunks, depth - 1), &zero_subtree(depth - 1))
    } else {
        hash_pair(
            &subtree_root(&chunks[..half], depth - 1),
            &subtree_root(&chunks[half..], depth - 1),
        )
    }
}

/// Packs raw bytes into 32-byte chunks, zero-padding the final chunk.
pub fn pack_bytes(bytes: &[u8]) -> Vec<Chunk> {
    bytes
        .chunks(CHUNK_SIZE)
        .map(|piece| {
            let mut chunk = ZERO_CHUNK;
            chunk[..piece.len()].copy_from_slice(piece);
            chunk
        })
        .collect()
}

/// Mixes a length into a root, the closing step for variable-length lists.
pub fn mix_in_length(root: &Digest, length: u64) -> Digest {
    let mut chunk = ZERO_CHUNK;
    chunk[..8].copy_from_slice(&length.to_le_bytes());
    hash_pair(root, &chunk)
}
