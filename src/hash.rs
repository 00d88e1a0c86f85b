//! Deterministic Blake2s hashing helpers.
//!
//! The tree hasher is pluggable in principle; this crate ships the Blake2s
//! backend and uses it everywhere. All digests are 32 bytes.

use blake2::{Blake2s256, Digest as _};

/// Size of a digest emitted by the hasher.
pub const DIGEST_SIZE: usize = 32;

/// A 32-byte digest.
pub type Digest = [u8; DIGEST_SIZE];

/// Computes a deterministic 32-byte hash of the provided payload.
pub fn hash(input: &[u8]) -> Digest {
    let mut hasher = Blake2s256::new();
    hasher.update(input);
    hasher.finalize().into()
}

/// Hashes the concatenation of two 32-byte nodes, the combining step used
/// for every internal tree node and for the final root mix.
pub fn hash_pair(left: &Digest, right: &Digest) -> Digest {
    let mut hasher = Blake2s256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}
