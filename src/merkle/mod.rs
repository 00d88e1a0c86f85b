//! Chunk merkleization and capacity-stable hash-tree roots.
//!
//! The [`chunk`] half provides the generic binary padding/pairing tree over
//! 32-byte chunks, with precomputed zero-subtree digests so sparse trees cost
//! `O(occupied)` hashes. The [`root`] half applies it to records: a body tree
//! of exactly `capacity` leaves plus a separately hashed presence indicator.

mod chunk;
mod root;

pub use chunk::{merkleize, mix_in_length, pack_bytes, zero_subtree, Chunk, CHUNK_SIZE, ZERO_CHUNK};
pub use root::hash_tree_root;
