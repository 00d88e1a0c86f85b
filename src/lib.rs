#![forbid(unsafe_code)]

//! Binary codec and capacity-stable Merkle hashing for stable containers.
//!
//! A stable container is a record whose field set may grow over time without
//! invalidating previously issued signatures or Merkle proofs. The crate
//! tracks which fields of a record are present, serializes only present
//! fields compactly, rejects malformed presence indicators on decode, and
//! computes a Merkle root whose tree shape depends only on the schema's
//! declared capacity, never on how many fields exist today.
//!
//! [`Profile`] adds the companion mechanism: a derived schema that reuses a
//! base schema's hash-tree root bit-for-bit while serializing more compactly
//! and in its own field order.
//!
//! All operations are pure, synchronous transformations over immutable
//! schemas; schemas and profiles are built once, validated eagerly, and may
//! be shared freely across threads.

pub mod error;
pub mod hash;
pub mod json;
pub mod merkle;
pub mod presence;
pub mod profile;
pub mod schema;
pub mod ser;
pub mod value;

pub use error::{CodecError, CodecResult, OffsetIssue, SchemaError, SchemaResult};
pub use hash::{Digest, DIGEST_SIZE};
pub use json::{from_json, profile_from_json, profile_to_json, to_json};
pub use merkle::hash_tree_root;
pub use presence::{compute_presence, Bitvector};
pub use profile::{Profile, ProfileField};
pub use schema::{ElemType, FieldDescriptor, Optionality, Schema, SizeClass, MAX_CAPACITY};
pub use ser::{deserialize, serialize, BYTES_PER_OFFSET};
pub use value::{Field, Record, Value};
