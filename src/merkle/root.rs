use super::chunk::{merkleize, mix_in_length, pack_bytes, Chunk, CHUNK_SIZE, ZERO_CHUNK};
use crate::error::CodecResult;
use crate::hash::{hash_pair, Digest};
use crate::presence::compute_presence;
use crate::schema::{ElemType, Schema};
use crate::ser::encode_value;
use crate::value::{Record, Value};

/// Computes the capacity-stable hash-tree root of a record.
///
/// The leaf count is always the declared capacity `N`, independent of how
/// many fields are declared or present, so generalized indices of settled
/// fields survive schema growth. Leaf `i` is the recursive root of the
/// field's value when its presence bit is set and the zero chunk otherwise;
/// the presence indicator is hashed separately as a fixed-length bit vector
/// and mixed in as `hash(body_root || indicator_root)`.
pub fn hash_tree_root(schema: &Schema, record: &Record) -> CodecResult<Digest> {
    let bits = compute_presence(schema, record)?;

    let mut chunks: Vec<Chunk> = Vec::with_capacity(schema.field_count());
    for (index, (descriptor, slot)) in schema.fields().iter().zip(record.fields()).enumerate() {
        if bits.get(index) {
            // compute_presence guarantees a populated slot behind a set bit.
            let value = slot
                .value()
                .ok_or_else(|| crate::error::CodecError::missing_required(index))?;
            chunks.push(value_root(descriptor.elem(), value, index)?);
        } else {
            chunks.push(ZERO_CHUNK);
        }
    }
    let body_root = merkleize(&chunks, schema.capacity());

    // Bitvector[N] root: packed bytes chunked and merkleized, no length mix
    // since N is a schema constant.
    let indicator_chunks = pack_bytes(bits.as_bytes());
    let indicator_limit = schema.capacity().div_ceil(CHUNK_SIZE * 8).max(1);
    let indicator_root = merkleize(&indicator_chunks, indicator_limit);

    Ok(hash_pair(&body_root, &indicator_root))
}

/// Computes the hash-tree root of a single present value.
fn value_root(elem: &ElemType, value: &Value, field: usize) -> CodecResult<Digest> {
    match elem {
        ElemType::Uint8
        | ElemType::Uint16
        | ElemType::Uint32
        | ElemType::Uint64
        | ElemType::Uint128
        | ElemType::Bool => {
            let bytes = encode_value(elem, value, field)?;
            let mut chunk = ZERO_CHUNK;
            chunk[..bytes.len()].copy_from_slice(&bytes);
            Ok(chunk)
        }
        ElemType::ByteVector(len) => {
            let bytes = encode_value(elem, value, field)?;
            let limit = len.div_ceil(CHUNK_SIZE).max(1);
            Ok(merkleize(&pack_bytes(&bytes), limit))
        }
        ElemType::ByteList(limit) => {
            let bytes = encode_value(elem, value, field)?;
            let chunk_limit = limit.div_ceil(CHUNK_SIZE).max(1);
            let root = merkleize(&pack_bytes(&bytes), chunk_limit);
            Ok(mix_in_length(&root, bytes.len() as u64))
        }
        ElemType::Stable(schema) => match value {
            Value::Record(record) => hash_tree_root(schema, record),
            _ => Err(crate::error::CodecError::value_mismatch(field)),
        },
        ElemType::Profile(profile) => match value {
            // Delegation: a profile's contribution to its parent is its
            // base-shaped root, never its compact wire bytes.
            Value::Record(record) => profile.hash_tree_root(record),
            _ => Err(crate::error::CodecError::value_mismatch(field)),
        },
    }
}
