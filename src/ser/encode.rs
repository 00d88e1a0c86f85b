use super::basic;
use crate::error::{CodecError, CodecResult};
use crate::presence::compute_presence;
use crate::schema::{ElemType, Schema, SizeClass};
use crate::value::{Record, Value};

/// Offset width in the fixed region, supplied by the base codec.
pub const BYTES_PER_OFFSET: usize = 4;

/// One active field selected for encoding, in schema (or profile) order.
pub(crate) struct ActiveField<'a> {
    /// Field index used for error reporting.
    pub index: usize,
    /// Element type of the field.
    pub elem: &'a ElemType,
    /// Size class resolved at schema construction.
    pub size_class: SizeClass,
    /// The present value.
    pub value: &'a Value,
}

/// Encodes a record into its full wire form.
///
/// Layout: presence-indicator prefix of `ceil(N/8)` bytes, then the active
/// fields encoded as a plain record (inline fixed values and 4-byte offsets,
/// followed by the variable region). Offsets are relative to the first byte
/// after the prefix. Fails atomically; no partial output is ever returned.
pub fn serialize(schema: &Schema, record: &Record) -> CodecResult<Vec<u8>> {
    let bits = compute_presence(schema, record)?;
    let mut active = Vec::new();
    for (index, (descriptor, slot)) in schema.fields().iter().zip(record.fields()).enumerate() {
        if !bits.get(index) {
            continue;
        }
        // compute_presence guarantees the slot is populated for a set bit.
        let value = slot
            .value()
            .ok_or_else(|| CodecError::missing_required(index))?;
        active.push(ActiveField {
            index,
            elem: descriptor.elem(),
            size_class: descriptor.size_class(),
            value,
        });
    }

    let body = encode_body(&active)?;
    let total = bits.as_bytes().len() as u64 + body.len() as u64;
    if total >= 1 << 32 {
        return Err(CodecError::EncodingOverflow);
    }

    let mut out = Vec::with_capacity(total as usize);
    out.extend_from_slice(bits.as_bytes());
    out.extend_from_slice(&body);
    Ok(out)
}

/// Encodes an active-field subsequence as a plain record body.
///
/// Shared by the full form and the profile compact form; only the caller's
/// choice of prefix differs.
pub(crate) fn encode_body(active: &[ActiveField<'_>]) -> CodecResult<Vec<u8>> {
    let mut parts = Vec::with_capacity(active.len());
    let mut fixed_len = 0u64;
    for field in active {
        let bytes = encode_value(field.elem, field.value, field.index)?;
        match field.size_class {
            SizeClass::Fixed(len) => {
                debug_assert_eq!(bytes.len(), len);
                fixed_len += bytes.len() as u64;
            }
            SizeClass::Variable => fixed_len += BYTES_PER_OFFSET as u64,
        }
        parts.push(bytes);
    }

    let mut variable_len = 0u64;
    for (field, bytes) in active.iter().zip(&parts) {
        if field.size_class == SizeClass::Variable {
            variable_len += bytes.len() as u64;
        }
    }
    if fixed_len + variable_len >= 1 << 32 {
        return Err(CodecError::EncodingOverflow);
    }

    let mut out = Vec::with_capacity((fixed_len + variable_len) as usize);
    let mut next_offset = fixed_len;
    for (field, bytes) in active.iter().zip(&parts) {
        match field.size_class {
            SizeClass::Fixed(_) => out.extend_from_slice(bytes),
            SizeClass::Variable => {
                basic::write_u32(&mut out, next_offset as u32);
                next_offset += bytes.len() as u64;
            }
        }
    }
    for (field, bytes) in active.iter().zip(&parts) {
        if field.size_class == SizeClass::Variable {
            out.extend_from_slice(bytes);
        }
    }
    Ok(out)
}

/// Encodes a single present value of the given element type.
pub(crate) fn encode_value(elem: &ElemType, value: &Value, field: usize) -> CodecResult<Vec<u8>> {
    let mut out = Vec::new();
    match (elem, value) {
        (ElemType::Uint8, Value::Uint8(v)) => basic::write_u8(&mut out, *v),
        (ElemType::Uint16, Value::Uint16(v)) => basic::write_u16(&mut out, *v),
        (ElemType::Uint32, Value::Uint32(v)) => basic::write_u32(&mut out, *v),
        (ElemType::Uint64, Value::Uint64(v)) => basic::write_u64(&mut out, *v),
        (ElemType::Uint128, Value::Uint128(v)) => basic::write_u128(&mut out, *v),
        (ElemType::Bool, Value::Bool(v)) => basic::write_bool(&mut out, *v),
        (ElemType::ByteVector(len), Value::Bytes(bytes)) => {
            if bytes.len() != *len {
                return Err(CodecError::value_mismatch(field));
            }
            out.extend_from_slice(bytes);
        }
        (ElemType::ByteList(limit), Value::Bytes(bytes)) => {
            if bytes.len() > *limit {
                return Err(CodecError::value_mismatch(field));
            }
            out.extend_from_slice(bytes);
        }
        (ElemType::Stable(schema), Value::Record(record)) => {
            out = serialize(schema, record)?;
        }
        (ElemType::Profile(profile), Value::Record(record)) => {
            out = profile.serialize(record)?;
        }
        _ => return Err(CodecError::value_mismatch(field)),
    }
    Ok(out)
}
