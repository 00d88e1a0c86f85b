use super::basic;
use super::cursor::ByteReader;
use crate::error::{CodecError, CodecResult, OffsetIssue};
use crate::presence::Bitvector;
use crate::schema::{ElemType, Schema, SizeClass};
use crate::value::{Field, Record, Value};

/// One field slot expected in a record body, in decode order.
pub(crate) struct ActiveSlot<'a> {
    /// Field index used for error reporting.
    pub index: usize,
    /// Element type of the field.
    pub elem: &'a ElemType,
    /// Size class resolved at schema construction.
    pub size_class: SizeClass,
}

/// Decodes a full wire form back into a record.
///
/// The presence prefix is parsed and validated first: a clear bit at a
/// required field fails `MissingRequiredField`, a set bit at or beyond the
/// declared field count fails `ExtraneousBit`. The remaining bytes are then
/// parsed as a plain record over the active subsequence. Decoding is atomic;
/// any failure discards all partial state.
pub fn deserialize(schema: &Schema, bytes: &[u8]) -> CodecResult<Record> {
    let indicator_len = schema.indicator_len();
    if bytes.len() < indicator_len {
        return Err(CodecError::offset(OffsetIssue::Truncated, 0));
    }
    let bits = Bitvector::from_bytes(&bytes[..indicator_len], schema.capacity())
        .ok_or(CodecError::offset(OffsetIssue::Truncated, 0))?;

    for (index, descriptor) in schema.fields().iter().enumerate() {
        if descriptor.is_required() && !bits.get(index) {
            return Err(CodecError::missing_required(index));
        }
    }
    for bit in schema.field_count()..schema.capacity() {
        if bits.get(bit) {
            return Err(CodecError::extraneous_bit(bit));
        }
    }
    // Bits past `N` in the final prefix byte are outside the vector proper
    // and must also be clear.
    for bit in schema.capacity()..indicator_len * 8 {
        if bytes[bit / 8] >> (bit % 8) & 1 == 1 {
            return Err(CodecError::extraneous_bit(bit));
        }
    }

    let mut slots = Vec::new();
    for (index, descriptor) in schema.fields().iter().enumerate() {
        if bits.get(index) {
            slots.push(ActiveSlot {
                index,
                elem: descriptor.elem(),
                size_class: descriptor.size_class(),
            });
        }
    }
    let mut values = decode_body(&slots, &bytes[indicator_len..])?.into_iter();

    let mut fields = Vec::with_capacity(schema.field_count());
    for index in 0..schema.field_count() {
        if bits.get(index) {
            let value = values
                .next()
                .ok_or(CodecError::offset(OffsetIssue::Truncated, index))?;
            fields.push(Field::Present(value));
        } else {
            fields.push(Field::Absent);
        }
    }
    Ok(Record::new(fields))
}

/// Parses a plain record body over the given slots.
///
/// Shared by the full form and the profile compact form. Enforces the offset
/// discipline: the first offset lands exactly at the end of the fixed region,
/// offsets never decrease, stay within bounds, and the variable region is
/// consumed completely.
pub(crate) fn decode_body(slots: &[ActiveSlot<'_>], bytes: &[u8]) -> CodecResult<Vec<Value>> {
    enum Region<'a> {
        Inline(&'a [u8]),
        Deferred(u32),
    }

    let mut cursor = ByteReader::new(bytes);
    let mut regions = Vec::with_capacity(slots.len());
    for slot in slots {
        match slot.size_class {
            SizeClass::Fixed(len) => {
                regions.push(Region::Inline(cursor.read_exact(len, slot.index)?));
            }
            SizeClass::Variable => {
                regions.push(Region::Deferred(cursor.read_u32(slot.index)?));
            }
        }
    }
    let fixed_end = cursor.position();

    // Resolve each deferred offset into its byte segment. The final segment
    // extends to the end of the buffer, so full consumption of the variable
    // region falls out of the offset discipline.
    let deferred: Vec<(usize, u32)> = slots
        .iter()
        .zip(&regions)
        .filter_map(|(slot, region)| match region {
            Region::Deferred(offset) => Some((slot.index, *offset)),
            Region::Inline(_) => None,
        })
        .collect();

    if deferred.is_empty() {
        cursor.ensure_consumed(slots.len())?;
    } else {
        let mut previous = fixed_end;
        for (position, (field, offset)) in deferred.iter().enumerate() {
            let offset = *offset as usize;
            if offset > bytes.len() {
                return Err(CodecError::offset(OffsetIssue::OutOfRange, *field));
            }
            if position == 0 {
                if offset != fixed_end {
                    return Err(CodecError::offset(OffsetIssue::NonMonotonic, *field));
                }
            } else if offset < previous {
                return Err(CodecError::offset(OffsetIssue::NonMonotonic, *field));
            }
            previous = offset;
        }
    }

    let mut values = Vec::with_capacity(slots.len());
    let mut deferred_position = 0usize;
    for (slot, region) in slots.iter().zip(&regions) {
        match region {
            Region::Inline(slice) => values.push(decode_fixed(slot.elem, slice, slot.index)?),
            Region::Deferred(offset) => {
                let start = *offset as usize;
                let end = deferred
                    .get(deferred_position + 1)
                    .map(|(_, next)| *next as usize)
                    .unwrap_or(bytes.len());
                deferred_position += 1;
                values.push(decode_variable(slot.elem, &bytes[start..end], slot.index)?);
            }
        }
    }
    Ok(values)
}

/// Decodes a fixed-size value from its exact inline slice.
fn decode_fixed(elem: &ElemType, bytes: &[u8], field: usize) -> CodecResult<Value> {
    let mut cursor = ByteReader::new(bytes);
    let value = match elem {
        ElemType::Uint8 => Value::Uint8(basic::read_u8(&mut cursor, field)?),
        ElemType::Uint16 => Value::Uint16(basic::read_u16(&mut cursor, field)?),
        ElemType::Uint32 => Value::Uint32(basic::read_u32(&mut cursor, field)?),
        ElemType::Uint64 => Value::Uint64(basic::read_u64(&mut cursor, field)?),
        ElemType::Uint128 => Value::Uint128(basic::read_u128(&mut cursor, field)?),
        ElemType::Bool => Value::Bool(basic::read_bool(&mut cursor, field)?),
        ElemType::ByteVector(len) => {
            Value::Bytes(cursor.read_exact(*len, field)?.to_vec())
        }
        ElemType::Profile(profile) => Value::Record(profile.deserialize(bytes)?),
        ElemType::ByteList(_) | ElemType::Stable(_) => {
            return Err(CodecError::offset(OffsetIssue::InvalidValue, field));
        }
    };
    if !matches!(elem, ElemType::Profile(_)) {
        cursor.ensure_consumed(field)?;
    }
    Ok(value)
}

/// Decodes a variable-size value from its offset-delimited segment.
fn decode_variable(elem: &ElemType, bytes: &[u8], field: usize) -> CodecResult<Value> {
    match elem {
        ElemType::ByteList(limit) => {
            if bytes.len() > *limit {
                return Err(CodecError::offset(OffsetIssue::LimitExceeded, field));
            }
            Ok(Value::Bytes(bytes.to_vec()))
        }
        ElemType::Stable(schema) => Ok(Value::Record(deserialize(schema, bytes)?)),
        ElemType::Profile(profile) => Ok(Value::Record(profile.deserialize(bytes)?)),
        _ => Err(CodecError::offset(OffsetIssue::InvalidValue, field)),
    }
}
