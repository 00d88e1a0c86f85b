//! JSON text form for records.
//!
//! One rule extends the standard per-type mapping: absent optional fields are
//! omitted from the emitted object entirely. Scalars up to 32 bits map to
//! JSON numbers, 64- and 128-bit integers to decimal strings, byte payloads
//! to `0x`-prefixed lowercase hex, nested records to objects.

use serde_json::{Map, Value as Json};

use crate::error::{CodecError, CodecResult};
use crate::profile::Profile;
use crate::schema::{ElemType, FieldDescriptor, Schema};
use crate::value::{Field, Record, Value};

/// Renders a record as a JSON object under its schema.
pub fn to_json(schema: &Schema, record: &Record) -> CodecResult<Json> {
    record.ensure_field_count(schema.field_count())?;
    fields_to_json(schema.fields(), record)
}

/// Renders a profile record as a JSON object in derived field order.
pub fn profile_to_json(profile: &Profile, record: &Record) -> CodecResult<Json> {
    record.ensure_field_count(profile.field_count())?;
    fields_to_json(profile.fields(), record)
}

/// Rebuilds a record from a JSON object under its schema.
///
/// Keys not declared by the schema are ignored; a missing key reads as
/// `Absent` and therefore fails for required fields.
pub fn from_json(schema: &Schema, json: &Json) -> CodecResult<Record> {
    fields_from_json(schema.fields(), json)
}

/// Rebuilds a profile record from a JSON object.
pub fn profile_from_json(profile: &Profile, json: &Json) -> CodecResult<Record> {
    fields_from_json(profile.fields(), json)
}

fn fields_to_json(descriptors: &[FieldDescriptor], record: &Record) -> CodecResult<Json> {
    let mut object = Map::new();
    for (index, (descriptor, slot)) in descriptors.iter().zip(record.fields()).enumerate() {
        match slot {
            Field::Absent => {
                if descriptor.is_required() {
                    return Err(CodecError::missing_required(index));
                }
            }
            Field::Present(value) => {
                object.insert(
                    descriptor.name().to_owned(),
                    value_to_json(descriptor.elem(), value, index)?,
                );
            }
        }
    }
    Ok(Json::Object(object))
}

fn value_to_json(elem: &ElemType, value: &Value, field: usize) -> CodecResult<Json> {
    let json = match (elem, value) {
        (ElemType::Uint8, Value::Uint8(v)) => Json::from(*v),
        (ElemType::Uint16, Value::Uint16(v)) => Json::from(*v),
        (ElemType::Uint32, Value::Uint32(v)) => Json::from(*v),
        (ElemType::Uint64, Value::Uint64(v)) => Json::from(v.to_string()),
        (ElemType::Uint128, Value::Uint128(v)) => Json::from(v.to_string()),
        (ElemType::Bool, Value::Bool(v)) => Json::from(*v),
        (ElemType::ByteVector(_), Value::Bytes(bytes))
        | (ElemType::ByteList(_), Value::Bytes(bytes)) => {
            Json::from(format!("0x{}", hex::encode(bytes)))
        }
        (ElemType::Stable(schema), Value::Record(record)) => to_json(schema, record)?,
        (ElemType::Profile(profile), Value::Record(record)) => {
            profile_to_json(profile, record)?
        }
        _ => return Err(CodecError::value_mismatch(field)),
    };
    Ok(json)
}

fn fields_from_json(descriptors: &[FieldDescriptor], json: &Json) -> CodecResult<Record> {
    let object = json
        .as_object()
        .ok_or(CodecError::value_mismatch(0))?;
    let mut fields = Vec::with_capacity(descriptors.len());
    for (index, descriptor) in descriptors.iter().enumerate() {
        match object.get(descriptor.name()) {
            None => {
                if descriptor.is_required() {
                    return Err(CodecError::missing_required(index));
                }
                fields.push(Field::Absent);
            }
            Some(value) => {
                fields.push(Field::Present(value_from_json(
                    descriptor.elem(),
                    value,
                    index,
                )?));
            }
        }
    }
    Ok(Record::new(fields))
}

fn value_from_json(elem: &ElemType, json: &Json, field: usize) -> CodecResult<Value> {
    let mismatch = || CodecError::value_mismatch(field);
    let value = match elem {
        ElemType::Uint8 => Value::Uint8(
            json.as_u64()
                .and_then(|v| u8::try_from(v).ok())
                .ok_or_else(mismatch)?,
        ),
        ElemType::Uint16 => Value::Uint16(
            json.as_u64()
                .and_then(|v| u16::try_from(v).ok())
                .ok_or_else(mismatch)?,
        ),
        ElemType::Uint32 => Value::Uint32(
            json.as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(mismatch)?,
        ),
        ElemType::Uint64 => Value::Uint64(
            json.as_str()
                .and_then(|s| s.parse().ok())
                .ok_or_else(mismatch)?,
        ),
        ElemType::Uint128 => Value::Uint128(
            json.as_str()
                .and_then(|s| s.parse().ok())
                .ok_or_else(mismatch)?,
        ),
        ElemType::Bool => Value::Bool(json.as_bool().ok_or_else(mismatch)?),
        ElemType::ByteVector(len) => {
            let bytes = hex_payload(json).ok_or_else(mismatch)?;
            if bytes.len() != *len {
                return Err(mismatch());
            }
            Value::Bytes(bytes)
        }
        ElemType::ByteList(limit) => {
            let bytes = hex_payload(json).ok_or_else(mismatch)?;
            if bytes.len() > *limit {
                return Err(mismatch());
            }
            Value::Bytes(bytes)
        }
        ElemType::Stable(schema) => Value::Record(from_json(schema, json)?),
        ElemType::Profile(profile) => Value::Record(profile_from_json(profile, json)?),
    };
    Ok(value)
}

fn hex_payload(json: &Json) -> Option<Vec<u8>> {
    let text = json.as_str()?;
    let stripped = text.strip_prefix("0x")?;
    hex::decode(stripped).ok()
}
