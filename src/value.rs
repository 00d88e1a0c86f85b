//! Runtime record values aligned with a schema's field list.

use crate::error::{CodecError, CodecResult};
use crate::schema::ElemType;

/// A field value of some element type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Unsigned 8-bit integer.
    Uint8(u8),
    /// Unsigned 16-bit integer.
    Uint16(u16),
    /// Unsigned 32-bit integer.
    Uint32(u32),
    /// Unsigned 64-bit integer.
    Uint64(u64),
    /// Unsigned 128-bit integer.
    Uint128(u128),
    /// Boolean.
    Bool(bool),
    /// Byte-vector or byte-list payload.
    Bytes(Vec<u8>),
    /// Nested container or profile value.
    Record(Record),
}

impl Value {
    /// Checks that this value's variant matches the element type.
    ///
    /// Lengths of `Bytes` payloads and field counts of nested records are
    /// checked by the encoder against the respective schema; this predicate
    /// covers only the variant shape.
    pub fn matches(&self, elem: &ElemType) -> bool {
        matches!(
            (self, elem),
            (Value::Uint8(_), ElemType::Uint8)
                | (Value::Uint16(_), ElemType::Uint16)
                | (Value::Uint32(_), ElemType::Uint32)
                | (Value::Uint64(_), ElemType::Uint64)
                | (Value::Uint128(_), ElemType::Uint128)
                | (Value::Bool(_), ElemType::Bool)
                | (Value::Bytes(_), ElemType::ByteVector(_))
                | (Value::Bytes(_), ElemType::ByteList(_))
                | (Value::Record(_), ElemType::Stable(_))
                | (Value::Record(_), ElemType::Profile(_))
        )
    }
}

/// Presence-tagged slot aligned with one [`FieldDescriptor`].
///
/// [`FieldDescriptor`]: crate::schema::FieldDescriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// The field carries a value.
    Present(Value),
    /// The field is absent; valid only for optional descriptors.
    Absent,
}

impl Field {
    /// Returns the contained value, if present.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Field::Present(value) => Some(value),
            Field::Absent => None,
        }
    }

    /// Returns `true` for [`Field::Present`].
    pub fn is_present(&self) -> bool {
        matches!(self, Field::Present(_))
    }
}

/// Ordered field values for one schema.
///
/// Immutable for the purposes of encoding and merkleization; construction and
/// population are the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    /// Wraps an ordered field list.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Number of field slots.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Ordered field slots.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Slot at `index`.
    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Errors with `SchemaMismatch` unless the record has exactly `expected`
    /// field slots.
    pub fn ensure_field_count(&self, expected: usize) -> CodecResult<()> {
        if self.fields.len() != expected {
            return Err(CodecError::schema_mismatch(expected, self.fields.len()));
        }
        Ok(())
    }
}

impl From<Vec<Field>> for Record {
    fn from(fields: Vec<Field>) -> Self {
        Record::new(fields)
    }
}
