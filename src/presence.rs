//! Active-field resolution.
//!
//! [`compute_presence`] is the single shared presence computation consumed by
//! both the serializer and the merkleizer. Keeping exactly one implementation
//! makes divergence between the wire form and the hash form impossible by
//! construction.

use crate::error::{CodecError, CodecResult};
use crate::schema::Schema;
use crate::value::{Field, Record};

/// Fixed-length bit vector packed LSB-first within each byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitvector {
    data: Vec<u8>,
    len: usize,
}

impl Bitvector {
    /// Creates an all-zero bit vector of `len` bits.
    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![0u8; len.div_ceil(8)],
            len,
        }
    }

    /// Reinterprets packed bytes as a bit vector of `len` bits.
    ///
    /// The byte slice must be exactly `ceil(len / 8)` long; bits at index
    /// `len` and beyond are the caller's to validate.
    pub fn from_bytes(bytes: &[u8], len: usize) -> Option<Self> {
        if bytes.len() != len.div_ceil(8) {
            return None;
        }
        Some(Self {
            data: bytes.to_vec(),
            len,
        })
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the vector holds zero bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit at `index`; `false` when out of range.
    pub fn get(&self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.data[index / 8] >> (index % 8) & 1 == 1
    }

    /// Sets the bit at `index`. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, value: bool) {
        if index >= self.len {
            return;
        }
        let mask = 1u8 << (index % 8);
        if value {
            self.data[index / 8] |= mask;
        } else {
            self.data[index / 8] &= !mask;
        }
    }

    /// Packed byte representation, LSB-first per byte.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|byte| byte.count_ones() as usize).sum()
    }
}

/// Computes the presence indicator of `record` under `schema`.
///
/// Bit `i` is set iff field `i` is required, or optional and present; bits in
/// the padding region `[field_count, N)` are always clear. Errors:
///
/// * `SchemaMismatch` when the record's slot count differs from the schema's
///   field count.
/// * `MissingRequiredField` when a required slot is `Absent`.
/// * `ValueMismatch` when a present value's variant disagrees with the
///   declared element type.
pub fn compute_presence(schema: &Schema, record: &Record) -> CodecResult<Bitvector> {
    record.ensure_field_count(schema.field_count())?;
    let mut bits = Bitvector::zeros(schema.capacity());
    for (index, (descriptor, slot)) in schema.fields().iter().zip(record.fields()).enumerate() {
        match slot {
            Field::Present(value) => {
                if !value.matches(descriptor.elem()) {
                    return Err(CodecError::value_mismatch(index));
                }
                bits.set(index, true);
            }
            Field::Absent => {
                if descriptor.is_required() {
                    return Err(CodecError::missing_required(index));
                }
            }
        }
    }
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ElemType, FieldDescriptor};
    use crate::value::Value;

    fn sample_schema() -> Schema {
        Schema::new(
            4,
            vec![
                FieldDescriptor::optional("side", ElemType::Uint16),
                FieldDescriptor::required("color", ElemType::Uint8),
                FieldDescriptor::optional("radius", ElemType::Uint16),
            ],
        )
        .unwrap()
    }

    #[test]
    fn packs_lsb_first() {
        let mut bits = Bitvector::zeros(4);
        bits.set(0, true);
        bits.set(1, true);
        assert_eq!(bits.as_bytes(), &[0x03]);
        bits.set(0, false);
        bits.set(2, true);
        assert_eq!(bits.as_bytes(), &[0x06]);
    }

    #[test]
    fn resolves_active_fields() {
        let schema = sample_schema();
        let record = Record::new(vec![
            Field::Present(Value::Uint16(0x42)),
            Field::Present(Value::Uint8(1)),
            Field::Absent,
        ]);
        let bits = compute_presence(&schema, &record).unwrap();
        assert_eq!(bits.as_bytes(), &[0x03]);
        assert_eq!(bits.count_ones(), 2);
    }

    #[test]
    fn rejects_absent_required() {
        let schema = sample_schema();
        let record = Record::new(vec![Field::Absent, Field::Absent, Field::Absent]);
        let err = compute_presence(&schema, &record).unwrap_err();
        assert_eq!(err, CodecError::missing_required(1));
    }

    #[test]
    fn rejects_field_count_mismatch() {
        let schema = sample_schema();
        let record = Record::new(vec![Field::Absent]);
        let err = compute_presence(&schema, &record).unwrap_err();
        assert_eq!(err, CodecError::schema_mismatch(3, 1));
    }

    #[test]
    fn rejects_variant_mismatch() {
        let schema = sample_schema();
        let record = Record::new(vec![
            Field::Present(Value::Bool(true)),
            Field::Present(Value::Uint8(1)),
            Field::Absent,
        ]);
        let err = compute_presence(&schema, &record).unwrap_err();
        assert_eq!(err, CodecError::value_mismatch(0));
    }
}
