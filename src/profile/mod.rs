//! Profiles: compact re-serialization sharing a base schema's hash.
//!
//! A [`Profile`] binds a derived field list onto a base [`Schema`] by name.
//! Wire encoding follows the derived order and writes at most a sparse
//! indicator over the derived optional fields, while merkleization always
//! reconstructs the equivalent base-shaped record and delegates to the base
//! schema's merkleizer. Reordering and compacting therefore never move a
//! field's generalized index or change the root.
//!
//! The binding is an explicit table (derived index to base index plus the
//! reverse mapping) resolved once at construction; there is no dispatch
//! through the element types at encode or hash time.

use std::sync::Arc;

use crate::error::{CodecError, CodecResult, OffsetIssue, SchemaError, SchemaResult};
use crate::hash::Digest;
use crate::presence::Bitvector;
use crate::schema::{ElemType, FieldDescriptor, Optionality, Schema};
use crate::ser::{decode_body, encode_body, ActiveField, ActiveSlot};
use crate::value::{Field, Record, Value};

/// One field declared by a profile, referencing a base field by name.
#[derive(Debug, Clone)]
pub struct ProfileField {
    name: String,
    optionality: Optionality,
    elem: Option<ElemType>,
}

impl ProfileField {
    /// Declares a required profile field inheriting the base element type.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optionality: Optionality::Required,
            elem: None,
        }
    }

    /// Declares an optional profile field inheriting the base element type.
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optionality: Optionality::Optional,
            elem: None,
        }
    }

    /// Overrides the element type, e.g. to narrow a base stable-container
    /// field to a profile of that container. The override must be
    /// shape-compatible with the base element.
    pub fn with_elem(mut self, elem: ElemType) -> Self {
        self.elem = Some(elem);
        self
    }
}

/// A derived schema bound to a base, sharing the base's hash-tree root.
#[derive(Debug, Clone)]
pub struct Profile {
    base: Arc<Schema>,
    fields: Vec<FieldDescriptor>,
    /// Derived index -> base index.
    to_base: Vec<usize>,
    /// Base index -> derived index, `None` for excluded base optionals.
    from_base: Vec<Option<usize>>,
    optional_count: usize,
    fixed_size: Option<usize>,
}

impl Profile {
    /// Validates and freezes a profile binding.
    ///
    /// Every derived name must exist in the base; required base fields must
    /// all be bound and stay required; element-type overrides must be
    /// shape-compatible with the base element.
    pub fn new(base: Arc<Schema>, declared: Vec<ProfileField>) -> SchemaResult<Self> {
        let mut fields = Vec::with_capacity(declared.len());
        let mut to_base = Vec::with_capacity(declared.len());
        let mut from_base: Vec<Option<usize>> = vec![None; base.field_count()];

        for (derived_index, decl) in declared.into_iter().enumerate() {
            let base_index =
                base.field_index(&decl.name)
                    .ok_or_else(|| SchemaError::UnknownBaseField {
                        name: decl.name.clone(),
                    })?;
            if from_base[base_index].is_some() {
                return Err(SchemaError::DuplicateField { name: decl.name });
            }
            let base_field = &base.fields()[base_index];
            if base_field.is_required() && decl.optionality.is_optional() {
                return Err(SchemaError::DemotedRequiredField { name: decl.name });
            }
            let elem = match decl.elem {
                Some(elem) => {
                    if !elem.same_shape(base_field.elem()) {
                        return Err(SchemaError::ElementTypeMismatch { name: decl.name });
                    }
                    elem
                }
                None => base_field.elem().clone(),
            };
            from_base[base_index] = Some(derived_index);
            to_base.push(base_index);
            fields.push(FieldDescriptor::new(decl.name, elem, decl.optionality));
        }

        for (base_index, base_field) in base.fields().iter().enumerate() {
            if base_field.is_required() && from_base[base_index].is_none() {
                return Err(SchemaError::MissingRequiredBinding {
                    name: base_field.name().to_owned(),
                });
            }
        }

        let optional_count = fields.iter().filter(|f| !f.is_required()).count();
        let fixed_size = if optional_count == 0 {
            fields.iter().try_fold(0usize, |acc, field| {
                field.size_class().fixed_len().map(|len| acc + len)
            })
        } else {
            None
        };

        Ok(Self {
            base,
            fields,
            to_base,
            from_base,
            optional_count,
            fixed_size,
        })
    }

    /// The base schema this profile delegates its hashing to.
    pub fn base(&self) -> &Arc<Schema> {
        &self.base
    }

    /// Resolved field descriptors in derived order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Number of derived fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Number of optional derived fields (`k`, the sparse indicator width
    /// in bits).
    pub fn optional_count(&self) -> usize {
        self.optional_count
    }

    /// Total inline byte size when the compact form is fixed-size, i.e. when
    /// the profile declares no optional fields and every element is fixed.
    pub fn fixed_size(&self) -> Option<usize> {
        self.fixed_size
    }

    /// Byte length of the sparse indicator prefix (zero when `k = 0`).
    pub fn indicator_len(&self) -> usize {
        self.optional_count.div_ceil(8)
    }

    /// Encodes a derived-order record into the compact wire form.
    ///
    /// With no optional fields the prefix is omitted entirely and the output
    /// degenerates to a plain fixed/offset record. Otherwise a sparse
    /// indicator of `ceil(k/8)` bytes precedes the body, one bit per derived
    /// optional field in derived order; offsets are relative to the end of
    /// the indicator.
    pub fn serialize(&self, record: &Record) -> CodecResult<Vec<u8>> {
        record.ensure_field_count(self.fields.len())?;

        let mut indicator = Bitvector::zeros(self.optional_count);
        let mut active = Vec::new();
        let mut optional_position = 0usize;
        for (index, (descriptor, slot)) in self.fields.iter().zip(record.fields()).enumerate() {
            match slot {
                Field::Present(value) => {
                    if !value.matches(descriptor.elem()) {
                        return Err(CodecError::value_mismatch(index));
                    }
                    if !descriptor.is_required() {
                        indicator.set(optional_position, true);
                    }
                    active.push(ActiveField {
                        index,
                        elem: descriptor.elem(),
                        size_class: descriptor.size_class(),
                        value,
                    });
                }
                Field::Absent => {
                    if descriptor.is_required() {
                        return Err(CodecError::missing_required(index));
                    }
                }
            }
            if !descriptor.is_required() {
                optional_position += 1;
            }
        }

        let body = encode_body(&active)?;
        let total = indicator.as_bytes().len() as u64 + body.len() as u64;
        if total >= 1 << 32 {
            return Err(CodecError::EncodingOverflow);
        }

        let mut out = Vec::with_capacity(total as usize);
        out.extend_from_slice(indicator.as_bytes());
        out.extend_from_slice(&body);
        Ok(out)
    }

    /// Decodes the compact wire form back into a derived-order record.
    ///
    /// The sparse indicator's length is fixed by the profile, never read from
    /// the wire, and only basic bounds are enforced on it: the indicator
    /// encodes genuinely optional fields exclusively, so there is no
    /// missing-required or extraneous-bit condition to check.
    pub fn deserialize(&self, bytes: &[u8]) -> CodecResult<Record> {
        let indicator_len = self.indicator_len();
        if bytes.len() < indicator_len {
            return Err(CodecError::offset(OffsetIssue::Truncated, 0));
        }
        let indicator = Bitvector::from_bytes(&bytes[..indicator_len], self.optional_count)
            .ok_or(CodecError::offset(OffsetIssue::Truncated, 0))?;

        let mut slots = Vec::new();
        let mut present = Vec::with_capacity(self.fields.len());
        let mut optional_position = 0usize;
        for (index, descriptor) in self.fields.iter().enumerate() {
            let active = if descriptor.is_required() {
                true
            } else {
                let bit = indicator.get(optional_position);
                optional_position += 1;
                bit
            };
            present.push(active);
            if active {
                slots.push(ActiveSlot {
                    index,
                    elem: descriptor.elem(),
                    size_class: descriptor.size_class(),
                });
            }
        }

        let mut values = decode_body(&slots, &bytes[indicator_len..])?.into_iter();
        let mut fields = Vec::with_capacity(self.fields.len());
        for (index, active) in present.iter().enumerate() {
            if *active {
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

    /// Computes the hash-tree root by delegating to the base schema.
    ///
    /// The derived layout never influences the root: the record is first
    /// reshaped into base field order, with excluded base optionals pinned
    /// `Absent`, and hashed exactly as a base value would be.
    pub fn hash_tree_root(&self, record: &Record) -> CodecResult<Digest> {
        let base_record = self.to_base_record(record)?;
        crate::merkle::hash_tree_root(&self.base, &base_record)
    }

    /// Reconstructs the equivalent base-shaped record.
    pub fn to_base_record(&self, record: &Record) -> CodecResult<Record> {
        record.ensure_field_count(self.fields.len())?;
        let mut fields = Vec::with_capacity(self.base.field_count());
        for base_index in 0..self.base.field_count() {
            let slot = match self.from_base[base_index] {
                None => Field::Absent,
                Some(derived_index) => match &record.fields()[derived_index] {
                    Field::Absent => Field::Absent,
                    Field::Present(value) => {
                        Field::Present(self.base_shaped_value(derived_index, base_index, value)?)
                    }
                },
            };
            fields.push(slot);
        }
        Ok(Record::new(fields))
    }

    /// Converts one derived value into its base-shaped counterpart.
    ///
    /// Values are cloned as-is except where the profile narrowed a base
    /// stable-container field to a nested profile: the nested record is then
    /// reshaped recursively so the base merkleizer sees base layouts all the
    /// way down.
    fn base_shaped_value(
        &self,
        derived_index: usize,
        base_index: usize,
        value: &Value,
    ) -> CodecResult<Value> {
        let derived_elem = self.fields[derived_index].elem();
        let base_elem = self.base.fields()[base_index].elem();
        match (derived_elem, base_elem) {
            (ElemType::Profile(nested), ElemType::Stable(_)) => match value {
                Value::Record(record) => {
                    Ok(Value::Record(nested.to_base_record(record)?))
                }
                _ => Err(CodecError::value_mismatch(derived_index)),
            },
            _ => Ok(value.clone()),
        }
    }
}
