//! Static schema descriptions for stable containers.
//!
//! A [`Schema`] freezes an ordered field list together with a declared
//! capacity `N`. The capacity bounds how many fields the schema may ever grow
//! to and fixes the Merkle tree shape for the container's lifetime, so roots
//! and proof paths survive later field additions. Schemas are built once at
//! program initialisation, validated eagerly, and shared read-only (typically
//! behind an [`Arc`](std::sync::Arc)) across every encode, decode and
//! merkleize call.

mod types;

use std::collections::HashSet;

use crate::error::{SchemaError, SchemaResult};

pub use types::{ElemType, FieldDescriptor, Optionality, SizeClass};

/// Practical ceiling on declared capacity.
///
/// Roots stay well-defined for larger trees, but the presence prefix and the
/// zero-subtree ladder are sized for this bound; schemas beyond it are
/// rejected at construction.
pub const MAX_CAPACITY: usize = 1 << 20;

/// Immutable description of a stable container: capacity plus ordered fields.
#[derive(Debug, Clone)]
pub struct Schema {
    capacity: usize,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Validates and freezes a schema.
    ///
    /// Fails when the capacity is zero or above [`MAX_CAPACITY`], when more
    /// fields are declared than the capacity admits, or when two fields share
    /// a name.
    pub fn new(capacity: usize, fields: Vec<FieldDescriptor>) -> SchemaResult<Self> {
        if capacity == 0 {
            return Err(SchemaError::ZeroCapacity);
        }
        if capacity > MAX_CAPACITY {
            return Err(SchemaError::CapacityTooLarge {
                max: MAX_CAPACITY,
                got: capacity,
            });
        }
        if fields.len() > capacity {
            return Err(SchemaError::TooManyFields {
                capacity,
                got: fields.len(),
            });
        }
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name()) {
                return Err(SchemaError::DuplicateField {
                    name: field.name().to_owned(),
                });
            }
        }
        Ok(Self { capacity, fields })
    }

    /// Declared capacity `N`.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of declared fields (always `<= capacity`).
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Ordered field descriptors.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Descriptor at `index`, if declared.
    pub fn field(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    /// Index of the field with the given name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    /// Byte length of the full-form presence-indicator prefix.
    pub fn indicator_len(&self) -> usize {
        self.capacity.div_ceil(8)
    }
}
