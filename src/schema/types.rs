use std::sync::Arc;

use crate::profile::Profile;
use crate::schema::Schema;

/// Whether a field may be absent from a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Optionality {
    /// The field must be present in every record.
    Required,
    /// The field may be `Absent`.
    Optional,
}

impl Optionality {
    /// Returns `true` for [`Optionality::Optional`].
    pub const fn is_optional(self) -> bool {
        matches!(self, Optionality::Optional)
    }
}

/// Wire-layout size class of an element type.
///
/// Resolved once when the schema is constructed; encode and decode paths
/// branch on this flag instead of re-inspecting the element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    /// The element occupies a known byte count inline in the fixed region.
    Fixed(usize),
    /// The element is referenced through a 4-byte offset.
    Variable,
}

impl SizeClass {
    /// Returns the inline byte count, or `None` for variable-size elements.
    pub const fn fixed_len(self) -> Option<usize> {
        match self {
            SizeClass::Fixed(len) => Some(len),
            SizeClass::Variable => None,
        }
    }
}

/// Element type carried by a field.
///
/// The descriptor is recursive: a field may hold a primitive scalar, a byte
/// collection, a nested stable container, or a profile bound to one.
#[derive(Debug, Clone)]
pub enum ElemType {
    /// Unsigned 8-bit integer.
    Uint8,
    /// Unsigned 16-bit integer, little-endian.
    Uint16,
    /// Unsigned 32-bit integer, little-endian.
    Uint32,
    /// Unsigned 64-bit integer, little-endian.
    Uint64,
    /// Unsigned 128-bit integer, little-endian.
    Uint128,
    /// Boolean encoded as a single `0`/`1` byte.
    Bool,
    /// Fixed-length byte sequence of the given length.
    ByteVector(usize),
    /// Variable-length byte sequence bounded by the given limit.
    ByteList(usize),
    /// Nested stable container.
    Stable(Arc<Schema>),
    /// Nested profile; hashes through its base schema.
    Profile(Arc<Profile>),
}

impl ElemType {
    /// Derives the size class of this element type.
    ///
    /// Stable containers are always variable-size because their encoding
    /// carries a presence prefix whose active-field set depends on the value.
    /// Profiles are fixed-size only when they declare no optional fields and
    /// every bound element is itself fixed-size.
    pub fn size_class(&self) -> SizeClass {
        match self {
            ElemType::Uint8 | ElemType::Bool => SizeClass::Fixed(1),
            ElemType::Uint16 => SizeClass::Fixed(2),
            ElemType::Uint32 => SizeClass::Fixed(4),
            ElemType::Uint64 => SizeClass::Fixed(8),
            ElemType::Uint128 => SizeClass::Fixed(16),
            ElemType::ByteVector(len) => SizeClass::Fixed(*len),
            ElemType::ByteList(_) | ElemType::Stable(_) => SizeClass::Variable,
            ElemType::Profile(profile) => match profile.fixed_size() {
                Some(len) => SizeClass::Fixed(len),
                None => SizeClass::Variable,
            },
        }
    }

    /// Structural equality over descriptors, used when validating profile
    /// bindings against their base fields.
    pub fn same_shape(&self, other: &ElemType) -> bool {
        match (self, other) {
            (ElemType::Uint8, ElemType::Uint8)
            | (ElemType::Uint16, ElemType::Uint16)
            | (ElemType::Uint32, ElemType::Uint32)
            | (ElemType::Uint64, ElemType::Uint64)
            | (ElemType::Uint128, ElemType::Uint128)
            | (ElemType::Bool, ElemType::Bool) => true,
            (ElemType::ByteVector(a), ElemType::ByteVector(b)) => a == b,
            (ElemType::ByteList(a), ElemType::ByteList(b)) => a == b,
            (ElemType::Stable(a), ElemType::Stable(b)) => Arc::ptr_eq(a, b),
            (ElemType::Profile(a), ElemType::Profile(b)) => Arc::ptr_eq(a, b),
            // A profile field may narrow a base stable-container field to a
            // profile of that same container.
            (ElemType::Profile(p), ElemType::Stable(s)) => Arc::ptr_eq(p.base(), s),
            _ => false,
        }
    }
}

/// Static description of one field within a schema.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: String,
    elem: ElemType,
    optionality: Optionality,
    size_class: SizeClass,
}

impl FieldDescriptor {
    /// Creates a descriptor, deriving the size class from the element type.
    pub fn new(name: impl Into<String>, elem: ElemType, optionality: Optionality) -> Self {
        let size_class = elem.size_class();
        Self {
            name: name.into(),
            elem,
            optionality,
            size_class,
        }
    }

    /// Shorthand for a required field.
    pub fn required(name: impl Into<String>, elem: ElemType) -> Self {
        Self::new(name, elem, Optionality::Required)
    }

    /// Shorthand for an optional field.
    pub fn optional(name: impl Into<String>, elem: ElemType) -> Self {
        Self::new(name, elem, Optionality::Optional)
    }

    /// Field name; used only for profile binding and the JSON form, never
    /// for wire layout.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element type descriptor.
    pub fn elem(&self) -> &ElemType {
        &self.elem
    }

    /// Optionality flag.
    pub fn optionality(&self) -> Optionality {
        self.optionality
    }

    /// Returns `true` when the field must be present.
    pub fn is_required(&self) -> bool {
        self.optionality == Optionality::Required
    }

    /// Size class resolved at construction.
    pub fn size_class(&self) -> SizeClass {
        self.size_class
    }
}
