use core::fmt;
use serde::{Deserialize, Serialize};

/// Failure raised while constructing a schema or a profile binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaError {
    /// Declared capacity was zero.
    ZeroCapacity,
    /// Declared capacity exceeds the supported ceiling.
    CapacityTooLarge {
        /// Maximum supported capacity.
        max: usize,
        /// Capacity that was requested.
        got: usize,
    },
    /// More fields were declared than the capacity allows.
    TooManyFields {
        /// Declared capacity.
        capacity: usize,
        /// Number of declared fields.
        got: usize,
    },
    /// Two fields share the same name.
    DuplicateField {
        /// Offending field name.
        name: String,
    },
    /// A profile field names a base field that does not exist.
    UnknownBaseField {
        /// Offending field name.
        name: String,
    },
    /// A required base field is missing from the profile field list.
    MissingRequiredBinding {
        /// Name of the uncovered base field.
        name: String,
    },
    /// A required base field was declared optional by the profile.
    DemotedRequiredField {
        /// Offending field name.
        name: String,
    },
    /// A profile field's element type disagrees with its base field.
    ElementTypeMismatch {
        /// Offending field name.
        name: String,
    },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::ZeroCapacity => write!(f, "schema capacity must be non-zero"),
            SchemaError::CapacityTooLarge { max, got } => {
                write!(f, "schema capacity {got} exceeds supported maximum {max}")
            }
            SchemaError::TooManyFields { capacity, got } => {
                write!(f, "{got} fields declared but capacity is {capacity}")
            }
            SchemaError::DuplicateField { name } => {
                write!(f, "duplicate field name `{name}`")
            }
            SchemaError::UnknownBaseField { name } => {
                write!(f, "profile field `{name}` has no base counterpart")
            }
            SchemaError::MissingRequiredBinding { name } => {
                write!(f, "required base field `{name}` missing from profile")
            }
            SchemaError::DemotedRequiredField { name } => {
                write!(f, "required base field `{name}` declared optional in profile")
            }
            SchemaError::ElementTypeMismatch { name } => {
                write!(f, "profile field `{name}` changes the base element type")
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// Convenient alias for schema-construction results.
pub type SchemaResult<T> = core::result::Result<T, SchemaError>;

/// Body-parsing failure detail carried by [`CodecError::Offset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OffsetIssue {
    /// Input ended before the expected number of bytes were read.
    Truncated,
    /// An offset pointed backwards or before the fixed region.
    NonMonotonic,
    /// An offset or length pointed outside the buffer.
    OutOfRange,
    /// Bytes remained after the final field was decoded.
    TrailingBytes,
    /// A variable-length value exceeded its declared limit.
    LimitExceeded,
    /// A decoded byte carried an out-of-alphabet value (e.g. a boolean
    /// encoded as anything other than `0` or `1`).
    InvalidValue,
}

impl fmt::Display for OffsetIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OffsetIssue::Truncated => write!(f, "truncated input"),
            OffsetIssue::NonMonotonic => write!(f, "non-monotonic offset"),
            OffsetIssue::OutOfRange => write!(f, "offset out of range"),
            OffsetIssue::TrailingBytes => write!(f, "trailing bytes"),
            OffsetIssue::LimitExceeded => write!(f, "limit exceeded"),
            OffsetIssue::InvalidValue => write!(f, "invalid value byte"),
        }
    }
}

/// Canonical error surfaced by encode, decode and merkleization entry points.
///
/// Every failure is terminal for the invoked operation; no partial record or
/// partial byte output is ever returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodecError {
    /// Schema or binding construction failure.
    Schema(SchemaError),
    /// Total serialized length would reach 2^32 bytes.
    EncodingOverflow,
    /// A required field's presence bit was clear during decoding, or a
    /// required field was absent from a record being encoded.
    MissingRequiredField {
        /// Index of the offending field.
        field: usize,
    },
    /// A presence bit beyond the declared field count was set.
    ExtraneousBit {
        /// Index of the offending bit.
        bit: usize,
    },
    /// Body parsing failed while reading a field's bytes.
    Offset {
        /// Precise parsing condition that was violated.
        issue: OffsetIssue,
        /// Index of the field being parsed when the violation surfaced.
        field: usize,
    },
    /// Record field count does not match the schema it was used against.
    SchemaMismatch {
        /// Field count declared by the schema.
        expected: usize,
        /// Field count carried by the record.
        got: usize,
    },
    /// A present value's variant does not match the schema element type.
    ValueMismatch {
        /// Index of the offending field.
        field: usize,
    },
}

impl CodecError {
    /// Creates an offset error helper.
    pub fn offset(issue: OffsetIssue, field: usize) -> Self {
        CodecError::Offset { issue, field }
    }

    /// Creates a missing-required-field error helper.
    pub fn missing_required(field: usize) -> Self {
        CodecError::MissingRequiredField { field }
    }

    /// Creates an extraneous-bit error helper.
    pub fn extraneous_bit(bit: usize) -> Self {
        CodecError::ExtraneousBit { bit }
    }

    /// Creates a schema-mismatch error helper.
    pub fn schema_mismatch(expected: usize, got: usize) -> Self {
        CodecError::SchemaMismatch { expected, got }
    }

    /// Creates a value-mismatch error helper.
    pub fn value_mismatch(field: usize) -> Self {
        CodecError::ValueMismatch { field }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Schema(err) => write!(f, "schema error: {err}"),
            CodecError::EncodingOverflow => {
                write!(f, "serialized length would reach 2^32 bytes")
            }
            CodecError::MissingRequiredField { field } => {
                write!(f, "required field {field} is not present")
            }
            CodecError::ExtraneousBit { bit } => {
                write!(f, "presence bit {bit} set beyond declared fields")
            }
            CodecError::Offset { issue, field } => {
                write!(f, "body parse failure at field {field}: {issue}")
            }
            CodecError::SchemaMismatch { expected, got } => {
                write!(f, "record has {got} fields but schema declares {expected}")
            }
            CodecError::ValueMismatch { field } => {
                write!(f, "value at field {field} does not match its element type")
            }
        }
    }
}

impl std::error::Error for CodecError {}

impl From<SchemaError> for CodecError {
    fn from(err: SchemaError) -> Self {
        CodecError::Schema(err)
    }
}

/// Convenient alias for codec results.
pub type CodecResult<T> = core::result::Result<T, CodecError>;
