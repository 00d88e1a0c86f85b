//! Rejection matrix: every validation failure mode surfaces the documented
//! error kind and offending field index.

use std::sync::Arc;

use ssz_stable::{
    deserialize, serialize, CodecError, ElemType, Field, FieldDescriptor, OffsetIssue, Profile,
    ProfileField, Record, Schema, SchemaError, Value, MAX_CAPACITY,
};

fn shape_schema() -> Arc<Schema> {
    Arc::new(
        Schema::new(
            4,
            vec![
                FieldDescriptor::optional("side", ElemType::Uint16),
                FieldDescriptor::required("color", ElemType::Uint8),
                FieldDescriptor::optional("radius", ElemType::Uint16),
            ],
        )
        .expect("valid schema"),
    )
}

fn list_schema() -> Schema {
    Schema::new(
        4,
        vec![
            FieldDescriptor::required("a", ElemType::ByteList(8)),
            FieldDescriptor::required("b", ElemType::ByteList(8)),
        ],
    )
    .expect("valid schema")
}

#[test]
fn decode_rejects_cleared_required_bit() {
    let schema = shape_schema();
    let bytes = hex::decode("0542004200").unwrap();
    let err = deserialize(&schema, &bytes).unwrap_err();
    assert_eq!(err, CodecError::MissingRequiredField { field: 1 });
}

#[test]
fn decode_rejects_bit_beyond_field_count() {
    let schema = shape_schema();
    let bytes = hex::decode("0f4200014200").unwrap();
    let err = deserialize(&schema, &bytes).unwrap_err();
    assert_eq!(err, CodecError::ExtraneousBit { bit: 3 });
}

#[test]
fn decode_rejects_bit_beyond_capacity() {
    let schema = shape_schema();
    let bytes = hex::decode("13420001").unwrap();
    let err = deserialize(&schema, &bytes).unwrap_err();
    assert_eq!(err, CodecError::ExtraneousBit { bit: 4 });
}

#[test]
fn decode_rejects_missing_prefix() {
    let schema = shape_schema();
    let err = deserialize(&schema, &[]).unwrap_err();
    assert_eq!(
        err,
        CodecError::Offset {
            issue: OffsetIssue::Truncated,
            field: 0
        }
    );
}

#[test]
fn decode_rejects_trailing_bytes_after_fixed_body() {
    let schema = shape_schema();
    let bytes = hex::decode("03420001ff").unwrap();
    let err = deserialize(&schema, &bytes).unwrap_err();
    assert_eq!(
        err,
        CodecError::Offset {
            issue: OffsetIssue::TrailingBytes,
            field: 2
        }
    );
}

#[test]
fn offset_discipline_accepts_canonical_layout() {
    let schema = list_schema();
    let bytes = hex::decode("03080000000a000000616263").unwrap();
    let record = deserialize(&schema, &bytes).expect("deserialize");
    assert_eq!(
        record,
        Record::new(vec![
            Field::Present(Value::Bytes(b"ab".to_vec())),
            Field::Present(Value::Bytes(b"c".to_vec())),
        ])
    );
    assert_eq!(serialize(&schema, &record).expect("serialize"), bytes);
}

#[test]
fn decode_rejects_first_offset_off_fixed_region() {
    let schema = list_schema();
    let bytes = hex::decode("03090000000a000000616263").unwrap();
    let err = deserialize(&schema, &bytes).unwrap_err();
    assert_eq!(
        err,
        CodecError::Offset {
            issue: OffsetIssue::NonMonotonic,
            field: 0
        }
    );
}

#[test]
fn decode_rejects_decreasing_offsets() {
    let schema = list_schema();
    let bytes = hex::decode("030800000007000000616263").unwrap();
    let err = deserialize(&schema, &bytes).unwrap_err();
    assert_eq!(
        err,
        CodecError::Offset {
            issue: OffsetIssue::NonMonotonic,
            field: 1
        }
    );
}

#[test]
fn decode_rejects_offset_past_buffer() {
    let schema = list_schema();
    let bytes = hex::decode("0308000000ff000000616263").unwrap();
    let err = deserialize(&schema, &bytes).unwrap_err();
    assert_eq!(
        err,
        CodecError::Offset {
            issue: OffsetIssue::OutOfRange,
            field: 1
        }
    );
}

#[test]
fn decode_rejects_truncated_fixed_region() {
    let schema = list_schema();
    let bytes = hex::decode("030800").unwrap();
    let err = deserialize(&schema, &bytes).unwrap_err();
    assert_eq!(
        err,
        CodecError::Offset {
            issue: OffsetIssue::Truncated,
            field: 0
        }
    );
}

#[test]
fn decode_rejects_list_over_limit() {
    let schema = list_schema();
    // Segment for `a` spans nine bytes against a limit of eight.
    let bytes = hex::decode("030800000011000000616263646566676869").unwrap();
    let err = deserialize(&schema, &bytes).unwrap_err();
    assert_eq!(
        err,
        CodecError::Offset {
            issue: OffsetIssue::LimitExceeded,
            field: 0
        }
    );
}

#[test]
fn decode_rejects_out_of_alphabet_bool() {
    let schema = Schema::new(1, vec![FieldDescriptor::required("flag", ElemType::Bool)])
        .expect("valid schema");
    let err = deserialize(&schema, &[0x01, 0x02]).unwrap_err();
    assert_eq!(
        err,
        CodecError::Offset {
            issue: OffsetIssue::InvalidValue,
            field: 0
        }
    );
}

#[test]
fn encode_rejects_absent_required_field() {
    let schema = shape_schema();
    let record = Record::new(vec![Field::Absent, Field::Absent, Field::Absent]);
    let err = serialize(&schema, &record).unwrap_err();
    assert_eq!(err, CodecError::MissingRequiredField { field: 1 });
}

#[test]
fn encode_rejects_field_count_mismatch() {
    let schema = shape_schema();
    let record = Record::new(vec![Field::Present(Value::Uint8(1))]);
    let err = serialize(&schema, &record).unwrap_err();
    assert_eq!(err, CodecError::SchemaMismatch { expected: 3, got: 1 });
}

#[test]
fn encode_rejects_wrong_value_variant() {
    let schema = shape_schema();
    let record = Record::new(vec![
        Field::Present(Value::Bool(true)),
        Field::Present(Value::Uint8(1)),
        Field::Absent,
    ]);
    let err = serialize(&schema, &record).unwrap_err();
    assert_eq!(err, CodecError::ValueMismatch { field: 0 });
}

#[test]
fn encode_rejects_byte_vector_length_drift() {
    let schema = Schema::new(
        2,
        vec![FieldDescriptor::required("digest", ElemType::ByteVector(4))],
    )
    .expect("valid schema");
    let record = Record::new(vec![Field::Present(Value::Bytes(vec![0xAB; 3]))]);
    let err = serialize(&schema, &record).unwrap_err();
    assert_eq!(err, CodecError::ValueMismatch { field: 0 });
}

#[test]
fn schema_construction_failures() {
    assert_eq!(
        Schema::new(0, Vec::new()).unwrap_err(),
        SchemaError::ZeroCapacity
    );
    assert_eq!(
        Schema::new(MAX_CAPACITY + 1, Vec::new()).unwrap_err(),
        SchemaError::CapacityTooLarge {
            max: MAX_CAPACITY,
            got: MAX_CAPACITY + 1
        }
    );
    let fields = vec![
        FieldDescriptor::required("a", ElemType::Uint8),
        FieldDescriptor::required("b", ElemType::Uint8),
        FieldDescriptor::required("c", ElemType::Uint8),
    ];
    assert_eq!(
        Schema::new(2, fields).unwrap_err(),
        SchemaError::TooManyFields { capacity: 2, got: 3 }
    );
}

#[test]
fn profile_binding_failures() {
    let base = shape_schema();

    let err = Profile::new(base.clone(), vec![ProfileField::required("ghost")]).unwrap_err();
    assert_eq!(
        err,
        SchemaError::UnknownBaseField {
            name: "ghost".to_owned()
        }
    );

    let err = Profile::new(
        base.clone(),
        vec![
            ProfileField::optional("color"),
            ProfileField::required("side"),
        ],
    )
    .unwrap_err();
    assert_eq!(
        err,
        SchemaError::DemotedRequiredField {
            name: "color".to_owned()
        }
    );

    let err = Profile::new(base.clone(), vec![ProfileField::required("side")]).unwrap_err();
    assert_eq!(
        err,
        SchemaError::MissingRequiredBinding {
            name: "color".to_owned()
        }
    );

    let err = Profile::new(
        base.clone(),
        vec![
            ProfileField::required("color"),
            ProfileField::optional("side"),
            ProfileField::optional("side"),
        ],
    )
    .unwrap_err();
    assert_eq!(
        err,
        SchemaError::DuplicateField {
            name: "side".to_owned()
        }
    );

    let err = Profile::new(
        base,
        vec![
            ProfileField::required("color"),
            ProfileField::required("side").with_elem(ElemType::Uint32),
        ],
    )
    .unwrap_err();
    assert_eq!(
        err,
        SchemaError::ElementTypeMismatch {
            name: "side".to_owned()
        }
    );
}

#[test]
fn profile_decode_enforces_offset_discipline_only() {
    let base = Arc::new(list_schema());
    let profile = Profile::new(
        base,
        vec![ProfileField::required("a"), ProfileField::required("b")],
    )
    .expect("valid profile");

    // No indicator byte in the compact form; offsets start immediately.
    let bytes = hex::decode("080000000a000000616263").unwrap();
    let record = profile.deserialize(&bytes).expect("deserialize");
    assert_eq!(profile.serialize(&record).expect("serialize"), bytes);

    let bad = hex::decode("090000000a000000616263").unwrap();
    let err = profile.deserialize(&bad).unwrap_err();
    assert_eq!(
        err,
        CodecError::Offset {
            issue: OffsetIssue::NonMonotonic,
            field: 0
        }
    );
}
