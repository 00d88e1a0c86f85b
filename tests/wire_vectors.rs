//! Literal wire vectors for the full and compact forms.

use std::sync::Arc;

use insta::assert_snapshot;
use ssz_stable::{
    deserialize, serialize, ElemType, Field, FieldDescriptor, Profile, ProfileField, Record,
    Schema, Value,
};

/// Capacity-4 shape: `side: optional uint16`, `color: required uint8`,
/// `radius: optional uint16`.
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

fn square() -> Record {
    Record::new(vec![
        Field::Present(Value::Uint16(0x42)),
        Field::Present(Value::Uint8(1)),
        Field::Absent,
    ])
}

fn circle() -> Record {
    Record::new(vec![
        Field::Absent,
        Field::Present(Value::Uint8(1)),
        Field::Present(Value::Uint16(0x42)),
    ])
}

#[test]
fn full_form_square() {
    let schema = shape_schema();
    let bytes = serialize(&schema, &square()).expect("serialize");
    assert_snapshot!(hex::encode(&bytes), @"03420001");
    assert_eq!(deserialize(&schema, &bytes).expect("deserialize"), square());
}

#[test]
fn full_form_circle() {
    let schema = shape_schema();
    let bytes = serialize(&schema, &circle()).expect("serialize");
    assert_snapshot!(hex::encode(&bytes), @"06014200");
    assert_eq!(deserialize(&schema, &bytes).expect("deserialize"), circle());
}

#[test]
fn square_profile_drops_indicator() {
    let profile = Profile::new(
        shape_schema(),
        vec![
            ProfileField::required("side"),
            ProfileField::required("color"),
        ],
    )
    .expect("valid profile");

    let record = Record::new(vec![
        Field::Present(Value::Uint16(0x42)),
        Field::Present(Value::Uint8(1)),
    ]);
    let bytes = profile.serialize(&record).expect("serialize");
    assert_snapshot!(hex::encode(&bytes), @"420001");
    assert_eq!(profile.deserialize(&bytes).expect("deserialize"), record);
}

#[test]
fn circle_profile_reorders_fields() {
    // Derived order puts radius first; the compact bytes coincide with the
    // square profile's, so compact forms are indistinguishable without
    // external type context.
    let profile = Profile::new(
        shape_schema(),
        vec![
            ProfileField::required("radius"),
            ProfileField::required("color"),
        ],
    )
    .expect("valid profile");

    let record = Record::new(vec![
        Field::Present(Value::Uint16(0x42)),
        Field::Present(Value::Uint8(1)),
    ]);
    let bytes = profile.serialize(&record).expect("serialize");
    assert_snapshot!(hex::encode(&bytes), @"420001");
    assert_eq!(profile.deserialize(&bytes).expect("deserialize"), record);
}

#[test]
fn profile_with_optionals_writes_sparse_indicator() {
    let profile = Profile::new(
        shape_schema(),
        vec![
            ProfileField::required("color"),
            ProfileField::optional("side"),
            ProfileField::optional("radius"),
        ],
    )
    .expect("valid profile");

    // Two optional derived fields: one sparse indicator byte, bits in
    // derived order. Only `side` present -> 0x01.
    let record = Record::new(vec![
        Field::Present(Value::Uint8(1)),
        Field::Present(Value::Uint16(0x42)),
        Field::Absent,
    ]);
    let bytes = profile.serialize(&record).expect("serialize");
    assert_snapshot!(hex::encode(&bytes), @"01014200");
    assert_eq!(profile.deserialize(&bytes).expect("deserialize"), record);
}

#[test]
fn variable_fields_use_offsets_relative_to_body() {
    let schema = Schema::new(
        8,
        vec![
            FieldDescriptor::optional("name", ElemType::ByteList(64)),
            FieldDescriptor::required("id", ElemType::Uint32),
            FieldDescriptor::optional("tags", ElemType::ByteList(16)),
        ],
    )
    .expect("valid schema");

    let record = Record::new(vec![
        Field::Present(Value::Bytes(b"ab".to_vec())),
        Field::Present(Value::Uint32(7)),
        Field::Absent,
    ]);
    let bytes = serialize(&schema, &record).expect("serialize");
    // indicator 0x03, offset 8 (fixed region size), id, then the list body.
    assert_snapshot!(hex::encode(&bytes), @"0308000000070000006162");
    assert_eq!(deserialize(&schema, &bytes).expect("deserialize"), record);
}

#[test]
fn absent_optionals_contribute_no_bytes() {
    let schema = shape_schema();
    let lone = Record::new(vec![
        Field::Absent,
        Field::Present(Value::Uint8(9)),
        Field::Absent,
    ]);
    let bytes = serialize(&schema, &lone).expect("serialize");
    assert_eq!(bytes, vec![0x02, 0x09]);
}
