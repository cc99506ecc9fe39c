use rsz_core::{FieldDescriptor, FieldType};
use rsz_format::{ByteStream, FormatError, Stream};

use super::data::{read_field, write_field};
use crate::error::Error;
use crate::instance::InstanceId;
use crate::value::Value;

fn encode(field: &FieldDescriptor, value: &Value) -> Vec<u8> {
    let mut stream = ByteStream::new();
    write_field(&mut stream, "Foo", field, value, 8).unwrap();
    stream.into_bytes()
}

fn decode(field: &FieldDescriptor, bytes: Vec<u8>) -> Value {
    let mut stream = ByteStream::from_vec(bytes);
    read_field(&mut stream, field, 8).unwrap()
}

#[test]
fn string_has_unit_count_with_terminator() {
    let field = FieldDescriptor::new("tag", FieldType::String);

    let bytes = encode(&field, &Value::String("hi".into()));

    assert_eq!(bytes, [3, 0, 0, 0, b'h', 0, b'i', 0, 0, 0]);
    assert_eq!(decode(&field, bytes), Value::String("hi".into()));
}

#[test]
fn empty_string_is_zero_count() {
    let field = FieldDescriptor::new("tag", FieldType::String);

    let bytes = encode(&field, &Value::String(String::new()));

    assert_eq!(bytes, [0, 0, 0, 0]);
    assert_eq!(decode(&field, bytes), Value::String(String::new()));
}

#[test]
fn scalar_is_aligned_with_zero_padding() {
    let field = FieldDescriptor::new("hp", FieldType::U32);
    let mut stream = ByteStream::new();
    stream.write_u8(0xaa);

    write_field(&mut stream, "Foo", &field, &Value::U32(0x0102_0304), 1).unwrap();

    assert_eq!(stream.into_bytes(), [0xaa, 0, 0, 0, 4, 3, 2, 1]);
}

#[test]
fn vec3_keeps_nonzero_padding_as_raw_bytes() {
    let field = FieldDescriptor::new("position", FieldType::Vec3);
    let one = 1.0f32.to_le_bytes();
    let mut clean = [one, one, one].concat();
    clean.extend([0; 4]);
    let mut dirty = clean.clone();
    dirty[12] = 1;

    assert_eq!(decode(&field, clean.clone()), Value::Vec3([1.0; 3]));
    assert_eq!(decode(&field, dirty.clone()), Value::Data(dirty.clone()));
    assert_eq!(encode(&field, &Value::Vec3([1.0; 3])), clean);
    assert_eq!(encode(&field, &Value::Data(dirty.clone())), dirty);
}

#[test]
fn bool_outside_zero_one_stays_raw() {
    let field = FieldDescriptor::new("enabled", FieldType::Bool);

    assert_eq!(decode(&field, vec![1]), Value::Bool(true));
    assert_eq!(decode(&field, vec![2]), Value::Data(vec![2]));
    assert_eq!(encode(&field, &Value::Data(vec![2])), [2]);
}

#[test]
fn opaque_type_round_trips_bytes() {
    let field = FieldDescriptor::new("blob", FieldType::Data).with_layout(3, 1);

    let value = decode(&field, vec![7, 8, 9]);

    assert_eq!(value, Value::Data(vec![7, 8, 9]));
    assert_eq!(encode(&field, &value), [7, 8, 9]);
}

#[test]
fn reference_kind_follows_field_type() {
    let object = FieldDescriptor::new("child", FieldType::Object);
    let userdata = FieldDescriptor::new("config", FieldType::UserData);

    assert_eq!(decode(&object, vec![2, 0, 0, 0]), Value::Object(InstanceId(2)));
    assert_eq!(decode(&userdata, vec![2, 0, 0, 0]), Value::UserData(InstanceId(2)));
}

#[test]
fn reference_past_instance_count_is_rejected() {
    let field = FieldDescriptor::new("child", FieldType::Object);
    let mut stream = ByteStream::from_vec(vec![5, 0, 0, 0]);

    let err = read_field(&mut stream, &field, 3).unwrap_err();

    assert!(matches!(
        err,
        Error::Format(FormatError::BadInstanceIndex { index: 5, count: 3 })
    ));
}

#[test]
fn writing_dangling_reference_fails() {
    let field = FieldDescriptor::new("child", FieldType::Object);
    let mut stream = ByteStream::new();

    let result = write_field(&mut stream, "Foo", &field, &Value::Object(InstanceId(9)), 2);

    assert!(result.is_err());
}

#[test]
fn array_is_count_then_elements() {
    let field = FieldDescriptor::new("values", FieldType::S32).with_array(true);
    let value = Value::Array(vec![Value::I32(7), Value::I32(-1)]);

    let bytes = encode(&field, &value);

    assert_eq!(bytes, [2, 0, 0, 0, 7, 0, 0, 0, 0xff, 0xff, 0xff, 0xff]);
    assert_eq!(decode(&field, bytes), value);
}

#[test]
fn string_array_aligns_each_element() {
    let field = FieldDescriptor::new("names", FieldType::String).with_array(true);
    let value = Value::Array(vec![Value::String("a".into()), Value::String("b".into())]);

    let bytes = encode(&field, &value);

    // count, then "a\0" (4 + 4 bytes), then "b\0" aligned to 4
    assert_eq!(
        bytes,
        [2, 0, 0, 0, 2, 0, 0, 0, b'a', 0, 0, 0, 2, 0, 0, 0, b'b', 0, 0, 0]
    );
    assert_eq!(decode(&field, bytes), value);
}

#[test]
fn truncated_scalar_is_eof() {
    let field = FieldDescriptor::new("hp", FieldType::U32);
    let mut stream = ByteStream::from_vec(vec![1, 2]);

    let err = read_field(&mut stream, &field, 1).unwrap_err();

    assert!(matches!(err, Error::Format(FormatError::UnexpectedEof { .. })));
}

#[test]
fn non_canonical_strings_keep_their_units() {
    let field = FieldDescriptor::new("tag", FieldType::String);
    let cases: [&[u8]; 3] = [
        // count 1 holding only the terminator
        &[1, 0, 0, 0, 0, 0],
        // no terminator
        &[2, 0, 0, 0, b'h', 0, b'i', 0],
        // lone surrogate
        &[2, 0, 0, 0, 0x00, 0xd8, 0, 0],
    ];

    for bytes in cases {
        let value = decode(&field, bytes.to_vec());
        assert_eq!(value, Value::Data(bytes[4..].to_vec()));
        assert_eq!(encode(&field, &value), bytes);
    }
}

#[test]
fn extra_nul_stays_in_text() {
    let field = FieldDescriptor::new("tag", FieldType::String);
    let bytes = vec![3, 0, 0, 0, b'a', 0, 0, 0, 0, 0];

    let value = decode(&field, bytes.clone());

    assert_eq!(value, Value::String("a\0".into()));
    assert_eq!(encode(&field, &value), bytes);
}

#[test]
fn huge_string_count_is_eof() {
    let field = FieldDescriptor::new("tag", FieldType::String);
    let mut stream = ByteStream::from_vec(vec![0xff, 0xff, 0xff, 0x7f, b'a', 0]);

    let err = read_field(&mut stream, &field, 1).unwrap_err();

    assert!(matches!(err, Error::Format(FormatError::UnexpectedEof { have: 2, .. })));
}

#[test]
fn writing_mismatched_value_fails() {
    let tags = FieldDescriptor::new("tags", FieldType::String).with_array(true);
    let hp = FieldDescriptor::new("hp", FieldType::U32);
    let mut stream = ByteStream::new();

    let err = write_field(&mut stream, "Foo", &tags, &Value::Array(vec![Value::U32(42)]), 1).unwrap_err();
    assert_eq!(err.to_string(), "Foo.tags cannot hold a U32 value");

    let err = write_field(&mut stream, "Foo", &hp, &Value::U64(1 << 40), 1).unwrap_err();
    assert!(matches!(err, Error::FieldValue { found: "U64", .. }));

    let err = write_field(&mut stream, "Foo", &hp, &Value::Data(vec![0; 8]), 1).unwrap_err();
    assert!(matches!(err, Error::FieldValue { found: "Data", .. }));
    assert!(stream.as_bytes().is_empty());
}
