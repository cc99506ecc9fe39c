use super::*;
use crate::FieldType;

#[test]
fn roundtrip() {
    let json = r#"{
        "10": {
            "crc": "abcd",
            "name": "app.Enemy",
            "fields": [
                { "name": "hp", "type": "S32", "size": 4, "align": 4 },
                { "name": "id", "type": "Data", "size": 16, "align": 8 },
                { "name": "parts", "type": "Object", "array": true, "original_type": "app.Part[]" }
            ]
        }
    }"#;

    let schema = Schema::from_json(json).unwrap();
    let binary = schema.to_binary();
    let decoded = Schema::from_binary(&binary).unwrap();

    let class = decoded.resolve_by_name("app.Enemy").unwrap();
    assert_eq!(class.type_hash, 0x10);
    assert_eq!(class.crc, 0xabcd);
    assert_eq!(class.fields[1].field_type, FieldType::Guid);
    assert!(class.fields[2].array);
    assert_eq!(class.fields[2].display_type(), "app.Part[]");
}

#[test]
fn roundtrip_preserves_order() {
    let json = r#"{
        "3": { "name": "c", "fields": [] },
        "1": { "name": "a", "fields": [] },
        "2": { "name": "b", "fields": [] }
    }"#;

    let schema = Schema::from_json(json).unwrap();
    let decoded = Schema::from_binary(&schema.to_binary()).unwrap();

    let hashes: Vec<u32> = decoded.classes().map(|c| c.type_hash).collect();
    assert_eq!(hashes, [3, 1, 2]);
}

#[test]
fn garbage_is_binary_error() {
    let err = Schema::from_binary(&[0xff, 0xff, 0xff]).unwrap_err();
    assert!(matches!(err, SchemaError::Binary(_)));
}
