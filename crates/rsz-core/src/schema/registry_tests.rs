use std::io::Write;
use std::sync::Arc;

use super::*;

const CATALOG: &str = r#"{ "1": { "crc": "0", "name": "Foo", "fields": [] } }"#;

fn write_catalog() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CATALOG.as_bytes()).unwrap();
    file
}

#[test]
fn load_is_memoized() {
    let file = write_catalog();
    let registry = SchemaRegistry::new();

    let a = registry.load(file.path()).unwrap();
    let b = registry.load(file.path()).unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(registry.len(), 1);
    assert_eq!(a.class_name(1), "Foo");
}

#[test]
fn separate_registries_do_not_share() {
    let file = write_catalog();

    let a = SchemaRegistry::new().load(file.path()).unwrap();
    let b = SchemaRegistry::new().load(file.path()).unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
}

#[test]
fn missing_file_is_io_error() {
    let registry = SchemaRegistry::new();
    let err = registry.load("/nonexistent/rsz-schema.json").unwrap_err();

    assert!(matches!(err, SchemaError::Io(_)));
    assert!(registry.is_empty());
}

#[test]
fn concurrent_first_loads_share_one_schema() {
    let file = write_catalog();
    let registry = Arc::new(SchemaRegistry::new());
    let path = file.path().to_path_buf();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let path = path.clone();
            std::thread::spawn(move || registry.load(path).unwrap())
        })
        .collect();
    let loaded: Vec<Arc<Schema>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(loaded.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert_eq!(registry.len(), 1);
}

#[test]
fn insert_prebuilt() {
    let registry = SchemaRegistry::new();
    let schema = registry.insert("memory:test", Schema::from_json(CATALOG).unwrap());

    assert_eq!(schema.len(), 1);
    assert_eq!(registry.len(), 1);
}
