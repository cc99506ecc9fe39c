use std::sync::Arc;

use indoc::indoc;
use rsz_core::{Schema, SchemaRegistry};
use rsz_format::{ContainerKind, Game, GameVersion};
use rsz_lib::{
    Container, ContainerFile, Document, DuplicateMode, InstanceId, PfbFile, RszOptions,
    SearchQuery, Searcher, TextMatcher, UserFile, Value,
};

const SCHEMA: &str = indoc! {r#"
    {
        "0x1": {
            "crc": "1",
            "name": "Foo",
            "fields": [
                { "name": "hp", "type": "U32", "size": 4, "align": 4 },
                { "name": "tag", "type": "String", "size": 4, "align": 4 }
            ]
        },
        "0x2": {
            "crc": "2",
            "name": "app.List",
            "fields": [
                { "name": "items", "type": "Object", "size": 4, "align": 4, "array": true,
                  "original_type": "Foo[]" }
            ]
        }
    }
"#};

fn options(game: Game) -> RszOptions {
    RszOptions::new(
        Arc::new(Schema::from_json(SCHEMA).unwrap()),
        GameVersion::latest(game),
    )
}

#[test]
fn foo_scenario() {
    let options = options(Game::Re4);
    let mut file = UserFile::new(&options);
    let rsz = &mut file.rsz;
    let list = rsz.new_instance("app.List").unwrap();
    let list = rsz.add_instance(list);
    rsz.push_object(list).unwrap();

    let foo = rsz.new_instance("Foo").unwrap();
    assert_eq!(foo.values, [Value::U32(0), Value::String(String::new())]);
    let foo = rsz.insert_new_instance(list, 0, foo, Some(0)).unwrap();
    rsz.duplicate_item(list, 0, 0, 2, DuplicateMode::Alias).unwrap();

    let items = rsz.items(list, 0).unwrap();
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|v| v.as_reference() == Some(foo)));

    let bytes = file.to_bytes().unwrap();
    let reread = UserFile::from_bytes(bytes, &options).unwrap();
    insta::assert_snapshot!(reread.rsz.stringify(InstanceId(2)), @r"
    app.List[2]
      items: [Foo[1], Foo[1], Foo[1]]
    ");
}

#[test]
fn files_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let options = options(Game::Re2);
    let path = dir.path().join(options.version.file_name("enemy", ContainerKind::Prefab));
    assert!(path.ends_with("enemy.pfb.17"));

    let mut pfb = PfbFile::new(&options);
    let mut foo = pfb.rsz.new_instance("Foo").unwrap();
    foo.values[1] = Value::String("boss".into());
    let foo = pfb.rsz.add_instance(foo);
    pfb.rsz.push_object(foo).unwrap();
    let bytes = pfb.to_bytes().unwrap();
    std::fs::write(&path, &bytes).unwrap();

    let mut container = Container::open(&path, &options).unwrap();
    assert_eq!(container.kind(), ContainerKind::Prefab);
    assert_eq!(container.to_bytes().unwrap(), bytes);

    let mut doc = Document::open(&path, options).unwrap();
    doc.save().unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), bytes);

    let hits = Searcher::new(SearchQuery {
        field_value: TextMatcher::exact("boss"),
        ..Default::default()
    })
    .search(doc.rsz());
    assert_eq!(hits, [InstanceId(1)]);
}

#[test]
fn schema_registry_shares_loaded_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rszre4.json");
    std::fs::write(&path, SCHEMA).unwrap();
    let registry = SchemaRegistry::new();

    let first = registry.load(&path).unwrap();
    let second = registry.load(&path).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.class_name(0x2), "app.List");
}
