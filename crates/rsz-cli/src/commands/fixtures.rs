//! Files on disk for command tests.

use std::path::{Path, PathBuf};

use indoc::indoc;
use rsz_format::records::GameObjectInfo;
use rsz_lib::{ContainerFile, Instance, PfbFile, Rsz, UserFile, Value};

use super::schema_source::SchemaSource;

pub const SCHEMA_JSON: &str = indoc! {r#"
    {
        "1": {
            "crc": "f00f0001",
            "name": "Foo",
            "fields": [
                { "name": "hp", "type": "U32", "size": 4, "align": 4 },
                { "name": "tag", "type": "String", "size": 4, "align": 4 }
            ]
        },
        "2": {
            "crc": "f00f0002",
            "name": "app.List",
            "fields": [
                { "name": "items", "type": "Object", "size": 4, "align": 4, "array": true,
                  "original_type": "app.Foo[]" }
            ]
        }
    }
"#};

pub fn source(dir: &Path) -> SchemaSource {
    let schema = dir.join("rszre4.json");
    std::fs::write(&schema, SCHEMA_JSON).unwrap();
    SchemaSource {
        schema,
        game: "re4".to_string(),
        tdb: None,
    }
}

fn foo(rsz: &Rsz, hp: u32, tag: &str) -> Instance {
    let mut foo = rsz.new_instance("Foo").unwrap();
    foo.values = vec![Value::U32(hp), Value::String(tag.to_string())];
    foo
}

/// `app.List` holding `Foo{7, "boss"}` and `Foo{3, "minion"}`.
pub fn write_user(dir: &Path) -> (SchemaSource, PathBuf) {
    let source = source(dir);
    let options = source.load().unwrap();
    let mut file = UserFile::new(&options);
    let list = file.rsz.new_instance("app.List").unwrap();
    let list = file.rsz.add_instance(list);
    file.rsz.push_object(list).unwrap();
    for (hp, tag) in [(7, "boss"), (3, "minion")] {
        let item = foo(&file.rsz, hp, tag);
        file.rsz.insert_new_instance(list, 0, item, None).unwrap();
    }
    let path = dir.join("sample.user.2");
    std::fs::write(&path, file.to_bytes().unwrap()).unwrap();
    (source, path)
}

/// Root game object with one component and one child.
pub fn write_prefab(dir: &Path) -> (SchemaSource, PathBuf) {
    let source = source(dir);
    let options = source.load().unwrap();
    let mut file = PfbFile::new(&options);
    for hp in 0..3 {
        let item = foo(&file.rsz, hp, "");
        let id = file.rsz.add_instance(item);
        file.rsz.push_object(id).unwrap();
    }
    file.game_object_infos = vec![
        GameObjectInfo {
            object_id: 0,
            parent_id: -1,
            component_count: 1,
        },
        GameObjectInfo {
            object_id: 2,
            parent_id: 0,
            component_count: 0,
        },
    ];
    let path = dir.join("sample.pfb.17");
    std::fs::write(&path, file.to_bytes().unwrap()).unwrap();
    (source, path)
}
