//! Shared fixtures for unit tests.

use std::sync::Arc;

use indoc::indoc;
use rsz_core::Schema;
use rsz_format::records::{FolderInfo, PrefabInfo, ScnGameObjectInfo};
use rsz_format::{Game, GameVersion};

use crate::file::ScnFile;
use crate::instance::InstanceId;
use crate::options::RszOptions;
use crate::rsz::Rsz;
use crate::value::Value;

pub const FOO: u32 = 0x1;
pub const HOLDER: u32 = 0x10;
pub const SETTINGS: u32 = 0x20;
pub const CONFIG: u32 = 0x30;
pub const BAR: u32 = 0x40;

/// `Holder` field indices.
pub const ITEMS: usize = 0;
pub const VALUES: usize = 1;
pub const CHILD: usize = 2;
pub const CONFIGS: usize = 3;

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
        "10": {
            "crc": "f00f0010",
            "name": "app.Holder",
            "fields": [
                { "name": "items", "type": "Object", "size": 4, "align": 4, "array": true,
                  "original_type": "System.Collections.Generic.List`1<Foo>" },
                { "name": "values", "type": "S32", "size": 4, "align": 4, "array": true },
                { "name": "child", "type": "Object", "size": 4, "align": 4, "original_type": "app.Bar" },
                { "name": "configs", "type": "UserData", "size": 4, "align": 4, "array": true,
                  "original_type": "app.Config[]" }
            ]
        },
        "20": {
            "crc": "f00f0020",
            "name": "app.Settings",
            "fields": [
                { "name": "enabled", "type": "Bool", "size": 1, "align": 1 },
                { "name": "scale", "type": "F32", "size": 4, "align": 4 },
                { "name": "position", "type": "Vec3", "size": 16, "align": 16 },
                { "name": "id", "type": "Guid", "size": 16, "align": 8 },
                { "name": "blob", "type": "Data", "size": 3, "align": 1 },
                { "name": "label", "type": "String", "size": 4, "align": 4 }
            ]
        },
        "30": {
            "crc": "f00f0030",
            "name": "app.Config",
            "fields": [
                { "name": "level", "type": "S32", "size": 4, "align": 4 }
            ]
        },
        "40": {
            "crc": "f00f0040",
            "name": "app.Bar",
            "fields": [
                { "name": "x", "type": "U8", "size": 1, "align": 1 }
            ]
        }
    }
"#};

pub fn schema() -> Arc<Schema> {
    Arc::new(Schema::from_json(SCHEMA_JSON).unwrap())
}

/// Options for a game that stores userdata as file references.
pub fn options() -> RszOptions {
    RszOptions::new(schema(), GameVersion::latest(Game::Re4))
}

/// Options for a game that embeds userdata blocks.
pub fn embedded_options() -> RszOptions {
    RszOptions::new(schema(), GameVersion::new(Game::Dmc5, 67))
}

/// Graph with a single root of `class`.
pub fn graph_with_root(options: &RszOptions, class: &str) -> (Rsz, InstanceId) {
    let mut rsz = Rsz::new(Arc::clone(&options.schema), options.embedded_userdata());
    let instance = rsz.new_instance(class).unwrap();
    let id = rsz.add_instance(instance);
    rsz.push_object(id).unwrap();
    (rsz, id)
}

pub fn game_object(object_id: i32, parent_id: i32, component_count: i16, prefab_id: i32) -> ScnGameObjectInfo {
    ScnGameObjectInfo {
        guid: [object_id as u8; 16],
        object_id,
        parent_id,
        component_count,
        ukn: 0,
        prefab_id,
    }
}

/// Folder 0 holding game object 1 (one component), whose child is object 3.
///
/// The four `Foo` objects have `hp` 10, 11, 12 and 13.
pub fn scene() -> ScnFile {
    let options = options();
    let mut file = ScnFile::new(&options);
    for hp in 10..14 {
        let foo = file.rsz.new_instance("Foo").unwrap();
        let id = file.rsz.add_instance(foo);
        file.rsz.set_value(id, 0, Value::U32(hp)).unwrap();
        file.rsz.push_object(id).unwrap();
    }
    file.folder_infos = vec![FolderInfo {
        object_id: 0,
        parent_id: -1,
    }];
    file.game_object_infos = vec![game_object(1, 0, 1, 0), game_object(3, 1, 0, -1)];
    file.prefabs.push(PrefabInfo {
        path: "pfb/a.pfb".into(),
    });
    file
}
