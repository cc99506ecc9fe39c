use rsz_format::records::PrefabInfo;

use super::{ContainerFile, GameObjectTarget, ScnFile};
use crate::error::EditError;
use crate::test_utils::{options, scene};
use crate::value::Value;

/// `hp` of the object at `position` in the object table.
fn hp(file: &ScnFile, position: usize) -> Value {
    let id = file.rsz.object_table()[position];
    file.rsz.instance(id).unwrap().values[0].clone()
}

#[test]
fn copy_takes_the_whole_subtree() {
    let file = scene();

    let snapshot = file.copy_game_object(0).unwrap();

    assert_eq!(snapshot.game_object_count(), 2);
    let root = snapshot.rsz().instance(snapshot.instance()).unwrap();
    assert_eq!(root.values[0], Value::U32(11));
    assert_eq!(snapshot.rsz().instances().iter().filter(|i| !i.is_null()).count(), 3);
}

#[test]
fn missing_rows_are_rejected() {
    let mut file = scene();
    let snapshot = file.copy_game_object(1).unwrap();

    assert_eq!(file.copy_game_object(2).unwrap_err(), EditError::NoSuchGameObject(2));
    assert_eq!(
        file.import_game_object(&snapshot, GameObjectTarget::Folder(3)),
        Err(EditError::NoSuchFolder(3))
    );
    assert_eq!(
        file.import_game_object(&snapshot, GameObjectTarget::Parent(9)),
        Err(EditError::NoSuchGameObject(9))
    );
    assert_eq!(file.remove_game_object(5), Err(EditError::NoSuchGameObject(5)));
    assert_eq!(file.game_object_infos.len(), 2);
    assert_eq!(file.rsz.object_table().len(), 4);
}

#[test]
fn import_into_folder_appends_runs() {
    let mut file = scene();
    let snapshot = file.copy_game_object(0).unwrap();

    let row = file.import_game_object(&snapshot, GameObjectTarget::Folder(0)).unwrap();

    assert_eq!(row, 2);
    let (root, child) = (file.game_object_infos[2], file.game_object_infos[3]);
    assert_eq!((root.object_id, root.parent_id, root.component_count), (4, 0, 1));
    assert_eq!((child.object_id, child.parent_id, child.component_count), (6, 4, 0));
    assert_eq!(root.prefab_id, 0);
    assert_eq!(child.prefab_id, -1);
    assert_ne!(root.guid, file.game_object_infos[0].guid);
    assert_ne!(root.guid, child.guid);

    assert_eq!(file.rsz.object_table().len(), 7);
    assert_eq!(hp(&file, 4), Value::U32(11));
    assert_eq!(hp(&file, 5), Value::U32(12));
    assert_eq!(hp(&file, 6), Value::U32(13));
    assert_ne!(file.rsz.object_table()[4], file.rsz.object_table()[1]);

    let folders = file.folders();
    assert_eq!(folders[0].game_objects.len(), 2);
    assert_eq!(folders[0].game_objects[1].children.len(), 1);
}

#[test]
fn import_at_root_or_under_parent() {
    let mut file = scene();
    let snapshot = file.copy_game_object(1).unwrap();

    let top = file.import_game_object(&snapshot, GameObjectTarget::Root).unwrap();
    let nested = file.import_game_object(&snapshot, GameObjectTarget::Parent(1)).unwrap();

    assert_eq!(file.game_object_infos[top].parent_id, -1);
    assert_eq!(file.game_object_infos[nested].parent_id, 3);
    assert_eq!(file.game_object_infos[nested].object_id, 5);
    assert_eq!(file.game_objects().len(), 2);
}

#[test]
fn import_into_other_scene_adds_prefab() {
    let source = scene();
    let snapshot = source.copy_game_object(0).unwrap();
    let mut target = ScnFile::new(&options());
    target.prefabs.push(PrefabInfo {
        path: "pfb/other.pfb".into(),
    });

    target.import_game_object(&snapshot, GameObjectTarget::Root).unwrap();
    target.import_game_object(&snapshot, GameObjectTarget::Root).unwrap();

    assert_eq!(target.prefabs.len(), 2);
    assert_eq!(target.prefab_path(&target.game_object_infos[0]), Some("pfb/a.pfb"));
    assert_eq!(target.game_object_infos[2].prefab_id, 1);
    assert_eq!(target.rsz.object_table().len(), 6);
    assert_eq!(hp(&target, 0), Value::U32(11));
}

#[test]
fn duplicate_keeps_parent() {
    let mut file = scene();

    let row = file.duplicate_game_object(1).unwrap();

    assert_eq!(row, 2);
    let copy = file.game_object_infos[2];
    assert_eq!((copy.object_id, copy.parent_id, copy.component_count), (4, 1, 0));
    assert_eq!(hp(&file, 4), Value::U32(13));

    let copied = file.rsz.object_table()[4];
    file.rsz.set_value(copied, 0, Value::U32(99)).unwrap();
    assert_eq!(hp(&file, 3), Value::U32(13));
}

#[test]
fn remove_shifts_later_ids() {
    let mut file = scene();
    let snapshot = file.copy_game_object(0).unwrap();
    file.import_game_object(&snapshot, GameObjectTarget::Root).unwrap();

    let removed = file.remove_game_object(0).unwrap();

    assert_eq!(removed, 2);
    assert_eq!(file.rsz.object_table().len(), 4);
    let (root, child) = (file.game_object_infos[0], file.game_object_infos[1]);
    assert_eq!((root.object_id, root.parent_id), (1, -1));
    assert_eq!((child.object_id, child.parent_id), (3, 1));
    assert_eq!(file.folder_infos[0].object_id, 0);
    assert_eq!(hp(&file, 0), Value::U32(10));
    assert_eq!(hp(&file, 1), Value::U32(11));
    assert!(file.folders()[0].game_objects.is_empty());
}

#[test]
fn remove_child_only() {
    let mut file = scene();

    assert_eq!(file.remove_game_object(1), Ok(1));

    assert_eq!(file.game_object_infos.len(), 1);
    assert_eq!(file.rsz.object_table().len(), 3);
    assert!(file.game_objects()[0].children.is_empty());
}

#[test]
fn edited_scene_reads_back() {
    let mut file = scene();
    file.duplicate_game_object(0).unwrap();
    file.remove_game_object(1).unwrap();
    let bytes = file.to_bytes().unwrap();

    let mut reread = ScnFile::from_bytes(bytes.clone(), &options()).unwrap();

    assert_eq!(reread.game_object_infos, file.game_object_infos);
    assert_eq!(reread.rsz.object_table().len(), 6);
    assert_eq!(hp(&reread, 5), Value::U32(13));
    assert_eq!(reread.to_bytes().unwrap(), bytes);
}
