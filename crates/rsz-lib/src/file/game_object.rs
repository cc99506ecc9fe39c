//! Scene game object editing.
//!
//! A game object owns a run of the object table: its own instance at
//! `object_id`, then one entry per component. Children and folders refer to
//! that position through `parent_id`, so removing entries shifts every id
//! that follows them.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::ops::Range;
use std::sync::Arc;

use rsz_format::records::{PrefabInfo, ScnGameObjectInfo};

use crate::error::EditError;
use crate::instance::InstanceId;
use crate::rsz::Rsz;

use super::ScnFile;
use super::tree::{Linkage, children_by_parent};

/// Where an imported game object is placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameObjectTarget {
    /// Top level, outside any folder.
    Root,
    /// Inside the folder at this row of the folder table.
    Folder(usize),
    /// Under the game object at this row.
    Parent(usize),
}

/// A game object subtree detached from its scene.
///
/// Holds its own copy of every instance it needs, so it stays valid after
/// the source scene is edited or closed.
#[derive(Clone, Debug)]
pub struct GameObjectSnapshot {
    rsz: Rsz,
    root: SnapshotNode,
}

#[derive(Clone, Debug)]
struct SnapshotNode {
    info: ScnGameObjectInfo,
    prefab: Option<String>,
    /// The game object followed by its components.
    objects: Vec<InstanceId>,
    children: Vec<SnapshotNode>,
}

impl SnapshotNode {
    fn count(&self) -> usize {
        1 + self.children.iter().map(SnapshotNode::count).sum::<usize>()
    }

    fn collect_objects(&self, out: &mut Vec<InstanceId>) {
        out.extend(&self.objects);
        for child in &self.children {
            child.collect_objects(out);
        }
    }
}

impl GameObjectSnapshot {
    /// Graph holding the copied instances.
    pub fn rsz(&self) -> &Rsz {
        &self.rsz
    }

    /// The root game object's instance in [`GameObjectSnapshot::rsz`].
    pub fn instance(&self) -> InstanceId {
        self.root.objects.first().copied().unwrap_or(InstanceId::NULL)
    }

    /// Game objects in the subtree, the root included.
    pub fn game_object_count(&self) -> usize {
        self.root.count()
    }
}

/// Rows of one game object while a snapshot is assembled.
struct Part {
    info: ScnGameObjectInfo,
    prefab: Option<String>,
    objects: Vec<InstanceId>,
}

impl ScnFile {
    fn game_object_info(&self, row: usize) -> Result<&ScnGameObjectInfo, EditError> {
        self.game_object_infos.get(row).ok_or(EditError::NoSuchGameObject(row))
    }

    /// Object table positions owned by a game object.
    fn object_run(&self, info: &ScnGameObjectInfo) -> Range<usize> {
        let table = self.rsz.object_table().len();
        let Ok(start) = usize::try_from(info.object_id) else {
            return 0..0;
        };
        let start = start.min(table);
        start..(start + 1 + info.component_count()).min(table)
    }

    /// `row` and every game object below it, parents first.
    fn subtree_rows(&self, row: usize) -> Vec<usize> {
        let children = children_by_parent(&self.game_object_infos);
        let mut rows = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![row];
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            rows.push(current);
            if let Some(below) = children.get(&self.game_object_infos[current].object_id) {
                stack.extend(below.iter().rev());
            }
        }
        rows
    }

    /// Copy the game object at `row`, its components and its children.
    pub fn copy_game_object(&self, row: usize) -> Result<GameObjectSnapshot, EditError> {
        self.game_object_info(row)?;
        let rows = self.subtree_rows(row);
        let table = self.rsz.object_table();

        let mut roots = Vec::new();
        for &r in &rows {
            roots.extend(&table[self.object_run(&self.game_object_infos[r])]);
        }
        let mut rsz = Rsz::new(Arc::clone(self.rsz.schema()), self.rsz.uses_embedded_userdata());
        let mut copied = rsz.import_instances(&self.rsz, &roots)?.into_iter();

        let mut parts = HashMap::with_capacity(rows.len());
        for &r in &rows {
            let info = self.game_object_infos[r];
            let objects: Vec<InstanceId> = copied.by_ref().take(self.object_run(&info).len()).collect();
            if objects.is_empty() {
                return Err(EditError::NoSuchGameObject(r));
            }
            let prefab = self.prefab_path(&info).map(str::to_string);
            parts.insert(r, Part { info, prefab, objects });
        }

        let children = children_by_parent(&self.game_object_infos);
        let root = assemble(row, &mut parts, &children).ok_or(EditError::NoSuchGameObject(row))?;
        Ok(GameObjectSnapshot { rsz, root })
    }

    /// Add a copy of `snapshot` at `target`, returning the new root's row.
    ///
    /// New game objects get fresh GUIDs and are appended to the object and
    /// game object tables. Prefab paths are added to the prefab table when
    /// missing.
    pub fn import_game_object(
        &mut self,
        snapshot: &GameObjectSnapshot,
        target: GameObjectTarget,
    ) -> Result<usize, EditError> {
        let parent_id = match target {
            GameObjectTarget::Root => -1,
            GameObjectTarget::Folder(row) => {
                self.folder_infos
                    .get(row)
                    .ok_or(EditError::NoSuchFolder(row))?
                    .object_id
            }
            GameObjectTarget::Parent(row) => self.game_object_info(row)?.object_id,
        };
        self.import_under(snapshot, parent_id)
    }

    fn import_under(&mut self, snapshot: &GameObjectSnapshot, parent_id: i32) -> Result<usize, EditError> {
        let mut roots = Vec::new();
        snapshot.root.collect_objects(&mut roots);
        let imported = self.rsz.import_instances(&snapshot.rsz, &roots)?;

        let row = self.game_object_infos.len();
        self.place(&snapshot.root, parent_id, &mut imported.into_iter());
        tracing::debug!(row, game_objects = snapshot.game_object_count(), parent_id, "imported game object");
        Ok(row)
    }

    fn place(&mut self, node: &SnapshotNode, parent_id: i32, ids: &mut impl Iterator<Item = InstanceId>) {
        let objects: Vec<InstanceId> = ids.by_ref().take(node.objects.len()).collect();
        let component_count = objects.len().saturating_sub(1) as i16;
        let object_id = self.rsz.append_objects(objects) as i32;
        let prefab_id = match &node.prefab {
            Some(path) => self.prefab_index(path),
            None => -1,
        };
        self.game_object_infos.push(ScnGameObjectInfo {
            guid: *uuid::Uuid::new_v4().as_bytes(),
            object_id,
            parent_id,
            component_count,
            prefab_id,
            ..node.info
        });
        for child in &node.children {
            self.place(child, object_id, ids);
        }
    }

    fn prefab_index(&mut self, path: &str) -> i32 {
        if let Some(index) = self.prefabs.iter().position(|p| p.path == path) {
            return index as i32;
        }
        self.prefabs.push(PrefabInfo { path: path.to_string() });
        (self.prefabs.len() - 1) as i32
    }

    /// Copy the game object at `row` next to itself, under the same parent.
    ///
    /// Returns the row of the copy.
    pub fn duplicate_game_object(&mut self, row: usize) -> Result<usize, EditError> {
        let parent_id = self.game_object_info(row)?.parent_id;
        let snapshot = self.copy_game_object(row)?;
        self.import_under(&snapshot, parent_id)
    }

    /// Remove the game object at `row` with its components and children.
    ///
    /// Object ids of everything after the removed entries shift down. Returns
    /// how many game objects were removed.
    pub fn remove_game_object(&mut self, row: usize) -> Result<usize, EditError> {
        self.game_object_info(row)?;
        let rows = self.subtree_rows(row);
        let mut positions = BTreeSet::new();
        for &r in &rows {
            positions.extend(self.object_run(&self.game_object_infos[r]));
        }
        self.rsz.remove_objects(&positions);

        let removed: HashSet<usize> = rows.iter().copied().collect();
        let mut index = 0;
        self.game_object_infos.retain(|_| {
            let keep = !removed.contains(&index);
            index += 1;
            keep
        });

        let shift = |id: i32| match usize::try_from(id) {
            Ok(position) if positions.contains(&position) => -1,
            Ok(position) => id - positions.range(..position).count() as i32,
            Err(_) => id,
        };
        for info in &mut self.game_object_infos {
            info.object_id = shift(info.object_id);
            info.parent_id = shift(info.parent_id);
        }
        for folder in &mut self.folder_infos {
            folder.object_id = shift(folder.object_id);
            folder.parent_id = shift(folder.parent_id);
        }
        tracing::debug!(row, game_objects = rows.len(), objects = positions.len(), "removed game object");
        Ok(rows.len())
    }
}

fn assemble(row: usize, parts: &mut HashMap<usize, Part>, children: &HashMap<i32, Vec<usize>>) -> Option<SnapshotNode> {
    let part = parts.remove(&row)?;
    let nodes = children
        .get(&part.info.object_id)
        .map(|rows| rows.iter().filter_map(|&r| assemble(r, parts, children)).collect())
        .unwrap_or_default();
    Some(SnapshotNode {
        info: part.info,
        prefab: part.prefab,
        objects: part.objects,
        children: nodes,
    })
}
