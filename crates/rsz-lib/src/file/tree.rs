//! Game object and folder hierarchies built from linkage tables.
//!
//! `object_id` indexes the RSZ object table; a game object's components
//! are the object table entries that follow it. A `parent_id` of -1 marks a
//! root.

use std::collections::{HashMap, HashSet};

use rsz_format::records::{FolderInfo, GameObjectInfo, ScnGameObjectInfo};

use crate::instance::InstanceId;

/// A linkage table row.
pub(crate) trait Linkage {
    fn object_id(&self) -> i32;
    fn parent_id(&self) -> i32;
    fn component_count(&self) -> usize;
}

impl Linkage for GameObjectInfo {
    fn object_id(&self) -> i32 {
        self.object_id
    }

    fn parent_id(&self) -> i32 {
        self.parent_id
    }

    fn component_count(&self) -> usize {
        usize::try_from(self.component_count).unwrap_or(0)
    }
}

impl Linkage for ScnGameObjectInfo {
    fn object_id(&self) -> i32 {
        self.object_id
    }

    fn parent_id(&self) -> i32 {
        self.parent_id
    }

    fn component_count(&self) -> usize {
        usize::try_from(self.component_count).unwrap_or(0)
    }
}

impl Linkage for FolderInfo {
    fn object_id(&self) -> i32 {
        self.object_id
    }

    fn parent_id(&self) -> i32 {
        self.parent_id
    }

    fn component_count(&self) -> usize {
        0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameObjectNode {
    /// Row in the linkage table.
    pub info_index: usize,
    pub object_id: i32,
    pub instance: InstanceId,
    pub components: Vec<InstanceId>,
    pub children: Vec<GameObjectNode>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderNode {
    pub info_index: usize,
    pub object_id: i32,
    pub instance: InstanceId,
    pub folders: Vec<FolderNode>,
    pub game_objects: Vec<GameObjectNode>,
}

fn object_at(object_table: &[InstanceId], object_id: i32) -> InstanceId {
    usize::try_from(object_id)
        .ok()
        .and_then(|i| object_table.get(i).copied())
        .unwrap_or(InstanceId::NULL)
}

/// Rows grouped by parent id, keeping table order.
pub(crate) fn children_by_parent<T: Linkage>(infos: &[T]) -> HashMap<i32, Vec<usize>> {
    let mut map: HashMap<i32, Vec<usize>> = HashMap::new();
    for (i, info) in infos.iter().enumerate() {
        map.entry(info.parent_id()).or_default().push(i);
    }
    map
}

struct GameObjectBuilder<'a, T> {
    infos: &'a [T],
    object_table: &'a [InstanceId],
    children: HashMap<i32, Vec<usize>>,
    visited: HashSet<usize>,
}

impl<'a, T: Linkage> GameObjectBuilder<'a, T> {
    fn new(infos: &'a [T], object_table: &'a [InstanceId]) -> Self {
        Self {
            infos,
            object_table,
            children: children_by_parent(infos),
            visited: HashSet::new(),
        }
    }

    fn node(&mut self, index: usize) -> Option<GameObjectNode> {
        if !self.visited.insert(index) {
            return None;
        }
        let info = &self.infos[index];
        let object_id = info.object_id();
        let components = (1..=info.component_count())
            .map(|offset| object_at(self.object_table, object_id.saturating_add(offset as i32)))
            .collect();
        let child_rows = self.children.get(&object_id).cloned().unwrap_or_default();
        let children = child_rows.into_iter().filter_map(|row| self.node(row)).collect();
        Some(GameObjectNode {
            info_index: index,
            object_id,
            instance: object_at(self.object_table, object_id),
            components,
            children,
        })
    }

    fn nodes(&mut self, rows: &[usize]) -> Vec<GameObjectNode> {
        rows.iter().filter_map(|&row| self.node(row)).collect()
    }
}

/// Game objects whose parent is not another game object, with their subtrees.
pub(crate) fn build_game_objects<T: Linkage>(infos: &[T], object_table: &[InstanceId]) -> Vec<GameObjectNode> {
    let ids: HashSet<i32> = infos.iter().map(Linkage::object_id).collect();
    let roots: Vec<usize> = (0..infos.len())
        .filter(|&i| !ids.contains(&infos[i].parent_id()))
        .collect();
    GameObjectBuilder::new(infos, object_table).nodes(&roots)
}

/// Folder tree; each folder lists the game objects parented to it.
pub(crate) fn build_folders<T: Linkage>(
    folders: &[FolderInfo],
    game_objects: &[T],
    object_table: &[InstanceId],
) -> Vec<FolderNode> {
    let folder_children = children_by_parent(folders);
    let mut objects = GameObjectBuilder::new(game_objects, object_table);
    let folder_ids: HashSet<i32> = folders.iter().map(|f| f.object_id).collect();

    let mut visited = HashSet::new();
    let mut out = Vec::new();
    for (i, folder) in folders.iter().enumerate() {
        if !folder_ids.contains(&folder.parent_id) {
            if let Some(node) = folder_node(i, folders, &folder_children, &mut objects, &mut visited) {
                out.push(node);
            }
        }
    }
    out
}

fn folder_node<T: Linkage>(
    index: usize,
    folders: &[FolderInfo],
    folder_children: &HashMap<i32, Vec<usize>>,
    objects: &mut GameObjectBuilder<'_, T>,
    visited: &mut HashSet<usize>,
) -> Option<FolderNode> {
    if !visited.insert(index) {
        return None;
    }
    let folder = &folders[index];
    let rows = objects.children.get(&folder.object_id).cloned().unwrap_or_default();
    let game_objects = objects.nodes(&rows);
    let subfolders = folder_children
        .get(&folder.object_id)
        .map(|rows| {
            rows.iter()
                .filter_map(|&row| folder_node(row, folders, folder_children, objects, visited))
                .collect()
        })
        .unwrap_or_default();
    Some(FolderNode {
        info_index: index,
        object_id: folder.object_id,
        instance: object_at(objects.object_table, folder.object_id),
        folders: subfolders,
        game_objects,
    })
}
