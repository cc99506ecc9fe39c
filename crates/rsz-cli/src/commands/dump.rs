use std::collections::HashSet;
use std::fmt::Write;
use std::path::PathBuf;

use rsz_lib::file::{FolderNode, GameObjectNode};
use rsz_lib::{Container, Document, Rsz};

use super::error::{CliError, Result};
use super::schema_source::SchemaSource;

pub struct DumpArgs {
    pub file: PathBuf,
    pub source: SchemaSource,
    pub tree: bool,
}

pub fn run(args: DumpArgs) -> Result<()> {
    let doc = Document::open(&args.file, args.source.load()?)?;
    let out = if args.tree {
        render_tree(doc.container())?
    } else {
        render_instances(doc.rsz())
    };
    print!("{out}");
    Ok(())
}

/// Every instance in list order, separated by blank lines.
pub fn render_instances(rsz: &Rsz) -> String {
    let mut out = String::new();
    for id in rsz.instance_ids() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&rsz.stringify(id));
        out.push('\n');
    }
    out
}

/// Folder and game object hierarchy of a prefab or scene.
pub fn render_tree(container: &Container) -> Result<String> {
    let mut out = String::new();
    match container {
        Container::User(_) => return Err(CliError::Usage("--tree needs a prefab or scene file")),
        Container::Prefab(pfb) => {
            for node in pfb.game_objects() {
                write_game_object(&mut out, &pfb.rsz, &node, 0);
            }
        }
        Container::Scene(scn) => {
            for folder in scn.folders() {
                write_folder(&mut out, &scn.rsz, &folder, 0);
            }
            let folder_ids: HashSet<i32> = scn.folder_infos.iter().map(|f| f.object_id).collect();
            for node in scn.game_objects() {
                if !folder_ids.contains(&scn.game_object_infos[node.info_index].parent_id) {
                    write_game_object(&mut out, &scn.rsz, &node, 0);
                }
            }
        }
    }
    Ok(out)
}

fn write_folder(out: &mut String, rsz: &Rsz, folder: &FolderNode, depth: usize) {
    let _ = writeln!(out, "{:indent$}[{}]", "", rsz.instance_label(folder.instance), indent = depth * 2);
    for child in &folder.folders {
        write_folder(out, rsz, child, depth + 1);
    }
    for node in &folder.game_objects {
        write_game_object(out, rsz, node, depth + 1);
    }
}

fn write_game_object(out: &mut String, rsz: &Rsz, node: &GameObjectNode, depth: usize) {
    let indent = depth * 2;
    let _ = writeln!(out, "{:indent$}{}", "", rsz.instance_label(node.instance));
    for &component in &node.components {
        let _ = writeln!(out, "{:indent$}  - {}", "", rsz.instance_label(component));
    }
    for child in &node.children {
        write_game_object(out, rsz, child, depth + 1);
    }
}
