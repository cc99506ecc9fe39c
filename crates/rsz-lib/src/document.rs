//! An open container together with its editing state.

use std::io::Write;
use std::path::{Path, PathBuf};

use rsz_format::ContainerKind;
use tempfile::NamedTempFile;

use crate::array::DuplicateMode;
use crate::error::{EditError, Error, Result};
use crate::file::{Container, GameObjectSnapshot, GameObjectTarget, ScnFile};
use crate::instance::InstanceId;
use crate::options::RszOptions;
use crate::rsz::{Clipboard, Rsz};

/// A container bound to a file path.
#[derive(Debug)]
pub struct Document {
    path: Option<PathBuf>,
    options: RszOptions,
    container: Container,
    clipboard: Clipboard,
    copied_game_object: Option<GameObjectSnapshot>,
    changed: bool,
}

impl Document {
    /// Unsaved, empty document.
    pub fn new(kind: ContainerKind, options: RszOptions) -> Self {
        Self {
            path: None,
            container: Container::new(kind, &options),
            options,
            clipboard: Clipboard::new(),
            copied_game_object: None,
            changed: false,
        }
    }

    pub fn open(path: impl AsRef<Path>, options: RszOptions) -> Result<Self> {
        let path = path.as_ref();
        let container = Container::open(path, &options)?;
        tracing::debug!(path = %path.display(), kind = %container.kind(), "opened document");
        Ok(Self {
            path: Some(path.to_path_buf()),
            options,
            container,
            clipboard: Clipboard::new(),
            copied_game_object: None,
            changed: false,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn options(&self) -> &RszOptions {
        &self.options
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Whether there are edits not yet saved.
    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn rsz(&self) -> &Rsz {
        self.container.rsz()
    }

    /// Mutable graph access; marks the document changed.
    pub fn rsz_mut(&mut self) -> &mut Rsz {
        self.changed = true;
        self.container.rsz_mut()
    }

    /// Replace the content with what is on disk.
    pub fn read(&mut self) -> Result<()> {
        let path = self.path.as_deref().ok_or(Error::NoPath)?;
        self.container = Container::open(path, &self.options)?;
        self.changed = false;
        Ok(())
    }

    /// Discard edits and the clipboard, then read the file again.
    pub fn reopen(&mut self) -> Result<()> {
        self.clipboard.clear();
        self.read()
    }

    pub fn save(&mut self) -> Result<()> {
        let path = self.path.clone().ok_or(Error::NoPath)?;
        self.save_as(path)
    }

    /// Write to `path` and make it the document's path.
    ///
    /// The file is written to a temporary sibling and renamed over `path`,
    /// so a failed save leaves any existing file intact.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if self.container.rsz().is_structure_dirty() {
            // Instance ids change when the list is re-sorted.
            self.clipboard.clear();
        }
        let bytes = self.container.to_bytes().map_err(|e| e.in_file(path))?;
        write_atomic(path, &bytes).map_err(|e| Error::from(e).in_file(path))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved document");
        self.path = Some(path.to_path_buf());
        self.changed = false;
        Ok(())
    }

    /// Remember `id` for a later paste.
    pub fn copy_instance(&mut self, id: InstanceId) -> std::result::Result<(), EditError> {
        match self.rsz().instance(id) {
            Some(instance) if !instance.is_null() => {
                self.clipboard.copy(id);
                Ok(())
            }
            _ => Err(EditError::NoSuchInstance(id.0)),
        }
    }

    /// Paste the copied instance after element `index` of an array field.
    pub fn paste_after(
        &mut self,
        owner: InstanceId,
        field: usize,
        index: usize,
        mode: DuplicateMode,
    ) -> std::result::Result<InstanceId, EditError> {
        let clipboard = self.clipboard;
        let id = self
            .container
            .rsz_mut()
            .paste_after(owner, field, index, &clipboard, mode)?;
        self.changed = true;
        Ok(id)
    }

    fn scene_mut(&mut self) -> std::result::Result<&mut ScnFile, EditError> {
        match &mut self.container {
            Container::Scene(scn) => Ok(scn),
            other => Err(EditError::NotAScene(other.kind())),
        }
    }

    /// The game object last copied, if any.
    ///
    /// It owns its instances, so it survives saves and can be pasted into
    /// another scene with [`ScnFile::import_game_object`].
    pub fn copied_game_object(&self) -> Option<&GameObjectSnapshot> {
        self.copied_game_object.as_ref()
    }

    /// Remember the game object at `row` for a later paste.
    pub fn copy_game_object(&mut self, row: usize) -> std::result::Result<(), EditError> {
        let snapshot = self.scene_mut()?.copy_game_object(row)?;
        self.copied_game_object = Some(snapshot);
        Ok(())
    }

    /// Paste the copied game object at `target`, returning the new row.
    pub fn paste_game_object(&mut self, target: GameObjectTarget) -> std::result::Result<usize, EditError> {
        let scn = match &mut self.container {
            Container::Scene(scn) => scn,
            other => return Err(EditError::NotAScene(other.kind())),
        };
        let snapshot = self.copied_game_object.as_ref().ok_or(EditError::EmptyClipboard)?;
        let row = scn.import_game_object(snapshot, target)?;
        self.changed = true;
        Ok(row)
    }

    pub fn duplicate_game_object(&mut self, row: usize) -> std::result::Result<usize, EditError> {
        let copy = self.scene_mut()?.duplicate_game_object(row)?;
        self.changed = true;
        Ok(copy)
    }

    /// Remove a game object with its subtree, returning how many went.
    pub fn remove_game_object(&mut self, row: usize) -> std::result::Result<usize, EditError> {
        let removed = self.scene_mut()?.remove_game_object(row)?;
        self.changed = true;
        Ok(removed)
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
