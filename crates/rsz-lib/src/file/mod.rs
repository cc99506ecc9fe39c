//! Container files: user data, prefab and scene.
//!
//! Each kind reads its header, its info tables and then hands the data
//! section to [`Rsz`]. Writing appends the same sections in order, flushes
//! the string pool before the data section and finally rewrites the header.

mod game_object;
mod pfb;
mod scn;
mod tree;
mod user;

#[cfg(test)]
mod game_object_tests;

use std::path::Path;

use rsz_format::{ByteStream, ContainerKind, Stream};

use crate::error::{Error, Result};
use crate::options::RszOptions;
use crate::rsz::Rsz;

pub use game_object::{GameObjectSnapshot, GameObjectTarget};
pub use pfb::PfbFile;
pub use scn::ScnFile;
pub use tree::{FolderNode, GameObjectNode};
pub use user::UserFile;

/// Alignment between container sections.
pub(crate) const SECTION_ALIGN: u64 = 16;

/// Read and write access shared by every container kind.
pub trait ContainerFile: Sized {
    const KIND: ContainerKind;

    /// Read a container starting at position 0 of `stream`.
    fn read(stream: &mut dyn Stream, options: &RszOptions) -> Result<Self>;

    /// Write the container starting at position 0 of `stream`.
    fn write(&mut self, stream: &mut dyn Stream) -> Result<()>;

    fn rsz(&self) -> &Rsz;

    fn rsz_mut(&mut self) -> &mut Rsz;

    fn from_bytes(bytes: Vec<u8>, options: &RszOptions) -> Result<Self> {
        Self::read(&mut ByteStream::from_vec(bytes), options)
    }

    fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut stream = ByteStream::new();
        self.write(&mut stream)?;
        Ok(stream.into_bytes())
    }

    /// Read a container file; errors name the file.
    fn open(path: impl AsRef<Path>, options: &RszOptions) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| Error::from(e).in_file(path))?;
        Self::from_bytes(bytes, options).map_err(|e| e.in_file(path))
    }
}

/// A container of any kind.
#[derive(Clone, Debug)]
pub enum Container {
    User(UserFile),
    Prefab(PfbFile),
    Scene(ScnFile),
}

impl Container {
    pub fn kind(&self) -> ContainerKind {
        match self {
            Container::User(_) => ContainerKind::User,
            Container::Prefab(_) => ContainerKind::Prefab,
            Container::Scene(_) => ContainerKind::Scene,
        }
    }

    /// Empty container of `kind`.
    pub fn new(kind: ContainerKind, options: &RszOptions) -> Self {
        match kind {
            ContainerKind::User => Container::User(UserFile::new(options)),
            ContainerKind::Prefab => Container::Prefab(PfbFile::new(options)),
            ContainerKind::Scene => Container::Scene(ScnFile::new(options)),
        }
    }

    pub fn from_bytes(kind: ContainerKind, bytes: Vec<u8>, options: &RszOptions) -> Result<Self> {
        Ok(match kind {
            ContainerKind::User => Container::User(UserFile::from_bytes(bytes, options)?),
            ContainerKind::Prefab => Container::Prefab(PfbFile::from_bytes(bytes, options)?),
            ContainerKind::Scene => Container::Scene(ScnFile::from_bytes(bytes, options)?),
        })
    }

    /// Read a file, choosing the kind from its name.
    pub fn open(path: impl AsRef<Path>, options: &RszOptions) -> Result<Self> {
        let path = path.as_ref();
        let kind = ContainerKind::from_path(path).ok_or_else(|| Error::UnknownKind.in_file(path))?;
        let bytes = std::fs::read(path).map_err(|e| Error::from(e).in_file(path))?;
        Self::from_bytes(kind, bytes, options).map_err(|e| e.in_file(path))
    }

    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        match self {
            Container::User(file) => file.to_bytes(),
            Container::Prefab(file) => file.to_bytes(),
            Container::Scene(file) => file.to_bytes(),
        }
    }

    pub fn rsz(&self) -> &Rsz {
        match self {
            Container::User(file) => file.rsz(),
            Container::Prefab(file) => file.rsz(),
            Container::Scene(file) => file.rsz(),
        }
    }

    pub fn rsz_mut(&mut self) -> &mut Rsz {
        match self {
            Container::User(file) => file.rsz_mut(),
            Container::Prefab(file) => file.rsz_mut(),
            Container::Scene(file) => file.rsz_mut(),
        }
    }
}
