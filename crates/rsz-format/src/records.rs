//! Table entries of containers and RSZ blocks.
//!
//! Plain records implement [`FixedLayout`]. Records that name a path store an
//! 8-byte offset into the string pool and implement [`PooledRecord`] instead:
//! reading follows the offset, writing defers the string until the pool is
//! flushed.

use crate::codec::{FieldReader, FieldWriter, FixedLayout};
use crate::error::Result;
use crate::stream::Stream;

/// Prefab game object entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameObjectInfo {
    pub object_id: i32,
    pub parent_id: i32,
    pub component_count: i32,
}

impl FixedLayout for GameObjectInfo {
    const SIZE: usize = 12;

    fn decode(r: &mut FieldReader<'_>) -> Self {
        Self {
            object_id: r.i32(),
            parent_id: r.i32(),
            component_count: r.i32(),
        }
    }

    fn encode(&self, w: &mut FieldWriter) {
        w.i32(self.object_id);
        w.i32(self.parent_id);
        w.i32(self.component_count);
    }
}

/// Cross-object property link in a prefab.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameObjectRefInfo {
    pub object_id: u32,
    pub property_id: i32,
    pub array_index: i32,
    pub target_id: u32,
}

impl FixedLayout for GameObjectRefInfo {
    const SIZE: usize = 16;

    fn decode(r: &mut FieldReader<'_>) -> Self {
        Self {
            object_id: r.u32(),
            property_id: r.i32(),
            array_index: r.i32(),
            target_id: r.u32(),
        }
    }

    fn encode(&self, w: &mut FieldWriter) {
        w.u32(self.object_id);
        w.i32(self.property_id);
        w.i32(self.array_index);
        w.u32(self.target_id);
    }
}

/// Scene game object entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScnGameObjectInfo {
    pub guid: [u8; 16],
    pub object_id: i32,
    pub parent_id: i32,
    pub component_count: i16,
    pub ukn: i16,
    /// Index into the prefab table, or -1.
    pub prefab_id: i32,
}

impl FixedLayout for ScnGameObjectInfo {
    const SIZE: usize = 32;

    fn decode(r: &mut FieldReader<'_>) -> Self {
        Self {
            guid: r.array(),
            object_id: r.i32(),
            parent_id: r.i32(),
            component_count: r.i16(),
            ukn: r.i16(),
            prefab_id: r.i32(),
        }
    }

    fn encode(&self, w: &mut FieldWriter) {
        w.bytes(&self.guid);
        w.i32(self.object_id);
        w.i32(self.parent_id);
        w.i16(self.component_count);
        w.i16(self.ukn);
        w.i32(self.prefab_id);
    }
}

/// Scene folder entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FolderInfo {
    pub object_id: i32,
    pub parent_id: i32,
}

impl FixedLayout for FolderInfo {
    const SIZE: usize = 8;

    fn decode(r: &mut FieldReader<'_>) -> Self {
        Self {
            object_id: r.i32(),
            parent_id: r.i32(),
        }
    }

    fn encode(&self, w: &mut FieldWriter) {
        w.i32(self.object_id);
        w.i32(self.parent_id);
    }
}

/// Class of one instance in an RSZ block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InstanceInfo {
    pub type_hash: u32,
    pub crc: u32,
}

impl FixedLayout for InstanceInfo {
    const SIZE: usize = 8;

    fn decode(r: &mut FieldReader<'_>) -> Self {
        Self {
            type_hash: r.u32(),
            crc: r.u32(),
        }
    }

    fn encode(&self, w: &mut FieldWriter) {
        w.u32(self.type_hash);
        w.u32(self.crc);
    }
}

/// Userdata entry of an RSZ block whose payload is stored inline.
///
/// `rsz_offset` points at a nested RSZ block, relative to the outer block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmbeddedUserdataInfo {
    pub instance_id: i32,
    pub type_hash: u32,
    pub json_path_hash: u32,
    pub data_size: u32,
    pub rsz_offset: u64,
}

impl FixedLayout for EmbeddedUserdataInfo {
    const SIZE: usize = 24;

    fn decode(r: &mut FieldReader<'_>) -> Self {
        Self {
            instance_id: r.i32(),
            type_hash: r.u32(),
            json_path_hash: r.u32(),
            data_size: r.u32(),
            rsz_offset: r.u64(),
        }
    }

    fn encode(&self, w: &mut FieldWriter) {
        w.i32(self.instance_id);
        w.u32(self.type_hash);
        w.u32(self.json_path_hash);
        w.u32(self.data_size);
        w.u64(self.rsz_offset);
    }
}

/// A record holding one or more string pool references.
pub trait PooledRecord: Sized {
    /// Encoded size of the record itself, excluding pooled strings.
    const SIZE: usize;

    fn read_from(stream: &mut dyn Stream) -> Result<Self>;

    fn write_to(&self, stream: &mut dyn Stream);
}

pub fn read_pooled<T: PooledRecord>(stream: &mut dyn Stream, count: usize) -> Result<Vec<T>> {
    (0..count).map(|_| T::read_from(stream)).collect()
}

pub fn write_pooled<T: PooledRecord>(stream: &mut dyn Stream, records: &[T]) {
    for record in records {
        record.write_to(stream);
    }
}

fn read_path(stream: &mut dyn Stream) -> Result<String> {
    let offset = stream.read_u64()?;
    stream.read_wstring_at(offset)
}

/// External resource referenced by a container.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceInfo {
    pub path: String,
}

impl PooledRecord for ResourceInfo {
    const SIZE: usize = 8;

    fn read_from(stream: &mut dyn Stream) -> Result<Self> {
        Ok(Self {
            path: read_path(stream)?,
        })
    }

    fn write_to(&self, stream: &mut dyn Stream) {
        stream.defer_string(&self.path);
    }
}

/// Prefab referenced by a scene.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrefabInfo {
    pub path: String,
}

impl PooledRecord for PrefabInfo {
    const SIZE: usize = 8;

    fn read_from(stream: &mut dyn Stream) -> Result<Self> {
        Ok(Self {
            path: read_path(stream)?,
        })
    }

    fn write_to(&self, stream: &mut dyn Stream) {
        stream.defer_string(&self.path);
    }
}

/// User data file referenced by a container.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserdataInfo {
    pub type_hash: u32,
    pub crc: u32,
    pub path: String,
}

impl PooledRecord for UserdataInfo {
    const SIZE: usize = 16;

    fn read_from(stream: &mut dyn Stream) -> Result<Self> {
        Ok(Self {
            type_hash: stream.read_u32()?,
            crc: stream.read_u32()?,
            path: read_path(stream)?,
        })
    }

    fn write_to(&self, stream: &mut dyn Stream) {
        stream.write_u32(self.type_hash);
        stream.write_u32(self.crc);
        stream.defer_string(&self.path);
    }
}

/// Userdata entry of an RSZ block that points at an external file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RszUserdataInfo {
    pub instance_id: i32,
    pub type_hash: u32,
    pub path: String,
}

impl PooledRecord for RszUserdataInfo {
    const SIZE: usize = 16;

    fn read_from(stream: &mut dyn Stream) -> Result<Self> {
        Ok(Self {
            instance_id: stream.read_i32()?,
            type_hash: stream.read_u32()?,
            path: read_path(stream)?,
        })
    }

    fn write_to(&self, stream: &mut dyn Stream) {
        stream.write_i32(self.instance_id);
        stream.write_u32(self.type_hash);
        stream.defer_string(&self.path);
    }
}
