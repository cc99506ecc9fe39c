//! Container and RSZ headers.
//!
//! Every header starts with a 4-byte magic, then counts, then 64-bit section
//! offsets. Offsets are relative to the start of the stream the header was
//! read from.

use crate::codec::{FieldReader, FieldWriter, FixedLayout};
use crate::error::{FormatError, Result};

/// `USR\0`
pub const USR_MAGIC: u32 = 0x0052_5355;
/// `PFB\0`
pub const PFB_MAGIC: u32 = 0x0042_4650;
/// `SCN\0`
pub const SCN_MAGIC: u32 = 0x004E_4353;
/// `RSZ\0`
pub const RSZ_MAGIC: u32 = 0x005A_5352;

/// RSZ block version written for new graphs.
pub const RSZ_VERSION: u32 = 16;

/// Headers carrying a magic signature.
pub trait Magic: FixedLayout {
    const MAGIC: u32;

    fn magic(&self) -> u32;

    /// Fail with [`FormatError::BadMagic`] unless the magic matches.
    fn validate_magic(&self, offset: u64) -> Result<()> {
        if self.magic() == Self::MAGIC {
            return Ok(());
        }
        Err(FormatError::BadMagic {
            offset,
            expected: Self::MAGIC,
            found: self.magic(),
        })
    }
}

/// User data file header (40 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserHeader {
    pub magic: u32,
    pub resource_count: i32,
    pub userdata_count: i32,
    pub info_count: i32,
    pub resource_info_offset: i64,
    pub userdata_info_offset: i64,
    pub data_offset: i64,
}

impl Default for UserHeader {
    fn default() -> Self {
        Self {
            magic: USR_MAGIC,
            resource_count: 0,
            userdata_count: 0,
            info_count: 0,
            resource_info_offset: 0,
            userdata_info_offset: 0,
            data_offset: 0,
        }
    }
}

impl FixedLayout for UserHeader {
    const SIZE: usize = 40;

    fn decode(r: &mut FieldReader<'_>) -> Self {
        Self {
            magic: r.u32(),
            resource_count: r.i32(),
            userdata_count: r.i32(),
            info_count: r.i32(),
            resource_info_offset: r.i64(),
            userdata_info_offset: r.i64(),
            data_offset: r.i64(),
        }
    }

    fn encode(&self, w: &mut FieldWriter) {
        w.u32(self.magic);
        w.i32(self.resource_count);
        w.i32(self.userdata_count);
        w.i32(self.info_count);
        w.i64(self.resource_info_offset);
        w.i64(self.userdata_info_offset);
        w.i64(self.data_offset);
    }
}

impl Magic for UserHeader {
    const MAGIC: u32 = USR_MAGIC;

    fn magic(&self) -> u32 {
        self.magic
    }
}

/// Prefab file header (56 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PfbHeader {
    pub magic: u32,
    pub info_count: i32,
    pub resource_count: i32,
    pub gameobject_ref_info_count: i32,
    pub userdata_count: i64,
    pub gameobject_ref_info_offset: i64,
    pub resource_info_offset: i64,
    pub userdata_info_offset: i64,
    pub data_offset: i64,
}

impl Default for PfbHeader {
    fn default() -> Self {
        Self {
            magic: PFB_MAGIC,
            info_count: 0,
            resource_count: 0,
            gameobject_ref_info_count: 0,
            userdata_count: 0,
            gameobject_ref_info_offset: 0,
            resource_info_offset: 0,
            userdata_info_offset: 0,
            data_offset: 0,
        }
    }
}

impl FixedLayout for PfbHeader {
    const SIZE: usize = 56;

    fn decode(r: &mut FieldReader<'_>) -> Self {
        Self {
            magic: r.u32(),
            info_count: r.i32(),
            resource_count: r.i32(),
            gameobject_ref_info_count: r.i32(),
            userdata_count: r.i64(),
            gameobject_ref_info_offset: r.i64(),
            resource_info_offset: r.i64(),
            userdata_info_offset: r.i64(),
            data_offset: r.i64(),
        }
    }

    fn encode(&self, w: &mut FieldWriter) {
        w.u32(self.magic);
        w.i32(self.info_count);
        w.i32(self.resource_count);
        w.i32(self.gameobject_ref_info_count);
        w.i64(self.userdata_count);
        w.i64(self.gameobject_ref_info_offset);
        w.i64(self.resource_info_offset);
        w.i64(self.userdata_info_offset);
        w.i64(self.data_offset);
    }
}

impl Magic for PfbHeader {
    const MAGIC: u32 = PFB_MAGIC;

    fn magic(&self) -> u32 {
        self.magic
    }
}

/// Scene file header (64 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScnHeader {
    pub magic: u32,
    pub info_count: i32,
    pub resource_count: i32,
    pub folder_count: i32,
    pub prefab_count: i32,
    pub userdata_count: i32,
    pub folder_info_offset: i64,
    pub resource_info_offset: i64,
    pub prefab_info_offset: i64,
    pub userdata_info_offset: i64,
    pub data_offset: i64,
}

impl Default for ScnHeader {
    fn default() -> Self {
        Self {
            magic: SCN_MAGIC,
            info_count: 0,
            resource_count: 0,
            folder_count: 0,
            prefab_count: 0,
            userdata_count: 0,
            folder_info_offset: 0,
            resource_info_offset: 0,
            prefab_info_offset: 0,
            userdata_info_offset: 0,
            data_offset: 0,
        }
    }
}

impl FixedLayout for ScnHeader {
    const SIZE: usize = 64;

    fn decode(r: &mut FieldReader<'_>) -> Self {
        Self {
            magic: r.u32(),
            info_count: r.i32(),
            resource_count: r.i32(),
            folder_count: r.i32(),
            prefab_count: r.i32(),
            userdata_count: r.i32(),
            folder_info_offset: r.i64(),
            resource_info_offset: r.i64(),
            prefab_info_offset: r.i64(),
            userdata_info_offset: r.i64(),
            data_offset: r.i64(),
        }
    }

    fn encode(&self, w: &mut FieldWriter) {
        w.u32(self.magic);
        w.i32(self.info_count);
        w.i32(self.resource_count);
        w.i32(self.folder_count);
        w.i32(self.prefab_count);
        w.i32(self.userdata_count);
        w.i64(self.folder_info_offset);
        w.i64(self.resource_info_offset);
        w.i64(self.prefab_info_offset);
        w.i64(self.userdata_info_offset);
        w.i64(self.data_offset);
    }
}

impl Magic for ScnHeader {
    const MAGIC: u32 = SCN_MAGIC;

    fn magic(&self) -> u32 {
        self.magic
    }
}

/// Object graph block header (48 bytes).
///
/// Offsets are relative to the header itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RszHeader {
    pub magic: u32,
    pub version: u32,
    pub object_count: i32,
    pub instance_count: i32,
    pub userdata_count: i32,
    pub reserved: i32,
    pub instance_offset: i64,
    pub data_offset: i64,
    pub userdata_offset: i64,
}

impl Default for RszHeader {
    fn default() -> Self {
        Self {
            magic: RSZ_MAGIC,
            version: RSZ_VERSION,
            object_count: 0,
            instance_count: 0,
            userdata_count: 0,
            reserved: 0,
            instance_offset: 0,
            data_offset: 0,
            userdata_offset: 0,
        }
    }
}

impl FixedLayout for RszHeader {
    const SIZE: usize = 48;

    fn decode(r: &mut FieldReader<'_>) -> Self {
        Self {
            magic: r.u32(),
            version: r.u32(),
            object_count: r.i32(),
            instance_count: r.i32(),
            userdata_count: r.i32(),
            reserved: r.i32(),
            instance_offset: r.i64(),
            data_offset: r.i64(),
            userdata_offset: r.i64(),
        }
    }

    fn encode(&self, w: &mut FieldWriter) {
        w.u32(self.magic);
        w.u32(self.version);
        w.i32(self.object_count);
        w.i32(self.instance_count);
        w.i32(self.userdata_count);
        w.i32(self.reserved);
        w.i64(self.instance_offset);
        w.i64(self.data_offset);
        w.i64(self.userdata_offset);
    }
}

impl Magic for RszHeader {
    const MAGIC: u32 = RSZ_MAGIC;

    fn magic(&self) -> u32 {
        self.magic
    }
}
