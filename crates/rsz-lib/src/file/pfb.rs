use rsz_format::records::{
    GameObjectInfo, GameObjectRefInfo, ResourceInfo, UserdataInfo, read_pooled, write_pooled,
};
use rsz_format::{ContainerKind, FixedLayout, Magic, PfbHeader, Stream, align_up, codec, count, offset};

use crate::error::Result;
use crate::options::RszOptions;
use crate::rsz::Rsz;

use super::tree::{GameObjectNode, build_game_objects};
use super::{ContainerFile, SECTION_ALIGN};

/// `.pfb` file: a game object hierarchy stored in one RSZ block.
#[derive(Clone, Debug)]
pub struct PfbFile {
    pub header: PfbHeader,
    pub game_object_infos: Vec<GameObjectInfo>,
    /// Cross-object property links.
    pub game_object_refs: Vec<GameObjectRefInfo>,
    pub resources: Vec<ResourceInfo>,
    pub userdata: Vec<UserdataInfo>,
    pub rsz: Rsz,
}

impl PfbFile {
    pub fn new(options: &RszOptions) -> Self {
        Self {
            header: PfbHeader::default(),
            game_object_infos: Vec::new(),
            game_object_refs: Vec::new(),
            resources: Vec::new(),
            userdata: Vec::new(),
            rsz: Rsz::new(options.schema.clone(), options.embedded_userdata()),
        }
    }

    /// Root game objects with their components and children.
    pub fn game_objects(&self) -> Vec<GameObjectNode> {
        build_game_objects(&self.game_object_infos, self.rsz.object_table())
    }
}

impl ContainerFile for PfbFile {
    const KIND: ContainerKind = ContainerKind::Prefab;

    fn read(stream: &mut dyn Stream, options: &RszOptions) -> Result<Self> {
        stream.seek(0);
        let header: PfbHeader = codec::read(stream)?;
        header.validate_magic(0)?;

        stream.seek(align_up(PfbHeader::SIZE as u64, SECTION_ALIGN));
        let game_object_infos = codec::read_many(stream, count("game object", header.info_count)?)?;

        let ref_count = count("game object ref", header.gameobject_ref_info_count)?;
        let game_object_refs = if ref_count > 0 {
            stream.seek(offset("game object ref", header.gameobject_ref_info_offset)?);
            codec::read_many(stream, ref_count)?
        } else {
            Vec::new()
        };

        stream.seek(offset("resource", header.resource_info_offset)?);
        let resources = read_pooled(stream, count("resource", header.resource_count)?)?;

        let userdata_count = count("userdata", header.userdata_count)?;
        let userdata = if userdata_count > 0 {
            stream.seek(offset("userdata", header.userdata_info_offset)?);
            read_pooled(stream, userdata_count)?
        } else {
            Vec::new()
        };

        let rsz = Rsz::read(stream, offset("data", header.data_offset)?, options)?;
        Ok(Self {
            header,
            game_object_infos,
            game_object_refs,
            resources,
            userdata,
            rsz,
        })
    }

    fn write(&mut self, stream: &mut dyn Stream) -> Result<()> {
        stream.seek(PfbHeader::SIZE as u64);
        let mut header = self.header;

        stream.align(SECTION_ALIGN);
        codec::write_many(stream, &self.game_object_infos);

        header.gameobject_ref_info_offset = 0;
        if !self.game_object_refs.is_empty() {
            // The ref table follows the game objects without padding.
            header.gameobject_ref_info_offset = stream.tell() as i64;
            codec::write_many(stream, &self.game_object_refs);
        }

        stream.align(SECTION_ALIGN);
        header.resource_info_offset = stream.tell() as i64;
        write_pooled(stream, &self.resources);

        header.userdata_info_offset = 0;
        if !self.userdata.is_empty() {
            stream.align(SECTION_ALIGN);
            header.userdata_info_offset = stream.tell() as i64;
            write_pooled(stream, &self.userdata);
        }

        stream.flush_pending_strings();

        stream.align(SECTION_ALIGN);
        header.data_offset = stream.tell() as i64;
        self.rsz.write(stream, header.data_offset as u64)?;

        header.info_count = self.game_object_infos.len() as i32;
        header.resource_count = self.resources.len() as i32;
        header.gameobject_ref_info_count = self.game_object_refs.len() as i32;
        header.userdata_count = self.userdata.len() as i64;
        codec::rewrite(stream, &header, 0);
        self.header = header;
        tracing::debug!(
            game_objects = header.info_count,
            refs = header.gameobject_ref_info_count,
            data_offset = format_args!("{:#x}", header.data_offset),
            "wrote prefab"
        );
        Ok(())
    }

    fn rsz(&self) -> &Rsz {
        &self.rsz
    }

    fn rsz_mut(&mut self) -> &mut Rsz {
        &mut self.rsz
    }
}
