use rsz_format::records::{
    FolderInfo, PrefabInfo, ResourceInfo, ScnGameObjectInfo, UserdataInfo, read_pooled,
    write_pooled,
};
use rsz_format::{ContainerKind, FixedLayout, Magic, ScnHeader, Stream, codec, count, offset};

use crate::error::Result;
use crate::options::RszOptions;
use crate::rsz::Rsz;

use super::tree::{FolderNode, GameObjectNode, build_folders, build_game_objects};
use super::{ContainerFile, SECTION_ALIGN};

/// `.scn` file: game objects grouped into folders, plus prefab references.
#[derive(Clone, Debug)]
pub struct ScnFile {
    pub header: ScnHeader,
    pub game_object_infos: Vec<ScnGameObjectInfo>,
    pub folder_infos: Vec<FolderInfo>,
    pub resources: Vec<ResourceInfo>,
    pub prefabs: Vec<PrefabInfo>,
    pub userdata: Vec<UserdataInfo>,
    pub rsz: Rsz,
}

impl ScnFile {
    pub fn new(options: &RszOptions) -> Self {
        Self {
            header: ScnHeader::default(),
            game_object_infos: Vec::new(),
            folder_infos: Vec::new(),
            resources: Vec::new(),
            prefabs: Vec::new(),
            userdata: Vec::new(),
            rsz: Rsz::new(options.schema.clone(), options.embedded_userdata()),
        }
    }

    /// Game objects not parented to another game object.
    pub fn game_objects(&self) -> Vec<GameObjectNode> {
        build_game_objects(&self.game_object_infos, self.rsz.object_table())
    }

    /// Root folders, each with its subfolders and game objects.
    pub fn folders(&self) -> Vec<FolderNode> {
        build_folders(
            &self.folder_infos,
            &self.game_object_infos,
            self.rsz.object_table(),
        )
    }

    /// Path of the prefab a game object was instantiated from.
    pub fn prefab_path(&self, info: &ScnGameObjectInfo) -> Option<&str> {
        let index = usize::try_from(info.prefab_id).ok()?;
        self.prefabs.get(index).map(|p| p.path.as_str())
    }
}

impl ContainerFile for ScnFile {
    const KIND: ContainerKind = ContainerKind::Scene;

    fn read(stream: &mut dyn Stream, options: &RszOptions) -> Result<Self> {
        stream.seek(0);
        let header: ScnHeader = codec::read(stream)?;
        header.validate_magic(0)?;

        let game_object_infos = codec::read_many(stream, count("game object", header.info_count)?)?;

        stream.seek(offset("folder", header.folder_info_offset)?);
        let folder_infos = codec::read_many(stream, count("folder", header.folder_count)?)?;

        stream.seek(offset("resource", header.resource_info_offset)?);
        let resources = read_pooled(stream, count("resource", header.resource_count)?)?;

        stream.seek(offset("prefab", header.prefab_info_offset)?);
        let prefabs = read_pooled(stream, count("prefab", header.prefab_count)?)?;

        stream.seek(offset("userdata", header.userdata_info_offset)?);
        let userdata = read_pooled(stream, count("userdata", header.userdata_count)?)?;

        let rsz = Rsz::read(stream, offset("data", header.data_offset)?, options)?;
        Ok(Self {
            header,
            game_object_infos,
            folder_infos,
            resources,
            prefabs,
            userdata,
            rsz,
        })
    }

    fn write(&mut self, stream: &mut dyn Stream) -> Result<()> {
        stream.seek(ScnHeader::SIZE as u64);
        let mut header = self.header;

        codec::write_many(stream, &self.game_object_infos);

        stream.align(SECTION_ALIGN);
        header.folder_info_offset = stream.tell() as i64;
        codec::write_many(stream, &self.folder_infos);

        stream.align(SECTION_ALIGN);
        header.resource_info_offset = stream.tell() as i64;
        write_pooled(stream, &self.resources);

        stream.align(SECTION_ALIGN);
        header.prefab_info_offset = stream.tell() as i64;
        write_pooled(stream, &self.prefabs);

        stream.align(SECTION_ALIGN);
        header.userdata_info_offset = stream.tell() as i64;
        write_pooled(stream, &self.userdata);

        stream.flush_pending_strings();

        stream.align(SECTION_ALIGN);
        header.data_offset = stream.tell() as i64;
        self.rsz.write(stream, header.data_offset as u64)?;

        header.info_count = self.game_object_infos.len() as i32;
        header.folder_count = self.folder_infos.len() as i32;
        header.resource_count = self.resources.len() as i32;
        header.prefab_count = self.prefabs.len() as i32;
        header.userdata_count = self.userdata.len() as i32;
        codec::rewrite(stream, &header, 0);
        self.header = header;
        tracing::debug!(
            game_objects = header.info_count,
            folders = header.folder_count,
            prefabs = header.prefab_count,
            data_offset = format_args!("{:#x}", header.data_offset),
            "wrote scene"
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
