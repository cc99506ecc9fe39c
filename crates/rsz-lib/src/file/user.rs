use rsz_format::records::{ResourceInfo, UserdataInfo, read_pooled, write_pooled};
use rsz_format::{ContainerKind, FixedLayout, Magic, Stream, UserHeader, codec, offset};

use crate::error::Result;
use crate::options::RszOptions;
use crate::rsz::Rsz;

use super::{ContainerFile, SECTION_ALIGN};

/// `.user` file: resource and userdata tables around one RSZ block.
#[derive(Clone, Debug)]
pub struct UserFile {
    pub header: UserHeader,
    pub resources: Vec<ResourceInfo>,
    pub userdata: Vec<UserdataInfo>,
    pub rsz: Rsz,
}

impl UserFile {
    pub fn new(options: &RszOptions) -> Self {
        Self {
            header: UserHeader::default(),
            resources: Vec::new(),
            userdata: Vec::new(),
            rsz: Rsz::new(options.schema.clone(), options.embedded_userdata()),
        }
    }
}

impl ContainerFile for UserFile {
    const KIND: ContainerKind = ContainerKind::User;

    fn read(stream: &mut dyn Stream, options: &RszOptions) -> Result<Self> {
        stream.seek(0);
        let header: UserHeader = codec::read(stream)?;
        header.validate_magic(0)?;

        stream.seek(offset("resource", header.resource_info_offset)?);
        let resources = read_pooled(stream, rsz_format::count("resource", header.resource_count)?)?;
        stream.seek(offset("userdata", header.userdata_info_offset)?);
        let userdata = read_pooled(stream, rsz_format::count("userdata", header.userdata_count)?)?;

        let rsz = Rsz::read(stream, offset("data", header.data_offset)?, options)?;
        Ok(Self {
            header,
            resources,
            userdata,
            rsz,
        })
    }

    fn write(&mut self, stream: &mut dyn Stream) -> Result<()> {
        stream.seek(UserHeader::SIZE as u64);
        let mut header = self.header;

        stream.align(SECTION_ALIGN);
        header.resource_info_offset = stream.tell() as i64;
        write_pooled(stream, &self.resources);

        stream.align(SECTION_ALIGN);
        header.userdata_info_offset = stream.tell() as i64;
        write_pooled(stream, &self.userdata);

        stream.flush_pending_strings();

        stream.align(SECTION_ALIGN);
        header.data_offset = stream.tell() as i64;
        self.rsz.write(stream, header.data_offset as u64)?;

        header.resource_count = self.resources.len() as i32;
        header.userdata_count = self.userdata.len() as i32;
        codec::rewrite(stream, &header, 0);
        self.header = header;
        tracing::debug!(
            resources = header.resource_count,
            userdata = header.userdata_count,
            data_offset = format_args!("{:#x}", header.data_offset),
            "wrote user file"
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
