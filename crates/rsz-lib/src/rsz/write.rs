use rsz_format::records::{EmbeddedUserdataInfo, InstanceInfo, RszUserdataInfo, write_pooled};
use rsz_format::{Rebased, RszHeader, Stream, codec};

use crate::error::Result;

use super::{Rsz, UserdataPayload, data};

const SECTION_ALIGN: u64 = 16;

impl Rsz {
    /// Write the block with its header at `start` in `stream`.
    ///
    /// A graph whose references were edited is re-sorted first, which
    /// renumbers instances.
    pub fn write(&mut self, stream: &mut dyn Stream, start: u64) -> Result<()> {
        if self.structure_dirty {
            self.rebuild();
        }
        stream.seek(start);
        let mut view = Rebased::new(stream, start);
        self.write_block(&mut view)
    }

    fn write_block(&mut self, stream: &mut dyn Stream) -> Result<()> {
        let instance_count = self.instances.len();
        let mut header = RszHeader {
            object_count: self.object_table.len() as i32,
            instance_count: instance_count as i32,
            userdata_count: self.userdata.len() as i32,
            ..self.header
        };
        codec::write(stream, &header);

        for id in &self.object_table {
            stream.write_i32(id.0 as i32);
        }

        stream.align(SECTION_ALIGN);
        header.instance_offset = stream.tell() as i64;
        for instance in &self.instances {
            let info = if instance.is_null() {
                InstanceInfo::default()
            } else {
                InstanceInfo {
                    type_hash: instance.type_hash(),
                    crc: instance.crc,
                }
            };
            codec::write(stream, &info);
        }

        stream.align(SECTION_ALIGN);
        header.userdata_offset = stream.tell() as i64;
        let mut embedded_slots = Vec::new();
        if self.embedded_userdata {
            for entry in &self.userdata {
                let (json_path_hash, has_block) = match &entry.payload {
                    UserdataPayload::Embedded { json_path_hash, .. } => (*json_path_hash, true),
                    UserdataPayload::External { path } => {
                        tracing::warn!(%path, "external userdata in an embedded block, writing an empty entry");
                        (0, false)
                    }
                };
                let info = EmbeddedUserdataInfo {
                    instance_id: entry.instance.0 as i32,
                    type_hash: entry.type_hash,
                    json_path_hash,
                    ..Default::default()
                };
                let at = codec::write(stream, &info);
                if has_block {
                    embedded_slots.push((at, info));
                }
            }
        } else {
            let records: Vec<RszUserdataInfo> = self
                .userdata
                .iter()
                .map(|entry| RszUserdataInfo {
                    instance_id: entry.instance.0 as i32,
                    type_hash: entry.type_hash,
                    path: entry.path().unwrap_or_default().to_string(),
                })
                .collect();
            write_pooled(stream, &records);
        }
        stream.flush_pending_strings();

        stream.align(SECTION_ALIGN);
        header.data_offset = stream.tell() as i64;
        for (index, instance) in self.instances.iter().enumerate().skip(1) {
            if instance.is_null() || self.userdata.iter().any(|u| u.instance.index() == index) {
                continue;
            }
            for (field, value) in instance.fields() {
                data::write_field(stream, instance.name(), field, value, instance_count)?;
            }
        }

        let mut slots = embedded_slots.into_iter();
        for entry in &mut self.userdata {
            let UserdataPayload::Embedded { rsz, .. } = &mut entry.payload else {
                continue;
            };
            let Some((slot, mut info)) = slots.next() else {
                break;
            };
            stream.align(SECTION_ALIGN);
            let block_start = stream.tell();
            rsz.write(stream, block_start)?;
            info.rsz_offset = block_start;
            info.data_size = (stream.tell() - block_start) as u32;
            codec::rewrite(stream, &info, slot);
        }

        codec::rewrite(stream, &header, 0);
        self.header = header;
        Ok(())
    }
}
