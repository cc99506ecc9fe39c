use std::collections::HashSet;
use std::sync::Arc;

use rsz_format::records::{EmbeddedUserdataInfo, InstanceInfo, RszUserdataInfo, read_pooled};
use rsz_format::{FormatError, Magic, Rebased, RszHeader, Stream, codec, count, offset};

use crate::error::{Error, Result};
use crate::instance::{Instance, InstanceId};
use crate::options::RszOptions;

use super::{Rsz, RszUserdata, UserdataPayload, data};

/// Embedded userdata blocks nested deeper than this are rejected.
pub(crate) const MAX_NESTING: usize = 16;

impl Rsz {
    /// Read the block whose header sits at `start` in `stream`.
    ///
    /// Offsets inside the block are relative to `start`.
    pub fn read(stream: &mut dyn Stream, start: u64, options: &RszOptions) -> Result<Rsz> {
        Self::read_nested(stream, start, options, 0)
    }

    fn read_nested(stream: &mut dyn Stream, start: u64, options: &RszOptions, depth: usize) -> Result<Rsz> {
        if depth > MAX_NESTING {
            return Err(FormatError::NestingTooDeep { limit: MAX_NESTING }.into());
        }
        let mut view = Rebased::new(stream, start);
        Self::read_block(&mut view, options, depth)
    }

    fn read_block(stream: &mut dyn Stream, options: &RszOptions, depth: usize) -> Result<Rsz> {
        stream.seek(0);
        let header: RszHeader = codec::read(stream)?;
        header.validate_magic(stream.absolute())?;

        let object_count = count("object", header.object_count)?;
        let instance_count = count("instance", header.instance_count)?;
        let userdata_count = count("userdata", header.userdata_count)?;
        tracing::debug!(
            at = format_args!("{:#x}", stream.absolute()),
            object_count,
            instance_count,
            userdata_count,
            "reading rsz block"
        );

        let mut object_table = Vec::with_capacity(object_count.min(4096));
        for _ in 0..object_count {
            object_table.push(checked_id(stream.read_i32()?, instance_count)?);
        }

        let data_offset = offset("data", header.data_offset)?;
        stream.seek(offset("instance", header.instance_offset)?);
        let infos: Vec<InstanceInfo> = codec::read_many(stream, instance_count)?;
        let mut instances = Vec::with_capacity(instance_count);
        for (index, info) in infos.iter().enumerate() {
            instances.push(resolve_instance(options, index, info)?);
        }

        stream.seek(offset("userdata", header.userdata_offset)?);
        let embedded_userdata = options.embedded_userdata();
        let userdata = if embedded_userdata {
            let infos: Vec<EmbeddedUserdataInfo> = codec::read_many(stream, userdata_count)?;
            let mut entries = Vec::with_capacity(infos.len());
            for info in infos {
                let instance = checked_id(info.instance_id, instance_count)?;
                // Nested blocks follow the parent's instance data, so every
                // level starts strictly later than the one enclosing it.
                if info.rsz_offset < data_offset {
                    return Err(FormatError::MisplacedBlock {
                        offset: info.rsz_offset,
                        data_offset,
                    }
                    .into());
                }
                let nested = Rsz::read_nested(stream, info.rsz_offset, options, depth + 1)?;
                entries.push(RszUserdata {
                    instance,
                    type_hash: info.type_hash,
                    payload: UserdataPayload::Embedded {
                        json_path_hash: info.json_path_hash,
                        rsz: Box::new(nested),
                    },
                });
            }
            entries
        } else {
            read_pooled::<RszUserdataInfo>(stream, userdata_count)?
                .into_iter()
                .map(|info| {
                    Ok(RszUserdata {
                        instance: checked_id(info.instance_id, instance_count)?,
                        type_hash: info.type_hash,
                        payload: UserdataPayload::External { path: info.path },
                    })
                })
                .collect::<Result<Vec<_>>>()?
        };

        let userdata_ids: HashSet<InstanceId> = userdata.iter().map(|u| u.instance).collect();
        stream.seek(data_offset);
        for (index, instance) in instances.iter_mut().enumerate().skip(1) {
            if instance.is_null() || userdata_ids.contains(&InstanceId(index as u32)) {
                continue;
            }
            let class = Arc::clone(&instance.class);
            for (field, slot) in class.fields.iter().zip(instance.values.iter_mut()) {
                *slot = data::read_field(stream, field, instance_count)?;
            }
        }

        Ok(Rsz {
            schema: Arc::clone(&options.schema),
            header,
            instances,
            object_table,
            userdata,
            embedded_userdata,
            structure_dirty: false,
        })
    }
}

fn checked_id(index: i32, instance_count: usize) -> Result<InstanceId> {
    if index < 0 || index as usize >= instance_count {
        return Err(FormatError::BadInstanceIndex {
            index: index.into(),
            count: instance_count,
        }
        .into());
    }
    Ok(InstanceId(index as u32))
}

fn resolve_instance(options: &RszOptions, index: usize, info: &InstanceInfo) -> Result<Instance> {
    if index == 0 || info.type_hash == 0 {
        return Ok(Instance::null());
    }
    let class = options
        .schema
        .resolve_by_hash(info.type_hash)
        .ok_or(Error::UnknownClass {
            type_hash: info.type_hash,
            index,
        })?;
    if info.crc != class.crc {
        tracing::warn!(
            class = %class.name,
            expected = format_args!("{:#010x}", class.crc),
            found = format_args!("{:#010x}", info.crc),
            "instance crc differs from schema"
        );
    }
    let mut instance = Instance::new_default(Arc::clone(class));
    instance.crc = info.crc;
    Ok(instance)
}
