//! Per-field encoding of instance data.

use rsz_core::FieldDescriptor;
use rsz_format::{FormatError, Stream, align_up, count};

use crate::error::{Error, Result};
use crate::instance::InstanceId;
use crate::value::{Repr, Value};

use super::Rsz;

/// Alignment of array counts, string lengths and reference indices.
const SLOT_ALIGN: u64 = 4;

fn seek_aligned(stream: &mut dyn Stream, alignment: u64) {
    let target = align_up(stream.tell(), alignment);
    stream.seek(target);
}

pub(crate) fn read_field(stream: &mut dyn Stream, field: &FieldDescriptor, instance_count: usize) -> Result<Value> {
    if !field.array {
        return read_element(stream, field, instance_count);
    }
    seek_aligned(stream, SLOT_ALIGN);
    let len = count("array", stream.read_i32()?)?;
    let mut items = Vec::with_capacity(len.min(4096));
    for _ in 0..len {
        items.push(read_element(stream, field, instance_count)?);
    }
    Ok(Value::Array(items))
}

fn read_element(stream: &mut dyn Stream, field: &FieldDescriptor, instance_count: usize) -> Result<Value> {
    if field.field_type.encodes_as_string() {
        seek_aligned(stream, SLOT_ALIGN);
        let units = count("string", stream.read_i32()?)?;
        return Ok(decode_string(stream.read_units(units)?));
    }

    if field.is_reference() {
        seek_aligned(stream, SLOT_ALIGN);
        let index = stream.read_i32()?;
        if index < 0 || index as usize >= instance_count {
            return Err(FormatError::BadInstanceIndex {
                index: index.into(),
                count: instance_count,
            }
            .into());
        }
        return Ok(Rsz::reference_value(field.field_type, InstanceId(index as u32)));
    }

    seek_aligned(stream, field.align.into());
    let bytes = stream.read_bytes(field.size as usize)?;
    Ok(decode_scalar(Repr::of(field.field_type), bytes))
}

/// Text of `units`, or the raw units when the text would not be written back
/// as the same count and bytes.
///
/// The canonical forms are count 0 for the empty string and a single
/// trailing NUL otherwise.
fn decode_string(units: Vec<u16>) -> Value {
    let text = match units.split_last() {
        None => Some(String::new()),
        Some((0, text)) if !text.is_empty() => String::from_utf16(text).ok(),
        Some(_) => None,
    };
    text.map(Value::String)
        .unwrap_or_else(|| Value::Data(units.iter().flat_map(|u| u.to_le_bytes()).collect()))
}

/// Typed value for `bytes`, or the bytes themselves when the typed form
/// would not write them back unchanged.
fn decode_scalar(repr: Repr, bytes: Vec<u8>) -> Value {
    let Some(width) = repr.width() else {
        return Value::Data(bytes);
    };
    if width > bytes.len() || bytes[width..].iter().any(|&b| b != 0) {
        return Value::Data(bytes);
    }
    let b = &bytes[..width];
    match repr {
        Repr::Bool if b[0] <= 1 => Value::Bool(b[0] == 1),
        Repr::I8 => Value::I8(b[0] as i8),
        Repr::U8 => Value::U8(b[0]),
        Repr::I16 => Value::I16(i16::from_le_bytes([b[0], b[1]])),
        Repr::U16 => Value::U16(u16::from_le_bytes([b[0], b[1]])),
        Repr::I32 => Value::I32(i32::from_le_bytes(le(b))),
        Repr::U32 => Value::U32(u32::from_le_bytes(le(b))),
        Repr::I64 => Value::I64(i64::from_le_bytes(le(b))),
        Repr::U64 => Value::U64(u64::from_le_bytes(le(b))),
        Repr::F32 => Value::F32(f32::from_le_bytes(le(b))),
        Repr::F64 => Value::F64(f64::from_le_bytes(le(b))),
        Repr::Vec2 => Value::Vec2(floats(b)),
        Repr::Vec3 => Value::Vec3(floats(b)),
        Repr::Vec4 => Value::Vec4(floats(b)),
        Repr::Mat4 => Value::Mat4(floats(b)),
        Repr::Guid => Value::Guid(le(b)),
        _ => Value::Data(bytes),
    }
}

fn le<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[..N]);
    out
}

fn floats<const N: usize>(bytes: &[u8]) -> [f32; N] {
    let mut out = [0f32; N];
    for (slot, chunk) in out.iter_mut().zip(bytes.chunks_exact(4)) {
        *slot = f32::from_le_bytes(le(chunk));
    }
    out
}

pub(crate) fn write_field(
    stream: &mut dyn Stream,
    class: &str,
    field: &FieldDescriptor,
    value: &Value,
    instance_count: usize,
) -> Result<()> {
    if !value.fits_field(field) {
        return Err(Error::FieldValue {
            class: class.to_string(),
            field: field.name.clone(),
            found: value.kind(),
        });
    }
    match value {
        Value::Array(items) => {
            stream.align(SLOT_ALIGN);
            stream.write_u32(items.len() as u32);
            for item in items {
                write_element(stream, field, item, instance_count)?;
            }
            Ok(())
        }
        element => write_element(stream, field, element, instance_count),
    }
}

/// Write one element. The caller has checked that `value` fits `field`.
fn write_element(stream: &mut dyn Stream, field: &FieldDescriptor, value: &Value, instance_count: usize) -> Result<()> {
    if field.field_type.encodes_as_string() {
        stream.align(SLOT_ALIGN);
        match value {
            Value::Data(raw) => {
                stream.write_u32((raw.len() / 2) as u32);
                stream.write_bytes(raw);
            }
            _ => {
                let text = value.as_str().unwrap_or_default();
                if text.is_empty() {
                    stream.write_u32(0);
                } else {
                    stream.write_u32(text.encode_utf16().count() as u32 + 1);
                    stream.write_wstring(text);
                }
            }
        }
        return Ok(());
    }

    if field.is_reference() {
        stream.align(SLOT_ALIGN);
        let id = value.as_reference().unwrap_or(InstanceId::NULL);
        if id.index() >= instance_count {
            return Err(FormatError::BadInstanceIndex {
                index: id.0.into(),
                count: instance_count,
            }
            .into());
        }
        stream.write_i32(id.0 as i32);
        return Ok(());
    }

    stream.align(field.align.into());
    let mut bytes = encode_scalar(value);
    bytes.resize(field.size as usize, 0);
    stream.write_bytes(&bytes);
    Ok(())
}

fn encode_scalar(value: &Value) -> Vec<u8> {
    fn float_bytes(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    match value {
        Value::Bool(v) => vec![u8::from(*v)],
        Value::I8(v) => v.to_le_bytes().to_vec(),
        Value::U8(v) => vec![*v],
        Value::I16(v) => v.to_le_bytes().to_vec(),
        Value::U16(v) => v.to_le_bytes().to_vec(),
        Value::I32(v) => v.to_le_bytes().to_vec(),
        Value::U32(v) => v.to_le_bytes().to_vec(),
        Value::I64(v) => v.to_le_bytes().to_vec(),
        Value::U64(v) => v.to_le_bytes().to_vec(),
        Value::F32(v) => v.to_le_bytes().to_vec(),
        Value::F64(v) => v.to_le_bytes().to_vec(),
        Value::Vec2(v) => float_bytes(v),
        Value::Vec3(v) => float_bytes(v),
        Value::Vec4(v) => float_bytes(v),
        Value::Mat4(v) => float_bytes(v),
        Value::Guid(v) => v.to_vec(),
        Value::Data(v) => v.clone(),
        Value::String(_) | Value::Object(_) | Value::UserData(_) | Value::Array(_) => Vec::new(),
    }
}
