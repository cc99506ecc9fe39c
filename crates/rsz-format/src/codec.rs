//! Fixed-layout record codec.
//!
//! Headers and table entries are plain little-endian structs with no implicit
//! padding. A [`FixedLayout`] type declares its byte size and how to walk its
//! fields; the stream helpers here do the I/O and the patch-back.

use crate::error::Result;
use crate::stream::Stream;

/// A record with a fixed on-disk size and sequential field layout.
pub trait FixedLayout: Sized {
    /// Encoded size in bytes.
    const SIZE: usize;

    fn decode(reader: &mut FieldReader<'_>) -> Self;

    fn encode(&self, writer: &mut FieldWriter);
}

/// Sequential reader over exactly one record's bytes.
pub struct FieldReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

macro_rules! field_reads {
    ($($name:ident: $ty:ty),* $(,)?) => {$(
        pub fn $name(&mut self) -> $ty {
            <$ty>::from_le_bytes(self.array())
        }
    )*};
}

impl<'a> FieldReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Take the next `N` bytes.
    ///
    /// Panics if the record declares a `SIZE` smaller than what it decodes.
    pub fn array<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.bytes[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    field_reads! {
        u16: u16,
        i16: i16,
        u32: u32,
        i32: i32,
        u64: u64,
        i64: i64,
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

/// Sequential writer producing one record's bytes.
#[derive(Default)]
pub struct FieldWriter {
    buf: Vec<u8>,
}

macro_rules! field_writes {
    ($($name:ident: $ty:ty),* $(,)?) => {$(
        pub fn $name(&mut self, value: $ty) {
            self.buf.extend_from_slice(&value.to_le_bytes());
        }
    )*};
}

impl FieldWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    field_writes! {
        u16: u16,
        i16: i16,
        u32: u32,
        i32: i32,
        u64: u64,
        i64: i64,
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// A record together with the offset it was read from or written at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located<T> {
    pub offset: u64,
    pub value: T,
}

/// Read one record at the current position.
pub fn read<T: FixedLayout, S: Stream + ?Sized>(stream: &mut S) -> Result<T> {
    let bytes = stream.read_bytes(T::SIZE)?;
    Ok(T::decode(&mut FieldReader::new(&bytes)))
}

/// Read one record and remember where it came from.
pub fn read_located<T: FixedLayout, S: Stream + ?Sized>(stream: &mut S) -> Result<Located<T>> {
    let offset = stream.tell();
    Ok(Located {
        offset,
        value: read(stream)?,
    })
}

/// Read `count` consecutive records.
pub fn read_many<T: FixedLayout, S: Stream + ?Sized>(stream: &mut S, count: usize) -> Result<Vec<T>> {
    (0..count).map(|_| read(stream)).collect()
}

/// Encode a record to bytes.
pub fn to_bytes<T: FixedLayout>(value: &T) -> Vec<u8> {
    let mut writer = FieldWriter::new();
    value.encode(&mut writer);
    let bytes = writer.into_bytes();
    debug_assert_eq!(bytes.len(), T::SIZE, "record encoded to the wrong size");
    bytes
}

/// Write one record at the current position, returning where it went.
pub fn write<T: FixedLayout, S: Stream + ?Sized>(stream: &mut S, value: &T) -> u64 {
    let offset = stream.tell();
    stream.write_bytes(&to_bytes(value));
    offset
}

pub fn write_many<'a, T, S>(stream: &mut S, values: impl IntoIterator<Item = &'a T>)
where
    T: FixedLayout + 'a,
    S: Stream + ?Sized,
{
    for value in values {
        write(stream, value);
    }
}

/// Overwrite a record at `offset`, leaving the cursor where it was.
pub fn rewrite<T: FixedLayout, S: Stream + ?Sized>(stream: &mut S, value: &T, offset: u64) {
    let saved = stream.tell();
    stream.seek(offset);
    write(stream, value);
    stream.seek(saved);
}
