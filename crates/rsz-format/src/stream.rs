//! Positioned byte streams.
//!
//! Containers are read and written through [`Stream`], a seekable cursor with
//! little-endian primitives, zero-padded alignment and a deferred string pool.
//! Embedded payloads see their own origin through a [`Rebased`] view, so every
//! offset they read or record is relative to where they start.

use std::path::Path;

use crate::error::{FormatError, Result};

/// Round `value` up to the next multiple of `alignment`.
pub fn align_up(value: u64, alignment: u64) -> u64 {
    if alignment <= 1 {
        return value;
    }
    value.div_ceil(alignment) * alignment
}

/// A string whose pool offset is patched in when the pool is flushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingString {
    /// Absolute position of the 8-byte offset slot.
    pub slot: u64,
    /// Absolute origin the stored offset is relative to.
    pub origin: u64,
    pub text: String,
}

macro_rules! scalar_io {
    ($($read:ident, $write:ident, $ty:ty;)*) => {$(
        fn $read(&mut self) -> Result<$ty> {
            let mut buf = [0u8; std::mem::size_of::<$ty>()];
            self.read_exact(&mut buf)?;
            Ok(<$ty>::from_le_bytes(buf))
        }

        fn $write(&mut self, value: $ty) {
            self.write_bytes(&value.to_le_bytes());
        }
    )*};
}

/// Seekable byte cursor. Positions are relative to [`Stream::absolute`].
pub trait Stream {
    fn tell(&self) -> u64;

    fn seek(&mut self, pos: u64);

    /// Bytes available from this stream's origin.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fill `buf` from the current position.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Write at the current position, overwriting or extending.
    ///
    /// Writing past the end zero-fills the gap.
    fn write_bytes(&mut self, bytes: &[u8]);

    /// Absolute position of this stream's origin in the backing buffer.
    fn absolute(&self) -> u64;

    fn push_pending(&mut self, pending: PendingString);

    /// Emit every deferred string at the current position and patch its slot.
    fn flush_pending_strings(&mut self);

    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn skip(&mut self, n: u64) {
        let pos = self.tell();
        self.seek(pos.saturating_add(n));
    }

    /// Move to the next multiple of `alignment`.
    ///
    /// Extends the stream with zeros when the target lies past the end.
    fn align(&mut self, alignment: u64) {
        let target = align_up(self.tell(), alignment);
        self.seek(target);
        if target > self.len() {
            self.write_bytes(&[]);
        }
    }

    scalar_io! {
        read_u8, write_u8, u8;
        read_i8, write_i8, i8;
        read_u16, write_u16, u16;
        read_i16, write_i16, i16;
        read_u32, write_u32, u32;
        read_i32, write_i32, i32;
        read_u64, write_u64, u64;
        read_i64, write_i64, i64;
        read_f32, write_f32, f32;
        read_f64, write_f64, f64;
    }

    /// Read a NUL-terminated UTF-16LE string.
    fn read_wstring(&mut self) -> Result<String> {
        let offset = self.tell();
        let mut units = Vec::new();
        loop {
            let unit = self
                .read_u16()
                .map_err(|_| FormatError::UnterminatedString { offset })?;
            if unit == 0 {
                break;
            }
            units.push(unit);
        }
        String::from_utf16(&units).map_err(|_| FormatError::InvalidUtf16 { offset })
    }

    /// Bytes between the cursor and the end of the stream.
    fn remaining(&self) -> u64 {
        self.len().saturating_sub(self.tell())
    }

    /// Read `count` raw UTF-16LE units.
    ///
    /// The count is checked against the remaining bytes before allocating.
    fn read_units(&mut self, count: usize) -> Result<Vec<u16>> {
        let offset = self.tell();
        let need = count.checked_mul(2).filter(|&n| n as u64 <= self.remaining());
        let Some(need) = need else {
            return Err(FormatError::UnexpectedEof {
                offset,
                need: count.saturating_mul(2),
                have: self.remaining(),
            });
        };
        let bytes = self.read_bytes(need)?;
        Ok(bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect())
    }

    /// Read `count` UTF-16LE units, dropping one trailing NUL.
    fn read_wstring_units(&mut self, count: usize) -> Result<String> {
        let offset = self.tell();
        let mut units = self.read_units(count)?;
        if units.last() == Some(&0) {
            units.pop();
        }
        String::from_utf16(&units).map_err(|_| FormatError::InvalidUtf16 { offset })
    }

    /// Read a NUL-terminated string at `offset` without moving the cursor.
    fn read_wstring_at(&mut self, offset: u64) -> Result<String> {
        let saved = self.tell();
        self.seek(offset);
        let result = self.read_wstring();
        self.seek(saved);
        result
    }

    /// Write `text` as UTF-16LE followed by a NUL unit.
    fn write_wstring(&mut self, text: &str) {
        for unit in text.encode_utf16() {
            self.write_u16(unit);
        }
        self.write_u16(0);
    }

    /// Reserve an 8-byte offset slot for `text` in the string pool.
    ///
    /// The slot receives the string's position relative to this stream's
    /// origin when [`Stream::flush_pending_strings`] runs.
    fn defer_string(&mut self, text: &str) {
        let origin = self.absolute();
        let slot = origin + self.tell();
        self.write_u64(0);
        self.push_pending(PendingString {
            slot,
            origin,
            text: text.to_string(),
        });
    }

    /// View of this stream whose origin is `base`.
    fn rebased(&mut self, base: u64) -> Rebased<'_>
    where
        Self: Sized,
    {
        Rebased::new(self, base)
    }
}

/// Owning in-memory stream.
#[derive(Debug, Clone, Default)]
pub struct ByteStream {
    buf: Vec<u8>,
    pos: usize,
    pending: Vec<PendingString>,
}

impl ByteStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(buf: Vec<u8>) -> Self {
        Self {
            buf,
            pos: 0,
            pending: Vec::new(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_vec(std::fs::read(path)?))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        if !self.pending.is_empty() {
            tracing::warn!(count = self.pending.len(), "dropping unflushed strings");
        }
        self.buf
    }

    /// Strings deferred but not yet flushed.
    pub fn pending(&self) -> &[PendingString] {
        &self.pending
    }
}

impl Stream for ByteStream {
    fn tell(&self) -> u64 {
        self.pos as u64
    }

    fn seek(&mut self, pos: u64) {
        self.pos = usize::try_from(pos).unwrap_or(usize::MAX);
    }

    fn len(&self) -> u64 {
        self.buf.len() as u64
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let end = self.pos.checked_add(buf.len()).filter(|&end| end <= self.buf.len());
        let Some(end) = end else {
            return Err(FormatError::UnexpectedEof {
                offset: self.pos as u64,
                need: buf.len(),
                have: self.buf.len().saturating_sub(self.pos) as u64,
            });
        };
        buf.copy_from_slice(&self.buf[self.pos..end]);
        self.pos = end;
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let end = self.pos + bytes.len();
        if end > self.buf.len() {
            self.buf.resize(end, 0);
        }
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
    }

    fn absolute(&self) -> u64 {
        0
    }

    fn push_pending(&mut self, pending: PendingString) {
        self.pending.push(pending);
    }

    fn flush_pending_strings(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        tracing::debug!(
            count = self.pending.len(),
            at = format_args!("{:#x}", self.pos),
            "flushing string pool"
        );
        for pending in std::mem::take(&mut self.pending) {
            let at = self.pos as u64;
            self.write_wstring(&pending.text);
            let end = self.pos;
            self.pos = pending.slot as usize;
            self.write_u64(at - pending.origin);
            self.pos = end;
        }
    }
}

/// A stream view whose position 0 is `base` in the underlying stream.
pub struct Rebased<'a> {
    inner: &'a mut dyn Stream,
    base: u64,
}

impl<'a> Rebased<'a> {
    pub fn new(inner: &'a mut dyn Stream, base: u64) -> Self {
        Self { inner, base }
    }

    /// Origin relative to the wrapped stream.
    pub fn base(&self) -> u64 {
        self.base
    }
}

impl Stream for Rebased<'_> {
    fn tell(&self) -> u64 {
        self.inner.tell().saturating_sub(self.base)
    }

    fn seek(&mut self, pos: u64) {
        self.inner.seek(self.base.saturating_add(pos));
    }

    fn len(&self) -> u64 {
        self.inner.len().saturating_sub(self.base)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.inner.read_exact(buf)
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.inner.write_bytes(bytes);
    }

    fn absolute(&self) -> u64 {
        self.inner.absolute() + self.base
    }

    fn push_pending(&mut self, pending: PendingString) {
        self.inner.push_pending(pending);
    }

    fn flush_pending_strings(&mut self) {
        self.inner.flush_pending_strings();
    }
}
