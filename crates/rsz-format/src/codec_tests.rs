use crate::codec::{self, FieldReader, FieldWriter, FixedLayout, Located};
use crate::error::FormatError;
use crate::records::InstanceInfo;
use crate::stream::{ByteStream, Stream};

#[derive(Debug, PartialEq)]
struct Pair {
    a: u16,
    b: i64,
}

impl FixedLayout for Pair {
    const SIZE: usize = 10;

    fn decode(r: &mut FieldReader<'_>) -> Self {
        Self {
            a: r.u16(),
            b: r.i64(),
        }
    }

    fn encode(&self, w: &mut FieldWriter) {
        w.u16(self.a);
        w.i64(self.b);
    }
}

#[test]
fn no_implicit_padding() {
    let bytes = codec::to_bytes(&Pair { a: 1, b: -1 });
    assert_eq!(bytes, [1, 0, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);
}

#[test]
fn read_consumes_exactly_size() {
    let mut s = ByteStream::from_vec(vec![1, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0xaa]);
    let pair: Pair = codec::read(&mut s).unwrap();

    assert_eq!(pair, Pair { a: 1, b: 2 });
    assert_eq!(s.tell(), Pair::SIZE as u64);
}

#[test]
fn short_stream_fails() {
    let mut s = ByteStream::from_vec(vec![0; 9]);
    let err = codec::read::<Pair, _>(&mut s).unwrap_err();

    assert!(matches!(err, FormatError::UnexpectedEof { need: 10, .. }));
}

#[test]
fn read_located_records_offset() {
    let mut s = ByteStream::from_vec(vec![0; 24]);
    s.seek(8);
    let info: Located<InstanceInfo> = codec::read_located(&mut s).unwrap();

    assert_eq!(info.offset, 8);
    assert_eq!(info.value, InstanceInfo::default());
}

#[test]
fn many_roundtrip() {
    let infos = vec![
        InstanceInfo {
            type_hash: 0,
            crc: 0,
        },
        InstanceInfo {
            type_hash: 0xdead_beef,
            crc: 0x1234,
        },
    ];
    let mut s = ByteStream::new();
    codec::write_many(&mut s, &infos);
    assert_eq!(s.len(), 16);

    s.seek(0);
    assert_eq!(codec::read_many::<InstanceInfo, _>(&mut s, 2).unwrap(), infos);
}

#[test]
fn rewrite_patches_and_restores_position() {
    let mut s = ByteStream::new();
    let at = codec::write(&mut s, &Pair { a: 0, b: 0 });
    s.write_u32(0xffff_ffff);

    codec::rewrite(&mut s, &Pair { a: 7, b: 9 }, at);

    assert_eq!(s.tell(), 14);
    s.seek(at);
    assert_eq!(codec::read::<Pair, _>(&mut s).unwrap(), Pair { a: 7, b: 9 });
    assert_eq!(s.read_u32().unwrap(), 0xffff_ffff);
}

#[test]
fn works_through_dyn_stream() {
    let mut s = ByteStream::new();
    let dyn_stream: &mut dyn Stream = &mut s;
    codec::write(dyn_stream, &InstanceInfo { type_hash: 5, crc: 6 });
    dyn_stream.seek(0);
    let info: InstanceInfo = codec::read(dyn_stream).unwrap();

    assert_eq!(info.type_hash, 5);
    assert_eq!(info.crc, 6);
}
