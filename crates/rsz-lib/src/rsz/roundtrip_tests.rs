use std::sync::Arc;

use rsz_core::Schema;
use rsz_format::records::EmbeddedUserdataInfo;
use rsz_format::{ByteStream, FormatError, Game, GameVersion, Stream, codec};

use super::read::MAX_NESTING;
use super::{Rsz, UserdataPayload};
use crate::error::Error;
use crate::options::RszOptions;
use crate::instance::InstanceId;
use crate::test_utils::{CONFIG, CONFIGS, ITEMS, VALUES, embedded_options, graph_with_root, options};
use crate::value::Value;

fn sample(options: &RszOptions) -> Rsz {
    let (mut rsz, holder) = graph_with_root(options, "app.Holder");
    let mut foo = rsz.new_instance("Foo").unwrap();
    foo.values[0] = Value::U32(100);
    foo.values[1] = Value::String("hello".into());
    rsz.insert_new_instance(holder, ITEMS, foo, None).unwrap();
    rsz.insert_item(holder, VALUES, Value::I32(-5), None).unwrap();

    let mut settings = rsz.new_instance("app.Settings").unwrap();
    settings.values[0] = Value::Bool(true);
    settings.values[1] = Value::F32(0.5);
    settings.values[2] = Value::Vec3([1.0, 2.0, 3.0]);
    settings.values[4] = Value::Data(vec![1, 2, 3]);
    settings.values[5] = Value::String("label".into());
    let settings = rsz.add_instance(settings);
    rsz.push_object(settings).unwrap();
    rsz
}

fn dump(rsz: &Rsz) -> Vec<String> {
    rsz.instance_ids().map(|id| rsz.stringify(id)).collect()
}

fn write_at(rsz: &mut Rsz, start: u64) -> Vec<u8> {
    let mut stream = ByteStream::new();
    rsz.write(&mut stream, start).unwrap();
    stream.into_bytes()
}

fn read_at(bytes: Vec<u8>, start: u64, options: &RszOptions) -> Rsz {
    let mut stream = ByteStream::from_vec(bytes);
    Rsz::read(&mut stream, start, options).unwrap()
}

#[test]
fn rewrite_is_byte_identical() {
    let options = options();
    let mut rsz = sample(&options);
    let first = write_at(&mut rsz, 0);

    let mut reread = read_at(first.clone(), 0, &options);
    let second = write_at(&mut reread, 0);

    assert_eq!(dump(&reread), dump(&rsz));
    assert_eq!(first, second);
}

#[test]
fn header_records_section_offsets() {
    let options = options();
    let mut rsz = sample(&options);
    write_at(&mut rsz, 0);

    let header = rsz.header();
    assert_eq!(header.object_count, 2);
    assert_eq!(header.instance_count, 4);
    assert_eq!(header.instance_offset, 64);
    assert_eq!(header.userdata_offset, 96);
    assert_eq!(header.data_offset, 96);
}

#[test]
fn block_offsets_are_relative_to_its_start() {
    let options = options();
    let (mut rsz, holder) = graph_with_root(&options, "app.Holder");
    let config = rsz.add_userdata(CONFIG, "config/main.user.2").unwrap();
    rsz.insert_instance(holder, CONFIGS, config, None).unwrap();

    let at_zero = write_at(&mut rsz, 0);
    let at_offset = write_at(&mut rsz, 0x30);

    assert_eq!(&at_offset[0x30..], at_zero.as_slice());
    let reread = read_at(at_offset, 0x30, &options);
    assert_eq!(reread.userdata()[0].path(), Some("config/main.user.2"));
    assert_eq!(dump(&reread), dump(&rsz));
}

#[test]
fn embedded_userdata_round_trips() {
    let options = embedded_options();
    let (mut nested, config) = graph_with_root(&options, "app.Config");
    nested.set_value(config, 0, Value::I32(5)).unwrap();

    let (mut rsz, holder) = graph_with_root(&options, "app.Holder");
    let userdata = rsz.add_embedded_userdata(CONFIG, 0xfeed, nested).unwrap();
    rsz.insert_instance(holder, CONFIGS, userdata, None).unwrap();
    let first = write_at(&mut rsz, 0);

    let mut reread = read_at(first.clone(), 0, &options);
    let UserdataPayload::Embedded { json_path_hash, rsz: inner } = &reread.userdata()[0].payload else {
        panic!("expected embedded userdata");
    };
    assert_eq!(*json_path_hash, 0xfeed);
    assert_eq!(inner.stringify(config), "app.Config[1]\n  level: 5");
    assert_eq!(write_at(&mut reread, 0), first);
}

#[test]
fn unknown_class_hash_is_fatal() {
    let mut rsz = sample(&options());
    let bytes = write_at(&mut rsz, 0);
    let foo_only = Schema::from_json(r#"{ "1": { "name": "Foo", "fields": [] } }"#).unwrap();
    let narrow = RszOptions::new(Arc::new(foo_only), GameVersion::latest(Game::Re4));

    let err = Rsz::read(&mut ByteStream::from_vec(bytes), 0, &narrow).unwrap_err();

    assert!(matches!(err, Error::UnknownClass { type_hash: 0x10, .. }));
}

#[test]
fn wrong_magic_is_fatal() {
    let mut stream = ByteStream::from_vec(vec![0; 48]);

    let err = Rsz::read(&mut stream, 0, &options()).unwrap_err();

    assert!(matches!(err, Error::Format(FormatError::BadMagic { found: 0, .. })));
}

#[test]
fn truncated_block_is_fatal() {
    let mut rsz = sample(&options());
    let mut bytes = write_at(&mut rsz, 0);
    bytes.truncate(bytes.len() - 2);

    let mut stream = ByteStream::from_vec(bytes);
    let err = Rsz::read(&mut stream, 0, &options()).unwrap_err();

    assert!(matches!(err, Error::Format(FormatError::UnexpectedEof { .. })));
    assert!(stream.len() > 0);
}

#[test]
fn terminator_only_string_is_byte_identical() {
    let options = options();
    let (mut rsz, foo) = graph_with_root(&options, "Foo");
    rsz.set_value(foo, 1, Value::Data(vec![0, 0])).unwrap();
    let first = write_at(&mut rsz, 0);

    let mut reread = read_at(first.clone(), 0, &options);

    assert_eq!(reread.instance(InstanceId(1)).unwrap().values[1], Value::Data(vec![0, 0]));
    assert_eq!(write_at(&mut reread, 0), first);
}

#[test]
fn writing_mismatched_field_is_fatal() {
    let options = options();
    let mut rsz = sample(&options);
    let mut foo = rsz.new_instance("Foo").unwrap();
    foo.values[1] = Value::U32(42);
    let foo = rsz.add_instance(foo);
    rsz.push_object(foo).unwrap();

    let err = rsz.write(&mut ByteStream::new(), 0).unwrap_err();

    assert!(matches!(err, Error::FieldValue { found: "U32", .. }));
}

fn embedded_sample(options: &RszOptions) -> (Vec<u8>, u64) {
    let (nested, _) = graph_with_root(options, "app.Config");
    let (mut rsz, holder) = graph_with_root(options, "app.Holder");
    let userdata = rsz.add_embedded_userdata(CONFIG, 0, nested).unwrap();
    rsz.insert_instance(holder, CONFIGS, userdata, None).unwrap();
    let bytes = write_at(&mut rsz, 0);
    (bytes, rsz.header().userdata_offset as u64)
}

#[test]
fn embedded_block_pointing_backwards_is_rejected() {
    let options = embedded_options();
    let (bytes, info_at) = embedded_sample(&options);

    for target in [0, info_at] {
        let mut stream = ByteStream::from_vec(bytes.clone());
        stream.seek(info_at);
        let mut info: EmbeddedUserdataInfo = codec::read(&mut stream).unwrap();
        info.rsz_offset = target;
        codec::rewrite(&mut stream, &info, info_at);

        let err = Rsz::read(&mut stream, 0, &options).unwrap_err();

        assert!(matches!(
            err,
            Error::Format(FormatError::MisplacedBlock { offset, .. }) if offset == target
        ));
    }
}

#[test]
fn embedded_nesting_is_bounded() {
    let options = embedded_options();
    let nest = |levels: usize| {
        let (mut inner, _) = graph_with_root(&options, "app.Config");
        for _ in 0..levels {
            let (mut outer, holder) = graph_with_root(&options, "app.Holder");
            let userdata = outer.add_embedded_userdata(CONFIG, 0, inner).unwrap();
            outer.insert_instance(holder, CONFIGS, userdata, None).unwrap();
            inner = outer;
        }
        write_at(&mut inner, 0)
    };

    assert!(Rsz::read(&mut ByteStream::from_vec(nest(MAX_NESTING)), 0, &options).is_ok());

    let err = Rsz::read(&mut ByteStream::from_vec(nest(MAX_NESTING + 1)), 0, &options).unwrap_err();
    assert!(matches!(
        err,
        Error::Format(FormatError::NestingTooDeep { limit: MAX_NESTING })
    ));
}
