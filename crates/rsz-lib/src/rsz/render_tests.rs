use crate::instance::InstanceId;
use crate::test_utils::{ITEMS, VALUES, graph_with_root, options};
use crate::value::Value;

#[test]
fn stringify_holder() {
    let (mut rsz, holder) = graph_with_root(&options(), "app.Holder");
    let foo = rsz.new_instance("Foo").unwrap();
    rsz.insert_new_instance(holder, ITEMS, foo, None).unwrap();
    rsz.insert_item(holder, VALUES, Value::I32(1), None).unwrap();
    rsz.insert_item(holder, VALUES, Value::I32(2), None).unwrap();

    insta::assert_snapshot!(rsz.stringify(holder), @r"
    app.Holder[1]
      items: [Foo[2]]
      values: [1, 2]
      child: null
      configs: []
    ");
}

#[test]
fn stringify_scalars() {
    let (mut rsz, foo) = graph_with_root(&options(), "Foo");
    rsz.set_value(foo, 0, Value::U32(5)).unwrap();
    rsz.set_value(foo, 1, Value::String("hi".into())).unwrap();

    assert_eq!(rsz.stringify(foo), "Foo[1]\n  hp: 5\n  tag: hi");
}

#[test]
fn stringify_fixed_width_values() {
    let (mut rsz, settings) = graph_with_root(&options(), "app.Settings");
    rsz.set_value(settings, 2, Value::Vec3([1.0, 2.5, -1.0])).unwrap();
    rsz.set_value(settings, 4, Value::Data(vec![0xde, 0xad, 0x01])).unwrap();

    let text = rsz.stringify(settings);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "app.Settings[1]");
    assert_eq!(lines[1], "  enabled: false");
    assert_eq!(lines[3], "  position: (1, 2.5, -1)");
    assert_eq!(lines[4], "  id: 00000000-0000-0000-0000-000000000000");
    assert_eq!(lines[5], "  blob: dead01");
}

#[test]
fn labels() {
    let (rsz, foo) = graph_with_root(&options(), "Foo");

    assert_eq!(rsz.instance_label(foo), "Foo[1]");
    assert_eq!(rsz.instance_label(InstanceId::NULL), "null");
    assert_eq!(rsz.instance_label(InstanceId(42)), "?[42]");
    assert_eq!(rsz.value_text(&Value::UserData(foo)), "Foo[1]");
}
