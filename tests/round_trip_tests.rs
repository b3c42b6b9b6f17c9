// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Value round trips through both codecs.

mod common;

use common::{assert_round_trips, header, message, point, store_with_idl, store_with_msg};
use robotypes::encoding::{ros1, CodecFactory, WireFormat};
use robotypes::{CodecError, CodecValue, Typestore};

#[test]
fn test_round_trip_every_primitive() {
    let text = "bool b\nint8 i8\nuint8 u8\nint16 i16\nuint16 u16\nint32 i32\nuint32 u32\n\
                int64 i64\nuint64 u64\nfloat32 f32\nfloat64 f64\nstring s\nchar c\nbyte o";
    let store = store_with_msg("test_msgs/msg/All", text);
    let msg = message([
        ("b", CodecValue::Bool(true)),
        ("i8", CodecValue::Int8(-8)),
        ("u8", CodecValue::UInt8(8)),
        ("i16", CodecValue::Int16(-16)),
        ("u16", CodecValue::UInt16(16)),
        ("i32", CodecValue::Int32(-32)),
        ("u32", CodecValue::UInt32(32)),
        ("i64", CodecValue::Int64(-64)),
        ("u64", CodecValue::UInt64(u64::MAX)),
        ("f32", CodecValue::Float32(0.25)),
        ("f64", CodecValue::Float64(-1e300)),
        ("s", CodecValue::String("grüße".into())),
        ("c", CodecValue::UInt8(b'c')),
        ("o", CodecValue::UInt8(0xFF)),
    ]);
    assert_round_trips(&store, "test_msgs/msg/All", &msg);
}

#[test]
fn test_round_trip_collections() {
    let text = "uint8[] blob\nuint8[3] fixed_blob\nbool[] flags\nint32[2] pair\n\
                float64[<=4] bounded\nstring[] names\ngeometry_msgs/Point[] points";
    let store = store_with_msg("test_msgs/msg/Collections", text);
    let msg = message([
        ("blob", CodecValue::Bytes(vec![1, 2, 3, 4, 5])),
        ("fixed_blob", CodecValue::Bytes(vec![9, 8, 7])),
        (
            "flags",
            CodecValue::Array(vec![CodecValue::Bool(false), CodecValue::Bool(true)]),
        ),
        (
            "pair",
            CodecValue::Array(vec![CodecValue::Int32(-1), CodecValue::Int32(1)]),
        ),
        ("bounded", CodecValue::Array(vec![CodecValue::Float64(0.5)])),
        (
            "names",
            CodecValue::Array(vec![
                CodecValue::String(String::new()),
                CodecValue::String("x".into()),
            ]),
        ),
        (
            "points",
            CodecValue::Array(vec![point(1.0, 2.0, 3.0), point(-1.0, 0.0, 0.5)]),
        ),
    ]);
    assert_round_trips(&store, "test_msgs/msg/Collections", &msg);
}

#[test]
fn test_round_trip_header_and_nesting() {
    let store = Typestore::with_builtins();
    let msg = message([
        ("header", header(1_700_000_000, 500, "map")),
        (
            "pose",
            CodecValue::Struct(message([
                ("position", point(1.0, 2.0, 3.0)),
                (
                    "orientation",
                    CodecValue::Struct(message([
                        ("x", CodecValue::Float64(0.0)),
                        ("y", CodecValue::Float64(0.0)),
                        ("z", CodecValue::Float64(0.0)),
                        ("w", CodecValue::Float64(1.0)),
                    ])),
                ),
            ])),
        ),
    ]);
    assert_round_trips(&store, "geometry_msgs/msg/PoseStamped", &msg);
}

#[test]
fn test_round_trip_idl_definition() {
    let idl = r#"
module test_msgs { module msg {
  struct Sample {
    octet raw[4];
    sequence<double, 3> readings;
    string<8> tag;
    boolean ok;
  };
}; };
"#;
    let store = store_with_idl("test_msgs/msg/Sample", idl);
    let msg = message([
        ("raw", CodecValue::Bytes(vec![0xDE, 0xAD, 0xBE, 0xEF])),
        (
            "readings",
            CodecValue::Array(vec![CodecValue::Float64(1.0), CodecValue::Float64(2.0)]),
        ),
        ("tag", CodecValue::String("t".into())),
        ("ok", CodecValue::Bool(true)),
    ]);
    assert_round_trips(&store, "test_msgs/msg/Sample", &msg);
}

#[test]
fn test_ros1_static_16_64_layout() {
    let store = store_with_msg("test_msgs/msg/static_16_64", "uint16 u16\nuint64 u64");
    let msg = message([
        ("u16", CodecValue::UInt16(1)),
        ("u64", CodecValue::UInt64(2)),
    ]);
    let bytes = ros1::serialize(&msg, "test_msgs/msg/static_16_64", &store).expect("serialize");
    assert_eq!(bytes, vec![0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
}

#[test]
fn test_ros1_header_carries_seq() {
    let store = Typestore::with_builtins();
    let msg = match header(1, 2, "a") {
        CodecValue::Struct(msg) => msg,
        _ => unreachable!(),
    };
    let bytes = ros1::serialize(&msg, "std_msgs/msg/Header", &store).expect("serialize");
    assert_eq!(
        bytes,
        vec![0, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 1, 0, 0, 0, b'a']
    );
}

#[test]
fn test_integers_wrap_to_declared_width() {
    let store = store_with_msg("test_msgs/msg/Small", "uint8 a\nint16 b");
    let msg = message([("a", CodecValue::Int32(257)), ("b", CodecValue::UInt32(0x1_8000))]);
    let bytes = ros1::serialize(&msg, "test_msgs/msg/Small", &store).expect("serialize");
    assert_eq!(bytes, vec![0x01, 0x00, 0x80]);

    let decoded = ros1::deserialize(&bytes, "test_msgs/msg/Small", &store).expect("decode");
    assert_eq!(decoded["a"], CodecValue::UInt8(1));
    assert_eq!(decoded["b"], CodecValue::Int16(i16::MIN));
}

#[test]
fn test_encode_errors_name_the_field() {
    let store = store_with_msg("test_msgs/msg/Fixed", "int32[3] values\nstring name");
    let factory = CodecFactory::new();

    let short = message([
        (
            "values",
            CodecValue::Array(vec![CodecValue::Int32(1), CodecValue::Int32(2)]),
        ),
        ("name", CodecValue::String("n".into())),
    ]);
    let missing = message([(
        "values",
        CodecValue::Array(vec![CodecValue::Int32(0); 3]),
    )]);

    for format in [WireFormat::Cdr, WireFormat::Ros1] {
        let codec = factory.get_codec(format);
        let err = codec
            .encode(&short, "test_msgs/msg/Fixed", &store)
            .unwrap_err();
        assert!(
            matches!(err, CodecError::FieldEncodeError { ref field_name, .. } if field_name == "values"),
            "{format}: {err}"
        );

        let err = codec
            .encode(&missing, "test_msgs/msg/Fixed", &store)
            .unwrap_err();
        assert!(
            matches!(err, CodecError::FieldEncodeError { ref field_name, .. } if field_name == "name"),
            "{format}: {err}"
        );
    }
}

#[test]
fn test_nested_encode_error_path() {
    let store = Typestore::with_builtins();
    let msg = message([
        ("header", header(0, 0, "f")),
        (
            "pose",
            CodecValue::Struct(message([("position", point(1.0, 2.0, 3.0))])),
        ),
    ]);
    let err = ros1::serialize(&msg, "geometry_msgs/msg/PoseStamped", &store).unwrap_err();
    match err {
        CodecError::FieldEncodeError { field_name, .. } => {
            assert_eq!(field_name, "pose.orientation")
        }
        other => panic!("unexpected error: {other}"),
    }
}
