// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use robotypes::encoding::{cdr, ros1, ByteOrder};
use robotypes::{CodecValue, DecodedMessage, SchemaFormat, Typestore};

// ============================================================================
// Stores
// ============================================================================

/// Builtin store plus one `.msg` definition.
pub fn store_with_msg(name: &str, text: &str) -> Typestore {
    let mut store = Typestore::with_builtins();
    store
        .register_text(name, text, SchemaFormat::Msg)
        .expect("register msg definition");
    store
}

/// Builtin store plus one IDL document.
pub fn store_with_idl(name: &str, text: &str) -> Typestore {
    let mut store = Typestore::with_builtins();
    store
        .register_text(name, text, SchemaFormat::Idl)
        .expect("register idl definition");
    store
}

// ============================================================================
// Messages
// ============================================================================

/// Build a message from `(field, value)` pairs.
pub fn message<const N: usize>(fields: [(&str, CodecValue); N]) -> DecodedMessage {
    fields
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

pub fn time(sec: i32, nanosec: u32) -> CodecValue {
    CodecValue::Struct(message([
        ("sec", CodecValue::Int32(sec)),
        ("nanosec", CodecValue::UInt32(nanosec)),
    ]))
}

pub fn header(sec: i32, nanosec: u32, frame_id: &str) -> CodecValue {
    CodecValue::Struct(message([
        ("stamp", time(sec, nanosec)),
        ("frame_id", CodecValue::String(frame_id.to_string())),
    ]))
}

pub fn point(x: f64, y: f64, z: f64) -> CodecValue {
    CodecValue::Struct(message([
        ("x", CodecValue::Float64(x)),
        ("y", CodecValue::Float64(y)),
        ("z", CodecValue::Float64(z)),
    ]))
}

// ============================================================================
// Assertions
// ============================================================================

/// Encode with both codecs, check sizes and decode back to `msg`.
pub fn assert_round_trips(store: &Typestore, type_name: &str, msg: &DecodedMessage) {
    for order in [ByteOrder::Little, ByteOrder::Big] {
        let bytes = cdr::serialize(msg, type_name, store, order).expect("cdr serialize");
        assert_eq!(
            bytes.len(),
            cdr::size(msg, type_name, store).expect("cdr size"),
            "cdr size of {type_name}"
        );
        let decoded = cdr::deserialize(&bytes, type_name, store).expect("cdr deserialize");
        assert_eq!(&decoded, msg, "cdr {order:?} round trip of {type_name}");
    }

    let bytes = ros1::serialize(msg, type_name, store).expect("ros1 serialize");
    assert_eq!(
        bytes.len(),
        ros1::size(msg, type_name, store).expect("ros1 size"),
        "ros1 size of {type_name}"
    );
    let decoded = ros1::deserialize(&bytes, type_name, store).expect("ros1 deserialize");
    assert_eq!(&decoded, msg, "ros1 round trip of {type_name}");
}

/// Render bytes as spaced hex for readable assertion failures.
pub fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
