// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Direct conversion between CDR and ROS1 payloads.
//!
//! The converter reads one wire format and writes the other in a single
//! schema walk, without building a value tree. Output is byte-identical to
//! decoding with one codec and encoding with the other. String contents are
//! copied through unchecked.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::cdr::{CdrCursor, CdrEncoder};
use super::ros1::{Ros1Cursor, Ros1Encoder};
use super::wire;
use crate::core::{Result, TypeAccessor};

/// Conversion direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    CdrToRos1,
    Ros1ToCdr,
}

impl Direction {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Direction::CdrToRos1 => Direction::Ros1ToCdr,
            Direction::Ros1ToCdr => Direction::CdrToRos1,
        }
    }
}

/// Convert a CDR payload (either byte order) to ROS1.
pub fn cdr_to_ros1<A: TypeAccessor + ?Sized>(
    data: &[u8],
    type_name: &str,
    store: &A,
) -> Result<Vec<u8>> {
    let mut reader = CdrCursor::new(data)?;
    let mut writer = Ros1Encoder::with_buffer(Vec::with_capacity(data.len()));
    wire::transcode_message(&mut reader, &mut writer, store, type_name, 0)?;
    trace!(type_name, input = data.len(), output = writer.position(), "converted CDR to ROS1");
    Ok(writer.finish())
}

/// Convert a ROS1 payload to little-endian CDR.
pub fn ros1_to_cdr<A: TypeAccessor + ?Sized>(
    data: &[u8],
    type_name: &str,
    store: &A,
) -> Result<Vec<u8>> {
    let mut reader = Ros1Cursor::new(data);
    let mut writer = CdrEncoder::new();
    wire::transcode_message(&mut reader, &mut writer, store, type_name, 0)?;
    trace!(type_name, input = data.len(), output = writer.position(), "converted ROS1 to CDR");
    Ok(writer.finish())
}

/// Convert `data` in the given direction.
pub fn convert<A: TypeAccessor + ?Sized>(
    data: &[u8],
    type_name: &str,
    direction: Direction,
    store: &A,
) -> Result<Vec<u8>> {
    let result = match direction {
        Direction::CdrToRos1 => cdr_to_ros1(data, type_name, store),
        Direction::Ros1ToCdr => ros1_to_cdr(data, type_name, store),
    };
    if let Err(err) = &result {
        debug!(
            type_name,
            ?direction,
            kind = ?err.kind(),
            fields = ?err.log_fields(),
            "conversion failed"
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CodecError, CodecValue, DecodedMessage, Typestore};
    use crate::encoding::{cdr, ros1, ByteOrder};
    use crate::schema::SchemaFormat;

    fn header(frame: &str) -> DecodedMessage {
        let mut stamp = DecodedMessage::new();
        stamp.insert("sec".into(), CodecValue::Int32(12));
        stamp.insert("nanosec".into(), CodecValue::UInt32(34));
        let mut header = DecodedMessage::new();
        header.insert("stamp".into(), CodecValue::Struct(stamp));
        header.insert("frame_id".into(), CodecValue::String(frame.into()));
        header
    }

    #[test]
    fn test_header_seq_inserted_and_dropped() {
        let store = Typestore::with_builtins();
        let msg = header("base_link");
        let cdr_bytes = cdr::serialize(&msg, "std_msgs/msg/Header", &store, ByteOrder::Little).unwrap();
        let ros1_bytes = ros1::serialize(&msg, "std_msgs/msg/Header", &store).unwrap();

        assert_eq!(cdr_to_ros1(&cdr_bytes, "std_msgs/msg/Header", &store).unwrap(), ros1_bytes);
        assert_eq!(ros1_to_cdr(&ros1_bytes, "std_msgs/msg/Header", &store).unwrap(), cdr_bytes);
    }

    #[test]
    fn test_big_endian_input() {
        let store = Typestore::with_builtins();
        let msg = header("odom");
        let be = cdr::serialize(&msg, "std_msgs/msg/Header", &store, ByteOrder::Big).unwrap();
        let ros1_bytes = ros1::serialize(&msg, "std_msgs/msg/Header", &store).unwrap();
        assert_eq!(
            convert(&be, "std_msgs/msg/Header", Direction::CdrToRos1, &store).unwrap(),
            ros1_bytes
        );
    }

    #[test]
    fn test_truncated_input() {
        let mut store = Typestore::new();
        store
            .register_text("test/msg/T", "uint32[] values", SchemaFormat::Msg)
            .unwrap();
        let err = ros1_to_cdr(&[3, 0, 0, 0, 1, 0], "test/msg/T", &store).unwrap_err();
        assert!(matches!(err, CodecError::FieldDecodeError { ref cause, .. } if cause.contains("exceeds")));
    }

    #[test]
    fn test_convert_failure_keeps_field_context() {
        let mut store = Typestore::new();
        store
            .register_text("test/msg/T", "uint32[] values", SchemaFormat::Msg)
            .unwrap();
        let err = convert(&[3, 0, 0, 0, 1, 0], "test/msg/T", Direction::Ros1ToCdr, &store)
            .unwrap_err();
        let fields = err.log_fields();
        assert_eq!(fields[0], ("field", "values".to_string()));
        assert_eq!(fields[1], ("type", "uint32[]".to_string()));
    }

    #[test]
    fn test_direction_reversed() {
        assert_eq!(Direction::CdrToRos1.reversed(), Direction::Ros1ToCdr);
        assert_eq!(
            serde_json::to_string(&Direction::Ros1ToCdr).unwrap(),
            "\"ros1_to_cdr\""
        );
    }
}
