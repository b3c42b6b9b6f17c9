// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS1 serialization module.
//!
//! Packed little-endian encoding with no alignment and no header. Strings
//! carry a `u32` byte length and no terminator. `std_msgs/msg/Header` is
//! preceded on the wire by a legacy `uint32 seq`, written as zero and
//! dropped on read.

pub mod calculator;
pub mod codec;
pub mod cursor;
pub mod decoder;
pub mod encoder;

pub use calculator::Ros1Calculator;
pub use codec::Ros1Codec;
pub use cursor::Ros1Cursor;
pub use decoder::Ros1Decoder;
pub use encoder::Ros1Encoder;

use crate::core::{DecodedMessage, Result, TypeAccessor};

/// Encoded size of a message.
pub fn size<A: TypeAccessor + ?Sized>(
    message: &DecodedMessage,
    type_name: &str,
    store: &A,
) -> Result<usize> {
    Ros1Calculator::new().message(message, type_name, store)
}

/// Serialize a message.
pub fn serialize<A: TypeAccessor + ?Sized>(
    message: &DecodedMessage,
    type_name: &str,
    store: &A,
) -> Result<Vec<u8>> {
    let mut encoder = Ros1Encoder::new();
    encoder.encode_message(message, type_name, store)?;
    Ok(encoder.finish())
}

/// Serialize into `buffer` starting at `offset`, growing it as needed.
///
/// Bytes before `offset` are never touched. Returns the offset just past the
/// written message.
pub fn serialize_into<A: TypeAccessor + ?Sized>(
    message: &DecodedMessage,
    type_name: &str,
    store: &A,
    buffer: &mut Vec<u8>,
    offset: usize,
) -> Result<usize> {
    let mut head = std::mem::take(buffer);
    head.resize(offset, 0);
    let mut encoder = Ros1Encoder::with_buffer(head);
    let result = encoder.encode_message(message, type_name, store);
    let end = encoder.position();
    *buffer = encoder.finish();
    result.map(|()| end)
}

/// Deserialize a message.
pub fn deserialize<A: TypeAccessor + ?Sized>(
    data: &[u8],
    type_name: &str,
    store: &A,
) -> Result<DecodedMessage> {
    Ros1Decoder::new().decode(data, type_name, store)
}

/// Deserialize a message starting at `offset`.
pub fn deserialize_at<A: TypeAccessor + ?Sized>(
    data: &[u8],
    offset: usize,
    type_name: &str,
    store: &A,
) -> Result<(DecodedMessage, usize)> {
    Ros1Decoder::new().decode_at(data, offset, type_name, store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CodecValue, Typestore};

    #[test]
    fn test_serialize_into_offset() {
        let store = Typestore::with_builtins();
        let mut msg = DecodedMessage::new();
        msg.insert("data".into(), CodecValue::UInt16(0x0201));

        let mut buffer = vec![9, 9, 9, 9];
        let end = serialize_into(&msg, "std_msgs/msg/UInt16", &store, &mut buffer, 2).unwrap();
        assert_eq!(end, 4);
        assert_eq!(buffer, vec![9, 9, 1, 2]);

        let (decoded, end) = deserialize_at(&buffer, 2, "std_msgs/msg/UInt16", &store).unwrap();
        assert_eq!(decoded, msg);
        assert_eq!(end, 4);
    }
}
