// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR (Common Data Representation) decoder implementation.
//!
//! Decodes CDR-encoded binary data by walking the schema of the requested
//! type. Named references are resolved through a [`TypeAccessor`].

use super::cursor::CdrCursor;
use crate::core::{DecodedMessage, Result as CoreResult, TypeAccessor};
use crate::encoding::wire::{self, WireReader};
use crate::encoding::ByteOrder;
use tracing::trace;

/// CDR decoder for schema-described messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct CdrDecoder;

impl CdrDecoder {
    /// Create a new CDR decoder.
    pub fn new() -> Self {
        Self
    }

    /// Decode a CDR-encoded message.
    ///
    /// # Arguments
    ///
    /// * `data` - The CDR-encoded binary data (includes 4-byte header)
    /// * `type_name` - The type to decode
    /// * `store` - Where named references are resolved
    ///
    /// The byte order is taken from the header. Trailing bytes after the
    /// message are ignored.
    pub fn decode<A: TypeAccessor + ?Sized>(
        &self,
        data: &[u8],
        type_name: &str,
        store: &A,
    ) -> CoreResult<DecodedMessage> {
        let mut cursor = CdrCursor::new(data)?;
        let message = wire::read_message(&mut cursor, store, type_name, 0)?;
        trace!(
            type_name,
            consumed = cursor.position(),
            len = data.len(),
            "decoded CDR message"
        );
        Ok(message)
    }

    /// Decode headerless payload starting at `offset`.
    ///
    /// Alignment is measured from `offset`. Returns the message and the
    /// offset just past it.
    pub fn decode_at<A: TypeAccessor + ?Sized>(
        &self,
        data: &[u8],
        offset: usize,
        order: ByteOrder,
        type_name: &str,
        store: &A,
    ) -> CoreResult<(DecodedMessage, usize)> {
        let mut cursor = CdrCursor::at(data, offset, order)?;
        let message = wire::read_message(&mut cursor, store, type_name, 0)?;
        Ok((message, cursor.position()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CodecError, CodecValue, Typestore};
    use crate::schema::SchemaFormat;

    fn store(text: &str) -> Typestore {
        let mut store = Typestore::with_builtins();
        store.register_text("test/msg/T", text, SchemaFormat::Msg).unwrap();
        store
    }

    #[test]
    fn test_decode_primitives() {
        let store = store("int32 a\nfloat64 b\nstring c");
        let mut data = vec![0x00, 0x01, 0x00, 0x00];
        data.extend_from_slice(&(-5i32).to_le_bytes());
        data.extend_from_slice(&[0; 4]); // pad to 8
        data.extend_from_slice(&2.5f64.to_le_bytes());
        data.extend_from_slice(&3u32.to_le_bytes());
        data.extend_from_slice(b"hi\0");

        let msg = CdrDecoder::new().decode(&data, "test/msg/T", &store).unwrap();
        assert_eq!(msg["a"], CodecValue::Int32(-5));
        assert_eq!(msg["b"], CodecValue::Float64(2.5));
        assert_eq!(msg["c"], CodecValue::String("hi".into()));
    }

    #[test]
    fn test_decode_byte_sequence_as_bytes() {
        let store = store("uint8[] data\nchar[2] c");
        let mut data = vec![0x00, 0x01, 0x00, 0x00];
        data.extend_from_slice(&3u32.to_le_bytes());
        data.extend_from_slice(&[1, 2, 3, b'x', b'y']);

        let msg = CdrDecoder::new().decode(&data, "test/msg/T", &store).unwrap();
        assert_eq!(msg["data"], CodecValue::Bytes(vec![1, 2, 3]));
        assert_eq!(msg["c"], CodecValue::Bytes(vec![b'x', b'y']));
    }

    #[test]
    fn test_truncated_input_names_field() {
        let store = store("int32 a\nint32 b");
        let mut data = vec![0x00, 0x01, 0x00, 0x00];
        data.extend_from_slice(&1i32.to_le_bytes());
        data.extend_from_slice(&[0, 0]);

        let err = CdrDecoder::new().decode(&data, "test/msg/T", &store).unwrap_err();
        match err {
            CodecError::FieldDecodeError { field_name, cause, .. } => {
                assert_eq!(field_name, "b");
                assert!(cause.contains("Buffer too short"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_oversized_sequence_count() {
        let store = store("int32[] values");
        let mut data = vec![0x00, 0x01, 0x00, 0x00];
        data.extend_from_slice(&1000u32.to_le_bytes());
        data.extend_from_slice(&[0; 8]);

        let err = CdrDecoder::new().decode(&data, "test/msg/T", &store).unwrap_err();
        assert!(matches!(err, CodecError::FieldDecodeError { ref cause, .. } if cause.contains("exceeds")));
    }

    #[test]
    fn test_unknown_type() {
        let store = Typestore::new();
        let err = CdrDecoder::new()
            .decode(&[0, 1, 0, 0], "test/msg/Missing", &store)
            .unwrap_err();
        assert!(matches!(err, CodecError::TypeNotFound { .. }));
    }

    #[test]
    fn test_recursive_type_hits_depth_limit() {
        let mut store = Typestore::new();
        store
            .register_text("test/msg/R", "test/R next", SchemaFormat::Msg)
            .unwrap();
        let err = CdrDecoder::new()
            .decode(&[0, 1, 0, 0], "test/msg/R", &store)
            .unwrap_err();
        match &err {
            CodecError::InvalidSchema { schema_name, reason } => {
                assert_eq!(schema_name, "test/msg/R");
                assert!(reason.contains("nesting depth"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.kind(), crate::core::ErrorKind::Schema);
    }

    #[test]
    fn test_float128_unsupported() {
        let mut store = Typestore::new();
        store
            .register_text(
                "test/msg/Q",
                "module test { module msg { struct Q { long double q; }; }; };",
                SchemaFormat::Idl,
            )
            .unwrap();
        let data = vec![0u8; 4 + 16];
        let err = CdrDecoder::new().decode(&data, "test/msg/Q", &store).unwrap_err();
        assert!(matches!(err, CodecError::Unsupported { .. }));
    }

    #[test]
    fn test_decode_at_offset() {
        let store = store("uint16 a");
        let data = [0xFF, 0xFF, 0xFF, 0x34, 0x12];
        let (msg, end) = CdrDecoder::new()
            .decode_at(&data, 3, ByteOrder::Little, "test/msg/T", &store)
            .unwrap();
        assert_eq!(msg["a"], CodecValue::UInt16(0x1234));
        assert_eq!(end, 5);
    }
}
