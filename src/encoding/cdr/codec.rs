// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR codec implementation wrapping the decoder, encoder and calculator.

use super::{CdrCalculator, CdrDecoder, CdrEncoder};
use crate::core::{DecodedMessage, Result, TypeAccessor};
use crate::encoding::codec::{ByteOrder, MessageCodec, WireFormat};

/// CDR codec implementing the unified codec interface.
///
/// Encodes with a fixed byte order; decodes either order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CdrCodec {
    order: ByteOrder,
}

impl CdrCodec {
    /// Create a new little-endian CDR codec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a CDR codec that encodes with `order`.
    pub fn with_order(order: ByteOrder) -> Self {
        Self { order }
    }

    /// Byte order used when encoding.
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }
}

impl MessageCodec for CdrCodec {
    fn decode(
        &self,
        data: &[u8],
        type_name: &str,
        store: &dyn TypeAccessor,
    ) -> Result<DecodedMessage> {
        CdrDecoder::new().decode(data, type_name, store)
    }

    fn encode(
        &self,
        message: &DecodedMessage,
        type_name: &str,
        store: &dyn TypeAccessor,
    ) -> Result<Vec<u8>> {
        let mut encoder = CdrEncoder::with_order(self.order);
        encoder.encode_message(message, type_name, store)?;
        Ok(encoder.finish())
    }

    fn size(
        &self,
        message: &DecodedMessage,
        type_name: &str,
        store: &dyn TypeAccessor,
    ) -> Result<usize> {
        CdrCalculator::new().message(message, type_name, store)
    }

    fn wire_format(&self) -> WireFormat {
        WireFormat::Cdr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CodecValue, Typestore};

    #[test]
    fn test_cdr_codec_default() {
        let codec = CdrCodec::default();
        assert_eq!(codec.wire_format(), WireFormat::Cdr);
        assert_eq!(codec.byte_order(), ByteOrder::Little);
    }

    #[test]
    fn test_big_endian_round_trip() {
        let store = Typestore::with_builtins();
        let codec = CdrCodec::with_order(ByteOrder::Big);

        let mut msg = DecodedMessage::new();
        msg.insert("x".into(), CodecValue::Float64(1.0));
        msg.insert("y".into(), CodecValue::Float64(-2.0));
        msg.insert("z".into(), CodecValue::Float64(0.5));

        let data = codec.encode(&msg, "geometry_msgs/msg/Vector3", &store).unwrap();
        assert_eq!(&data[..4], &[0, 0, 0, 0]);
        assert_eq!(data.len(), codec.size(&msg, "geometry_msgs/msg/Vector3", &store).unwrap());
        assert_eq!(codec.decode(&data, "geometry_msgs/msg/Vector3", &store).unwrap(), msg);
    }
}
