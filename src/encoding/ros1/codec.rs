// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS1 codec implementation.

use super::{Ros1Calculator, Ros1Decoder, Ros1Encoder};
use crate::core::{DecodedMessage, Result, TypeAccessor};
use crate::encoding::codec::{MessageCodec, WireFormat};

/// ROS1 codec implementing the unified codec interface.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ros1Codec;

impl Ros1Codec {
    pub fn new() -> Self {
        Self
    }
}

impl MessageCodec for Ros1Codec {
    fn decode(
        &self,
        data: &[u8],
        type_name: &str,
        store: &dyn TypeAccessor,
    ) -> Result<DecodedMessage> {
        Ros1Decoder::new().decode(data, type_name, store)
    }

    fn encode(
        &self,
        message: &DecodedMessage,
        type_name: &str,
        store: &dyn TypeAccessor,
    ) -> Result<Vec<u8>> {
        let mut encoder = Ros1Encoder::new();
        encoder.encode_message(message, type_name, store)?;
        Ok(encoder.finish())
    }

    fn size(
        &self,
        message: &DecodedMessage,
        type_name: &str,
        store: &dyn TypeAccessor,
    ) -> Result<usize> {
        Ros1Calculator::new().message(message, type_name, store)
    }

    fn wire_format(&self) -> WireFormat {
        WireFormat::Ros1
    }
}
