// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS1 decoder.
//!
//! Decodes packed little-endian data by walking the schema of the requested
//! type. A `std_msgs/msg/Header` carries a leading `uint32 seq` on the wire
//! which is read and dropped.

use super::cursor::Ros1Cursor;
use crate::core::{DecodedMessage, Result as CoreResult, TypeAccessor};
use crate::encoding::wire::{self, WireReader};
use tracing::trace;

/// ROS1 decoder for schema-described messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ros1Decoder;

impl Ros1Decoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode a ROS1-encoded message. Trailing bytes are ignored.
    pub fn decode<A: TypeAccessor + ?Sized>(
        &self,
        data: &[u8],
        type_name: &str,
        store: &A,
    ) -> CoreResult<DecodedMessage> {
        let mut cursor = Ros1Cursor::new(data);
        let message = wire::read_message(&mut cursor, store, type_name, 0)?;
        trace!(
            type_name,
            consumed = cursor.position(),
            len = data.len(),
            "decoded ROS1 message"
        );
        Ok(message)
    }

    /// Decode a message starting at `offset`, returning it with the offset
    /// just past it.
    pub fn decode_at<A: TypeAccessor + ?Sized>(
        &self,
        data: &[u8],
        offset: usize,
        type_name: &str,
        store: &A,
    ) -> CoreResult<(DecodedMessage, usize)> {
        let mut cursor = Ros1Cursor::at(data, offset)?;
        let message = wire::read_message(&mut cursor, store, type_name, 0)?;
        Ok((message, cursor.position()))
    }
}
