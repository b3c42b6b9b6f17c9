// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR (Common Data Representation) module.
//!
//! Alignment-sensitive encoding: every primitive is aligned to its own width
//! measured from the end of the 4-byte encapsulation header. Strings carry a
//! `u32` length that counts a trailing NUL; sequences carry a `u32` count.

pub mod calculator;
pub mod codec;
pub mod cursor;
pub mod decoder;
pub mod encoder;

pub use calculator::CdrCalculator;
pub use codec::CdrCodec;
pub use cursor::{CdrCursor, CDR_HEADER_SIZE};
pub use decoder::CdrDecoder;
pub use encoder::{CdrEncoder, EncapsulationKind};

use crate::core::{DecodedMessage, Result, TypeAccessor};
use crate::encoding::ByteOrder;

/// Encoded size of a message, header included.
pub fn size<A: TypeAccessor + ?Sized>(
    message: &DecodedMessage,
    type_name: &str,
    store: &A,
) -> Result<usize> {
    CdrCalculator::new().message(message, type_name, store)
}

/// Serialize a message with a header for `order`.
pub fn serialize<A: TypeAccessor + ?Sized>(
    message: &DecodedMessage,
    type_name: &str,
    store: &A,
    order: ByteOrder,
) -> Result<Vec<u8>> {
    let mut encoder = CdrEncoder::with_order(order);
    encoder.encode_message(message, type_name, store)?;
    Ok(encoder.finish())
}

/// Serialize headerless payload into `buffer` starting at `offset`.
///
/// Alignment is measured from `offset`. The buffer grows as needed; bytes
/// before `offset` are never touched. Returns the offset just past the
/// written message.
pub fn serialize_into<A: TypeAccessor + ?Sized>(
    message: &DecodedMessage,
    type_name: &str,
    store: &A,
    order: ByteOrder,
    buffer: &mut Vec<u8>,
    offset: usize,
) -> Result<usize> {
    let mut encoder = CdrEncoder::at(std::mem::take(buffer), offset, order);
    let result = encoder.encode_message(message, type_name, store);
    let end = encoder.position();
    *buffer = encoder.finish();
    result.map(|()| end)
}

/// Deserialize a message with a header; byte order comes from the header.
pub fn deserialize<A: TypeAccessor + ?Sized>(
    data: &[u8],
    type_name: &str,
    store: &A,
) -> Result<DecodedMessage> {
    CdrDecoder::new().decode(data, type_name, store)
}

/// Deserialize headerless payload starting at `offset`.
pub fn deserialize_at<A: TypeAccessor + ?Sized>(
    data: &[u8],
    offset: usize,
    order: ByteOrder,
    type_name: &str,
    store: &A,
) -> Result<(DecodedMessage, usize)> {
    CdrDecoder::new().decode_at(data, offset, order, type_name, store)
}
