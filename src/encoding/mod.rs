// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message encoding/decoding implementations.
//!
//! - [`cdr`] - CDR (Common Data Representation) encoding/decoding
//! - [`ros1`] - ROS1 packed encoding/decoding
//! - [`transform`] - Direct conversion between the two
//! - [`codec`] - Unified codec interface
//! - [`wire`] - Schema walk shared by every codec

pub mod cdr;
pub mod codec;
pub mod ros1;
pub mod transform;
pub mod wire;

pub use cdr::{CdrCodec, CdrDecoder, CdrEncoder};
pub use codec::{ByteOrder, CodecFactory, MessageCodec, ParseWireFormatError, WireFormat};
pub use ros1::{Ros1Codec, Ros1Decoder, Ros1Encoder};
pub use transform::{cdr_to_ros1, convert, ros1_to_cdr, Direction};
