// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Unified codec interface over the supported wire formats.
//!
//! Both formats encode the same value tree against the same schemas, so the
//! trait takes the type name and a [`TypeAccessor`] instead of a per-format
//! schema object.
//!
//! ## Example
//!
//! ```
//! use robotypes::encoding::{CodecFactory, WireFormat};
//! use robotypes::{CodecValue, DecodedMessage, Typestore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Typestore::with_builtins();
//! let factory = CodecFactory::new();
//!
//! let mut msg = DecodedMessage::new();
//! msg.insert("data".into(), CodecValue::Float64(1.5));
//!
//! let codec = factory.get_codec(WireFormat::Ros1);
//! let bytes = codec.encode(&msg, "std_msgs/msg/Float64", &store)?;
//! assert_eq!(bytes.len(), 8);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use super::cdr::CdrCodec;
use super::ros1::Ros1Codec;
use crate::core::{DecodedMessage, Result, TypeAccessor};

/// Serialization format of a message payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    /// Aligned CDR with a 4-byte encapsulation header.
    Cdr,
    /// Packed little-endian ROS1 serialization.
    Ros1,
}

/// Error returned when parsing a `WireFormat` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseWireFormatError {
    _private: (),
}

impl std::fmt::Display for ParseWireFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid wire format name, expected 'cdr' or 'ros1'")
    }
}

impl std::error::Error for ParseWireFormatError {}

impl std::str::FromStr for WireFormat {
    type Err = ParseWireFormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cdr" => Ok(WireFormat::Cdr),
            "ros1" => Ok(WireFormat::Ros1),
            _ => Err(ParseWireFormatError { _private: () }),
        }
    }
}

impl WireFormat {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            WireFormat::Cdr => "cdr",
            WireFormat::Ros1 => "ros1",
        }
    }

    /// Detect the wire format from a channel's message-encoding label.
    ///
    /// Recognizes `cdr`, `ros2`, `ros2msg` and `ros1`, `ros1msg`
    /// (case-insensitive). Anything else yields `None`.
    pub fn detect(message_encoding: &str) -> Option<Self> {
        let lower = message_encoding.to_lowercase();
        if lower.contains("ros1") {
            Some(WireFormat::Ros1)
        } else if lower.contains("cdr") || lower.contains("ros2") {
            Some(WireFormat::Cdr)
        } else {
            None
        }
    }
}

impl std::fmt::Display for WireFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Byte order of a CDR payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

/// Codec interface for decoding and encoding messages by type name.
pub trait MessageCodec: Send + Sync {
    /// Decode raw message bytes into a value tree.
    fn decode(
        &self,
        data: &[u8],
        type_name: &str,
        store: &dyn TypeAccessor,
    ) -> Result<DecodedMessage>;

    /// Encode a value tree into raw bytes.
    fn encode(
        &self,
        message: &DecodedMessage,
        type_name: &str,
        store: &dyn TypeAccessor,
    ) -> Result<Vec<u8>>;

    /// Exact number of bytes [`encode`](Self::encode) would produce.
    fn size(
        &self,
        message: &DecodedMessage,
        type_name: &str,
        store: &dyn TypeAccessor,
    ) -> Result<usize>;

    /// The wire format this codec handles.
    fn wire_format(&self) -> WireFormat;
}

/// Hands out a codec for each wire format.
#[derive(Debug, Default)]
pub struct CodecFactory {
    cdr: CdrCodec,
    ros1: Ros1Codec,
}

impl CodecFactory {
    /// Create a factory with a little-endian CDR codec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a factory whose CDR codec encodes with `order`.
    pub fn with_cdr_order(order: ByteOrder) -> Self {
        Self {
            cdr: CdrCodec::with_order(order),
            ros1: Ros1Codec::new(),
        }
    }

    /// Get the codec for `format`.
    pub fn get_codec(&self, format: WireFormat) -> &dyn MessageCodec {
        match format {
            WireFormat::Cdr => &self.cdr,
            WireFormat::Ros1 => &self.ros1,
        }
    }
}
